// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point type and list entry types.

use serde::{Deserialize, Serialize};

/// Kind of value a point carries.
///
/// The device reports the kind as a free-form `type` field. Known spellings
/// are mapped onto the named variants; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointType {
    /// A number with min/max/step bounds.
    #[default]
    Numeric,
    /// One of a fixed list of entries.
    Enumeration,
    /// Free text.
    Text,
    /// A type the library does not know.
    Unknown(String),
}

impl PointType {
    /// Maps the device's `type` field onto a point type.
    ///
    /// When the device omits the field, a point with list entries is an
    /// enumeration and everything else is numeric.
    #[must_use]
    pub fn from_wire(raw: Option<&str>, has_list_entries: bool) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return if has_list_entries {
                Self::Enumeration
            } else {
                Self::Numeric
            };
        };

        match raw.to_ascii_lowercase().as_str() {
            "numeric" | "number" | "float" | "int" | "integer" => Self::Numeric,
            "list" | "enum" | "enumeration" | "select" => Self::Enumeration,
            "string" | "text" => Self::Text,
            _ => Self::Unknown(raw.to_string()),
        }
    }
}

/// One selectable entry of an enumeration point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListEntry {
    /// The raw value written to select this entry.
    pub value: String,
    /// The decoded display text.
    pub text: String,
}

impl ListEntry {
    /// Creates a new list entry.
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}
