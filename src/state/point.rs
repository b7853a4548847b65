// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point metadata and snapshots.

use serde::{Deserialize, Serialize};

use crate::types::{ListEntry, PointId, PointType, PointValue};

/// Description of a point, as reported by the device in `HLInfo`.
///
/// Text fields are stored percent-decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMetadata {
    /// The point identifier.
    pub path: PointId,
    /// Human readable name.
    pub name: String,
    /// Unit of measurement, e.g. `°C`.
    pub unit: String,
    /// Whether the point accepts `setVMValue`.
    pub writeable: bool,
    /// Lower bound of the value.
    pub min: f64,
    /// Upper bound of the value.
    pub max: f64,
    /// Step between valid values.
    pub step: f64,
    /// Kind of value.
    pub point_type: PointType,
    /// Selectable entries of an enumeration point, in device order.
    pub list_entries: Option<Vec<ListEntry>>,
}

impl PointMetadata {
    /// Creates metadata with empty texts and zero bounds.
    #[must_use]
    pub fn new(path: PointId) -> Self {
        Self {
            path,
            name: String::new(),
            unit: String::new(),
            writeable: false,
            min: 0.0,
            max: 0.0,
            step: 0.0,
            point_type: PointType::default(),
            list_entries: None,
        }
    }

    /// Returns the display text of a list entry value, if this point has one.
    #[must_use]
    pub fn entry_text(&self, value: &str) -> Option<&str> {
        self.list_entries
            .as_ref()?
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.text.as_str())
    }
}

/// Read-only snapshot of one mirrored point.
///
/// Points are copies; holding one never blocks or aliases the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    metadata: PointMetadata,
    value: Option<PointValue>,
}

impl Point {
    /// Creates a point without a value.
    #[must_use]
    pub fn new(metadata: PointMetadata) -> Self {
        Self {
            metadata,
            value: None,
        }
    }

    /// Returns the point identifier.
    #[must_use]
    pub fn path(&self) -> PointId {
        self.metadata.path
    }

    /// Returns the point metadata.
    #[must_use]
    pub fn metadata(&self) -> &PointMetadata {
        &self.metadata
    }

    /// Returns the current value, if the device has reported one.
    #[must_use]
    pub fn value(&self) -> Option<&PointValue> {
        self.value.as_ref()
    }

    /// Returns the display text of the current value of an enumeration point.
    ///
    /// `None` for points without a matching list entry; the raw value is
    /// [`value`](Self::value).
    #[must_use]
    pub fn value_text(&self) -> Option<&str> {
        self.metadata.entry_text(self.value.as_ref()?.as_str())
    }

    pub(crate) fn set_metadata(&mut self, metadata: PointMetadata) {
        self.metadata = metadata;
    }

    pub(crate) fn set_value(&mut self, value: PointValue) {
        self.value = Some(value);
    }
}
