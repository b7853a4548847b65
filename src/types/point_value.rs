// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current value of a point.
///
/// The device reports every value as a URL-escaped string. The value is
/// stored decoded; numeric accessors parse it on demand.
///
/// # Examples
///
/// ```
/// use knv_heatpump::types::PointValue;
///
/// let value = PointValue::from_wire("21.5");
/// assert_eq!(value.as_f64(), Some(21.5));
///
/// let text = PointValue::from_wire("Auto%20Mode");
/// assert_eq!(text.as_str(), "Auto Mode");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointValue(String);

impl PointValue {
    /// Creates a value from an already decoded string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a value from its percent-encoded wire form.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        Self(percent_decode(raw))
    }

    /// Returns the decoded value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the value as a floating point number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse().ok()
    }

    /// Parses the value as an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    /// Consumes the value and returns the decoded string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PointValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Decodes a percent-encoded device string.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub(crate) fn percent_decode(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
