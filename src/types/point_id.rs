// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

use super::FunctionDescriptor;

/// Identifier of one device variable.
///
/// Points are addressed as `unit.functiongroup.function.suffix`, for example
/// `1.110.2.0`. The identifier is stable across sessions and is the key of
/// both the metadata and the value of a point.
///
/// # Examples
///
/// ```
/// use knv_heatpump::types::PointId;
///
/// let id: PointId = "1.110.2.0".parse().unwrap();
/// assert_eq!(id.function_group(), 110);
/// assert_eq!(id.to_string(), "1.110.2.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    unit: u32,
    function_group: u32,
    function: u32,
    suffix: u32,
}

impl PointId {
    /// Creates a point identifier from its four components.
    #[must_use]
    pub const fn new(unit: u32, function_group: u32, function: u32, suffix: u32) -> Self {
        Self {
            unit,
            function_group,
            function,
            suffix,
        }
    }

    /// Returns the unit component.
    #[must_use]
    pub const fn unit(&self) -> u32 {
        self.unit
    }

    /// Returns the function group component.
    #[must_use]
    pub const fn function_group(&self) -> u32 {
        self.function_group
    }

    /// Returns the function component.
    #[must_use]
    pub const fn function(&self) -> u32 {
        self.function
    }

    /// Returns the per-function suffix.
    #[must_use]
    pub const fn suffix(&self) -> u32 {
        self.suffix
    }

    /// Returns the function this point belongs to.
    #[must_use]
    pub const fn descriptor(&self) -> FunctionDescriptor {
        FunctionDescriptor::new(self.unit, self.function_group, self.function)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.unit, self.function_group, self.function, self.suffix
        )
    }
}

impl FromStr for PointId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidPointId(s.to_string());

        let mut parts = s.split('.');
        let mut next = || -> Result<u32, ParseError> {
            parts
                .next()
                .and_then(|part| part.trim().parse().ok())
                .ok_or_else(invalid)
        };

        let id = Self::new(next()?, next()?, next()?, next()?);

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(id)
    }
}

impl Serialize for PointId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PointId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_components() {
        let id: PointId = "1.180.0.42".parse().unwrap();
        assert_eq!(id.unit(), 1);
        assert_eq!(id.function_group(), 180);
        assert_eq!(id.function(), 0);
        assert_eq!(id.suffix(), 42);
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(PointId::new(1, 190, 51, 231).to_string(), "1.190.51.231");
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert!("1.110.2".parse::<PointId>().is_err());
        assert!("1.110.2.0.7".parse::<PointId>().is_err());
        assert!("".parse::<PointId>().is_err());
    }

    #[test]
    fn parse_rejects_non_numeric() {
        let err = "1.abc.2.0".parse::<PointId>().unwrap_err();
        assert!(matches!(err, ParseError::InvalidPointId(ref s) if s == "1.abc.2.0"));
    }

    #[test]
    fn descriptor_drops_suffix() {
        let id = PointId::new(1, 110, 254, 4);
        assert_eq!(id.descriptor(), FunctionDescriptor::new(1, 110, 254));
    }

    #[test]
    fn serde_uses_dotted_string() {
        let id = PointId::new(1, 110, 2, 0);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1.110.2.0\"");

        let back: PointId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ordering_is_numeric() {
        let low = PointId::new(1, 110, 2, 0);
        let high = PointId::new(1, 110, 10, 0);
        assert!(low < high);
    }
}
