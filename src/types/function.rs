// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Function descriptor type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PointId;

/// A function of the device, as reported by `getListFunctions`.
///
/// The device groups its points in a two-level namespace: a function group
/// (heating circuit, compressor, ...) and a function inside that group.
/// Each function exposes a device-specific set of point suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// The unit the function lives on.
    #[serde(rename = "unitId")]
    pub unit_id: u32,
    /// The function group.
    #[serde(rename = "functiongroupId")]
    pub function_group_id: u32,
    /// The function inside the group.
    #[serde(rename = "functionId")]
    pub function_id: u32,
}

impl FunctionDescriptor {
    /// Creates a new function descriptor.
    #[must_use]
    pub const fn new(unit_id: u32, function_group_id: u32, function_id: u32) -> Self {
        Self {
            unit_id,
            function_group_id,
            function_id,
        }
    }

    /// Returns the point of this function with the given suffix.
    #[must_use]
    pub const fn point(&self, suffix: u32) -> PointId {
        PointId::new(
            self.unit_id,
            self.function_group_id,
            self.function_id,
            suffix,
        )
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.unit_id, self.function_group_id, self.function_id
        )
    }
}
