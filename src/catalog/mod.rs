// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point catalog: which point suffixes exist for which function.
//!
//! The device does not enumerate the points of a function; a client has to
//! know them. [`SuffixCatalog`] is the seam for that knowledge and
//! [`KnvCatalog`] is the table for KNV controllers.
//!
//! # Examples
//!
//! ```
//! use knv_heatpump::catalog::{KnvCatalog, expand_function_to_point_ids};
//! use knv_heatpump::types::FunctionDescriptor;
//!
//! let ids = expand_function_to_point_ids(&KnvCatalog, &FunctionDescriptor::new(1, 110, 3));
//! let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
//! assert_eq!(ids, ["1.110.3.0", "1.110.3.1", "1.110.3.4", "1.110.3.5"]);
//! ```

use std::collections::HashSet;

use crate::types::{FunctionDescriptor, PointId};

/// Source of the per-function point suffixes.
///
/// Implemented for [`KnvCatalog`] and for any
/// `Fn(&FunctionDescriptor) -> Vec<u32>` closure.
pub trait SuffixCatalog: Send + Sync {
    /// Returns the suffixes of the points that exist for `descriptor`, in
    /// catalog order. Unknown functions have no points.
    fn suffixes(&self, descriptor: &FunctionDescriptor) -> Vec<u32>;
}

impl<F> SuffixCatalog for F
where
    F: Fn(&FunctionDescriptor) -> Vec<u32> + Send + Sync,
{
    fn suffixes(&self, descriptor: &FunctionDescriptor) -> Vec<u32> {
        self(descriptor)
    }
}

/// Point table of KNV heat pump controllers.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnvCatalog;

/// Suffixes shared by every function of group 100.
const GROUP_100: &[u32] = &[
    0, 2, 3, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 25, 27, 100, 101, 201,
    202, 203, 204, 207, 209, 300, 301, 302, 303, 304, 400, 401, 402,
];

const GROUP_101: &[u32] = &[0, 1, 5, 6, 20];

const GROUP_110: &[u32] = &[0, 1, 4, 5];

const GROUP_120: &[u32] = &[0, 45, 53, 56, 57];

const GROUP_180_FUNCTION_0: &[u32] = &[
    0, 1, 2, 3, 4, 17, 18, 19, 20, 21, 22, 27, 28, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43,
];

const GROUP_180_FUNCTION_1: &[u32] = &[50, 51, 52, 53, 54, 55, 56, 57, 58, 100, 103, 150];

impl SuffixCatalog for KnvCatalog {
    fn suffixes(&self, descriptor: &FunctionDescriptor) -> Vec<u32> {
        match (descriptor.function_group_id, descriptor.function_id) {
            (100, _) => GROUP_100.to_vec(),
            (101, _) => GROUP_101.to_vec(),
            (110, _) => GROUP_110.to_vec(),
            (120, _) => GROUP_120.to_vec(),
            (180, 0) => GROUP_180_FUNCTION_0.to_vec(),
            (180, 1) => GROUP_180_FUNCTION_1.to_vec(),
            (190, _) => (0..32).chain(100..132).chain(200..232).collect(),
            _ => Vec::new(),
        }
    }
}

/// Expands a function into the identifiers of all its points.
///
/// One identifier is produced per catalog suffix, in catalog order.
#[must_use]
pub fn expand_function_to_point_ids(
    catalog: &(impl SuffixCatalog + ?Sized),
    descriptor: &FunctionDescriptor,
) -> Vec<PointId> {
    catalog
        .suffixes(descriptor)
        .into_iter()
        .map(|suffix| descriptor.point(suffix))
        .collect()
}

/// Functions whose points are always subscribed, whatever the device lists.
const BASELINE_FUNCTIONS: &[FunctionDescriptor] = &[
    FunctionDescriptor::new(1, 110, 254),
    FunctionDescriptor::new(1, 120, 0),
    FunctionDescriptor::new(1, 180, 0),
    FunctionDescriptor::new(1, 180, 1),
    FunctionDescriptor::new(1, 190, 1),
    FunctionDescriptor::new(1, 190, 2),
    FunctionDescriptor::new(1, 190, 51),
    FunctionDescriptor::new(1, 190, 52),
];

/// Functions of group 110 whose point `.0` is always subscribed.
const BASELINE_CIRCUIT_FUNCTIONS: &[std::ops::RangeInclusive<u32>] = &[
    1..=14,
    20..=25,
    30..=32,
    40..=42,
    50..=52,
    60..=62,
    70..=72,
    80..=82,
    100..=102,
    110..=112,
    120..=122,
    150..=152,
];

/// Returns the points subscribed on every connection.
///
/// These are the expansions of a fixed set of functions followed by a fixed
/// list of literal identifiers, without duplicates.
#[must_use]
pub fn baseline_point_ids(catalog: &(impl SuffixCatalog + ?Sized)) -> Vec<PointId> {
    let expanded = BASELINE_FUNCTIONS
        .iter()
        .flat_map(|descriptor| expand_function_to_point_ids(catalog, descriptor));

    let circuits = BASELINE_CIRCUIT_FUNCTIONS
        .iter()
        .flat_map(Clone::clone)
        .map(|function| PointId::new(1, 110, function, 0));

    let group_120 = (0..=4).map(|function| PointId::new(1, 120, function, 2));

    let mut seen = HashSet::new();
    expanded
        .chain(circuits)
        .chain(group_120)
        .filter(|id| seen.insert(*id))
        .collect()
}
