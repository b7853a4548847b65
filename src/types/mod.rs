// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for addressing and describing device points.
//!
//! - [`PointId`]: the `unit.functiongroup.function.suffix` address of a point
//! - [`FunctionDescriptor`]: a function as reported by the device
//! - [`PointValue`]: a decoded point value
//! - [`PointType`] and [`ListEntry`]: point kind metadata

mod function;
mod point_id;
mod point_type;
mod point_value;

pub use function::FunctionDescriptor;
pub use point_id::PointId;
pub use point_type::{ListEntry, PointType};
pub use point_value::PointValue;

pub(crate) use point_value::percent_decode;
