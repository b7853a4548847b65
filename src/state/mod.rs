// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local mirror of the device's points.
//!
//! [`PointStore`] keeps the [`PointMetadata`] reported by `HLInfo` and the
//! values reported by `HLVal`. [`Point`] is the read-only snapshot handed to
//! callbacks and returned by session queries.

mod point;
mod point_store;

pub use point::{Point, PointMetadata};
pub use point_store::PointStore;
