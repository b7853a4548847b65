// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local mirror of device points.

use std::collections::BTreeMap;

use crate::error::Error;
use crate::types::{PointId, PointValue};

use super::{Point, PointMetadata};

/// Metadata and current values of every point the device has described.
///
/// A value can only be stored for a point whose metadata is known; the store
/// never creates a record from a value alone.
///
/// # Examples
///
/// ```
/// use knv_heatpump::state::{PointMetadata, PointStore};
/// use knv_heatpump::types::{PointId, PointValue};
///
/// let id: PointId = "1.110.2.0".parse().unwrap();
/// let mut store = PointStore::new();
///
/// assert!(store.set_value(id, PointValue::new("50")).is_err());
///
/// store.upsert_metadata(PointMetadata::new(id));
/// let point = store.set_value(id, PointValue::new("50")).unwrap();
/// assert_eq!(point.value().and_then(PointValue::as_f64), Some(50.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: BTreeMap<PointId, Point>,
}

impl PointStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the metadata of a point.
    ///
    /// A value already known for the point is kept. Returns `true` if the
    /// point was not known before.
    pub fn upsert_metadata(&mut self, metadata: PointMetadata) -> bool {
        match self.points.get_mut(&metadata.path) {
            Some(point) => {
                point.set_metadata(metadata);
                false
            }
            None => {
                self.points.insert(metadata.path, Point::new(metadata));
                true
            }
        }
    }

    /// Stores the current value of a known point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPoint`] if no metadata exists for `path`.
    pub fn set_value(&mut self, path: PointId, value: PointValue) -> Result<&Point, Error> {
        let point = self.points.get_mut(&path).ok_or(Error::UnknownPoint(path))?;
        point.set_value(value);
        Ok(point)
    }

    /// Returns a point by identifier.
    #[must_use]
    pub fn get(&self, path: &PointId) -> Option<&Point> {
        self.points.get(path)
    }

    /// Returns `true` if metadata exists for `path`.
    #[must_use]
    pub fn contains(&self, path: &PointId) -> bool {
        self.points.contains_key(path)
    }

    /// Returns the number of known points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over all points in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    /// Returns a copy of every point, in identifier order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Point> {
        self.points.values().cloned().collect()
    }
}
