// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered set of subscribed points.

use std::collections::HashSet;

use crate::types::PointId;

/// Points the session holds a hotlink for.
///
/// Keeps insertion order so hotlinks are re-added in the order they were
/// first requested. Entries are never removed during a session.
///
/// # Examples
///
/// ```
/// use knv_heatpump::subscription::SubscriptionSet;
/// use knv_heatpump::types::PointId;
///
/// let mut set = SubscriptionSet::new();
/// assert!(set.insert(PointId::new(1, 110, 2, 0)));
/// assert!(!set.insert(PointId::new(1, 110, 2, 0)));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubscriptionSet {
    order: Vec<PointId>,
    members: HashSet<PointId>,
}

impl SubscriptionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point. Returns `false` if it was already present.
    pub fn insert(&mut self, point: PointId) -> bool {
        if self.members.insert(point) {
            self.order.push(point);
            true
        } else {
            false
        }
    }

    /// Adds every point, returning the ones that were new, in order.
    pub fn extend_new(&mut self, points: impl IntoIterator<Item = PointId>) -> Vec<PointId> {
        points.into_iter().filter(|point| self.insert(*point)).collect()
    }

    /// Returns `true` if the point is subscribed.
    #[must_use]
    pub fn contains(&self, point: &PointId) -> bool {
        self.members.contains(point)
    }

    /// Returns the number of subscribed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PointId> {
        self.order.iter()
    }

    /// Returns a copy of the points in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<PointId> {
        self.order.clone()
    }
}
