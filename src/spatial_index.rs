//! Jack hit-testing index.
//!
//! R-tree over jack bounding boxes, used to find the jack under a pointer
//! without scanning every jack in the diagram.

use crate::patchbay::JackId;
use kurbo::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A jack's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub jack: JackId,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    /// Bounding box of a circle.
    pub fn circle(jack: JackId, center: Point, radius: f64) -> Self {
        Self {
            jack,
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        }
    }

    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.jack == other.jack
    }
}

/// Point and range queries over jack bounds.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<JackId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Bulk-load from `(jack, center, radius)` triples.
    pub fn from_circles<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (JackId, Point, f64)>,
    {
        let entries: Vec<SpatialEntry> = items
            .into_iter()
            .map(|(jack, center, radius)| SpatialEntry::circle(jack, center, radius))
            .collect();
        let map = entries.iter().map(|e| (e.jack, *e)).collect();

        Self {
            tree: RTree::bulk_load(entries),
            entries: map,
        }
    }

    /// Insert or replace the entry for `jack`.
    pub fn insert(&mut self, jack: JackId, center: Point, radius: f64) {
        self.remove(jack);
        let entry = SpatialEntry::circle(jack, center, radius);
        self.tree.insert(entry);
        self.entries.insert(jack, entry);
    }

    pub fn remove(&mut self, jack: JackId) -> bool {
        match self.entries.remove(&jack) {
            Some(entry) => {
                self.tree.remove(&entry);
                true
            }
            None => false,
        }
    }

    /// Jacks whose bounding box contains `point`.
    pub fn query_point(&self, point: Point) -> Vec<JackId> {
        let envelope = AABB::from_point([point.x, point.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(point))
            .map(|entry| entry.jack)
            .collect()
    }

    /// Jacks whose bounding box intersects `rect`.
    pub fn query_rect(&self, rect: Rect) -> Vec<JackId> {
        let rect = rect.abs();
        let envelope = AABB::from_corners([rect.x0, rect.y0], [rect.x1, rect.y1]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.jack)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
