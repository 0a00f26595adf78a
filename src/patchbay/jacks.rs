use crate::constants::UNPATCHED_JACK_COLOR;
use crate::error::{PatchbayError, PatchbayResult};
use crate::layout::DiagramLayout;
use crate::spatial_index::SpatialIndex;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a jack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JackId(pub u64);

impl fmt::Display for JackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "jack-{}", self.0)
    }
}

/// A connectable point on the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Jack {
    id: JackId,
    key: String,
    position: Point,
    radius: f64,
    patched: bool,
    fill: String,
}

impl Jack {
    pub fn new(id: JackId, key: impl Into<String>, position: Point, radius: f64) -> Self {
        Self {
            id,
            key: key.into(),
            position,
            radius,
            patched: false,
            fill: UNPATCHED_JACK_COLOR.to_string(),
        }
    }

    pub fn id(&self) -> JackId {
        self.id
    }

    /// Layout key, `row-group-column`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_patched(&self) -> bool {
        self.patched
    }

    /// Cable color while patched, black otherwise.
    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn contains(&self, point: Point) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }

    pub(crate) fn patch(&mut self, color: &str) {
        self.patched = true;
        self.fill = color.to_string();
    }

    pub(crate) fn unpatch(&mut self) {
        self.patched = false;
        self.fill = UNPATCHED_JACK_COLOR.to_string();
    }
}

/// All jacks of a diagram with point lookup.
#[derive(Default)]
pub struct JackRegistry {
    jacks: BTreeMap<JackId, Jack>,
    index: SpatialIndex,
    next_id: u64,
}

impl JackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One jack per layout slot, numbered in layout order.
    pub fn from_layout(layout: &DiagramLayout) -> Self {
        let mut registry = Self::new();
        for slot in layout.jacks() {
            registry.insert(slot.key.clone(), slot.center, slot.radius);
        }
        registry
    }

    pub fn insert(&mut self, key: impl Into<String>, position: Point, radius: f64) -> JackId {
        let id = JackId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, position, radius);
        self.jacks.insert(id, Jack::new(id, key, position, radius));
        id
    }

    pub fn get(&self, id: JackId) -> Option<&Jack> {
        self.jacks.get(&id)
    }

    pub fn lookup(&self, id: JackId) -> PatchbayResult<&Jack> {
        self.jacks.get(&id).ok_or(PatchbayError::UnknownJack(id))
    }

    pub(crate) fn lookup_mut(&mut self, id: JackId) -> PatchbayResult<&mut Jack> {
        self.jacks.get_mut(&id).ok_or(PatchbayError::UnknownJack(id))
    }

    pub fn by_key(&self, key: &str) -> Option<&Jack> {
        self.jacks.values().find(|jack| jack.key == key)
    }

    /// The jack under a logical point. Overlapping jacks resolve to the
    /// one whose center is closest.
    pub fn hit_test(&self, point: Point) -> Option<JackId> {
        crate::profile_scope!("jack_hit_test");
        self.index
            .query_point(point)
            .into_iter()
            .filter_map(|id| self.jacks.get(&id))
            .filter(|jack| jack.contains(point))
            .min_by(|a, b| {
                a.position
                    .distance_squared(point)
                    .total_cmp(&b.position.distance_squared(point))
            })
            .map(Jack::id)
    }

    /// Jacks inside a logical rectangle.
    pub fn within(&self, rect: Rect) -> Vec<JackId> {
        self.index.query_rect(rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Jack> {
        self.jacks.values()
    }

    pub fn len(&self) -> usize {
        self.jacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jacks.is_empty()
    }
}

impl fmt::Debug for JackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JackRegistry")
            .field("jacks", &self.jacks.len())
            .finish()
    }
}
