//! Cache for generated building specs.
//!
//! This module provides a cache that maps [`RoomId`] to generated
//! [`BuildingSpec`]s. Generation itself never caches; the cache belongs to the
//! caller (typically layout assembly) so repeated reloads do not regenerate
//! unchanged rooms.
//!
//! Typical usage:
//! - Look up a spec with [`BuildingSpecCache::get_or_generate`] by passing a
//!   room and its grouping index.
//! - When a room moves to a different grouping index only the palette is
//!   recomputed; geometry is reused.
//! - Call [`BuildingSpecCache::retain_rooms`] after deletions to drop stale entries.
use std::collections::{HashMap, HashSet};

use crate::building::{BuildingSpec, BuildingSpecGenerator, SpecGenerator};
use crate::citadel::RoomId;

/// Cache of building specs keyed by [`RoomId`].
pub struct BuildingSpecCache {
    entries: HashMap<RoomId, BuildingSpec>,
    generator: Box<dyn SpecGenerator>,
    hits: usize,
    rethemes: usize,
    misses: usize,
}

impl BuildingSpecCache {
    /// Creates a new, empty cache using the standard generator.
    pub fn new() -> Self {
        Self::with_generator(Box::new(BuildingSpecGenerator))
    }

    /// Creates a new, empty cache backed by a custom generator.
    pub fn with_generator(generator: Box<dyn SpecGenerator>) -> Self {
        Self {
            entries: HashMap::new(),
            generator,
            hits: 0,
            rethemes: 0,
            misses: 0,
        }
    }

    /// Gets the cached spec for a room, if present.
    pub fn get(&self, room: RoomId) -> Option<&BuildingSpec> {
        self.entries.get(&room)
    }

    /// Gets the spec for a room, generating or re-theming it as needed.
    pub fn get_or_generate(&mut self, room: RoomId, grouping_index: u32) -> &BuildingSpec {
        let entry = match self.entries.remove(&room) {
            Some(spec) if spec.grouping_index == grouping_index => {
                self.hits += 1;
                spec
            }
            Some(spec) => {
                self.rethemes += 1;
                spec.rethemed(grouping_index)
            }
            None => {
                self.misses += 1;
                self.generator.generate(room.uuid(), grouping_index)
            }
        };
        self.entries.entry(room).or_insert(entry)
    }

    /// Removes the cached spec for a room, returning it if it existed.
    pub fn remove(&mut self, room: RoomId) -> Option<BuildingSpec> {
        self.entries.remove(&room)
    }

    /// Drops every entry whose room is not in `live`.
    pub fn retain_rooms(&mut self, live: &HashSet<RoomId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| live.contains(id));
        before - self.entries.len()
    }

    /// Clears all entries from the cache.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, rethemes, misses)` since creation.
    pub fn stats(&self) -> (usize, usize, usize) {
        (self.hits, self.rethemes, self.misses)
    }
}

impl Default for BuildingSpecCache {
    fn default() -> Self {
        Self::new()
    }
}
