//! Placement of every visible room's building on the citadel grid.
//!
//! Palaces are walked in creation order, their wings in creation order and
//! each wing's non-archived rooms in creation order. The wing counter runs
//! across palaces and doubles as the palette grouping index.
use std::collections::HashSet;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::building::BuildingSpec;
use crate::citadel::arena::Citadel;
use crate::citadel::cache::BuildingSpecCache;
use crate::citadel::events::{CitadelEvent, CitadelEventKind, EventSink};
use crate::citadel::{RoomId, WingId};
use crate::error::{Error, Result};

/// A building placed at a grid position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub room_id: RoomId,
    pub wing_id: WingId,
    /// Global wing index, also the palette grouping index.
    pub wing_index: u32,
    /// Position of the room within its wing.
    pub room_index: u32,
    /// World position of the building origin; `y` is always zero.
    pub position: Vec3,
    pub building: BuildingSpec,
}

/// Grid spacing used for layout.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Distance along X between consecutive wings.
    pub wing_spacing: f32,
    /// Distance along X between rooms in the same row.
    pub room_spacing: f32,
    /// Rooms per row before wrapping along Z.
    pub rooms_per_row: u32,
    /// Distance along Z between rows.
    pub row_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wing_spacing: 50.0,
            room_spacing: 6.0,
            rooms_per_row: 10,
            row_spacing: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wing spacing.
    pub fn with_wing_spacing(mut self, wing_spacing: f32) -> Self {
        self.wing_spacing = wing_spacing;
        self
    }

    /// Sets the room spacing.
    pub fn with_room_spacing(mut self, room_spacing: f32) -> Self {
        self.room_spacing = room_spacing;
        self
    }

    /// Sets the number of rooms per row.
    pub fn with_rooms_per_row(mut self, rooms_per_row: u32) -> Self {
        self.rooms_per_row = rooms_per_row;
        self
    }

    /// Sets the row spacing.
    pub fn with_row_spacing(mut self, row_spacing: f32) -> Self {
        self.row_spacing = row_spacing;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !positive(self.wing_spacing) {
            return Err(Error::InvalidConfig("wing_spacing must be > 0".into()));
        }
        if !positive(self.room_spacing) {
            return Err(Error::InvalidConfig("room_spacing must be > 0".into()));
        }
        if self.rooms_per_row == 0 {
            return Err(Error::InvalidConfig("rooms_per_row must be > 0".into()));
        }
        if !positive(self.row_spacing) {
            return Err(Error::InvalidConfig("row_spacing must be > 0".into()));
        }
        Ok(())
    }

    /// Grid position of a room. A `rooms_per_row` of zero is treated as one.
    pub fn position_for(&self, wing_index: u32, room_index: u32) -> Vec3 {
        let per_row = self.rooms_per_row.max(1);
        let column = room_index % per_row;
        let row = room_index / per_row;
        Vec3::new(
            wing_index as f32 * self.wing_spacing + column as f32 * self.room_spacing,
            0.0,
            row as f32 * self.row_spacing,
        )
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Result of assembling a layout.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub placements: Vec<Placement>,
    /// Wings visited, including empty ones.
    pub wings_visited: usize,
    /// Archived rooms that were skipped.
    pub rooms_archived: usize,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            wings_visited: 0,
            rooms_archived: 0,
        }
    }

    pub fn placement(&self, room: RoomId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.room_id == room)
    }
}

/// Assembles layouts with a fixed configuration and a reusable spec cache.
pub struct CitadelAssembler<'a> {
    /// Layout configuration applied to this assembler.
    pub config: LayoutConfig,
    /// Cache used to reuse generated buildings across reloads.
    pub cache: &'a mut BuildingSpecCache,
}

impl<'a> CitadelAssembler<'a> {
    pub fn try_new(config: LayoutConfig, cache: &'a mut BuildingSpecCache) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, cache })
    }

    pub fn new(config: LayoutConfig, cache: &'a mut BuildingSpecCache) -> Self {
        debug_assert!(config.wing_spacing > 0.0, "wing_spacing must be > 0");
        debug_assert!(config.room_spacing > 0.0, "room_spacing must be > 0");
        debug_assert!(config.rooms_per_row > 0, "rooms_per_row must be > 0");
        debug_assert!(config.row_spacing > 0.0, "row_spacing must be > 0");
        Self { config, cache }
    }

    /// Assembles the layout for the citadel, returning the result.
    ///
    /// Fails with [`Error::InvalidConfig`] if the configuration was changed to
    /// an invalid value after construction.
    pub fn assemble(&mut self, citadel: &Citadel) -> Result<LayoutResult> {
        assemble_layout(citadel, &self.config, self.cache, None)
    }

    pub fn assemble_with_events(
        &mut self,
        citadel: &Citadel,
        sink: &mut dyn EventSink,
    ) -> Result<LayoutResult> {
        assemble_layout(citadel, &self.config, self.cache, Some(sink))
    }
}

/// Assembles the layout, optionally reporting events to `sink`.
///
/// The configuration is validated first; an invalid one yields
/// [`Error::InvalidConfig`] and no events.
pub fn assemble_layout(
    citadel: &Citadel,
    config: &LayoutConfig,
    cache: &mut BuildingSpecCache,
    sink: Option<&mut dyn EventSink>,
) -> Result<LayoutResult> {
    if let Some(s) = sink {
        assemble_layout_with_events(citadel, config, cache, s)
    } else {
        assemble_layout_with_events(citadel, config, cache, &mut ())
    }
}

pub fn assemble_layout_with_events(
    citadel: &Citadel,
    config: &LayoutConfig,
    cache: &mut BuildingSpecCache,
    sink: &mut dyn EventSink,
) -> Result<LayoutResult> {
    config.validate()?;
    let palaces = citadel.palaces();

    if sink.wants(CitadelEventKind::Layout) {
        sink.send(CitadelEvent::LayoutStarted {
            config: config.clone(),
            palace_count: palaces.len(),
        });
    }

    if palaces.is_empty() {
        debug!("Citadel has no visible palaces.");
    }

    let mut placements: Vec<Placement> = Vec::new();
    let mut wing_index: u32 = 0;
    let mut wings_visited = 0;
    let mut rooms_archived = 0;
    let mut live: HashSet<RoomId> = HashSet::new();

    for palace in &palaces {
        let wings = match citadel.wings_of(palace.id) {
            Ok(w) => w,
            Err(e) => {
                warn!("Skipping palace {}: {}.", palace.id, e);
                continue;
            }
        };
        info!("Palace '{}' | wings: {}.", palace.name, wings.len());

        for wing in wings {
            wings_visited += 1;
            let rooms = match citadel.rooms_of(wing.id, true) {
                Ok(r) => r,
                Err(e) => {
                    warn!("Skipping wing {}: {}.", wing.id, e);
                    wing_index += 1;
                    continue;
                }
            };

            let mut room_index: u32 = 0;
            for room in rooms {
                if room.archived {
                    rooms_archived += 1;
                    continue;
                }
                let building = cache.get_or_generate(room.id, wing_index).clone();
                let placement = Placement {
                    room_id: room.id,
                    wing_id: wing.id,
                    wing_index,
                    room_index,
                    position: config.position_for(wing_index, room_index),
                    building,
                };
                if sink.wants(CitadelEventKind::Placement) {
                    sink.send(CitadelEvent::BuildingPlaced {
                        placement: placement.clone(),
                    });
                }
                live.insert(room.id);
                placements.push(placement);
                room_index += 1;
            }

            if room_index == 0 {
                debug!("Wing '{}' has no visible rooms.", wing.title);
                if sink.wants(CitadelEventKind::Warning) {
                    sink.send(CitadelEvent::Warning {
                        context: format!("wing:{}", wing.id),
                        message: "Wing has no visible rooms".into(),
                    });
                }
            }
            wing_index += 1;
        }
    }

    let evicted = cache.retain_rooms(&live);
    if evicted > 0 {
        debug!("Evicted {} stale building(s) from the cache.", evicted);
    }

    info!(
        "Placed {} building(s) across {} wing(s).",
        placements.len(),
        wings_visited
    );

    let result = LayoutResult {
        placements,
        wings_visited,
        rooms_archived,
    };

    if sink.wants(CitadelEventKind::Layout) {
        sink.send(CitadelEvent::LayoutFinished {
            result: result.clone(),
        });
    }

    Ok(result)
}
