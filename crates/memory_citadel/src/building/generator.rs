//! Deterministic building generation.
//!
//! Draw order is fixed: wall height, roof style, tower, decoration count,
//! then one radius draw per decoration in increasing index order. Changing
//! that order changes every building ever generated.
use std::f64::consts::TAU;

use uuid::Uuid;

use crate::building::palette::Palette;
use crate::building::{BuildingSpec, Decoration, RoofStyle};
use crate::error::Result;
use crate::random::{seed_for_identifier, seed_from_slice, SeededRandomSource};

pub const WALL_HEIGHT_CHOICES: u32 = 3;
pub const ROOF_STYLE_CHOICES: u32 = 3;
/// A tower is added when the uniform draw is strictly above this value.
pub const TOWER_THRESHOLD: f64 = 0.8;
pub const DECORATION_CHOICES: u32 = 3;
pub const DECORATION_BASE_RADIUS: f64 = 5.0;
pub const DECORATION_RADIUS_JITTER: f64 = 0.5;

/// Trait for anything that turns an identifier into a [`BuildingSpec`].
pub trait SpecGenerator: Send + Sync {
    fn generate(&self, id: &Uuid, grouping_index: u32) -> BuildingSpec;
}

/// The standard generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildingSpecGenerator;

impl BuildingSpecGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate from an already derived seed.
    pub fn generate_from_seed(&self, seed: u64, grouping_index: u32) -> BuildingSpec {
        let mut source = SeededRandomSource::new(seed);

        let wall_height_units = source.bounded(WALL_HEIGHT_CHOICES) + 1;
        let roof_style = RoofStyle::from_draw(source.bounded(ROOF_STYLE_CHOICES));
        let has_tower = source.next_uniform_float() > TOWER_THRESHOLD;
        let decoration_count = source.bounded(DECORATION_CHOICES) + 1;

        let decorations = (0..decoration_count)
            .map(|i| {
                let angle = TAU * i as f64 / decoration_count as f64;
                let radius =
                    DECORATION_BASE_RADIUS + source.next_uniform_float() * DECORATION_RADIUS_JITTER;
                Decoration {
                    index: i,
                    angle: angle as f32,
                    radius: radius as f32,
                }
            })
            .collect();

        BuildingSpec {
            seed,
            grouping_index,
            wall_height_units,
            roof_style,
            has_tower,
            decorations,
            palette: Palette::derive(seed, grouping_index),
        }
    }
}

impl SpecGenerator for BuildingSpecGenerator {
    fn generate(&self, id: &Uuid, grouping_index: u32) -> BuildingSpec {
        self.generate_from_seed(seed_for_identifier(id), grouping_index)
    }
}

/// Generate the building for a room identifier.
pub fn generate_building_spec(id: &Uuid, grouping_index: u32) -> BuildingSpec {
    BuildingSpecGenerator.generate(id, grouping_index)
}

/// Generate the building from raw identifier bytes.
///
/// Fails with [`crate::error::Error::InvalidInput`] unless exactly 16 bytes are given.
pub fn generate_building_spec_from_slice(bytes: &[u8], grouping_index: u32) -> Result<BuildingSpec> {
    let seed = seed_from_slice(bytes)?;
    Ok(BuildingSpecGenerator.generate_from_seed(seed, grouping_index))
}
