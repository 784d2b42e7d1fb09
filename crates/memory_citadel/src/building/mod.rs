//! Building descriptions generated for memory rooms.
//!
//! A [`BuildingSpec`] is an immutable value: geometry choices drawn from a
//! [`crate::random::SeededRandomSource`] plus a [`Palette`] computed directly
//! from the seed and grouping index. Renderers consume it (or the derived
//! [`blueprint::Blueprint`]) without ever seeing the random stream.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod blueprint;
pub mod generator;
pub mod palette;

pub use blueprint::{Blueprint, Part, PartKind, PartShape};
pub use generator::{
    generate_building_spec, generate_building_spec_from_slice, BuildingSpecGenerator,
    SpecGenerator,
};
pub use palette::{CrownTint, ElementColor, Palette, PaletteBand, StructuralElement};

/// Shape of the roof placed on top of the walls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoofStyle {
    Pyramid,
    Flat,
    Cone,
}

impl RoofStyle {
    pub const ALL: [RoofStyle; 3] = [RoofStyle::Pyramid, RoofStyle::Flat, RoofStyle::Cone];

    /// Map a draw in `[0, 3)` to a roof style. Out-of-range values wrap.
    pub fn from_draw(draw: u32) -> Self {
        Self::ALL[(draw % 3) as usize]
    }
}

/// A decorative tree around the building.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    /// Position of this decoration in the ring, starting at zero.
    pub index: u32,
    /// Angle around the building in radians.
    pub angle: f32,
    /// Distance from the building centre.
    pub radius: f32,
}

impl Decoration {
    /// Ground-plane offset `(x, z)` from the building centre.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.angle.cos() * self.radius, self.angle.sin() * self.radius)
    }
}

/// Immutable description of one generated building.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct BuildingSpec {
    /// Seed derived from the room identifier.
    pub seed: u64,
    /// Grouping index the palette was derived for.
    pub grouping_index: u32,
    /// Wall height in whole units, `1..=3`.
    pub wall_height_units: u32,
    pub roof_style: RoofStyle,
    pub has_tower: bool,
    /// Decorations in ring order; never empty.
    pub decorations: Vec<Decoration>,
    pub palette: Palette,
}

impl BuildingSpec {
    pub fn decoration_count(&self) -> usize {
        self.decorations.len()
    }

    /// True when both specs describe the same shape, ignoring colour.
    pub fn same_geometry(&self, other: &BuildingSpec) -> bool {
        self.wall_height_units == other.wall_height_units
            && self.roof_style == other.roof_style
            && self.has_tower == other.has_tower
            && self.decorations == other.decorations
    }

    /// Copy of this spec re-coloured for another grouping index.
    ///
    /// Geometry is untouched; no random draws are replayed.
    pub fn rethemed(&self, grouping_index: u32) -> BuildingSpec {
        BuildingSpec {
            grouping_index,
            palette: Palette::derive(self.seed, grouping_index),
            ..self.clone()
        }
    }
}
