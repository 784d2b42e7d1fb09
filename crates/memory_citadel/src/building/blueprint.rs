//! Renderer-agnostic part list for a building.
//!
//! A [`Blueprint`] lays the parts of a [`BuildingSpec`] out in building-local
//! space (Y up, origin at the centre of the foundation's base). Each part is
//! plain data: a shape, its bounding size, its centre and a colour. Turning
//! that into meshes and materials is left to the renderer.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::building::palette::{ElementColor, StructuralElement, TRUNK_COLOR};
use crate::building::{BuildingSpec, RoofStyle};

pub const FOOTPRINT_WIDTH: f32 = 4.0;
pub const FOOTPRINT_LENGTH: f32 = 4.0;
pub const FOUNDATION_HEIGHT: f32 = 0.5;
pub const FOUNDATION_CHAMFER: f32 = 0.1;
/// Walls and roof are inset to this fraction of the footprint.
pub const UPPER_INSET: f32 = 0.9;
pub const WALL_CHAMFER: f32 = 0.05;
pub const ROOF_HEIGHT: f32 = 1.0;
pub const POLE_RADIUS: f32 = 0.05;
pub const POLE_HEIGHT: f32 = 1.2;
pub const FLAG_WIDTH: f32 = 1.0;
pub const FLAG_HEIGHT: f32 = 0.4;
pub const TRUNK_RADIUS: f32 = 0.1;
pub const TRUNK_HEIGHT: f32 = 1.0;
pub const CROWN_RADIUS: f32 = 0.4;
pub const CROWN_HEIGHT: f32 = 0.8;
/// Height of the crown centre above the ground.
pub const CROWN_ELEVATION: f32 = 1.2;

/// What a part represents.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Foundation,
    Walls,
    Roof,
    TowerPole,
    TowerFlag,
    TreeTrunk { decoration: u32 },
    TreeCrown { decoration: u32 },
}

/// Primitive shape of a part.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartShape {
    Box { chamfer: f32 },
    Pyramid,
    Cone { top_radius: f32, bottom_radius: f32 },
    Cylinder { radius: f32 },
    Plane,
}

/// One primitive of the building.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub kind: PartKind,
    pub shape: PartShape,
    /// Bounding size `(width, height, length)`.
    pub size: Vec3,
    /// Centre of the part in building-local space.
    pub position: Vec3,
    /// Rotation about the Y axis in radians.
    pub yaw: f32,
    pub color: ElementColor,
}

impl Part {
    /// Centre as a `mint` vector for renderers that do not use `glam`.
    pub fn position_mint(&self) -> mint::Vector3<f32> {
        self.position.into()
    }

    /// Size as a `mint` vector for renderers that do not use `glam`.
    pub fn size_mint(&self) -> mint::Vector3<f32> {
        self.size.into()
    }

    /// Top of the part's bounding box.
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }
}

/// Ordered part list for one building.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    parts: Vec<Part>,
}

impl Blueprint {
    pub fn from_spec(spec: &BuildingSpec) -> Self {
        let palette = &spec.palette;
        let mut parts = Vec::with_capacity(5 + spec.decorations.len() * 2);

        parts.push(Part {
            kind: PartKind::Foundation,
            shape: PartShape::Box {
                chamfer: FOUNDATION_CHAMFER,
            },
            size: Vec3::new(FOOTPRINT_WIDTH, FOUNDATION_HEIGHT, FOOTPRINT_LENGTH),
            position: Vec3::new(0.0, FOUNDATION_HEIGHT / 2.0, 0.0),
            yaw: 0.0,
            color: palette.color(StructuralElement::Foundation),
        });

        let upper_w = FOOTPRINT_WIDTH * UPPER_INSET;
        let upper_l = FOOTPRINT_LENGTH * UPPER_INSET;
        let wall_height = spec.wall_height_units as f32;
        parts.push(Part {
            kind: PartKind::Walls,
            shape: PartShape::Box {
                chamfer: WALL_CHAMFER,
            },
            size: Vec3::new(upper_w, wall_height, upper_l),
            position: Vec3::new(0.0, FOUNDATION_HEIGHT + wall_height / 2.0, 0.0),
            yaw: 0.0,
            color: palette.color(StructuralElement::Walls),
        });

        let roof_base = FOUNDATION_HEIGHT + wall_height;
        let (roof_shape, roof_size) = match spec.roof_style {
            RoofStyle::Pyramid => (
                PartShape::Pyramid,
                Vec3::new(upper_w, ROOF_HEIGHT, upper_l),
            ),
            RoofStyle::Flat => (
                PartShape::Box { chamfer: 0.0 },
                Vec3::new(upper_w, ROOF_HEIGHT, upper_l),
            ),
            RoofStyle::Cone => {
                let r = FOOTPRINT_WIDTH.max(FOOTPRINT_LENGTH) * 0.5;
                (
                    PartShape::Cone {
                        top_radius: 0.0,
                        bottom_radius: r,
                    },
                    Vec3::new(r * 2.0, ROOF_HEIGHT, r * 2.0),
                )
            }
        };
        parts.push(Part {
            kind: PartKind::Roof,
            shape: roof_shape,
            size: roof_size,
            position: Vec3::new(0.0, roof_base + ROOF_HEIGHT / 2.0, 0.0),
            yaw: 0.0,
            color: palette.color(StructuralElement::Roof),
        });

        if spec.has_tower {
            let pole_position = Vec3::new(0.0, roof_base + ROOF_HEIGHT + POLE_HEIGHT / 2.0, 0.0);
            parts.push(Part {
                kind: PartKind::TowerPole,
                shape: PartShape::Cylinder {
                    radius: POLE_RADIUS,
                },
                size: Vec3::new(POLE_RADIUS * 2.0, POLE_HEIGHT, POLE_RADIUS * 2.0),
                position: pole_position,
                yaw: 0.0,
                color: palette.color(StructuralElement::TowerPole),
            });
            parts.push(Part {
                kind: PartKind::TowerFlag,
                shape: PartShape::Plane,
                size: Vec3::new(FLAG_WIDTH, FLAG_HEIGHT, 0.0),
                position: pole_position + Vec3::new(FLAG_WIDTH / 2.0, 0.0, 0.0),
                yaw: -std::f32::consts::FRAC_PI_2,
                color: palette.color(StructuralElement::TowerFlag),
            });
        }

        let crown_color = palette.crown.color();
        for decoration in &spec.decorations {
            let ground = decoration.offset();
            let base = Vec3::new(ground.x, 0.0, ground.y);
            parts.push(Part {
                kind: PartKind::TreeTrunk {
                    decoration: decoration.index,
                },
                shape: PartShape::Cylinder {
                    radius: TRUNK_RADIUS,
                },
                size: Vec3::new(TRUNK_RADIUS * 2.0, TRUNK_HEIGHT, TRUNK_RADIUS * 2.0),
                position: base + Vec3::new(0.0, TRUNK_HEIGHT / 2.0, 0.0),
                yaw: 0.0,
                color: TRUNK_COLOR,
            });
            parts.push(Part {
                kind: PartKind::TreeCrown {
                    decoration: decoration.index,
                },
                shape: PartShape::Cone {
                    top_radius: 0.0,
                    bottom_radius: CROWN_RADIUS,
                },
                size: Vec3::new(CROWN_RADIUS * 2.0, CROWN_HEIGHT, CROWN_RADIUS * 2.0),
                position: base + Vec3::new(0.0, CROWN_ELEVATION, 0.0),
                yaw: 0.0,
                color: crown_color,
            });
        }

        Self { parts }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    pub fn part(&self, kind: PartKind) -> Option<&Part> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    /// Height of the tallest structural part, ignoring decorations.
    pub fn height(&self) -> f32 {
        self.parts
            .iter()
            .filter(|p| {
                !matches!(
                    p.kind,
                    PartKind::TreeTrunk { .. } | PartKind::TreeCrown { .. }
                )
            })
            .map(Part::top)
            .fold(0.0, f32::max)
    }
}

impl From<&BuildingSpec> for Blueprint {
    fn from(spec: &BuildingSpec) -> Self {
        Blueprint::from_spec(spec)
    }
}
