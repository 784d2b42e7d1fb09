//! Palette derivation.
//!
//! Colours are a pure function of `(seed, element_index, grouping_index)`.
//! Nothing here touches the random stream, so a re-theme can recompute any
//! subset of colours without disturbing geometry.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base hue of the cool band, in degrees.
pub const COOL_BASE_HUE_DEGREES: u32 = 200;
/// Base hue of the warm band, in degrees.
pub const WARM_BASE_HUE_DEGREES: u32 = 20;
/// Width of the per-element hue offset window, in degrees.
pub const HUE_SPREAD_DEGREES: u64 = 40;
/// Step between neighbouring element indices before wrapping into the window.
pub const HUE_ELEMENT_STEP: u64 = 23;
pub const SATURATION: f32 = 0.5;
pub const BRIGHTNESS: f32 = 0.7;

/// Hue band selected by the grouping index.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteBand {
    /// Blues, used for even grouping indices.
    Cool,
    /// Oranges, used for odd grouping indices.
    Warm,
}

impl PaletteBand {
    pub fn from_grouping_index(grouping_index: u32) -> Self {
        if grouping_index % 2 == 0 {
            PaletteBand::Cool
        } else {
            PaletteBand::Warm
        }
    }

    pub fn base_hue_degrees(self) -> u32 {
        match self {
            PaletteBand::Cool => COOL_BASE_HUE_DEGREES,
            PaletteBand::Warm => WARM_BASE_HUE_DEGREES,
        }
    }

    pub fn crown_tint(self) -> CrownTint {
        match self {
            PaletteBand::Cool => CrownTint::Teal,
            PaletteBand::Warm => CrownTint::Green,
        }
    }
}

/// Structural elements that receive a palette colour, in element-index order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructuralElement {
    Foundation,
    Walls,
    Roof,
    TowerPole,
    TowerFlag,
}

impl StructuralElement {
    pub const ALL: [StructuralElement; 5] = [
        StructuralElement::Foundation,
        StructuralElement::Walls,
        StructuralElement::Roof,
        StructuralElement::TowerPole,
        StructuralElement::TowerFlag,
    ];

    pub fn index(self) -> u32 {
        match self {
            StructuralElement::Foundation => 0,
            StructuralElement::Walls => 1,
            StructuralElement::Roof => 2,
            StructuralElement::TowerPole => 3,
            StructuralElement::TowerFlag => 4,
        }
    }
}

/// Hue/saturation/brightness colour, all components in `[0, 1]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementColor {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl ElementColor {
    pub const fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    pub fn hue_degrees(&self) -> f32 {
        self.hue * 360.0
    }
}

/// Fixed tint for decoration crowns.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrownTint {
    Teal,
    Green,
}

impl CrownTint {
    pub fn color(self) -> ElementColor {
        match self {
            CrownTint::Teal => ElementColor::new(189.0 / 360.0, 0.6, 0.8),
            CrownTint::Green => ElementColor::new(135.0 / 360.0, 0.7, 0.78),
        }
    }
}

/// Trunk colour shared by every decoration.
pub const TRUNK_COLOR: ElementColor = ElementColor::new(30.0 / 360.0, 0.6, 0.4);

/// Hue in whole degrees for one element.
pub fn element_hue_degrees(seed: u64, element_index: u32, band: PaletteBand) -> u32 {
    let offset = seed.wrapping_add(element_index as u64 * HUE_ELEMENT_STEP) % HUE_SPREAD_DEGREES;
    band.base_hue_degrees() + offset as u32
}

/// Colour of one element for a seed and grouping index.
pub fn element_color(seed: u64, element_index: u32, grouping_index: u32) -> ElementColor {
    let band = PaletteBand::from_grouping_index(grouping_index);
    let degrees = element_hue_degrees(seed, element_index, band);
    ElementColor::new(degrees as f32 / 360.0, SATURATION, BRIGHTNESS)
}

/// Colours for every structural element plus the decoration tint.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub band: PaletteBand,
    /// Indexed by [`StructuralElement::index`].
    pub elements: [ElementColor; 5],
    pub crown: CrownTint,
}

impl Palette {
    pub fn derive(seed: u64, grouping_index: u32) -> Self {
        let band = PaletteBand::from_grouping_index(grouping_index);
        let elements = StructuralElement::ALL.map(|e| element_color(seed, e.index(), grouping_index));
        Self {
            band,
            elements,
            crown: band.crown_tint(),
        }
    }

    pub fn color(&self, element: StructuralElement) -> ElementColor {
        self.elements[element.index() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_alternates_with_grouping_index() {
        assert_eq!(PaletteBand::from_grouping_index(0), PaletteBand::Cool);
        assert_eq!(PaletteBand::from_grouping_index(1), PaletteBand::Warm);
        assert_eq!(PaletteBand::from_grouping_index(2), PaletteBand::Cool);
        assert_eq!(PaletteBand::from_grouping_index(u32::MAX), PaletteBand::Warm);
    }

    #[test]
    fn hues_stay_inside_their_band() {
        for seed in [0u64, 1, 39, 40, 12_345, u64::MAX] {
            for element in StructuralElement::ALL {
                let cool = element_hue_degrees(seed, element.index(), PaletteBand::Cool);
                let warm = element_hue_degrees(seed, element.index(), PaletteBand::Warm);
                assert!((200..240).contains(&cool), "cool hue {cool}");
                assert!((20..60).contains(&warm), "warm hue {warm}");
            }
        }
    }

    #[test]
    fn element_offsets_step_by_twenty_three() {
        assert_eq!(element_hue_degrees(0, 0, PaletteBand::Cool), 200);
        assert_eq!(element_hue_degrees(0, 1, PaletteBand::Cool), 223);
        assert_eq!(element_hue_degrees(0, 2, PaletteBand::Cool), 206);
        assert_eq!(element_hue_degrees(17, 1, PaletteBand::Warm), 20);
    }

    #[test]
    fn seed_near_wraparound_does_not_overflow() {
        let hue = element_hue_degrees(u64::MAX, 4, PaletteBand::Warm);
        // (u64::MAX + 92) wraps to 91; 91 % 40 == 11
        assert_eq!(hue, 31);
    }

    #[test]
    fn palette_is_pure_and_band_dependent() {
        let a = Palette::derive(987_654, 0);
        let b = Palette::derive(987_654, 0);
        let c = Palette::derive(987_654, 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.crown, CrownTint::Teal);
        assert_eq!(c.crown, CrownTint::Green);
        for e in StructuralElement::ALL {
            assert_eq!(a.color(e), element_color(987_654, e.index(), 0));
            assert_eq!(a.color(e).saturation, SATURATION);
            assert_eq!(a.color(e).brightness, BRIGHTNESS);
        }
    }
}
