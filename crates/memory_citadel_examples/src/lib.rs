#![forbid(unsafe_code)]

use memory_citadel::prelude::{Blueprint, BuildingSpec, ElementColor, LayoutResult, StructuralElement};
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn format_color(color: ElementColor) -> String {
    format!(
        "hsb({:>3.0}°, {:.2}, {:.2})",
        color.hue_degrees(),
        color.saturation,
        color.brightness
    )
}

/// Multi-line summary of a building spec.
pub fn describe_spec(spec: &BuildingSpec) -> String {
    let mut out = format!(
        "seed {:#018x} | group {} | walls {} | roof {:?} | tower {} | decorations {}\n",
        spec.seed,
        spec.grouping_index,
        spec.wall_height_units,
        spec.roof_style,
        spec.has_tower,
        spec.decoration_count()
    );
    for element in StructuralElement::ALL {
        out.push_str(&format!(
            "  {:<10} {}\n",
            format!("{element:?}"),
            format_color(spec.palette.color(element))
        ));
    }
    for d in &spec.decorations {
        let offset = d.offset();
        out.push_str(&format!(
            "  tree #{} at ({:+.2}, {:+.2}) r={:.3}\n",
            d.index, offset.x, offset.y, d.radius
        ));
    }
    out
}

pub fn describe_blueprint(blueprint: &Blueprint) -> String {
    let mut out = format!(
        "{} part(s), height {:.2}\n",
        blueprint.parts().len(),
        blueprint.height()
    );
    for part in blueprint.parts() {
        out.push_str(&format!(
            "  {:<28} {:?} at ({:.2}, {:.2}, {:.2})\n",
            format!("{:?}", part.kind),
            part.shape,
            part.position.x,
            part.position.y,
            part.position.z
        ));
    }
    out
}

/// Text grid of a layout, one line per placement.
pub fn describe_layout(result: &LayoutResult) -> String {
    let mut out = format!(
        "{} building(s), {} wing(s), {} archived\n",
        result.placements.len(),
        result.wings_visited,
        result.rooms_archived
    );
    for p in &result.placements {
        out.push_str(&format!(
            "  wing {:>2} room {:>3} -> ({:>6.1}, {:>5.1}) {:?} {:?}\n",
            p.wing_index,
            p.room_index,
            p.position.x,
            p.position.z,
            p.building.roof_style,
            p.building.palette.band
        ));
    }
    out
}
