#![forbid(unsafe_code)]
//! memory_citadel: Deterministic building generation and citadel layout for memory-palace notes.
//!
//! Modules:
//! - random: identifier-to-seed derivation and the portable seeded random source
//! - building: building specs, palettes, and renderer-neutral blueprints
//! - citadel: palace/wing/room hierarchy, entitlement, spec cache, layout, events
//!
//! The same room identifier always yields the same building, on every
//! platform and in every run.
pub mod building;
pub mod citadel;
pub mod error;
pub mod random;

/// Convenient re-exports for common types. Import with `use memory_citadel::prelude::*;`.
pub mod prelude {
    pub use crate::building::blueprint::{Blueprint, Part, PartKind, PartShape};
    pub use crate::building::palette::{
        CrownTint, ElementColor, Palette, PaletteBand, StructuralElement,
    };
    pub use crate::building::{
        generate_building_spec, generate_building_spec_from_slice, BuildingSpec,
        BuildingSpecGenerator, Decoration, RoofStyle, SpecGenerator,
    };
    pub use crate::citadel::arena::Citadel;
    pub use crate::citadel::cache::BuildingSpecCache;
    pub use crate::citadel::entitlement::{
        Entitlement, EntitlementStore, TransactionUpdate, FREE_PALACE_LIMIT,
    };
    pub use crate::citadel::events::{
        ChannelSink, CitadelEvent, CitadelEventKind, DeletedEntity, EventSink, FilterSink,
        FnSink, MultiSink, VecSink,
    };
    pub use crate::citadel::layout::{
        assemble_layout, CitadelAssembler, LayoutConfig, LayoutResult, Placement,
    };
    pub use crate::citadel::{Palace, PalaceId, Room, RoomId, Wing, WingId};
    pub use crate::error::{Error, Result};
    pub use crate::random::{seed_for_identifier, seed_from_bytes, SeededRandomSource};
}
