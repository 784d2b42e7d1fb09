//! Palace → Wing → Room hierarchy and the assembly of its buildings.
//!
//! Entities live in a [`arena::Citadel`] keyed by identifier; parents hold
//! identifier sets of their children and children hold their parent's
//! identifier, so there are no owning cycles.
use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod arena;
pub mod cache;
pub mod entitlement;
pub mod events;
pub mod layout;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new_random() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a palace.
    PalaceId,
    "palace"
);
entity_id!(
    /// Identifier of a wing.
    WingId,
    "wing"
);
entity_id!(
    /// Identifier of a room; also the building generator's input.
    RoomId,
    "room"
);

/// Top-level container.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Palace {
    pub id: PalaceId,
    pub name: String,
    /// Arena-wide creation order.
    pub created_seq: u64,
    pub wings: BTreeSet<WingId>,
}

/// Group of rooms inside a palace.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Wing {
    pub id: WingId,
    pub title: String,
    pub palace: PalaceId,
    pub created_seq: u64,
    pub rooms: BTreeSet<RoomId>,
}

/// A single note.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub title: String,
    pub detail: Option<String>,
    pub wing: WingId,
    /// Optional scheduling date, e.g. for a review reminder.
    pub date: Option<NaiveDate>,
    /// Soft-deleted rooms are hidden until purged.
    pub archived: bool,
    pub created_seq: u64,
}
