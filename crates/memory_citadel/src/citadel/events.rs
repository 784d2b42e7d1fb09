//! Event types and sinks for observing a citadel.
//!
//! This module defines [`CitadelEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events produced by [`crate::citadel::arena::Citadel`]
//! mutations (drained with [`crate::citadel::arena::Citadel::drain_events`]),
//! [`crate::citadel::entitlement::EntitlementStore::pump_with_events`], and
//! layout assembly via [`crate::citadel::layout::assemble_layout`].
use chrono::NaiveDate;
use crossbeam_channel::Sender;

use crate::citadel::entitlement::Entitlement;
use crate::citadel::layout::{LayoutConfig, LayoutResult, Placement};
use crate::citadel::{PalaceId, RoomId, WingId};

/// Describes events emitted by citadel operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum CitadelEvent {
    PalaceCreated {
        id: PalaceId,
        name: String,
    },

    WingCreated {
        id: WingId,
        palace: PalaceId,
        title: String,
    },

    RoomCreated {
        id: RoomId,
        wing: WingId,
        title: String,
    },

    /// A room was soft-deleted.
    RoomArchived {
        id: RoomId,
    },

    /// A room's scheduling date was set or cleared.
    RoomScheduled {
        id: RoomId,
        date: Option<NaiveDate>,
    },

    /// Archived rooms were permanently removed.
    RoomsPurged {
        ids: Vec<RoomId>,
    },

    /// An entity was deleted, together with everything below it.
    EntityDeleted {
        target: DeletedEntity,
        /// Rooms removed by the cascade, including the target itself if it is a room.
        rooms_removed: usize,
    },

    EntitlementChanged {
        previous: Entitlement,
        current: Entitlement,
    },

    /// Emitted when layout assembly starts.
    LayoutStarted {
        config: LayoutConfig,
        /// Number of palaces visible under the current entitlement.
        palace_count: usize,
    },

    /// Emitted for every building placed on the grid.
    BuildingPlaced {
        placement: Placement,
    },

    /// Emitted when layout assembly finishes.
    LayoutFinished {
        result: LayoutResult,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. wing id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl CitadelEvent {
    pub fn kind(&self) -> CitadelEventKind {
        match self {
            CitadelEvent::PalaceCreated { .. }
            | CitadelEvent::WingCreated { .. }
            | CitadelEvent::RoomCreated { .. }
            | CitadelEvent::RoomArchived { .. }
            | CitadelEvent::RoomScheduled { .. }
            | CitadelEvent::RoomsPurged { .. }
            | CitadelEvent::EntityDeleted { .. } => CitadelEventKind::Hierarchy,
            CitadelEvent::EntitlementChanged { .. } => CitadelEventKind::Entitlement,
            CitadelEvent::LayoutStarted { .. } | CitadelEvent::LayoutFinished { .. } => {
                CitadelEventKind::Layout
            }
            CitadelEvent::BuildingPlaced { .. } => CitadelEventKind::Placement,
            CitadelEvent::Warning { .. } => CitadelEventKind::Warning,
        }
    }
}

/// Coarse event categories used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitadelEventKind {
    Hierarchy,
    Entitlement,
    Layout,
    Placement,
    Warning,
}

/// Which entity an [`CitadelEvent::EntityDeleted`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletedEntity {
    Palace(PalaceId),
    Wing(WingId),
    Room(RoomId),
}

/// A generic event sink that accepts [`CitadelEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: CitadelEvent);

    /// Whether events of this kind should be built at all.
    ///
    /// Emitters check this before constructing expensive payloads.
    fn wants(&self, _kind: CitadelEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = CitadelEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: CitadelEvent) {}

    #[inline]
    fn wants(&self, _kind: CitadelEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(CitadelEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(CitadelEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(CitadelEvent),
{
    #[inline]
    fn send(&mut self, event: CitadelEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<CitadelEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> Vec<CitadelEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[CitadelEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: CitadelEvent) {
        self.events.push(event);
    }
}

/// Sink that only lets the given kinds through to an inner sink.
pub struct FilterSink<S: EventSink> {
    inner: S,
    kinds: Vec<CitadelEventKind>,
}

impl<S: EventSink> FilterSink<S> {
    pub fn new(inner: S, kinds: impl IntoIterator<Item = CitadelEventKind>) -> Self {
        Self {
            inner,
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for FilterSink<S> {
    fn send(&mut self, event: CitadelEvent) {
        if self.wants(event.kind()) {
            self.inner.send(event);
        }
    }

    fn wants(&self, kind: CitadelEventKind) -> bool {
        self.kinds.contains(&kind) && self.inner.wants(kind)
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: CitadelEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: CitadelEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Event sink that forwards events over a channel to another thread.
///
/// Send failures (receiver dropped) are ignored.
pub struct ChannelSink {
    pub tx: Sender<CitadelEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<CitadelEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    #[inline]
    fn send(&mut self, event: CitadelEvent) {
        let _ = self.tx.send(event);
    }
}
