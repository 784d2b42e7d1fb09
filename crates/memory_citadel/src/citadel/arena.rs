//! In-memory arena holding the whole hierarchy.
//!
//! Mutations are recorded as [`CitadelEvent`]s in a pending journal; the
//! owner forwards them to observers with [`Citadel::drain_events`]. The
//! journal grows until it is drained, so owners that do not observe events
//! should call [`Citadel::discard_events`] periodically.
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::citadel::entitlement::Entitlement;
use crate::citadel::events::{CitadelEvent, DeletedEntity, EventSink};
use crate::citadel::{Palace, PalaceId, Room, RoomId, Wing, WingId};
use crate::error::{Error, Result};

/// Arena of palaces, wings and rooms keyed by identifier.
#[derive(Debug, Default)]
pub struct Citadel {
    palaces: HashMap<PalaceId, Palace>,
    wings: HashMap<WingId, Wing>,
    rooms: HashMap<RoomId, Room>,
    next_seq: u64,
    entitlement: Entitlement,
    pending: Vec<CitadelEvent>,
}

impl Citadel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entitlement(entitlement: Entitlement) -> Self {
        Self {
            entitlement,
            ..Self::default()
        }
    }

    pub fn entitlement(&self) -> Entitlement {
        self.entitlement
    }

    /// Update the entitlement used for palace limits, usually after
    /// [`crate::citadel::entitlement::EntitlementStore::pump`].
    pub fn set_entitlement(&mut self, entitlement: Entitlement) {
        self.entitlement = entitlement;
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Create a palace. The free tier may only hold one.
    pub fn create_palace(&mut self, name: impl Into<String>) -> Result<PalaceId> {
        if let Some(limit) = self.entitlement.palace_limit() {
            if self.palaces.len() >= limit {
                return Err(Error::EntitlementRequired(
                    "unlock premium to create more palaces".into(),
                ));
            }
        }
        let id = PalaceId::new_random();
        let name = name.into();
        let created_seq = self.next_seq();
        debug!("Creating palace {} '{}'.", id, name);
        self.pending.push(CitadelEvent::PalaceCreated {
            id,
            name: name.clone(),
        });
        self.palaces.insert(
            id,
            Palace {
                id,
                name,
                created_seq,
                wings: BTreeSet::new(),
            },
        );
        Ok(id)
    }

    pub fn create_wing(&mut self, palace: PalaceId, title: impl Into<String>) -> Result<WingId> {
        self.insert_wing(palace, WingId::new_random(), title)
    }

    /// Insert a wing with a known identifier, e.g. one decoded from an export.
    ///
    /// The wing is linked to `palace`; an unknown palace or a duplicate wing id is an error.
    pub fn insert_wing(
        &mut self,
        palace: PalaceId,
        id: WingId,
        title: impl Into<String>,
    ) -> Result<WingId> {
        if !self.palaces.contains_key(&palace) {
            return Err(Error::UnknownPalace { id: palace.0 });
        }
        if self.wings.contains_key(&id) {
            return Err(Error::InvalidInput(format!("wing {id} already exists")));
        }
        let title = title.into();
        let created_seq = self.next_seq();
        debug!("Creating wing {} '{}' in {}.", id, title, palace);
        if let Some(p) = self.palaces.get_mut(&palace) {
            p.wings.insert(id);
        }
        self.pending.push(CitadelEvent::WingCreated {
            id,
            palace,
            title: title.clone(),
        });
        self.wings.insert(
            id,
            Wing {
                id,
                title,
                palace,
                created_seq,
                rooms: BTreeSet::new(),
            },
        );
        Ok(id)
    }

    pub fn create_room(
        &mut self,
        wing: WingId,
        title: impl Into<String>,
        detail: Option<String>,
    ) -> Result<RoomId> {
        self.insert_room(wing, RoomId::new_random(), title, detail)
    }

    /// Insert a room with a known identifier, e.g. one decoded from an export.
    ///
    /// The room is linked to `wing`; an unknown wing or a duplicate room id is an error.
    pub fn insert_room(
        &mut self,
        wing: WingId,
        id: RoomId,
        title: impl Into<String>,
        detail: Option<String>,
    ) -> Result<RoomId> {
        if !self.wings.contains_key(&wing) {
            return Err(Error::UnknownWing { id: wing.0 });
        }
        if self.rooms.contains_key(&id) {
            return Err(Error::InvalidInput(format!("room {id} already exists")));
        }
        let title = title.into();
        let created_seq = self.next_seq();
        debug!("Creating room {} '{}' in {}.", id, title, wing);
        if let Some(w) = self.wings.get_mut(&wing) {
            w.rooms.insert(id);
        }
        self.pending.push(CitadelEvent::RoomCreated {
            id,
            wing,
            title: title.clone(),
        });
        self.rooms.insert(
            id,
            Room {
                id,
                title,
                detail,
                wing,
                date: None,
                archived: false,
                created_seq,
            },
        );
        Ok(id)
    }

    /// Soft-delete a room. Archiving twice is a no-op.
    pub fn archive_room(&mut self, id: RoomId) -> Result<()> {
        let room = self
            .rooms
            .get_mut(&id)
            .ok_or(Error::UnknownRoom { id: id.0 })?;
        if !room.archived {
            room.archived = true;
            self.pending.push(CitadelEvent::RoomArchived { id });
        }
        Ok(())
    }

    /// Set or clear the scheduling date of a room.
    pub fn schedule_room(&mut self, id: RoomId, date: Option<NaiveDate>) -> Result<()> {
        let room = self
            .rooms
            .get_mut(&id)
            .ok_or(Error::UnknownRoom { id: id.0 })?;
        if room.date != date {
            room.date = date;
            self.pending.push(CitadelEvent::RoomScheduled { id, date });
        }
        Ok(())
    }

    /// Permanently remove every archived room. Returns how many were removed.
    pub fn purge_archived_rooms(&mut self) -> usize {
        let mut ids: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|r| r.archived)
            .map(|r| r.id)
            .collect();
        if ids.is_empty() {
            return 0;
        }
        ids.sort();
        for id in &ids {
            self.unlink_room(*id);
        }
        info!("Purged {} archived room(s).", ids.len());
        let count = ids.len();
        self.pending.push(CitadelEvent::RoomsPurged { ids });
        count
    }

    pub fn delete_room(&mut self, id: RoomId) -> Result<()> {
        if !self.rooms.contains_key(&id) {
            return Err(Error::UnknownRoom { id: id.0 });
        }
        self.unlink_room(id);
        self.pending.push(CitadelEvent::EntityDeleted {
            target: DeletedEntity::Room(id),
            rooms_removed: 1,
        });
        Ok(())
    }

    /// Delete a wing and its rooms. Returns the number of rooms removed.
    pub fn delete_wing(&mut self, id: WingId) -> Result<usize> {
        let removed = self
            .detach_wing(id)
            .ok_or(Error::UnknownWing { id: id.0 })?;
        self.pending.push(CitadelEvent::EntityDeleted {
            target: DeletedEntity::Wing(id),
            rooms_removed: removed,
        });
        Ok(removed)
    }

    /// Delete a palace with all wings and rooms. Returns the number of rooms removed.
    pub fn delete_palace(&mut self, id: PalaceId) -> Result<usize> {
        let wings: Vec<WingId> = self
            .palaces
            .get(&id)
            .ok_or(Error::UnknownPalace { id: id.0 })?
            .wings
            .iter()
            .copied()
            .collect();
        let removed: usize = wings
            .into_iter()
            .filter_map(|wing| self.detach_wing(wing))
            .sum();
        self.palaces.remove(&id);
        debug!("Deleted palace {} ({} rooms).", id, removed);
        self.pending.push(CitadelEvent::EntityDeleted {
            target: DeletedEntity::Palace(id),
            rooms_removed: removed,
        });
        Ok(removed)
    }

    /// Remove a wing and its rooms, returning the room count, or `None` if the wing is unknown.
    fn detach_wing(&mut self, id: WingId) -> Option<usize> {
        let wing = self.wings.remove(&id)?;
        if let Some(p) = self.palaces.get_mut(&wing.palace) {
            p.wings.remove(&id);
        }
        for room in &wing.rooms {
            self.rooms.remove(room);
        }
        Some(wing.rooms.len())
    }

    fn unlink_room(&mut self, id: RoomId) {
        if let Some(room) = self.rooms.remove(&id) {
            if let Some(w) = self.wings.get_mut(&room.wing) {
                w.rooms.remove(&id);
            }
        }
    }

    pub fn palace(&self, id: PalaceId) -> Option<&Palace> {
        self.palaces.get(&id)
    }

    pub fn wing(&self, id: WingId) -> Option<&Wing> {
        self.wings.get(&id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    /// Palaces in creation order, limited to what the entitlement can see.
    pub fn palaces(&self) -> Vec<&Palace> {
        let mut all: Vec<&Palace> = self.palaces.values().collect();
        all.sort_by_key(|p| p.created_seq);
        if let Some(limit) = self.entitlement.palace_limit() {
            all.truncate(limit);
        }
        all
    }

    /// Wings of a palace in creation order.
    pub fn wings_of(&self, palace: PalaceId) -> Result<Vec<&Wing>> {
        let p = self
            .palaces
            .get(&palace)
            .ok_or(Error::UnknownPalace { id: palace.0 })?;
        let mut wings: Vec<&Wing> = p.wings.iter().filter_map(|w| self.wings.get(w)).collect();
        wings.sort_by_key(|w| w.created_seq);
        Ok(wings)
    }

    /// Rooms of a wing in creation order.
    pub fn rooms_of(&self, wing: WingId, include_archived: bool) -> Result<Vec<&Room>> {
        let w = self
            .wings
            .get(&wing)
            .ok_or(Error::UnknownWing { id: wing.0 })?;
        let mut rooms: Vec<&Room> = w
            .rooms
            .iter()
            .filter_map(|r| self.rooms.get(r))
            .filter(|r| include_archived || !r.archived)
            .collect();
        rooms.sort_by_key(|r| r.created_seq);
        Ok(rooms)
    }

    pub fn palace_count(&self) -> usize {
        self.palaces.len()
    }

    pub fn wing_count(&self) -> usize {
        self.wings.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Identifiers of every room, archived or not.
    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.keys().copied()
    }

    pub fn pending_events(&self) -> &[CitadelEvent] {
        &self.pending
    }

    /// Drop pending events without delivering them. Returns how many were dropped.
    pub fn discard_events(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Forward pending events to `sink` and clear the journal.
    pub fn drain_events(&mut self, sink: &mut dyn EventSink) {
        for event in self.pending.drain(..) {
            if sink.wants(event.kind()) {
                sink.send(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::citadel::events::VecSink;

    fn premium() -> Citadel {
        Citadel::with_entitlement(Entitlement::Premium)
    }

    #[test]
    fn free_tier_allows_one_palace() {
        let mut citadel = Citadel::new();
        assert!(citadel.palaces().is_empty());
        citadel.create_palace("First").unwrap();
        assert_eq!(citadel.palaces().len(), 1);
        assert!(matches!(
            citadel.create_palace("Second"),
            Err(Error::EntitlementRequired(_))
        ));
    }

    #[test]
    fn downgrade_hides_extra_palaces() {
        let mut citadel = premium();
        let first = citadel.create_palace("First").unwrap();
        citadel.create_palace("Second").unwrap();
        assert_eq!(citadel.palaces().len(), 2);
        citadel.set_entitlement(Entitlement::Free);
        let visible = citadel.palaces();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, first);
        assert_eq!(citadel.palace_count(), 2);
    }

    #[test]
    fn create_wing_and_room_links_both_directions() {
        let mut citadel = premium();
        let palace = citadel.create_palace("Test Palace").unwrap();
        let wing = citadel.create_wing(palace, "East Wing").unwrap();
        let room = citadel
            .create_room(wing, "Study", Some("A quiet corner".into()))
            .unwrap();

        assert_eq!(citadel.wing(wing).unwrap().palace, palace);
        assert_eq!(citadel.room(room).unwrap().wing, wing);
        assert!(citadel.palace(palace).unwrap().wings.contains(&wing));
        assert!(citadel.wing(wing).unwrap().rooms.contains(&room));
        assert_eq!(citadel.wings_of(palace).unwrap().len(), 1);
        assert_eq!(citadel.rooms_of(wing, false).unwrap().len(), 1);
    }

    #[test]
    fn unknown_parents_are_rejected() {
        let mut citadel = premium();
        let ghost_palace = PalaceId(Uuid::nil());
        assert!(matches!(
            citadel.create_wing(ghost_palace, "x"),
            Err(Error::UnknownPalace { .. })
        ));
        let ghost_wing = WingId(Uuid::nil());
        assert!(matches!(
            citadel.create_room(ghost_wing, "x", None),
            Err(Error::UnknownWing { .. })
        ));
        assert!(matches!(
            citadel.archive_room(RoomId(Uuid::nil())),
            Err(Error::UnknownRoom { .. })
        ));
    }

    #[test]
    fn imported_room_attaches_to_its_wing() {
        let mut citadel = premium();
        let palace = citadel.create_palace("Import Palace").unwrap();
        let wing_a = citadel.create_wing(palace, "A").unwrap();
        let wing_b = citadel.create_wing(palace, "B").unwrap();
        let id = RoomId(Uuid::from_u128(0xABCD));

        citadel.insert_room(wing_a, id, "Imported", None).unwrap();
        assert_eq!(citadel.room(id).unwrap().wing, wing_a);
        assert!(citadel.wing(wing_a).unwrap().rooms.contains(&id));
        assert!(citadel.wing(wing_b).unwrap().rooms.is_empty());
        assert!(matches!(
            citadel.insert_room(wing_b, id, "Again", None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn imported_wing_attaches_to_its_palace() {
        let mut citadel = premium();
        let palace = citadel.create_palace("Import Palace").unwrap();
        let id = WingId(Uuid::from_u128(0xBEEF));

        citadel.insert_wing(palace, id, "Imported").unwrap();
        assert_eq!(citadel.wing(id).unwrap().palace, palace);
        assert!(citadel.palace(palace).unwrap().wings.contains(&id));
        let room = RoomId(Uuid::from_u128(0xBEEF + 1));
        citadel.insert_room(id, room, "Inside", None).unwrap();
        assert_eq!(citadel.rooms_of(id, false).unwrap().len(), 1);

        assert!(matches!(
            citadel.insert_wing(palace, id, "Again"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            citadel.insert_wing(PalaceId(Uuid::nil()), WingId(Uuid::from_u128(1)), "Orphan"),
            Err(Error::UnknownPalace { .. })
        ));
        assert_eq!(citadel.wing_count(), 1);
    }

    #[test]
    fn rooms_can_be_scheduled_and_cleared() {
        let mut citadel = premium();
        let palace = citadel.create_palace("P").unwrap();
        let wing = citadel.create_wing(palace, "W").unwrap();
        let room = citadel.create_room(wing, "r", None).unwrap();
        assert_eq!(citadel.room(room).unwrap().date, None);
        citadel.discard_events();

        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        citadel.schedule_room(room, Some(date)).unwrap();
        citadel.schedule_room(room, Some(date)).unwrap();
        assert_eq!(citadel.room(room).unwrap().date, Some(date));
        assert_eq!(citadel.pending_events().len(), 1);
        assert!(matches!(
            citadel.pending_events()[0],
            CitadelEvent::RoomScheduled { id, date: Some(d) } if id == room && d == date
        ));

        citadel.schedule_room(room, None).unwrap();
        assert_eq!(citadel.room(room).unwrap().date, None);
        assert!(matches!(
            citadel.schedule_room(RoomId(Uuid::nil()), None),
            Err(Error::UnknownRoom { .. })
        ));
    }

    #[test]
    fn archive_hides_and_purge_removes() {
        let mut citadel = premium();
        let palace = citadel.create_palace("P").unwrap();
        let wing = citadel.create_wing(palace, "W").unwrap();
        let keep = citadel.create_room(wing, "keep", None).unwrap();
        let gone = citadel.create_room(wing, "gone", None).unwrap();

        citadel.archive_room(gone).unwrap();
        citadel.archive_room(gone).unwrap();
        let visible: Vec<RoomId> = citadel
            .rooms_of(wing, false)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(visible, vec![keep]);
        assert_eq!(citadel.rooms_of(wing, true).unwrap().len(), 2);

        assert_eq!(citadel.purge_archived_rooms(), 1);
        assert!(citadel.room(gone).is_none());
        assert!(!citadel.wing(wing).unwrap().rooms.contains(&gone));
        assert_eq!(citadel.purge_archived_rooms(), 0);
    }

    #[test]
    fn deleting_a_palace_cascades() {
        let mut citadel = premium();
        let palace = citadel.create_palace("P").unwrap();
        let other = citadel.create_palace("Q").unwrap();
        let w1 = citadel.create_wing(palace, "W1").unwrap();
        let w2 = citadel.create_wing(palace, "W2").unwrap();
        let w3 = citadel.create_wing(other, "W3").unwrap();
        citadel.create_room(w1, "a", None).unwrap();
        citadel.create_room(w1, "b", None).unwrap();
        citadel.create_room(w2, "c", None).unwrap();
        citadel.create_room(w3, "d", None).unwrap();

        assert_eq!(citadel.delete_palace(palace).unwrap(), 3);
        assert_eq!(citadel.palace_count(), 1);
        assert_eq!(citadel.wing_count(), 1);
        assert_eq!(citadel.room_count(), 1);
        assert!(citadel.wing(w1).is_none());
        assert!(citadel.wing(w2).is_none());
        assert_eq!(citadel.wings_of(other).unwrap().len(), 1);
        assert_eq!(citadel.rooms_of(w3, true).unwrap().len(), 1);
        assert!(matches!(
            citadel.delete_palace(palace),
            Err(Error::UnknownPalace { .. })
        ));
    }

    #[test]
    fn deleting_a_wing_unlinks_it_from_the_palace() {
        let mut citadel = premium();
        let palace = citadel.create_palace("P").unwrap();
        let wing = citadel.create_wing(palace, "W").unwrap();
        let room = citadel.create_room(wing, "r", None).unwrap();
        assert_eq!(citadel.delete_wing(wing).unwrap(), 1);
        assert!(citadel.palace(palace).unwrap().wings.is_empty());
        assert!(citadel.room(room).is_none());
        assert!(matches!(
            citadel.delete_wing(wing),
            Err(Error::UnknownWing { .. })
        ));
    }

    #[test]
    fn deleting_a_palace_whose_wing_vanished_still_completes() {
        let mut citadel = premium();
        let palace = citadel.create_palace("P").unwrap();
        let kept = citadel.create_wing(palace, "kept").unwrap();
        citadel.create_room(kept, "r", None).unwrap();
        // A dangling child id must not stop the cascade.
        let dangling = WingId(Uuid::from_u128(0xDEAD));
        citadel.palaces.get_mut(&palace).unwrap().wings.insert(dangling);

        assert_eq!(citadel.delete_palace(palace).unwrap(), 1);
        assert_eq!(citadel.palace_count(), 0);
        assert_eq!(citadel.wing_count(), 0);
        assert_eq!(citadel.room_count(), 0);
    }

    #[test]
    fn discarding_events_empties_the_journal() {
        let mut citadel = premium();
        citadel.create_palace("P").unwrap();
        assert_eq!(citadel.discard_events(), 1);
        assert!(citadel.pending_events().is_empty());
        let mut sink = VecSink::new();
        citadel.drain_events(&mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn listings_follow_creation_order() {
        let mut citadel = premium();
        let palace = citadel.create_palace("P").unwrap();
        let wings: Vec<WingId> = (0..5)
            .map(|i| citadel.create_wing(palace, format!("w{i}")).unwrap())
            .collect();
        let listed: Vec<WingId> = citadel
            .wings_of(palace)
            .unwrap()
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(listed, wings);

        let rooms: Vec<RoomId> = (0..5)
            .map(|i| citadel.create_room(wings[0], format!("r{i}"), None).unwrap())
            .collect();
        let listed: Vec<RoomId> = citadel
            .rooms_of(wings[0], false)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(listed, rooms);
    }

    #[test]
    fn mutations_are_journaled_until_drained() {
        let mut citadel = premium();
        let palace = citadel.create_palace("P").unwrap();
        let wing = citadel.create_wing(palace, "W").unwrap();
        let room = citadel.create_room(wing, "R", None).unwrap();
        citadel.archive_room(room).unwrap();
        citadel.delete_room(room).unwrap();
        assert_eq!(citadel.pending_events().len(), 5);

        let mut sink = VecSink::new();
        citadel.drain_events(&mut sink);
        assert!(citadel.pending_events().is_empty());
        let events = sink.into_inner();
        assert!(matches!(events[0], CitadelEvent::PalaceCreated { id, .. } if id == palace));
        assert!(matches!(events[2], CitadelEvent::RoomCreated { id, .. } if id == room));
        assert!(matches!(events[3], CitadelEvent::RoomArchived { id } if id == room));
        assert!(matches!(
            events[4],
            CitadelEvent::EntityDeleted {
                target: DeletedEntity::Room(id),
                rooms_removed: 1
            } if id == room
        ));
    }
}
