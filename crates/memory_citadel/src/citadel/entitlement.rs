//! Entitlement state.
//!
//! [`EntitlementStore`] is the single owner of the user's access level.
//! Producers (a payment-provider callback, a webhook handler) push
//! [`TransactionUpdate`]s into its inbox from any thread; the owner calls
//! [`EntitlementStore::pump`] to apply them, and subscribers are told about
//! actual changes only.
use crossbeam_channel::{Receiver, Sender, TryRecvError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::citadel::events::{CitadelEvent, CitadelEventKind, EventSink};

/// Number of palaces visible and creatable on the free tier.
pub const FREE_PALACE_LIMIT: usize = 1;

/// The user's access level.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Entitlement {
    #[default]
    Free,
    Premium,
}

impl Entitlement {
    /// Maximum number of palaces, `None` when unlimited.
    pub fn palace_limit(self) -> Option<usize> {
        match self {
            Entitlement::Free => Some(FREE_PALACE_LIMIT),
            Entitlement::Premium => None,
        }
    }
}

/// Change reported for the premium subscription.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionUpdate {
    Purchased,
    Renewed,
    Revoked,
    Upgraded,
    Expired,
}

impl TransactionUpdate {
    pub fn resulting_entitlement(self) -> Entitlement {
        match self {
            TransactionUpdate::Purchased | TransactionUpdate::Renewed => Entitlement::Premium,
            TransactionUpdate::Revoked | TransactionUpdate::Upgraded | TransactionUpdate::Expired => {
                Entitlement::Free
            }
        }
    }
}

/// Owner of the entitlement state.
pub struct EntitlementStore {
    current: Entitlement,
    tx: Sender<TransactionUpdate>,
    rx: Receiver<TransactionUpdate>,
    subscribers: Vec<Sender<Entitlement>>,
}

impl Default for EntitlementStore {
    fn default() -> Self {
        Self::new(Entitlement::Free)
    }
}

impl EntitlementStore {
    pub fn new(initial: Entitlement) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            current: initial,
            tx,
            rx,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> Entitlement {
        self.current
    }

    /// A producer handle for the inbox.
    pub fn sender(&self) -> Sender<TransactionUpdate> {
        self.tx.clone()
    }

    /// Receive the new entitlement every time it changes.
    pub fn subscribe(&mut self) -> Receiver<Entitlement> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Apply one update directly, returning the previous value if it changed.
    pub fn apply(&mut self, update: TransactionUpdate) -> Option<Entitlement> {
        let next = update.resulting_entitlement();
        debug!("Transaction update {:?} -> {:?}.", update, next);
        if next == self.current {
            return None;
        }
        let previous = self.current;
        self.current = next;
        info!("Entitlement changed from {:?} to {:?}.", previous, next);
        self.subscribers.retain(|s| s.send(next).is_ok());
        Some(previous)
    }

    /// Drain and apply every pending update. Returns the number applied.
    pub fn pump(&mut self) -> usize {
        self.pump_with_events(&mut ())
    }

    pub fn pump_with_events(&mut self, sink: &mut dyn EventSink) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(update) => {
                    applied += 1;
                    if let Some(previous) = self.apply(update) {
                        if sink.wants(CitadelEventKind::Entitlement) {
                            sink.send(CitadelEvent::EntitlementChanged {
                                previous,
                                current: self.current,
                            });
                        }
                    }
                }
                // The store holds its own sender, so the inbox never disconnects.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }
}
