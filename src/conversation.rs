//! Per-owner conversation state.
//!
//! Every owner with a pending step has one slot holding their current
//! [`Mode`]; idle owners are not stored. A [`Turn`] is an
//! exclusive lock on one slot, held while a single inbound message is
//! handled, so two messages from the same owner never interleave their
//! transitions. Different owners never contend except for the brief lookup
//! in the slot map.
//!
//! State is volatile: it lives for the process lifetime and pending steps
//! never expire on their own.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::{Mode, OwnerId};

type Slot = Arc<AsyncMutex<Mode>>;
type SlotMap = Arc<Mutex<HashMap<OwnerId, Slot>>>;

/// Tracks the conversation [`Mode`] of every owner.
#[derive(Clone, Default)]
pub struct ConversationTracker {
    slots: SlotMap,
}

// The map only hands out slots; poisoning cannot leave it half-updated.
fn lock_map(slots: &SlotMap) -> MutexGuard<'_, HashMap<OwnerId, Slot>> {
    slots.lock().unwrap_or_else(|e| e.into_inner())
}

impl ConversationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, owner_id: &OwnerId) -> Slot {
        lock_map(&self.slots)
            .entry(owner_id.clone())
            .or_default()
            .clone()
    }

    /// Lock the owner's slot for the duration of one turn.
    ///
    /// Waits while another turn for the same owner is in flight.
    pub async fn begin_turn(&self, owner_id: &OwnerId) -> Turn {
        let guard = self.slot(owner_id).lock_owned().await;
        Turn {
            owner_id: owner_id.clone(),
            mode: guard,
            slots: self.slots.clone(),
        }
    }

    /// Current mode, `Idle` for owners without a slot.
    pub async fn get(&self, owner_id: &OwnerId) -> Mode {
        let slot = lock_map(&self.slots).get(owner_id).cloned();
        match slot {
            Some(slot) => *slot.lock().await,
            None => Mode::Idle,
        }
    }

    pub async fn set(&self, owner_id: &OwnerId, mode: Mode) {
        self.begin_turn(owner_id).await.set(mode);
    }

    pub async fn clear(&self, owner_id: &OwnerId) {
        self.set(owner_id, Mode::Idle).await;
    }

    /// Number of owners with a pending multi-step command.
    pub async fn pending_count(&self) -> usize {
        let slots: Vec<Slot> = lock_map(&self.slots).values().cloned().collect();

        let mut pending = 0;
        for slot in slots {
            if !slot.lock().await.is_idle() {
                pending += 1;
            }
        }
        pending
    }
}

/// Exclusive access to one owner's conversation state.
///
/// Dropping the turn releases the owner for the next message. A turn that
/// ends `Idle` also frees the owner's slot unless someone else holds it.
pub struct Turn {
    owner_id: OwnerId,
    mode: OwnedMutexGuard<Mode>,
    slots: SlotMap,
}

impl Turn {
    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn mode(&self) -> Mode {
        *self.mode
    }

    pub fn set(&mut self, mode: Mode) {
        if *self.mode != mode {
            tracing::debug!(
                owner = %self.owner_id,
                from = self.mode.as_str(),
                to = mode.as_str(),
                "Conversation mode changed"
            );
        }
        *self.mode = mode;
    }

    pub fn clear(&mut self) {
        self.set(Mode::Idle);
    }
}

impl Drop for Turn {
    fn drop(&mut self) {
        if !self.mode.is_idle() {
            return;
        }

        let ours = OwnedMutexGuard::mutex(&self.mode);
        let mut slots = lock_map(&self.slots);
        // Two references: the map entry and this guard. Any more means
        // another message for this owner is waiting on the slot.
        let unshared = slots
            .get(&self.owner_id)
            .is_some_and(|slot| Arc::ptr_eq(slot, ours) && Arc::strong_count(ours) == 2);
        if unshared {
            slots.remove(&self.owner_id);
        }
    }
}
