//! The single global key listener slot.
//!
//! Only one picker receives keys at a time. Subscribing replaces whoever held
//! the slot; dropping the active [`Subscription`] frees it, so repeated
//! open/close cycles never leave stale handlers behind.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

const NO_SUBSCRIBER: u64 = 0;

#[derive(Debug, Default)]
struct Slot {
    next_id: AtomicU64,
    active: AtomicU64,
}

/// Handle to the listener slot. Cheap to clone; clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct KeyListener {
    slot: Arc<Slot>,
}

impl KeyListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the slot. The previous subscriber, if any, stops receiving keys.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = self.slot.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let previous = self.slot.active.swap(id, Ordering::AcqRel);
        if previous != NO_SUBSCRIBER {
            trace!("Key subscription {id} supersedes {previous}");
        }
        Subscription {
            id,
            slot: Arc::clone(&self.slot),
        }
    }

    #[must_use]
    pub fn has_subscriber(&self) -> bool {
        self.slot.active.load(Ordering::Acquire) != NO_SUBSCRIBER
    }

    /// Id of the subscription currently receiving keys.
    #[must_use]
    pub fn active_id(&self) -> Option<u64> {
        match self.slot.active.load(Ordering::Acquire) {
            NO_SUBSCRIBER => None,
            id => Some(id),
        }
    }
}

/// Registration in a [`KeyListener`]. Deregisters on drop if still active.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    slot: Arc<Slot>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether keys are currently routed to this subscription.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.active.load(Ordering::Acquire) == self.id
    }

    /// The listener this subscription belongs to.
    #[must_use]
    pub fn listener(&self) -> KeyListener {
        KeyListener {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Only clear the slot if nobody superseded us in the meantime.
        if self
            .slot
            .active
            .compare_exchange(self.id, NO_SUBSCRIBER, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            trace!("Key subscription {} released", self.id);
        }
    }
}
