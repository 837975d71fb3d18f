//! Reentrant-safe slot registry.
//!
//! Slots are owned by a slot map with generational keys, while their
//! registration order is kept in a separate vector of keys. Erasing a slot only
//! removes it from the slot map; its key stays in the order vector as a
//! tombstone until no traversal is running, at which point the order vector is
//! compacted. Indices into the order vector therefore never shift under an
//! active traversal, no matter how deeply traversals nest.
//!
//! The mutex guarding the registry is never held while a slot runs or while a
//! slot is destroyed, so slots may freely connect, disconnect or re-fire the
//! signal that owns them.

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use std::sync::Arc;

new_key_type! {
    /// Stable identity of a connected slot.
    ///
    /// Keys are generational: once a slot is erased its key never matches
    /// another slot, even if the underlying storage is reused.
    pub struct SlotId;
}

struct Entries<S> {
    /// Live slots.
    slots: SlotMap<SlotId, Arc<S>>,
    /// Registration order. Keys missing from `slots` are tombstones.
    order: Vec<SlotId>,
    /// Number of tombstones currently in `order`.
    stale: usize,
    /// Number of traversals in progress.
    passes: usize,
    compact_after: usize,
}

impl<S> Entries<S> {
    fn compact_if_idle(&mut self) {
        if self.passes > 0 || self.stale < self.compact_after {
            return;
        }

        let slots = &self.slots;
        let before = self.order.len();
        self.order.retain(|id| slots.contains_key(*id));
        self.stale = 0;

        tracing::trace!(
            removed = before - self.order.len(),
            remaining = self.order.len(),
            "compacted slot order"
        );
    }
}

/// Ordered container of slots that tolerates mutation during traversal.
pub(crate) struct Registry<S> {
    entries: Mutex<Entries<S>>,
}

impl<S> Registry<S> {
    /// Create an empty registry that compacts once `compact_after` tombstones
    /// have piled up and no traversal is running.
    pub fn new(compact_after: usize) -> Self {
        Self {
            entries: Mutex::new(Entries {
                slots: SlotMap::with_key(),
                order: Vec::new(),
                stale: 0,
                passes: 0,
                compact_after: compact_after.max(1),
            }),
        }
    }

    /// Append a slot at the end of the registration order.
    pub fn push_back(&self, slot: S) -> SlotId {
        self.insert_with_key(|_| slot)
    }

    /// Append a slot built from its own identity.
    ///
    /// `build` runs while the registry is locked and must not call back into it.
    pub fn insert_with_key(&self, build: impl FnOnce(SlotId) -> S) -> SlotId {
        let mut entries = self.entries.lock();
        let id = entries.slots.insert_with_key(|id| Arc::new(build(id)));
        entries.order.push(id);
        id
    }

    /// Remove a slot. Returns the removed slot so the caller can release it
    /// after the registry lock is gone; `None` if it was already erased.
    ///
    /// A traversal currently running the slot keeps its own reference, so the
    /// invocation in progress completes normally.
    #[must_use = "the removed slot should be dropped outside the registry"]
    pub fn erase(&self, id: SlotId) -> Option<Arc<S>> {
        let mut entries = self.entries.lock();
        let removed = entries.slots.remove(id)?;
        entries.stale += 1;
        entries.compact_if_idle();
        Some(removed)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.entries.lock().slots.contains_key(id)
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.entries.lock().slots.len()
    }

    /// Remove every slot, handing them back to be dropped by the caller.
    #[must_use = "the removed slots should be dropped outside the registry"]
    pub fn clear(&self) -> Vec<Arc<S>> {
        let mut entries = self.entries.lock();
        let drained: Vec<Arc<S>> = entries.slots.drain().map(|(_, slot)| slot).collect();
        entries.stale = entries.order.len();
        entries.compact_if_idle();
        drained
    }

    /// Begin a traversal over the slots that are live right now.
    ///
    /// Slots pushed after this call are not visited by the returned traversal.
    pub fn traverse(&self) -> Traversal<'_, S> {
        let mut entries = self.entries.lock();
        entries.passes += 1;
        let end = entries.order.len();
        Traversal {
            registry: self,
            cursor: 0,
            end,
        }
    }

    /// Visit every live slot in registration order.
    pub fn for_each_live(&self, mut visit: impl FnMut(&S)) {
        for slot in self.traverse() {
            visit(&slot);
        }
    }

    #[cfg(test)]
    fn order_len(&self) -> usize {
        self.entries.lock().order.len()
    }

    #[cfg(test)]
    fn passes(&self) -> usize {
        self.entries.lock().passes
    }
}

/// One left-to-right pass over a [`Registry`].
///
/// Every pass has its own cursor. Liveness is checked when the cursor reaches
/// an entry, so anything erased before that point is skipped.
pub(crate) struct Traversal<'a, S> {
    registry: &'a Registry<S>,
    cursor: usize,
    end: usize,
}

impl<S> Iterator for Traversal<'_, S> {
    type Item = Arc<S>;

    fn next(&mut self) -> Option<Arc<S>> {
        let entries = self.registry.entries.lock();
        while self.cursor < self.end {
            let Some(&id) = entries.order.get(self.cursor) else {
                break;
            };
            self.cursor += 1;
            if let Some(slot) = entries.slots.get(id) {
                return Some(Arc::clone(slot));
            }
        }
        self.cursor = self.end;
        None
    }
}

impl<S> Drop for Traversal<'_, S> {
    fn drop(&mut self) {
        let mut entries = self.registry.entries.lock();
        entries.passes -= 1;
        entries.compact_if_idle();
    }
}
