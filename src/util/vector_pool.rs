//! Bounded free list of reusable 3-component vectors.
//!
//! Vectors live in a handle-indexed arena. [`VectorPool::acquire`] hands
//! out a handle whose vector the caller owns until it is passed back to
//! [`VectorPool::release`]. Vectors waiting in the free list are always
//! zeroed, so a re-acquired vector reads as `(0, 0, 0)`.
//!
//! The pool is not thread-safe; one pool belongs to one scene.

use std::ops::{Deref, DerefMut};

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a vector stored in a [`VectorPool`].
    pub struct VecHandle;
}

struct Slot {
    value: Vec3,
    /// True while the handle sits in the free list.
    pooled: bool,
}

/// Fixed-capacity free list of [`Vec3`] values.
pub struct VectorPool {
    slots: SlotMap<VecHandle, Slot>,
    free: Vec<VecHandle>,
    max_size: usize,
    seed: usize,
    created: usize,
}

impl VectorPool {
    /// Create a pool pre-filled with `seed` zeroed vectors whose free list
    /// never grows beyond `max_size`. The seed is capped at `max_size`.
    #[must_use]
    pub fn new(seed: usize, max_size: usize) -> Self {
        let seed = seed.min(max_size);
        let mut slots = SlotMap::with_capacity_and_key(max_size);
        let free = (0..seed)
            .map(|_| {
                slots.insert(Slot {
                    value: Vec3::ZERO,
                    pooled: true,
                })
            })
            .collect();
        Self {
            slots,
            free,
            max_size,
            seed,
            created: 0,
        }
    }

    /// Take a vector out of the pool, allocating a fresh one when the free
    /// list is empty. Never fails.
    pub fn acquire(&mut self) -> VecHandle {
        if let Some(handle) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(handle) {
                slot.pooled = false;
            }
            return handle;
        }
        self.created += 1;
        log::debug!(
            "vector pool empty, allocated vector #{} beyond seed of {}",
            self.created,
            self.seed
        );
        self.slots.insert(Slot {
            value: Vec3::ZERO,
            pooled: false,
        })
    }

    /// Return a vector to the pool.
    ///
    /// The vector is zeroed and parked in the free list when there is room;
    /// otherwise it is dropped. Releasing a handle that is already pooled
    /// or was already dropped is ignored.
    pub fn release(&mut self, handle: VecHandle) {
        let has_room = self.free.len() < self.max_size;
        let Some(slot) = self.slots.get_mut(handle) else {
            log::warn!("release of unknown vector handle {handle:?} ignored");
            return;
        };
        if slot.pooled {
            log::trace!("vector handle {handle:?} released twice");
            return;
        }
        if has_room {
            slot.value = Vec3::ZERO;
            slot.pooled = true;
            self.free.push(handle);
        } else {
            let _ = self.slots.remove(handle);
        }
    }

    /// Acquire a vector that is released automatically when the guard
    /// goes out of scope.
    pub fn scoped(&mut self) -> PooledVec<'_> {
        let handle = self.acquire();
        PooledVec { pool: self, handle }
    }

    /// Read a vector the caller currently owns. Pooled or dropped handles
    /// yield `None`.
    #[must_use]
    pub fn get(&self, handle: VecHandle) -> Option<Vec3> {
        self.slots
            .get(handle)
            .filter(|slot| !slot.pooled)
            .map(|slot| slot.value)
    }

    /// Mutable access to a vector the caller currently owns.
    pub fn get_mut(&mut self, handle: VecHandle) -> Option<&mut Vec3> {
        self.slots
            .get_mut(handle)
            .filter(|slot| !slot.pooled)
            .map(|slot| &mut slot.value)
    }

    /// Current free-list length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.free.len()
    }

    /// Lifetime count of vectors allocated beyond the initial seed.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Number of vectors currently held by callers.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of vectors the pool was seeded with.
    #[must_use]
    pub fn seed(&self) -> usize {
        self.seed
    }

    /// Maximum free-list length.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for VectorPool {
    fn default() -> Self {
        Self::new(16, 64)
    }
}

/// Scratch vector borrowed from a [`VectorPool`], released on drop.
pub struct PooledVec<'a> {
    pool: &'a mut VectorPool,
    handle: VecHandle,
}

impl PooledVec<'_> {
    /// Handle of the borrowed vector.
    #[must_use]
    pub fn handle(&self) -> VecHandle {
        self.handle
    }
}

impl Deref for PooledVec<'_> {
    type Target = Vec3;

    fn deref(&self) -> &Vec3 {
        &self.pool.slots[self.handle].value
    }
}

impl DerefMut for PooledVec<'_> {
    fn deref_mut(&mut self) -> &mut Vec3 {
        &mut self.pool.slots[self.handle].value
    }
}

impl Drop for PooledVec<'_> {
    fn drop(&mut self) {
        self.pool.release(self.handle);
    }
}
