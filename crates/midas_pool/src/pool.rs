//! # Spawn Pool
//!
//! The owner of every coin slot: a fixed block of payload slots, a
//! FIFO ring of free indices, and an activation-order lifetime list,
//! all driven by an explicit per-frame clock.
//!
//! All memory is allocated in `new`. Acquire, release, and tick move
//! indices between the free ring and the lifetime list without ever
//! touching the allocator, and at every observable point the free and
//! active sets partition `0..capacity` exactly.

use crate::active::ActiveList;
use crate::error::{PoolError, PoolResult};
use crate::free_list::FreeList;
use crate::handle::SpawnHandle;
use crate::storage::SlotStorage;

/// Builds the rejection error for a handle.
const fn invalid(handle: SpawnHandle) -> PoolError {
    PoolError::InvalidHandle {
        index: handle.index(),
        generation: handle.generation(),
    }
}

/// Fixed-capacity pool of short-lived entities.
///
/// Entities are acquired into pre-allocated slots, live for at most
/// `ttl` ticks, and return to the free set either through an explicit
/// [`release`](Self::release) or automatically during
/// [`tick`](Self::tick). Callers address slots through generational
/// [`SpawnHandle`]s; a handle outlives its slot's occupancy only as a
/// politely rejected value, never as a dangling reference.
///
/// # Capacity
///
/// The pool has a fixed capacity set at creation. It cannot change at
/// runtime, which is what makes the zero-allocation guarantee hold.
///
/// # Time
///
/// The pool holds no timer. Time advances only when the owner calls
/// `tick`, exactly once per simulated frame. The clock is a `u64`; at
/// 60 ticks per second it would take roughly 9.7 billion years to wrap,
/// so wraparound is not handled.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: SpawnPool<Coin> = SpawnPool::new(10_000, 300);
///
/// let handle = pool.acquire()?;
/// if let Some(coin) = pool.get_mut(handle) {
///     coin.value = 5;
/// }
/// pool.tick();
/// ```
pub struct SpawnPool<T: Copy + Default> {
    /// Payload slots, allocated once.
    slots: SlotStorage<T>,
    /// FIFO ring of free slot indices.
    free: FreeList,
    /// Activation-order list of active slots.
    active: ActiveList,
    /// Per-slot generation counters, bumped on every acquisition.
    generations: Box<[u32]>,
    /// Ticks elapsed since construction (or the last clear).
    clock: u64,
    /// Slot lifetime in ticks.
    ttl: u64,
    /// Fixed capacity.
    capacity: usize,
}

impl<T: Copy + Default> SpawnPool<T> {
    /// Creates a pool with the specified capacity and lifetime.
    ///
    /// This is the only point where slot memory is allocated:
    /// - Payload slots (value-initialized to the payload default)
    /// - The free-index ring (seeded with every index)
    /// - Lifetime links and generation counters
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of simultaneously active entities
    /// * `ttl` - Entity lifetime in ticks
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero, capacity exceeds `u32::MAX`, or ttl
    /// is zero.
    #[must_use]
    pub fn new(capacity: usize, ttl: u64) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );
        assert!(ttl > 0, "Lifetime must be greater than zero");

        Self {
            slots: SlotStorage::new(capacity),
            free: FreeList::new(capacity),
            active: ActiveList::new(capacity),
            generations: vec![0_u32; capacity].into_boxed_slice(),
            clock: 0,
            ttl,
            capacity,
        }
    }

    /// Returns the fixed capacity of this pool.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of currently active entities.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of free slots.
    #[inline]
    #[must_use]
    pub const fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Returns the current clock value in ticks.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.clock
    }

    /// Returns the entity lifetime in ticks.
    #[inline]
    #[must_use]
    pub const fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Activates one slot and returns its handle.
    ///
    /// This is a **zero-allocation** operation: the longest-free slot
    /// index is taken from the ring, its generation bumped, and the
    /// slot stamped with the current clock. The payload keeps its
    /// default value until the caller writes through
    /// [`get_mut`](Self::get_mut).
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] if every slot is active. The
    /// pool is unchanged; spawning simply does not happen this frame.
    #[inline]
    pub fn acquire(&mut self) -> PoolResult<SpawnHandle> {
        let Some(index) = self.free.take() else {
            return Err(PoolError::Exhausted {
                capacity: self.capacity,
            });
        };

        let idx = index as usize;
        let generation = self.generations[idx].wrapping_add(1);
        self.generations[idx] = generation;

        self.active.push_back(index, self.clock);

        Ok(SpawnHandle::new(index, generation))
    }

    /// Deactivates the slot behind a handle.
    ///
    /// The payload is reset to its default value and the index joins
    /// the back of the free ring. This is a **zero-allocation**
    /// operation.
    ///
    /// # Arguments
    ///
    /// * `handle` - The handle returned by [`acquire`](Self::acquire)
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidHandle`] if the handle is null,
    /// stale, already released, expired, or from another pool. The pool
    /// is unchanged, so double releases surface in testing instead of
    /// corrupting the free set.
    #[inline]
    pub fn release(&mut self, handle: SpawnHandle) -> PoolResult<()> {
        let Some(idx) = self.checked_index(handle) else {
            return Err(invalid(handle));
        };

        self.active.remove(handle.index());
        self.slots.reset(idx);
        self.free.give(handle.index());
        Ok(())
    }

    /// Advances the clock by one tick and recycles expired entities.
    ///
    /// Must be called exactly once per simulated frame. Entities whose
    /// age has reached the pool lifetime are drained oldest-first; the
    /// cost is proportional to the number recycled, not to the active
    /// count.
    ///
    /// # Returns
    ///
    /// The number of entities that expired this tick.
    pub fn tick(&mut self) -> usize {
        self.clock += 1;

        let mut expired = 0;
        while let Some(index) = self.active.pop_expired(self.clock, self.ttl) {
            self.slots.reset(index as usize);
            self.free.give(index);
            expired += 1;
        }
        expired
    }

    /// Gets an entity's payload by handle.
    ///
    /// # Returns
    ///
    /// Reference to the payload, or None if the handle is not currently
    /// valid.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: SpawnHandle) -> Option<&T> {
        let idx = self.checked_index(handle)?;
        self.slots.get(idx)
    }

    /// Gets an entity's payload mutably by handle.
    ///
    /// # Returns
    ///
    /// Mutable reference to the payload, or None if the handle is not
    /// currently valid.
    #[inline]
    pub fn get_mut(&mut self, handle: SpawnHandle) -> Option<&mut T> {
        let idx = self.checked_index(handle)?;
        self.slots.get_mut(idx)
    }

    /// Checks if a handle references a currently active entity.
    #[inline]
    #[must_use]
    pub fn is_active(&self, handle: SpawnHandle) -> bool {
        self.checked_index(handle).is_some()
    }

    /// Returns an active entity's age in ticks.
    ///
    /// # Returns
    ///
    /// Ticks since acquisition (0 on the acquisition tick), or None if
    /// the handle is not currently valid.
    #[inline]
    #[must_use]
    pub fn age(&self, handle: SpawnHandle) -> Option<u64> {
        self.checked_index(handle)?;
        let activated_at = self.active.activation_tick(handle.index())?;
        Some(self.clock - activated_at)
    }

    /// Iterates over the handles of all active entities, oldest first.
    ///
    /// The borrow rules make this a consistent point-in-time view: no
    /// acquire, release, or tick can interleave while the iterator
    /// lives.
    pub fn active_handles(&self) -> impl Iterator<Item = SpawnHandle> + '_ {
        self.active
            .iter()
            .map(|index| SpawnHandle::new(index, self.generations[index as usize]))
    }

    /// Iterates over all active entities with their payloads, oldest
    /// first.
    pub fn iter(&self) -> impl Iterator<Item = (SpawnHandle, &T)> + '_ {
        self.active.iter().map(|index| {
            let idx = index as usize;
            (
                SpawnHandle::new(index, self.generations[idx]),
                &self.slots[idx],
            )
        })
    }

    /// Returns every active slot to the free set and rewinds the clock
    /// to zero.
    ///
    /// Payloads reset to their defaults; generation counters are
    /// deliberately kept, so handles issued before the clear keep
    /// failing validation afterwards. This is a **zero-allocation**
    /// operation.
    pub fn clear(&mut self) {
        self.active.clear();
        self.free.refill();
        self.slots.reset_all();
        self.clock = 0;
    }

    /// Resolves a handle to its slot index if it is currently valid.
    ///
    /// Valid means: non-null, in range, matching generation, and the
    /// slot is active right now.
    fn checked_index(&self, handle: SpawnHandle) -> Option<usize> {
        if handle.is_null() {
            return None;
        }

        let idx = handle.index() as usize;
        if idx >= self.capacity {
            return None;
        }

        if self.generations[idx] != handle.generation() {
            return None;
        }

        self.active.contains(handle.index()).then_some(idx)
    }
}
