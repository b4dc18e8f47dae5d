//! # Free Index Ring
//!
//! FIFO recycling of slot indices.
//!
//! Released indices join at the back of the ring and leave at the
//! front, so a freed slot is reused only after every other free slot
//! has been handed out. That maximizes the time between reuses of any
//! one index, which is exactly the window in which generation checks
//! catch stale handles.

/// Fixed-capacity FIFO ring of free slot indices.
///
/// Backed by a pre-allocated index array; `take` and `give` are O(1)
/// and never allocate.
pub struct FreeList {
    /// Ring storage, sized to the pool capacity.
    slots: Box<[u32]>,
    /// Position of the oldest free index.
    head: usize,
    /// Number of free indices currently in the ring.
    len: usize,
}

impl FreeList {
    /// Creates a free list seeded with every index in `0..capacity`,
    /// lowest index first.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slot indices to manage
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );

        // Pre-allocate the ring with every index free
        let slots = (0..capacity as u32).collect::<Vec<_>>().into_boxed_slice();

        Self {
            slots,
            head: 0,
            len: capacity,
        }
    }

    /// Returns the number of free indices.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if no free indices remain.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes and returns the index that has been free the longest.
    ///
    /// # Returns
    ///
    /// The oldest free index, or None if every slot is in use.
    #[inline]
    pub fn take(&mut self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }

        let index = self.slots[self.head];
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        Some(index)
    }

    /// Returns an index to the back of the ring.
    ///
    /// The caller must guarantee the index is not already free; a
    /// duplicate insertion would hand the same slot out twice.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index to mark free
    #[inline]
    pub fn give(&mut self, index: u32) {
        debug_assert!(self.len < self.slots.len(), "Free ring overflow");

        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = index;
        self.len += 1;
    }

    /// Refills the ring with every index in `0..capacity`, lowest
    /// first, discarding the current contents.
    ///
    /// Used when the owning pool clears every slot at once. This is a
    /// **zero-allocation** operation.
    pub fn refill(&mut self) {
        for (position, slot) in self.slots.iter_mut().enumerate() {
            *slot = position as u32;
        }
        self.head = 0;
        self.len = self.slots.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_full_in_order() {
        let mut free = FreeList::new(4);
        assert_eq!(free.len(), 4);

        assert_eq!(free.take(), Some(0));
        assert_eq!(free.take(), Some(1));
        assert_eq!(free.take(), Some(2));
        assert_eq!(free.take(), Some(3));
        assert_eq!(free.take(), None);
        assert!(free.is_empty());
    }

    #[test]
    fn test_fifo_reuse_order() {
        let mut free = FreeList::new(3);

        // Drain, then return in a scrambled order
        let _ = free.take();
        let _ = free.take();
        let _ = free.take();
        free.give(2);
        free.give(0);
        free.give(1);

        // Comes back out in the order given, not index order
        assert_eq!(free.take(), Some(2));
        assert_eq!(free.take(), Some(0));
        assert_eq!(free.take(), Some(1));
    }

    #[test]
    fn test_ring_wraparound() {
        let mut free = FreeList::new(2);

        // Cycle through far more operations than the capacity to force
        // the head past the end of the backing array repeatedly
        for round in 0..100_u32 {
            let index = free.take().unwrap();
            assert_eq!(index, round % 2);
            free.give(index);
            assert_eq!(free.len(), 2);
        }
    }

    #[test]
    fn test_refill() {
        let mut free = FreeList::new(3);
        let _ = free.take();
        let _ = free.take();

        free.refill();
        assert_eq!(free.len(), 3);
        assert_eq!(free.take(), Some(0));
        assert_eq!(free.take(), Some(1));
        assert_eq!(free.take(), Some(2));
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than zero")]
    fn test_zero_capacity_panics() {
        let _ = FreeList::new(0);
    }
}
