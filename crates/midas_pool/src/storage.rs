//! # Slot Storage
//!
//! Pre-allocated payload storage backing the pool.
//!
//! The storage uses a dense array strategy:
//! - Every slot is allocated at construction and never moves
//! - Access is O(1) via slot index
//! - Iteration is cache-friendly (contiguous memory)

use std::ops::{Index, IndexMut};

/// Pre-allocated storage for slot payloads.
///
/// This storage guarantees:
/// - Zero allocations after initialization
/// - O(1) access by slot index
/// - Stable slot identities for the lifetime of the pool
///
/// Payloads are never dropped and reconstructed; a recycled slot is
/// reset to the payload's default value by plain assignment.
pub struct SlotStorage<T: Copy + Default> {
    /// The dense array of payloads.
    data: Box<[T]>,
    /// Capacity (slot count).
    capacity: usize,
}

impl<T: Copy + Default> SlotStorage<T> {
    /// Creates new slot storage with the specified capacity.
    ///
    /// All slots are initialized to the payload's default value.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slots to pre-allocate
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        // Pre-allocate all memory upfront
        let data = vec![T::default(); capacity].into_boxed_slice();

        Self { data, capacity }
    }

    /// Returns the capacity of this storage.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Gets a payload by slot index.
    ///
    /// # Returns
    ///
    /// Reference to the payload, or None if index is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Gets a mutable payload by slot index.
    ///
    /// # Returns
    ///
    /// Mutable reference to the payload, or None if index is out of
    /// bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Resets a slot to the payload's default value.
    ///
    /// This is a **zero-allocation** operation - it overwrites the
    /// existing pre-allocated slot.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index to reset
    #[inline]
    pub fn reset(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = T::default();
        }
    }

    /// Resets every slot to the payload's default value.
    ///
    /// This is a **zero-allocation** operation - no memory is freed or
    /// allocated.
    pub fn reset_all(&mut self) {
        for slot in self.data.iter_mut() {
            *slot = T::default();
        }
    }
}

impl<T: Copy + Default> Index<usize> for SlotStorage<T> {
    type Output = T;

    /// Direct indexed access.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; use [`get`](Self::get) for
    /// checked access.
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Copy + Default> IndexMut<usize> for SlotStorage<T> {
    /// Direct mutable indexed access.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; use
    /// [`get_mut`](Self::get_mut) for checked access.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_creation() {
        let storage: SlotStorage<u32> = SlotStorage::new(1000);
        assert_eq!(storage.capacity(), 1000);
        assert_eq!(storage.get(0), Some(&0));
    }

    #[test]
    fn test_storage_bounds() {
        let storage: SlotStorage<u32> = SlotStorage::new(100);
        assert!(storage.get(100).is_none());
        assert!(storage.get(99).is_some());
    }

    #[test]
    fn test_storage_reset() {
        let mut storage: SlotStorage<u32> = SlotStorage::new(10);
        storage[3] = 77;
        assert_eq!(storage[3], 77);

        storage.reset(3);
        assert_eq!(storage[3], 0);
    }

    #[test]
    fn test_storage_reset_all() {
        let mut storage: SlotStorage<u32> = SlotStorage::new(10);
        for index in 0..10 {
            storage[index] = 5;
        }

        storage.reset_all();
        for index in 0..10 {
            assert_eq!(storage[index], 0);
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_storage_direct_index_out_of_range_panics() {
        let storage: SlotStorage<u32> = SlotStorage::new(10);
        let _ = storage[10];
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than zero")]
    fn test_storage_zero_capacity_panics() {
        let _ = SlotStorage::<u32>::new(0);
    }
}
