//! # Spawn Handles
//!
//! Handles are lightweight identifiers consisting of:
//! - An index into the pool's slot array
//! - A generation counter for safe slot reuse

/// Unique reference to a pooled slot.
///
/// The handle is split into two parts:
/// - Lower 32 bits: Index into the slot array
/// - Upper 32 bits: Generation counter for detecting stale references
///
/// A handle is valid from `acquire()` until its slot is released or
/// expires. After that every generation-checked operation rejects it,
/// even once the slot has been handed out again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SpawnHandle(u64);

impl SpawnHandle {
    /// Creates a new handle from index and generation.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index (0 to 2^32-1)
    /// * `generation` - The generation counter (0 to 2^32-1)
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the handle.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid handle.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this handle is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for SpawnHandle {
    fn default() -> Self {
        Self::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_roundtrip() {
        let handle = SpawnHandle::new(12345, 67890);
        assert_eq!(handle.index(), 12345);
        assert_eq!(handle.generation(), 67890);
    }

    #[test]
    fn test_null_handle() {
        assert!(SpawnHandle::NULL.is_null());
        assert!(SpawnHandle::default().is_null());
        assert!(!SpawnHandle::new(0, 0).is_null());
    }

    #[test]
    fn test_same_index_different_generation() {
        let first = SpawnHandle::new(7, 1);
        let reused = SpawnHandle::new(7, 2);
        assert_ne!(first, reused);
        assert_eq!(first.index(), reused.index());
    }
}
