//! # Pool Error Types
//!
//! All errors that can occur in the coin pool.

use thiserror::Error;

/// Errors that can occur in the coin pool.
///
/// Both variants are ordinary, recoverable outcomes: the pool state is
/// unchanged when they are returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Every slot is active; nothing can spawn this frame.
    #[error("pool exhausted: all {capacity} slots are active")]
    Exhausted {
        /// Fixed capacity of the pool.
        capacity: usize,
    },

    /// The handle does not reference a currently active slot.
    ///
    /// Covers stale handles (the slot was released or expired, possibly
    /// reused since), double releases, and handles from another pool.
    #[error("invalid handle: slot {index} generation {generation} is not active")]
    InvalidHandle {
        /// Index carried by the rejected handle.
        index: u32,
        /// Generation carried by the rejected handle.
        generation: u32,
    },
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
