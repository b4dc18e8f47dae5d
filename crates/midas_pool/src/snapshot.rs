//! # Render Snapshot Channel
//!
//! One-way handoff of the active-coin set from the simulation thread
//! to a renderer. The simulation owns the pool outright; a renderer
//! never locks the pool itself, only a published copy of it.
//!
//! The writer keeps a staging buffer that it fills from the pool and
//! then swaps into the shared frame under a short write lock. Both
//! buffers are sized to pool capacity up front, so steady-state
//! publishing performs no allocation.

use std::mem;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::handle::SpawnHandle;
use crate::pool::SpawnPool;

/// The shared frame: the entries of the last published snapshot plus a
/// sequence number that bumps on every publish.
struct FrameData<T> {
    entries: Vec<(SpawnHandle, T)>,
    sequence: u64,
}

/// Produces snapshots of a pool for consumption on other threads.
///
/// Owned by the simulation thread. Call
/// [`publish`](Self::publish) once per frame after the pool has
/// ticked; readers observe either the previous frame or the new one,
/// never a half-written mix.
pub struct SnapshotWriter<T: Copy + Default> {
    shared: Arc<RwLock<FrameData<T>>>,
    staging: Vec<(SpawnHandle, T)>,
    sequence: u64,
}

/// Reads the most recently published snapshot.
///
/// Cheap to clone; every clone observes the same shared frame. Safe to
/// move to a render thread.
pub struct SnapshotReader<T: Copy + Default> {
    shared: Arc<RwLock<FrameData<T>>>,
}

/// A read-locked view of one published frame.
///
/// Holds a read lock on the shared frame for its whole lifetime. Keep
/// it short-lived on the reader side so the writer's swap never stalls
/// a frame.
pub struct SnapshotFrame<'a, T: Copy + Default> {
    guard: RwLockReadGuard<'a, FrameData<T>>,
}

/// Creates a connected writer/reader pair.
///
/// Both internal buffers are allocated here, sized to `capacity`, so
/// publishing stays allocation-free as long as the pool it snapshots
/// is no larger.
///
/// # Panics
///
/// Panics if capacity is zero.
#[must_use]
pub fn channel<T: Copy + Default>(capacity: usize) -> (SnapshotWriter<T>, SnapshotReader<T>) {
    assert!(capacity > 0, "Capacity must be greater than zero");

    let shared = Arc::new(RwLock::new(FrameData {
        entries: Vec::with_capacity(capacity),
        sequence: 0,
    }));

    let writer = SnapshotWriter {
        shared: Arc::clone(&shared),
        staging: Vec::with_capacity(capacity),
        sequence: 0,
    };
    let reader = SnapshotReader { shared };

    (writer, reader)
}

impl<T: Copy + Default> SnapshotWriter<T> {
    /// Publishes the pool's current active set as a new frame.
    ///
    /// Copies every `(handle, payload)` pair in activation order into
    /// the staging buffer, then swaps staging with the shared frame
    /// under a write lock. The lock is held only for the swap, not for
    /// the copy.
    ///
    /// # Returns
    ///
    /// The sequence number of the frame just published.
    pub fn publish(&mut self, pool: &SpawnPool<T>) -> u64 {
        self.staging.clear();
        self.staging
            .extend(pool.iter().map(|(handle, payload)| (handle, *payload)));
        self.sequence += 1;

        let mut frame = self.shared.write();
        mem::swap(&mut frame.entries, &mut self.staging);
        frame.sequence = self.sequence;

        self.sequence
    }

    /// Returns the sequence number of the last published frame.
    #[inline]
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl<T: Copy + Default> SnapshotReader<T> {
    /// Locks and returns the most recently published frame.
    #[must_use]
    pub fn latest(&self) -> SnapshotFrame<'_, T> {
        SnapshotFrame {
            guard: self.shared.read(),
        }
    }
}

impl<T: Copy + Default> Clone for SnapshotReader<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Copy + Default> SnapshotFrame<'_, T> {
    /// The snapshot entries, oldest entity first.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(SpawnHandle, T)] {
        &self.guard.entries
    }

    /// The sequence number of this frame (0 before the first publish).
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.guard.sequence
    }

    /// Number of entities captured in this frame.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard.entries.len()
    }

    /// Checks if this frame captured no entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard.entries.is_empty()
    }
}
