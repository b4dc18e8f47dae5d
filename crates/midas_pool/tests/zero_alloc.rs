//! Integration test for the zero-allocation guarantee.
//!
//! Swaps in a counting global allocator, builds a pool and a snapshot
//! channel, then runs a full churn workload and asserts that the
//! allocator was never called inside the measurement window. Kept as a
//! single test so no sibling test thread can touch the allocator while
//! the window is open.

#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

use midas_pool::{snapshot, SpawnHandle, SpawnPool};

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static DEALLOCATIONS: AtomicU64 = AtomicU64::new(0);

struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        DEALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

#[test]
fn test_no_allocation_after_startup() {
    let capacity = 1_024;
    let ttl = 30;

    // Everything that owns memory is built before the window opens
    let mut pool: SpawnPool<u64> = SpawnPool::new(capacity, ttl);
    let (mut writer, reader) = snapshot::channel::<u64>(capacity);
    let mut handles: Vec<SpawnHandle> = Vec::with_capacity(capacity);

    let allocs_before = ALLOCATIONS.load(Ordering::Relaxed);
    let deallocs_before = DEALLOCATIONS.load(Ordering::Relaxed);

    let mut stale_releases = 0_u64;
    let mut checksum = 0_u64;

    // Phase 1: churn with expiry, releases, and per-frame publishing
    for frame in 0_u64..200 {
        for _ in 0..24 {
            match pool.acquire() {
                Ok(handle) => {
                    if let Some(slot) = pool.get_mut(handle) {
                        *slot = frame;
                    }
                    handles.push(handle);
                }
                Err(_) => break,
            }
        }

        if frame % 2 == 0 && !handles.is_empty() {
            let pick = (frame as usize).wrapping_mul(7) % handles.len();
            let handle = handles.swap_remove(pick);
            if pool.release(handle).is_err() {
                stale_releases += 1;
            }
        }

        pool.tick();
        // Drop handles whose entities expired this tick, keeping the
        // vec inside its reserved capacity
        handles.retain(|&handle| pool.is_active(handle));

        writer.publish(&pool);
        let view = reader.latest();
        checksum += view.sequence() + view.len() as u64;
        for &(handle, payload) in view.entries() {
            checksum += u64::from(handle.index()) + payload;
        }
    }

    // Phase 2: drive to exhaustion and back through a clear
    while let Ok(handle) = pool.acquire() {
        handles.push(handle);
    }
    checksum += pool.active_count() as u64;
    pool.clear();
    handles.clear();
    writer.publish(&pool);

    let allocs_after = ALLOCATIONS.load(Ordering::Relaxed);
    let deallocs_after = DEALLOCATIONS.load(Ordering::Relaxed);

    println!("\n=== Zero Allocation Test ===");
    println!("Frames: 200 (+ exhaustion and clear)");
    println!("Stale releases observed: {}", stale_releases);
    println!("Workload checksum: {}", checksum);
    println!("Allocations in window: {}", allocs_after - allocs_before);
    println!("Deallocations in window: {}", deallocs_after - deallocs_before);

    assert!(checksum > 0, "Workload should have observed live entities");
    assert_eq!(
        allocs_after - allocs_before,
        0,
        "Steady state must not allocate"
    );
    assert_eq!(
        deallocs_after - deallocs_before,
        0,
        "Steady state must not deallocate"
    );
}
