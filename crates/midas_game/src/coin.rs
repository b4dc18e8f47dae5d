//! # Coin Payload
//!
//! The data carried by every live coin, plus the stage constants that
//! size the pool. The payload is plain-old-data so snapshot frames can
//! be handed to a GPU uploader as raw bytes.

use bytemuck::{Pod, Zeroable};

// ============================================================================
// STAGE CONSTANTS
// ============================================================================

/// Maximum simultaneously live coins. The pool is sized to this once
/// at startup and never grows.
pub const COIN_CAPACITY: usize = 10_000;

/// Coin lifetime in ticks. Coins vanish after five seconds on screen.
pub const COIN_LIFETIME_TICKS: u64 = 300;

/// Fixed simulation rate.
pub const TICKS_PER_SECOND: u32 = 60;

// ============================================================================
// THE COIN
// ============================================================================

/// One live coin: world position, bob animation phase, and value.
///
/// 20 bytes, `#[repr(C)]`, no padding. A released slot resets to the
/// default (a worthless coin at the origin).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Coin {
    /// World X position.
    pub x: f32,
    /// World Y position (height above the ground plane).
    pub y: f32,
    /// World Z position.
    pub z: f32,
    /// Phase offset for the idle bobbing animation, in radians.
    pub bob_phase: f32,
    /// Score awarded on pickup.
    pub value: u32,
}

impl Coin {
    /// Creates a coin at a position with a value.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, bob_phase: f32, value: u32) -> Self {
        Self {
            x,
            y,
            z,
            bob_phase,
            value,
        }
    }

    /// Squared distance to a point on the ground plane, ignoring
    /// height. Pickup radii compare against this to avoid the sqrt.
    #[inline]
    #[must_use]
    pub fn distance_squared_xz(self, x: f32, z: f32) -> f32 {
        let dx = self.x - x;
        let dz = self.z - z;
        dx * dx + dz * dz
    }
}
