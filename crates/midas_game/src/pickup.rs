//! # Coin Pickup
//!
//! The player's collection sweep. The player follows a scripted orbit
//! around the arena center; every coin inside the pickup radius is
//! released back to the pool and scored.
//!
//! Collection is two-phase: candidates are gathered into a scratch
//! buffer while the pool is iterated, then released afterwards. The
//! scratch buffer is sized to pool capacity once, so the sweep never
//! allocates.

use std::f32::consts::TAU;

use midas_pool::{SpawnHandle, SpawnPool};

use crate::coin::Coin;
use crate::config::PickupConfig;
use crate::events::{CoinEvent, EventSender};

/// What one pickup sweep did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickupOutcome {
    /// Coins collected this tick.
    pub collected: u32,
    /// Score gained this tick.
    pub value: u64,
}

/// The orbiting collector.
pub struct CoinPickup {
    config: PickupConfig,
    angle: f32,
    scratch: Vec<(SpawnHandle, u32)>,
}

impl CoinPickup {
    /// Creates a pickup sweep for a pool of the given capacity.
    #[must_use]
    pub fn new(config: PickupConfig, pool_capacity: usize) -> Self {
        Self {
            config,
            angle: 0.0,
            scratch: Vec::with_capacity(pool_capacity),
        }
    }

    /// Puts the player back at the start of the orbit.
    pub fn restart(&mut self) {
        self.angle = 0.0;
        self.scratch.clear();
    }

    /// The player's current position on the ground plane.
    #[must_use]
    pub fn player_position(&self) -> (f32, f32) {
        (
            self.config.orbit_radius * self.angle.cos(),
            self.config.orbit_radius * self.angle.sin(),
        )
    }

    /// Advances the orbit one step and collects every coin in reach.
    ///
    /// Emits [`CoinEvent::Collected`] per coin taken.
    pub fn tick(&mut self, pool: &mut SpawnPool<Coin>, events: &EventSender) -> PickupOutcome {
        self.angle += self.config.angular_speed;
        if self.angle > TAU {
            // Keep the angle small so cos/sin stay precise on long runs
            self.angle -= TAU;
        }

        let (player_x, player_z) = self.player_position();
        let radius_sq = self.config.radius * self.config.radius;

        self.scratch.clear();
        for (handle, coin) in pool.iter() {
            if coin.distance_squared_xz(player_x, player_z) <= radius_sq {
                self.scratch.push((handle, coin.value));
            }
        }

        let mut outcome = PickupOutcome::default();
        for (handle, value) in self.scratch.drain(..) {
            if pool.release(handle).is_ok() {
                events.send(CoinEvent::Collected { handle, value });
                outcome.collected += 1;
                outcome.value += u64::from(value);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;

    fn place_coin(pool: &mut SpawnPool<Coin>, x: f32, z: f32, value: u32) -> SpawnHandle {
        let handle = pool.acquire().unwrap();
        *pool.get_mut(handle).unwrap() = Coin::new(x, 0.5, z, 0.0, value);
        handle
    }

    fn fixed_player_config() -> PickupConfig {
        // Zero angular speed pins the player at (orbit_radius, 0)
        PickupConfig {
            radius: 5.0,
            orbit_radius: 10.0,
            angular_speed: 0.0,
        }
    }

    #[test]
    fn test_collects_only_within_radius() {
        let mut pool: SpawnPool<Coin> = SpawnPool::new(16, 300);
        let mut pickup = CoinPickup::new(fixed_player_config(), 16);
        let (sender, receiver) = EventBus::create_pair(64);

        let near = place_coin(&mut pool, 12.0, 1.0, 5);
        let far = place_coin(&mut pool, -10.0, 0.0, 10);

        let outcome = pickup.tick(&mut pool, &sender);
        assert_eq!(outcome.collected, 1);
        assert_eq!(outcome.value, 5);
        assert!(!pool.is_active(near));
        assert!(pool.is_active(far));

        let picked = receiver.try_recv().unwrap();
        assert!(matches!(picked, CoinEvent::Collected { value: 5, .. }));
    }

    #[test]
    fn test_score_accumulates_across_coins() {
        let mut pool: SpawnPool<Coin> = SpawnPool::new(16, 300);
        let mut pickup = CoinPickup::new(fixed_player_config(), 16);
        let (sender, _receiver) = EventBus::create_pair(64);

        place_coin(&mut pool, 10.0, 0.0, 5);
        place_coin(&mut pool, 11.0, -2.0, 10);
        place_coin(&mut pool, 9.0, 3.0, 1);

        let outcome = pickup.tick(&mut pool, &sender);
        assert_eq!(outcome.collected, 3);
        assert_eq!(outcome.value, 16);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_restart_rewinds_the_orbit() {
        let config = PickupConfig {
            radius: 1.0,
            orbit_radius: 10.0,
            angular_speed: 0.25,
        };
        let mut pool: SpawnPool<Coin> = SpawnPool::new(16, 300);
        let mut pickup = CoinPickup::new(config, 16);
        let (sender, _receiver) = EventBus::create_pair(64);

        for _ in 0..10 {
            let outcome = pickup.tick(&mut pool, &sender);
            assert_eq!(outcome.collected, 0);
        }
        pickup.restart();

        // One step after restart the player sits at angle 0.25 exactly
        let angle = 0.25_f32;
        place_coin(&mut pool, 10.0 * angle.cos(), 10.0 * angle.sin(), 7);
        let outcome = pickup.tick(&mut pool, &sender);
        assert_eq!(outcome.collected, 1);
        assert_eq!(outcome.value, 7);
    }
}
