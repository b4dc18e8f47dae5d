//! # Coin Spawner
//!
//! Turns enemy deaths into coin bursts. Each tick rolls how many
//! enemies were destroyed, where they died, and how many coins each
//! death scatters. When the pool is full the coin simply does not
//! spawn; the stage keeps running and the denial is counted.
//!
//! The random stream is seeded and advances by a fixed amount per
//! attempted coin, never by pool occupancy. Two runs with the same
//! seed roll identical stages even if one of them hits the capacity
//! ceiling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use midas_pool::SpawnPool;

use crate::coin::Coin;
use crate::config::SpawnConfig;
use crate::events::{CoinEvent, EventSender};

/// Score values a coin can roll, weighted evenly.
const COIN_VALUES: [u32; 3] = [1, 5, 10];

/// How far a coin scatters from the enemy that dropped it.
const SCATTER: f32 = 2.0;

/// Height coins hover at.
const COIN_HEIGHT: f32 = 0.5;

/// What one spawner tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// Coins that made it into the pool.
    pub spawned: u32,
    /// Coins denied because every slot was live.
    pub denied: u32,
}

impl SpawnOutcome {
    /// Total coins the tick attempted to spawn.
    #[inline]
    #[must_use]
    pub const fn total(self) -> u32 {
        self.spawned + self.denied
    }
}

/// The enemy-death coin source.
pub struct CoinSpawner {
    config: SpawnConfig,
    rng: StdRng,
    seed: u64,
}

impl CoinSpawner {
    /// Creates a spawner with its own seeded random stream.
    #[must_use]
    pub fn new(config: SpawnConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Rewinds the random stream to the start of the stage.
    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Resolves one tick of enemy deaths into coin spawns.
    ///
    /// Emits [`CoinEvent::Spawned`] per accepted coin and
    /// [`CoinEvent::Denied`] per coin the pool had no room for.
    pub fn tick(&mut self, pool: &mut SpawnPool<Coin>, events: &EventSender) -> SpawnOutcome {
        let mut outcome = SpawnOutcome::default();

        let destroyed = self.rng.gen_range(0..=self.config.max_destroyed_per_tick);
        for _ in 0..destroyed {
            let extent = self.config.arena_half_extent;
            let enemy_x = self.rng.gen_range(-extent..=extent);
            let enemy_z = self.rng.gen_range(-extent..=extent);

            let burst = self
                .rng
                .gen_range(self.config.burst_min..=self.config.burst_max);
            for _ in 0..burst {
                // Roll the coin before asking the pool, so the random
                // stream is identical whether or not the spawn lands
                let coin = Coin::new(
                    enemy_x + self.rng.gen_range(-SCATTER..=SCATTER),
                    COIN_HEIGHT,
                    enemy_z + self.rng.gen_range(-SCATTER..=SCATTER),
                    self.rng.gen_range(0.0..std::f32::consts::TAU),
                    COIN_VALUES[self.rng.gen_range(0..COIN_VALUES.len())],
                );

                match pool.acquire() {
                    Ok(handle) => {
                        if let Some(slot) = pool.get_mut(handle) {
                            *slot = coin;
                        }
                        events.send(CoinEvent::Spawned {
                            handle,
                            position: [coin.x, coin.y, coin.z],
                            value: coin.value,
                        });
                        outcome.spawned += 1;
                    }
                    Err(_) => {
                        events.send(CoinEvent::Denied { tick: pool.now() });
                        outcome.denied += 1;
                    }
                }
            }
        }

        outcome
    }
}
