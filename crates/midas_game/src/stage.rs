//! # Stage Driver
//!
//! Owns the pool and both gameplay systems and runs them in a fixed
//! order every tick:
//!
//! 1. Pickup sweep (collection beats expiry on a coin's last tick)
//! 2. Spawner (new coins get at least one full tick on screen)
//! 3. Pool clock (expiry)
//! 4. Snapshot publish
//!
//! The driver also keeps the books: every coin that enters the pool
//! must leave it as exactly one of collected, expired, or still live.

use std::time::Instant;

use tracing::info;

use midas_pool::snapshot::{self, SnapshotReader, SnapshotWriter};
use midas_pool::SpawnPool;

use crate::coin::Coin;
use crate::config::StageConfig;
use crate::events::{CoinEvent, EventBus, EventReceiver, EventSender};
use crate::pickup::CoinPickup;
use crate::spawner::CoinSpawner;

/// Running totals for one stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct StageStats {
    /// Ticks simulated so far.
    pub ticks: u64,
    /// Coins the pool accepted.
    pub spawned: u64,
    /// Coins the player collected.
    pub collected: u64,
    /// Coins that timed out.
    pub expired: u64,
    /// Coins denied at the capacity ceiling.
    pub denied: u64,
    /// Score collected so far.
    pub score: u64,
    /// Highest live-coin count seen.
    pub peak_active: usize,
    /// Total simulation time across all ticks, in microseconds.
    pub tick_us_sum: u64,
    /// Slowest tick seen, in microseconds.
    pub max_tick_us: u64,
}

impl StageStats {
    /// Checks the coin ledger: every accepted coin is exactly one of
    /// collected, expired, or still live.
    #[inline]
    #[must_use]
    pub const fn reconciles(&self, active_now: usize) -> bool {
        self.spawned == self.collected + self.expired + active_now as u64
    }

    /// Average simulation cost per tick in microseconds.
    #[must_use]
    pub fn avg_tick_us(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.tick_us_sum as f64 / self.ticks as f64
    }
}

/// A running Gold Rush stage.
pub struct Stage {
    pool: SpawnPool<Coin>,
    spawner: CoinSpawner,
    pickup: CoinPickup,
    events: EventSender,
    writer: SnapshotWriter<Coin>,
    stats: StageStats,
    duration_ticks: u64,
}

impl Stage {
    /// Builds a stage from a validated config.
    ///
    /// Returns the stage along with the render-side snapshot reader
    /// and the gameplay event receiver. Everything the stage will ever
    /// allocate is allocated here.
    #[must_use]
    pub fn new(config: &StageConfig) -> (Self, SnapshotReader<Coin>, EventReceiver) {
        let pool = SpawnPool::new(config.pool_capacity, config.coin_lifetime_ticks);
        let spawner = CoinSpawner::new(config.spawn.clone(), config.seed);
        let pickup = CoinPickup::new(config.pickup.clone(), config.pool_capacity);
        let (writer, reader) = snapshot::channel(config.pool_capacity);
        let (events, receiver) = EventBus::create_pair(config.event_capacity);

        info!(
            "stage ready: {} slots, {} tick lifetime, seed {:#x}",
            config.pool_capacity, config.coin_lifetime_ticks, config.seed
        );

        let stage = Self {
            pool,
            spawner,
            pickup,
            events,
            writer,
            stats: StageStats::default(),
            duration_ticks: config.duration_ticks,
        };
        (stage, reader, receiver)
    }

    /// Simulates one tick.
    ///
    /// Collection runs before the clock advances, so a coin grabbed on
    /// its last tick still scores. Returns `true` while the stage has
    /// ticks left to run.
    pub fn tick(&mut self) -> bool {
        let started = Instant::now();

        let picked = self.pickup.tick(&mut self.pool, &self.events);
        let spawned = self.spawner.tick(&mut self.pool, &self.events);

        let expired = self.pool.tick();
        if expired > 0 {
            self.events.send(CoinEvent::Expired {
                count: expired,
                tick: self.pool.now(),
            });
        }

        self.writer.publish(&self.pool);

        self.stats.ticks += 1;
        self.stats.spawned += u64::from(spawned.spawned);
        self.stats.denied += u64::from(spawned.denied);
        self.stats.collected += u64::from(picked.collected);
        self.stats.score += picked.value;
        self.stats.expired += expired as u64;
        self.stats.peak_active = self.stats.peak_active.max(self.pool.active_count());

        let tick_us = started.elapsed().as_micros() as u64;
        self.stats.tick_us_sum += tick_us;
        self.stats.max_tick_us = self.stats.max_tick_us.max(tick_us);

        self.stats.ticks < self.duration_ticks
    }

    /// Runs the stage to its configured end.
    pub fn run(&mut self) {
        while self.tick() {}
        info!(
            "stage complete: {} ticks, {} collected, {} expired",
            self.stats.ticks, self.stats.collected, self.stats.expired
        );
    }

    /// Rewinds the stage for another run with the same seed.
    ///
    /// Pool slots, stats, the spawner's random stream, and the player
    /// orbit all reset. The snapshot sequence deliberately keeps
    /// counting so an attached renderer never sees it rewind.
    pub fn restart(&mut self) {
        self.pool.clear();
        self.spawner.restart();
        self.pickup.restart();
        self.stats = StageStats::default();
        info!("stage restarted");
    }

    /// Running totals so far.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> StageStats {
        self.stats
    }

    /// The pool under the stage.
    #[inline]
    #[must_use]
    pub const fn pool(&self) -> &SpawnPool<Coin> {
        &self.pool
    }
}
