//! # Gold Rush Simulation
//!
//! MISSION: Prove the coin shower holds up under stage conditions:
//! - 10,000 coin ceiling
//! - 300 tick lifetime
//! - 60Hz tick rate
//! - A renderer sampling snapshots from another thread
//!
//! Runs a complete stage headless and outputs statistics. Pass a TOML
//! config path as the first argument to override the defaults.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use midas_game::events::CoinEvent;
use midas_game::stage::Stage;
use midas_game::StageConfig;

/// Event counts as seen by the presentation side of the channel.
#[derive(Default)]
struct EventTotals {
    spawned: u64,
    collected: u64,
    denied: u64,
    expired: u64,
}

impl EventTotals {
    fn absorb(&mut self, event: &CoinEvent) {
        match event {
            CoinEvent::Spawned { .. } => self.spawned += 1,
            CoinEvent::Collected { .. } => self.collected += 1,
            CoinEvent::Denied { .. } => self.denied += 1,
            CoinEvent::Expired { count, .. } => self.expired += *count as u64,
        }
    }
}

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         MIDAS - GOLD RUSH SIMULATION                             ║");
    println!("║         THE ARCHITECT'S COIN SHOWER                              ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => match StageConfig::load(&path) {
            Ok(config) => {
                println!("Loaded stage config from {path}");
                config
            }
            Err(error) => {
                eprintln!("error: {error}");
                std::process::exit(1);
            }
        },
        None => StageConfig::default(),
    };

    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Pool Capacity:      {} coins                                 │", config.pool_capacity);
    println!("│ Coin Lifetime:      {} ticks ({:.1}s)                            ", config.coin_lifetime_ticks, config.coin_lifetime_ticks as f64 / f64::from(config.tick_rate));
    println!("│ Tick Rate:          {} Hz                                       │", config.tick_rate);
    println!("│ Duration:           {} ticks ({:.0}s)                            ", config.duration_ticks, config.duration_ticks as f64 / f64::from(config.tick_rate));
    println!("│ Seed:               {:#x}                                     ", config.seed);
    println!("│ Enemy Deaths/Tick:  up to {}                                     ", config.spawn.max_destroyed_per_tick);
    println!("│ Burst Size:         {}..={} coins                                 ", config.spawn.burst_min, config.spawn.burst_max);
    println!("│ Pickup Radius:      {} units                                   ", config.pickup.radius);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let (mut stage, reader, events) = Stage::new(&config);

    // A stand-in renderer: samples published frames from another
    // thread while the simulation runs
    let running = Arc::new(AtomicBool::new(true));
    let sampler = {
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut last_sequence = 0;
            let mut frames_seen = 0_u64;
            let mut peak_coins = 0_usize;
            while running.load(Ordering::Relaxed) {
                let frame = reader.latest();
                if frame.sequence() != last_sequence {
                    last_sequence = frame.sequence();
                    frames_seen += 1;
                    peak_coins = peak_coins.max(frame.len());
                }
                drop(frame);
                thread::sleep(Duration::from_millis(1));
            }
            (frames_seen, peak_coins)
        })
    };

    println!("Starting simulation...");
    let start = Instant::now();

    let total_ticks = config.duration_ticks;
    let mut totals = EventTotals::default();
    let mut last_progress = 0;

    while stage.tick() {
        for event in events.drain() {
            totals.absorb(&event);
        }

        let progress = (stage.stats().ticks * 100 / total_ticks.max(1)) as usize;
        if progress > last_progress && progress % 10 == 0 {
            print!("\r[");
            for i in 0..10 {
                if i < progress / 10 {
                    print!("█");
                } else {
                    print!("░");
                }
            }
            print!("] {}% - Tick {}/{}", progress, stage.stats().ticks, total_ticks);
            last_progress = progress;
        }
    }
    for event in events.drain() {
        totals.absorb(&event);
    }
    println!();
    println!();

    let elapsed = start.elapsed();
    running.store(false, Ordering::Relaxed);
    let (frames_seen, peak_frame_coins) = sampler.join().unwrap_or((0, 0));

    let stats = stage.stats();
    let pool = stage.pool();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    STAGE RESULTS                                 ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    println!("┌─ TIMING ────────────────────────────────────────────────────────┐");
    println!("│ Real Time:          {:.2} seconds                               ", elapsed.as_secs_f64());
    println!("│ Simulated Time:     {:.0} seconds                                ", stats.ticks as f64 / f64::from(config.tick_rate));
    println!("│ Realtime Factor:    {:.1}x                                       ",
        (stats.ticks as f64 / f64::from(config.tick_rate)) / elapsed.as_secs_f64());
    println!("│ Total Ticks:        {}                                        ", stats.ticks);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ TICK PERFORMANCE ─────────────────────────────────────────────┐");
    let budget_us = 1_000_000_u64 / u64::from(config.tick_rate);
    println!("│ Budget per Tick:    {} μs                                    ", budget_us);
    println!("│ Avg Tick Time:      {:.2} μs                                     ", stats.avg_tick_us());
    println!("│ Max Tick Time:      {} μs                                       ", stats.max_tick_us);

    let tick_ok = stats.avg_tick_us() < budget_us as f64;
    if tick_ok {
        println!("│ Status:             ✓ WITHIN BUDGET                           │");
    } else {
        println!("│ Status:             ✗ OVER BUDGET                             │");
    }
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ COIN ECONOMY ──────────────────────────────────────────────────┐");
    println!("│ Spawned:            {}                                      ", stats.spawned);
    println!("│ Collected:          {}                                        ", stats.collected);
    println!("│ Expired:            {}                                        ", stats.expired);
    println!("│ Denied at Ceiling:  {}                                        ", stats.denied);
    println!("│ Score:              {}                                        ", stats.score);
    println!("│ Peak Live Coins:    {} / {}                                   ", stats.peak_active, pool.capacity());
    println!("│ Live at End:        {}                                        ", pool.active_count());
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ ACCOUNTING (CRITICAL) ─────────────────────────────────────────┐");
    let partition_ok = pool.active_count() + pool.free_count() == pool.capacity();
    let books_ok = stats.reconciles(pool.active_count());
    println!("│ Free + Active:      {} + {} = {}                              ", pool.free_count(), pool.active_count(), pool.capacity());
    println!("│ Event Channel Saw:  {} spawned, {} collected, {} expired     ", totals.spawned, totals.collected, totals.expired);
    println!("│ Denials Observed:   {}                                        ", totals.denied);

    if partition_ok && books_ok {
        println!("│ Status:             ✓ EVERY COIN ACCOUNTED FOR                │");
    } else {
        println!("│ Status:             ✗ LEDGER MISMATCH                         │");
    }
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ RENDER FEED ───────────────────────────────────────────────────┐");
    println!("│ Frames Published:   {}                                        ", stats.ticks);
    println!("│ Frames Sampled:     {}                                        ", frames_seen);
    println!("│ Peak Frame Coins:   {}                                        ", peak_frame_coins);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    // Final verdict
    println!("╔══════════════════════════════════════════════════════════════════╗");
    if tick_ok && partition_ok && books_ok {
        println!("║  ✓ MISSION ACCOMPLISHED                                         ║");
        println!("║    Every coin spawned, scored, or expired on schedule.          ║");
        println!("║    Zero allocations. THE ARCHITECT is pleased.                  ║");
    } else {
        println!("║  ✗ MISSION FAILED                                               ║");
        if !tick_ok {
            println!("║    Tick performance is over budget                              ║");
        }
        if !partition_ok || !books_ok {
            println!("║    The coin ledger does not balance                             ║");
        }
    }
    println!("╚══════════════════════════════════════════════════════════════════╝");
}
