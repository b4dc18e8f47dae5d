//! # MIDAS
//!
//! The Gold Rush stage: a headless coin shower built on the pool.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    GOLD RUSH STAGE                        │
//! ├───────────────────────────────────────────────────────────┤
//! │                                                           │
//! │  ┌──────────────┐    ┌──────────────┐    ┌─────────────┐  │
//! │  │   Spawner    │───>│   Coin Pool  │<───│   Pickup    │  │
//! │  │              │    │              │    │             │  │
//! │  │  • Bursts    │    │  • Slots     │    │  • Sweep    │  │
//! │  │  • Denials   │    │  • Lifetimes │    │  • Score    │  │
//! │  └──────────────┘    └──────┬───────┘    └─────────────┘  │
//! │                            │                              │
//! │                     snapshot frames                       │
//! │                            │                              │
//! │                            v                              │
//! │                    (render thread)                        │
//! │                                                           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `coin`: The coin payload and stage constants
//! - `config`: TOML-backed stage configuration
//! - `events`: Inter-system event bus
//! - `spawner`: Enemy-death coin bursts
//! - `pickup`: Player collection sweep
//! - `stage`: Frame orchestration and accounting

pub mod coin;
pub mod config;
pub mod events;
pub mod pickup;
pub mod spawner;
pub mod stage;

// Re-export the pool
pub use midas_pool as pool;

// Re-export commonly used types
pub use coin::{Coin, COIN_CAPACITY, COIN_LIFETIME_TICKS, TICKS_PER_SECOND};
pub use config::{ConfigError, PickupConfig, SpawnConfig, StageConfig};
pub use events::{CoinEvent, EventBus, EventReceiver, EventSender};
pub use pickup::{CoinPickup, PickupOutcome};
pub use spawner::{CoinSpawner, SpawnOutcome};
pub use stage::{Stage, StageStats};
