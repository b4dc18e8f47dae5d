//! # Gold Rush Event System
//!
//! Lock-free notifications out of the simulation loop.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────┐
//! │   Spawner   │─────>│   Event     │─────>│  Presentation│
//! │   Pickup    │      │   Channel   │      │  (FX, audio) │
//! └─────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! Events flow FROM the stage TO presentation. The channel is bounded
//! and never blocks the simulation: when presentation falls behind,
//! events are dropped, frames are not.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use midas_pool::SpawnHandle;

/// Events emitted while a stage runs.
///
/// These events are the "API" between the simulation and anything
/// watching it. Gameplay state never depends on them.
#[derive(Clone, Debug)]
pub enum CoinEvent {
    // =========================================================================
    // Spawn Events
    // =========================================================================
    /// A coin burst put a new coin into the world.
    ///
    /// Emitted by: spawner (after the pool accepts the coin)
    /// Consumed by: presentation (spawn glint, audio)
    Spawned {
        /// Handle of the new coin.
        handle: SpawnHandle,
        /// World position it appeared at.
        position: [f32; 3],
        /// Score it will award on pickup.
        value: u32,
    },

    /// A coin could not spawn because every slot was live.
    ///
    /// Emitted by: spawner (once per denied coin)
    /// Consumed by: telemetry
    Denied {
        /// Stage tick on which the spawn was denied.
        tick: u64,
    },

    // =========================================================================
    // Despawn Events
    // =========================================================================
    /// The player collected a coin.
    ///
    /// Emitted by: pickup (after the pool releases the slot)
    /// Consumed by: presentation (score popup), telemetry
    Collected {
        /// Handle the coin had while it was live.
        handle: SpawnHandle,
        /// Score awarded.
        value: u32,
    },

    /// Coins timed out and vanished.
    ///
    /// Emitted by: stage (one event per tick, not per coin)
    /// Consumed by: telemetry
    Expired {
        /// How many coins vanished on this tick.
        count: usize,
        /// The tick they vanished on.
        tick: u64,
    },
}

/// Event bus for stage notifications.
///
/// Pre-allocates a bounded channel so event traffic cannot grow
/// memory in the hot path.
pub struct EventBus {
    /// Sender end - held by the stage.
    sender: Sender<CoinEvent>,
    /// Receiver end - held by presentation.
    receiver: Receiver<CoinEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events in flight before drops begin.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle (clone for multiple consumers).
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a new pair of sender and receiver.
    ///
    /// Convenience method for creating paired handles.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<CoinEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the event was dropped because the channel is
    /// full or the receiver is gone. The simulation never waits on a
    /// listener.
    #[inline]
    pub fn send(&self, event: CoinEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                // Presentation fell behind - drop to protect the frame
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                // No listener attached - headless runs do this
                false
            }
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<CoinEvent>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    ///
    /// Returns a vector of events. Empty if no events pending.
    #[inline]
    pub fn drain(&self) -> Vec<CoinEvent> {
        let mut events = Vec::with_capacity(64);
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event (non-blocking).
    ///
    /// Returns `None` if no events pending.
    #[inline]
    pub fn try_recv(&self) -> Option<CoinEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
