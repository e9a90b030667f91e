//! Event Queue System for Decoupled Communication
//!
//! Timers and pooled-object helpers report what happened through a
//! double-buffered queue instead of direct callbacks. Events are written
//! during one tick and read after the swap at the end of it.
//!
//! # Example
//!
//! ```ignore
//! runtime.tick(dt);
//! for event in runtime.context().events.iter() {
//!     if let GameEvent::CountdownTick { remaining } = event {
//!         log::info!("{remaining}...");
//!     }
//! }
//! ```

use std::collections::VecDeque;

// ============================================================================
// Event Types
// ============================================================================

/// Game events raised by scheduled tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameEvent {
    // -------------------------------------------------------------------------
    // Countdown Events
    // -------------------------------------------------------------------------
    /// A start countdown began.
    CountdownStarted {
        /// Value the countdown starts from
        from: u32,
    },

    /// The countdown shows a new value.
    CountdownTick {
        /// Whole seconds left
        remaining: u32,
    },

    /// The countdown reached zero.
    CountdownFinished,

    // -------------------------------------------------------------------------
    // Round Timer Events
    // -------------------------------------------------------------------------
    /// A timed round began.
    RoundStarted {
        /// Round length, rounded to whole seconds
        seconds: u32,
    },

    /// The rounded number of seconds left changed.
    TimerChanged {
        /// Whole seconds left
        seconds: u32,
    },

    /// The round timer ran out.
    TimeUp,

    // -------------------------------------------------------------------------
    // Misc
    // -------------------------------------------------------------------------
    /// A delayed trigger fired.
    Triggered {
        /// Trigger identifier
        id: &'static str,
    },

    /// A pooled item was handed back after a delay.
    ItemReturned {
        /// Pool tag
        tag: String,
    },
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue for tick-consistent event processing.
///
/// Events pushed before a `swap()` are only visible after it, so readers see
/// a stable batch regardless of the order tasks ran in.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this tick
    pending: VecDeque<GameEvent>,
    /// Events from the previous tick, ready for processing
    processing: VecDeque<GameEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 32;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a new event queue with specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            processing: VecDeque::with_capacity(capacity),
        }
    }

    /// Push an event; it becomes readable after the next `swap()`.
    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Swap the pending and processing queues.
    ///
    /// Events from the previous batch are discarded.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over the current batch in push order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.processing.iter()
    }

    /// Check if the current batch is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Get the number of events in the current batch.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_push_and_swap() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::CountdownTick { remaining: 3 });
        assert!(queue.is_empty(), "Events should not be visible before swap");

        queue.swap();
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.iter().next(),
            Some(&GameEvent::CountdownTick { remaining: 3 })
        );
    }

    #[test]
    fn test_event_queue_double_buffer_isolation() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::TimerChanged { seconds: 10 });
        queue.swap();

        // Pushed while the first batch is being read
        queue.push(GameEvent::TimeUp);

        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events, vec![&GameEvent::TimerChanged { seconds: 10 }]);

        queue.swap();
        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events, vec![&GameEvent::TimeUp]);
    }

    #[test]
    fn test_event_queue_swap_discards_old_batch() {
        let mut queue = EventQueue::new();

        queue.push(GameEvent::Triggered { id: "intro" });
        queue.push(GameEvent::ItemReturned { tag: "sfx".into() });
        queue.swap();
        assert_eq!(queue.len(), 2);

        queue.swap();
        assert!(queue.is_empty());
    }
}
