/*!
    Clock types.
*/

use std::sync::Mutex;
use std::time::{Duration, Instant};

/**
    Trait for pipeline clocks.

    A clock provides the current position on a shared timeline. Stream
    bookkeeping (arrival times, inactivity timeouts, frame ages) is
    expressed as positions on this timeline rather than raw instants,
    so the time source can be swapped out.
*/
pub trait Clock: Send + Sync {
    /// Get the current position.
    fn position(&self) -> Duration;

    /// Reset the clock to a specific position.
    fn reset_to(&self, position: Duration);
}

/**
    Wall-time clock.

    The default time source for live pipelines. Position advances with
    wall time from the moment of construction (or the last reset).
*/
pub struct WallClock {
    /// Anchor instant and the position it corresponds to.
    anchor: Mutex<(Instant, Duration)>,
}

impl WallClock {
    /**
        Create a new wall clock starting at position zero.
    */
    pub fn new() -> Self {
        Self {
            anchor: Mutex::new((Instant::now(), Duration::ZERO)),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn position(&self) -> Duration {
        let (instant, offset) = *self.anchor.lock().unwrap();
        offset + instant.elapsed()
    }

    fn reset_to(&self, position: Duration) {
        *self.anchor.lock().unwrap() = (Instant::now(), position);
    }
}

// Verify WallClock is Send + Sync
static_assertions::assert_impl_all!(WallClock: Send, Sync, Clock);

/**
    Manually driven clock.

    Position only moves when told to. Used by tests to step time-driven
    components (sequencing, inactivity cleanup) deterministically.
*/
pub struct ManualClock {
    position: Mutex<Duration>,
}

impl ManualClock {
    /**
        Create a new manual clock at position zero.
    */
    pub fn new() -> Self {
        Self::starting_at(Duration::ZERO)
    }

    /**
        Create a new manual clock at the given position.
    */
    pub fn starting_at(position: Duration) -> Self {
        Self {
            position: Mutex::new(position),
        }
    }

    /**
        Advance the clock by the given amount.
    */
    pub fn advance(&self, by: Duration) {
        *self.position.lock().unwrap() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn position(&self) -> Duration {
        *self.position.lock().unwrap()
    }

    fn reset_to(&self, position: Duration) {
        *self.position.lock().unwrap() = position;
    }
}

// Verify ManualClock is Send + Sync
static_assertions::assert_impl_all!(ManualClock: Send, Sync, Clock);
