use std::time::{Duration, Instant};

use shipyard::Unique;

#[derive(Unique, Clone, Debug, Default)]
pub struct Time {
    pub elapsed: Duration,
    pub total: Duration,
}

///
/// FrameClock
///
/// Advances the simulation time once per frame. The first tick measures from
/// the moment the clock was created, and the cursor never moves backwards:
/// an instant earlier than the last tick counts as a zero-length frame.
///
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Instant,
    total: Duration,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> FrameClock {
        FrameClock::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> FrameClock {
        FrameClock {
            last: start,
            total: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) -> Time {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Time {
        let elapsed = now.saturating_duration_since(self.last);
        if now > self.last {
            self.last = now;
        }
        self.total += elapsed;
        self.frame_count += 1;

        Time {
            elapsed,
            total: self.total,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new()
    }
}
