//! Periodic gates deciding which cycles are due within a tick

use crate::core::{Cycle, CycleSet};
use crate::time::{Duration, Instant};

/// Elapsed-time gate of a single period
///
/// The gate opens once the period has elapsed since its last deadline. The deadline advances
/// by exactly one period, so the rate does not drift with the tick length. After a stall of a
/// full period or more the deadline restarts from the current instant, so a stalled caller
/// gets one due signal rather than a burst.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Interval {
    period: Duration,
    last: Instant,
}

impl Interval {
    pub const fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            last: start,
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.last = now;
    }

    pub fn check(&mut self, now: Instant) -> bool {
        match now.checked_duration_since(self.last) {
            Some(elapsed) if elapsed >= self.period => {
                self.last += self.period;
                if elapsed - self.period >= self.period {
                    self.last = now;
                }
                true
            }
            _ => false,
        }
    }
}

/// One independent gate per cycle
pub(crate) struct CycleGates {
    intervals: [Interval; Cycle::COUNT],
}

impl CycleGates {
    pub fn new(start: Instant) -> Self {
        Self {
            intervals: Cycle::ALL
                .map(|cycle| Interval::new(Duration::from_millis(cycle.period_millis()), start)),
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.intervals
            .iter_mut()
            .for_each(|interval| interval.restart(now));
    }

    /// Checks every gate once and returns the cycles due at `now`
    pub fn evaluate(&mut self, now: Instant) -> CycleSet {
        let mut due = CycleSet::NONE;
        for cycle in Cycle::ALL {
            if self.intervals[usize::from(cycle)].check(now) {
                due.insert(cycle);
            }
        }
        due
    }
}
