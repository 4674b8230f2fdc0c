//! Monotonic time source

pub use embassy_time::{Duration, Instant};

/// Monotonic clock queried once per scheduler tick
///
/// Instants must never decrease. The clock resolution should be finer than the fastest cycle.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Clock backed by the embassy-time driver of the target
#[cfg(feature = "system-clock")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "system-clock")]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
