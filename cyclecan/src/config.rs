use crate::core::ByteOrder;

/// Bus and payload settings applied by [`Scheduler::initialize`](crate::Scheduler::initialize)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub struct Config {
    /// Nominal bus bit rate in bit/s
    pub bitrate: u32,
    /// Host to wire payload conversion
    pub byte_order: ByteOrder,
}

impl Config {
    pub const DEFAULT_BITRATE: u32 = 500_000;

    pub const fn new(bitrate: u32, byte_order: ByteOrder) -> Self {
        Self {
            bitrate,
            byte_order,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BITRATE, ByteOrder::MsbFirst)
    }
}
