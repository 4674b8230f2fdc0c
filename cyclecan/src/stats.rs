/// Event counters accumulated since the scheduler was constructed
///
/// Counters wrap around on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Statistics {
    /// Frames fetched from the transceiver
    pub rx_frames: u32,
    /// Received frames no consumer was registered for
    pub rx_unmatched: u32,
    /// Frames accepted by the transceiver
    pub tx_frames: u32,
    /// Transmit attempts the transceiver did not accept
    pub tx_rejected: u32,
    /// Cyclic entries dropped because the node pool was exhausted
    pub cyclic_dropped: u32,
    /// Emergency entries dropped because the node pool was exhausted
    pub emergency_dropped: u32,
    /// Fire requests refused because the emergency buffer was full
    pub emergency_overflows: u32,
    /// Fire requests naming no registered producer
    pub unknown_fires: u32,
    /// Producer or consumer registrations refused because the registry was full
    pub registrations_rejected: u32,
}

pub(crate) fn bump(counter: &mut u32) {
    *counter = counter.wrapping_add(1);
}
