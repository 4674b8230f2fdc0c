use core::cell::Cell;

use crate::core::{Cycle, MessageId};
use crate::frame::MAX_PAYLOAD;
use crate::time::Instant;

mod emergency;

pub(crate) use emergency::EmergencyBuffer;
pub use emergency::FireError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationError {
    NoSlotLeft,
}

/// Borrowed view of a caller-owned payload buffer
///
/// The view is read (producers) or written (consumers) during a tick, never copied ahead of
/// time: a producer write between enqueue and transmission reaches the wire.
#[derive(Clone, Copy)]
pub(crate) struct Endpoint<'a> {
    pub id: MessageId,
    pub data: &'a [Cell<u8>],
}

#[derive(Clone, Copy)]
pub(crate) struct Producer<'a> {
    pub endpoint: Endpoint<'a>,
    pub flag: &'a Cell<bool>,
    pub cycle: Cycle,
}

#[derive(Clone, Copy)]
pub(crate) struct Consumer<'a> {
    pub endpoint: Endpoint<'a>,
    pub flag: &'a Cell<bool>,
}

/// Append-only fixed-capacity registration table
pub(crate) struct Registry<E, const N: usize>(heapless::Vec<E, N>);

impl<E, const N: usize> Registry<E, N> {
    pub const fn new() -> Self {
        Self(heapless::Vec::new())
    }

    /// Appends the entry. A full registry stays unchanged and hands the entry back.
    pub fn register(&mut self, entry: E) -> Result<(), E> {
        self.0.push(entry)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.0.iter()
    }
}

/// Limits the view to the classic CAN payload
pub(crate) fn clamp_payload(data: &[Cell<u8>], id: MessageId, now: Instant) -> &[Cell<u8>] {
    if data.len() > MAX_PAYLOAD {
        warn!(
            "[{}] payload of {:#x} truncated from {} to {} bytes",
            now.as_millis(),
            id.into_u16(),
            data.len(),
            MAX_PAYLOAD
        );
        &data[..MAX_PAYLOAD]
    } else {
        data
    }
}
