//! Payload conversion between host and wire byte order

use core::cell::Cell;

use crate::core::ByteOrder;
use crate::frame::{Data, MAX_PAYLOAD};

/// Byte order converter applied symmetrically on the transmit and receive paths
///
/// Under [`ByteOrder::MsbFirst`] the payload is reversed end-to-end, under
/// [`ByteOrder::LsbFirst`] it is copied as is. Either way `decode(encode(x)) == x`.
/// Payloads longer than a classic frame are truncated to 8 bytes. The scheduler clamps and
/// reports oversized buffers when they are registered or fired, so the codec stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Codec {
    order: ByteOrder,
}

impl Codec {
    pub const fn new(order: ByteOrder) -> Self {
        Self { order }
    }

    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Converts a host-ordered payload to a wire-ordered frame payload
    pub fn encode(&self, host: &[u8]) -> Data {
        self.convert(host)
    }

    /// Converts a wire-ordered frame payload to host order
    pub fn decode(&self, wire: &[u8]) -> Data {
        self.convert(wire)
    }

    /// Encodes the current content of a caller-owned buffer
    pub(crate) fn encode_cells(&self, host: &[Cell<u8>]) -> Data {
        let mut bytes = [0; MAX_PAYLOAD];
        let length = host.len().min(MAX_PAYLOAD);
        for (dst, src) in bytes.iter_mut().zip(host) {
            *dst = src.get();
        }
        self.encode(&bytes[..length])
    }

    fn convert(&self, src: &[u8]) -> Data {
        let mut data = Data::new_truncating(src);
        if self.order == ByteOrder::MsbFirst {
            data.reverse();
        }
        data
    }
}
