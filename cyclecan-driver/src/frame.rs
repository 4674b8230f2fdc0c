//! Classic CAN frame object

use cyclecan_core::MessageId;
use embedded_can::{Id, StandardId};

/// Payload capacity of a classic CAN frame
pub const MAX_PAYLOAD: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidLength;

/// Classic CAN data vector of at most 8 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Data {
    length: u8,
    bytes: [u8; MAX_PAYLOAD],
}

impl Data {
    pub const EMPTY: Data = Data {
        length: 0,
        bytes: [0; MAX_PAYLOAD],
    };

    /// Creates a new vector from a slice of compatible length.
    pub fn new(data: &[u8]) -> Result<Self, InvalidLength> {
        if data.len() > MAX_PAYLOAD {
            return Err(InvalidLength);
        }
        Ok(Self::new_truncating(data))
    }

    /// Creates a new vector from the first 8 bytes of the slice.
    pub fn new_truncating(data: &[u8]) -> Self {
        let length = data.len().min(MAX_PAYLOAD);
        let mut bytes = [0; MAX_PAYLOAD];
        bytes[..length].copy_from_slice(&data[..length]);
        Self {
            length: length as u8,
            bytes,
        }
    }

    pub fn new_zeros(length: usize) -> Result<Self, InvalidLength> {
        if length > MAX_PAYLOAD {
            return Err(InvalidLength);
        }
        Ok(Self {
            length: length as u8,
            bytes: [0; MAX_PAYLOAD],
        })
    }
}

impl core::ops::Deref for Data {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes[..usize::from(self.length)]
    }
}

impl core::ops::DerefMut for Data {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes[..usize::from(self.length)]
    }
}

/// Standard data frame with wire-ordered payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub id: MessageId,
    pub data: Data,
}

impl Frame {
    pub fn new(id: MessageId, data: Data) -> Self {
        Self { id, data }
    }

    /// Converts a frame of any `embedded_can` driver.
    ///
    /// Extended and remote frames are not supported and yield `None`.
    pub fn from_can_frame(frame: &impl embedded_can::Frame) -> Option<Self> {
        if frame.is_remote_frame() {
            return None;
        }
        match frame.id() {
            Id::Standard(id) => Some(Self {
                id: MessageId::from(id),
                data: Data::new(frame.data()).ok()?,
            }),
            Id::Extended(_) => None,
        }
    }
}

impl embedded_can::Frame for Frame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        match id.into() {
            Id::Standard(id) => Some(Self {
                id: MessageId::from(id),
                data: Data::new(data).ok()?,
            }),
            Id::Extended(_) => None,
        }
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        false
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::Standard(StandardId::from(self.id))
    }

    fn dlc(&self) -> usize {
        self.data.len()
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
