//! Cyclecan core data types
//!
//! This crate provides basic data type definitions used by other cyclecan crates.
//! Cyclecan users should not depend on this crate directly. Use `cyclecan::core` reexport instead.
#![no_std]

use embedded_can::StandardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidValue;

/// Standard (11-bit) CAN message identifier
///
/// The identifier both routes a frame to producers and consumers and decides bus arbitration:
/// a lower numerical value wins, so ordering follows the numerical value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageId(u16);

impl MessageId {
    const MAX_VALUE: u16 = 0x7ff;
    pub const MIN: MessageId = MessageId(0);
    pub const MAX: MessageId = MessageId(Self::MAX_VALUE);

    pub const fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX_VALUE {
            Some(Self::from_u16_truncating(value))
        } else {
            None
        }
    }

    pub const fn from_u16_truncating(value: u16) -> Self {
        Self(value & Self::MAX_VALUE)
    }

    pub const fn into_u16(self) -> u16 {
        self.0
    }
}

impl From<MessageId> for u16 {
    fn from(value: MessageId) -> Self {
        value.into_u16()
    }
}

impl TryFrom<u16> for MessageId {
    type Error = InvalidValue;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidValue)
    }
}

impl From<StandardId> for MessageId {
    fn from(value: StandardId) -> Self {
        Self(value.as_raw())
    }
}

impl From<MessageId> for StandardId {
    fn from(value: MessageId) -> Self {
        // MessageId never exceeds StandardId::MAX
        StandardId::new(value.0).unwrap_or(StandardId::MAX)
    }
}

/// Transmission period of a cyclic producer
///
/// The type has explicit numeric encoding to facilitate look-up table implementation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Cycle {
    /// Every 10 ms
    Ms10 = 0,
    /// Every 20 ms
    Ms20 = 1,
    /// Every 40 ms
    Ms40 = 2,
    /// Every 80 ms
    Ms80 = 3,
    /// Every 100 ms
    Ms100 = 4,
}

impl Cycle {
    pub const FASTEST: Cycle = Cycle::Ms10;
    pub const SLOWEST: Cycle = Cycle::Ms100;
    pub const COUNT: usize = Self::SLOWEST.into_u8() as usize + 1;
    pub const ALL: [Cycle; Self::COUNT] = [
        Cycle::Ms10,
        Cycle::Ms20,
        Cycle::Ms40,
        Cycle::Ms80,
        Cycle::Ms100,
    ];

    pub const fn try_from_u8(code: u8) -> Option<Cycle> {
        match code {
            0 => Some(Cycle::Ms10),
            1 => Some(Cycle::Ms20),
            2 => Some(Cycle::Ms40),
            3 => Some(Cycle::Ms80),
            4 => Some(Cycle::Ms100),
            _ => None,
        }
    }

    pub const fn into_u8(self) -> u8 {
        self as u8
    }

    pub const fn period_millis(self) -> u64 {
        match self {
            Cycle::Ms10 => 10,
            Cycle::Ms20 => 20,
            Cycle::Ms40 => 40,
            Cycle::Ms80 => 80,
            Cycle::Ms100 => 100,
        }
    }
}

impl From<Cycle> for u8 {
    fn from(value: Cycle) -> Self {
        value.into_u8()
    }
}

impl From<Cycle> for usize {
    fn from(value: Cycle) -> Self {
        u8::from(value).into()
    }
}

impl TryFrom<u8> for Cycle {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_u8(value).ok_or(InvalidValue)
    }
}

/// A set of cycles that are due within one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSet(u8);

impl CycleSet {
    const MASK: u8 = u8::MAX >> (u8::BITS as u8 - Cycle::COUNT as u8);

    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(Self::MASK);

    pub const fn new_eq(cycle: Cycle) -> Self {
        Self(1u8 << cycle.into_u8())
    }

    pub const fn contains(&self, cycle: Cycle) -> bool {
        (self.0 >> cycle.into_u8()) & 0x1 != 0
    }

    pub const fn insert(&mut self, cycle: Cycle) {
        self.0 |= Self::new_eq(cycle).0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl Default for CycleSet {
    fn default() -> Self {
        CycleSet::NONE
    }
}

/// Payload byte order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// The last host byte goes first on the wire: the payload is reversed end-to-end
    #[default]
    MsbFirst,
    /// Host bytes go to the wire as they are
    LsbFirst,
}
