//! Caller-owned storage for a registered payload

use core::cell::Cell;

/// Payload buffer of `N` bytes paired with its transmit or receive flag
///
/// The scheduler borrows both parts on registration. The application keeps access through
/// shared references: it may update a published payload at any time, and the latest content
/// is what goes to the wire.
pub struct Port<const N: usize> {
    data: [Cell<u8>; N],
    flag: Cell<bool>,
}

impl<const N: usize> Port<N> {
    pub const fn new() -> Self {
        Self {
            data: [const { Cell::new(0) }; N],
            flag: Cell::new(false),
        }
    }

    pub fn data(&self) -> &[Cell<u8>] {
        &self.data
    }

    pub fn flag(&self) -> &Cell<bool> {
        &self.flag
    }

    pub fn read(&self) -> [u8; N] {
        core::array::from_fn(|i| self.data[i].get())
    }

    /// Copies the bytes into the buffer, up to its length
    pub fn write(&self, bytes: &[u8]) {
        for (dst, src) in self.data.iter().zip(bytes) {
            dst.set(*src);
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.get()
    }

    /// Returns the flag and clears it
    pub fn take_flag(&self) -> bool {
        self.flag.replace(false)
    }
}

impl<const N: usize> Default for Port<N> {
    fn default() -> Self {
        Port::new()
    }
}
