//! Transceiver access consumed by the scheduler

use embedded_can::{Frame as _, Id};

use crate::frame::Frame;

/// Non-blocking CAN transceiver
///
/// The frame payload is already in wire byte order. Implementations must return immediately:
/// a frame that cannot be queued for transmission right now is reported as not accepted and
/// will be offered again, unchanged, on a later call.
pub trait Transceiver {
    /// Configures the bus bit rate and enables the peripheral.
    fn start(&mut self, bitrate: u32);

    /// Offers one frame for transmission. Returns `true` if the frame was accepted.
    fn try_send(&mut self, frame: &Frame) -> bool;

    /// Fetches the next received frame, if any.
    fn try_receive(&mut self) -> Option<Frame>;
}

impl<T: Transceiver + ?Sized> Transceiver for &mut T {
    fn start(&mut self, bitrate: u32) {
        (**self).start(bitrate)
    }

    fn try_send(&mut self, frame: &Frame) -> bool {
        (**self).try_send(frame)
    }

    fn try_receive(&mut self) -> Option<Frame> {
        (**self).try_receive()
    }
}

/// Transceiver adapter for `embedded_can::nb::Can` drivers
///
/// Bit timing of such drivers is configured on construction, so `start` leaves it untouched.
/// A pending lower-priority frame that the driver displaces from its mailbox is lost and reported
/// as a warning. Driver errors count as "not accepted" on transmission and as "nothing
/// available" on reception.
pub struct NbCan<T> {
    can: T,
}

impl<T> NbCan<T> {
    pub fn new(can: T) -> Self {
        Self { can }
    }

    pub fn inner(&self) -> &T {
        &self.can
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.can
    }

    pub fn into_inner(self) -> T {
        self.can
    }
}

impl<T: embedded_can::nb::Can> Transceiver for NbCan<T> {
    fn start(&mut self, bitrate: u32) {
        debug!("nb transceiver started, bit rate {} is set by the driver", bitrate);
    }

    fn try_send(&mut self, frame: &Frame) -> bool {
        let Some(raw) = T::Frame::new(frame.id(), &frame.data) else {
            warn!("driver can not represent frame {:#x}", frame.id.into_u16());
            return false;
        };
        match self.can.transmit(&raw) {
            Ok(None) => true,
            Ok(Some(displaced)) => {
                warn!("frame {:#x} displaced from mailbox", raw_id(displaced.id()));
                true
            }
            Err(nb::Error::WouldBlock) => false,
            Err(nb::Error::Other(_)) => {
                warn!("transmission of {:#x} failed", frame.id.into_u16());
                false
            }
        }
    }

    fn try_receive(&mut self) -> Option<Frame> {
        loop {
            match self.can.receive() {
                Ok(raw) => match Frame::from_can_frame(&raw) {
                    Some(frame) => return Some(frame),
                    None => trace!("skip unsupported frame {:#x}", raw_id(raw.id())),
                },
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(_)) => {
                    warn!("reception failed");
                    return None;
                }
            }
        }
    }
}

fn raw_id(id: Id) -> u32 {
    match id {
        Id::Standard(id) => u32::from(id.as_raw()),
        Id::Extended(id) => id.as_raw(),
    }
}
