//! Cyclecan driver interface
//!
//! The crate provides an interface between a CAN transceiver driver and the cyclecan scheduler.
//! Limited scope facilitates compatibility across versions.
//! Driver crates should depend on this crate. Cyclecan users should depend on
//! the `cyclecan` crate instead.
//!
//! The scheduler consumes two primitives:
//! * `Transceiver` sends and receives classic CAN frames without blocking
//! * `Clock` provides a monotonic instant used to gate the periodic cycles
//!
//! Unlike async stacks, the scheduler pulls and pushes frames from its own update routine.
//! A driver must never wait inside `try_send` or `try_receive`: it reports "not accepted" or
//! "nothing available" instead, and the scheduler retries on its next tick.
//!
//! Drivers implementing `embedded_can::nb::Can` can be plugged in through `link::NbCan`.

#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod frame;
pub mod link;
pub mod time;
