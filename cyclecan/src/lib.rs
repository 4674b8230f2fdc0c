//! # Cyclecan
//!
//! This library schedules periodic and on-demand classic CAN messages for control loops in
//! no_std environments. Every buffer is either caller-owned or fixed at compile time, so
//! the library needs no dynamic memory allocation and never blocks.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌─────────────┐
//!                      │ Transceiver │
//!                      └──┬───────▲──┘
//!                 receive │       │ send (head only)
//!                         ▼       │
//! ┌──────────┐  copy  ┌───────────┴──┐  insert  ┌──────────────┐
//! │ Consumer │◄───────┤  Scheduler   ├─────────►│ Pending list │
//! │ buffers  │        │   (tick)     │          │ (node pool)  │
//! └──────────┘        └─▲──────────▲─┘          └──────────────┘
//!                       │          │
//!               ┌───────┴──┐  ┌────┴──────┐
//!               │ Producer │  │ Emergency │
//!               │ registry │  │ buffer    │
//!               └──────────┘  └───────────┘
//! ```
//! Components:
//! * _Scheduler_ is the explicitly owned context. Its `tick` routine runs one bounded update.
//! * _Producer registry_ binds a caller buffer and flag to an identifier and one of five
//!   cycles (10, 20, 40, 80, 100 ms).
//! * _Consumer registry_ binds a caller buffer and flag to an identifier. Several consumers may
//!   share an identifier.
//! * _Emergency buffer_ stages one-shot requests until the next tick.
//! * _Pending list_ keeps queued frames ordered by identifier, so the frame that would win bus
//!   arbitration is transmitted first. Its nodes come from a fixed pool.
//! * _Codec_ converts payloads between host and wire byte order.
//!
//! ## Tick
//!
//! One tick performs, in order:
//! 1. drain the transceiver reception into matching consumers,
//! 2. move staged emergency requests into the pending list,
//! 3. queue the producers whose cycle is due,
//! 4. make exactly one transmission attempt for the head of the pending list.
//!
//! A frame the transceiver does not accept stays at the head and is retried on the next tick.
//! The application must tick often enough to keep up with the bus load.
//!
//! ## Borrowed buffers
//!
//! Registered buffers are `Cell` slices borrowed for the scheduler lifetime. Queued frames
//! keep a reference, not a copy: a producer buffer written after its frame was queued is
//! transmitted with the new content.
//!
//! ## Resource exhaustion
//!
//! Full registries and a full emergency buffer reject the request with an error. A full node
//! pool drops the entry being queued. Each case is reported through the diagnostics backend
//! (`defmt` or `log` feature) and counted in [`Statistics`].
#![no_std]

#[cfg(test)]
extern crate std;

pub use cyclecan_core as core;
pub use cyclecan_driver::{frame, link, time};

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

mod config;
mod cycle;
pub mod format;
mod port;
mod registry;
mod scheduler;
mod shared;
mod stats;
#[allow(dead_code)]
mod utils;

pub use config::Config;
pub use port::Port;
pub use registry::{FireError, RegistrationError};
pub use scheduler::Scheduler;
pub use shared::SharedScheduler;
pub use stats::Statistics;
