use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::core::{Cycle, MessageId};
use crate::link::Transceiver;
use crate::registry::{FireError, RegistrationError};
use crate::scheduler::Scheduler;
use crate::time::Clock;

/// Scheduler handle shareable between several callers
///
/// Every call locks the mutex for its whole duration, so a registration or a fire request
/// never interleaves with a tick. A nested call from inside [`lock`](Self::lock) panics.
pub struct SharedScheduler<
    'a,
    M: RawMutex,
    T,
    C,
    const PRODUCERS: usize = 128,
    const CONSUMERS: usize = 128,
    const EMERGENCIES: usize = 8,
    const NODES: usize = 96,
>(Mutex<M, RefCell<Scheduler<'a, T, C, PRODUCERS, CONSUMERS, EMERGENCIES, NODES>>>);

impl<
    'a,
    M: RawMutex,
    T: Transceiver,
    C: Clock,
    const PRODUCERS: usize,
    const CONSUMERS: usize,
    const EMERGENCIES: usize,
    const NODES: usize,
> SharedScheduler<'a, M, T, C, PRODUCERS, CONSUMERS, EMERGENCIES, NODES>
{
    pub const fn new(
        scheduler: Scheduler<'a, T, C, PRODUCERS, CONSUMERS, EMERGENCIES, NODES>,
    ) -> Self {
        Self(Mutex::new(RefCell::new(scheduler)))
    }

    /// Runs the closure with exclusive access to the scheduler
    pub fn lock<R>(
        &self,
        f: impl FnOnce(&mut Scheduler<'a, T, C, PRODUCERS, CONSUMERS, EMERGENCIES, NODES>) -> R,
    ) -> R {
        self.0.lock(|cell| {
            let mut scheduler = cell.borrow_mut();
            f(&mut scheduler)
        })
    }

    pub fn tick(&self) {
        self.lock(|scheduler| scheduler.tick())
    }

    pub fn register_producer(
        &self,
        data: &'a [Cell<u8>],
        id: MessageId,
        flag: &'a Cell<bool>,
        cycle: Cycle,
    ) -> Result<(), RegistrationError> {
        self.lock(|scheduler| scheduler.register_producer(data, id, flag, cycle))
    }

    pub fn register_consumer(
        &self,
        data: &'a [Cell<u8>],
        id: MessageId,
        flag: &'a Cell<bool>,
    ) -> Result<(), RegistrationError> {
        self.lock(|scheduler| scheduler.register_consumer(data, id, flag))
    }

    pub fn fire(&self, id: MessageId) -> Result<(), FireError> {
        self.lock(|scheduler| scheduler.fire(id))
    }

    pub fn fire_raw(&self, data: &'a [Cell<u8>], id: MessageId) -> Result<(), FireError> {
        self.lock(|scheduler| scheduler.fire_raw(data, id))
    }

    pub fn queue_depth(&self) -> usize {
        self.lock(|scheduler| scheduler.queue_depth())
    }

    pub fn into_inner(self) -> Scheduler<'a, T, C, PRODUCERS, CONSUMERS, EMERGENCIES, NODES> {
        self.0.into_inner().into_inner()
    }
}
