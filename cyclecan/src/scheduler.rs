use core::cell::Cell;

use crate::config::Config;
use crate::core::{Cycle, CycleSet, MessageId};
use crate::cycle::CycleGates;
use crate::format::Codec;
use crate::frame::Frame;
use crate::link::Transceiver;
use crate::port::Port;
use crate::registry::{
    Consumer, EmergencyBuffer, Endpoint, FireError, Producer, RegistrationError, Registry,
    clamp_payload,
};
use crate::stats::{Statistics, bump};
use crate::time::{Clock, Instant};
use crate::utils::PendingList;

/// Multi-rate CAN message scheduler
///
/// The scheduler owns the transceiver and the clock and borrows every registered payload
/// buffer for `'a`. All work happens in [`tick`](Self::tick), which must be called from a
/// single control loop, well below the fastest cycle period.
///
/// Capacities are fixed at compile time:
/// * `PRODUCERS` and `CONSUMERS` bound the registries,
/// * `EMERGENCIES` bounds the one-shot requests staged between two ticks,
/// * `NODES` bounds the frames waiting for transmission (at most 255).
pub struct Scheduler<
    'a,
    T,
    C,
    const PRODUCERS: usize = 128,
    const CONSUMERS: usize = 128,
    const EMERGENCIES: usize = 8,
    const NODES: usize = 96,
> {
    transceiver: T,
    clock: C,
    config: Config,
    codec: Codec,
    producers: Registry<Producer<'a>, PRODUCERS>,
    consumers: Registry<Consumer<'a>, CONSUMERS>,
    emergencies: EmergencyBuffer<'a, EMERGENCIES>,
    pending: PendingList<&'a [Cell<u8>], NODES>,
    gates: CycleGates,
    stats: Statistics,
}

impl<'a, T: Transceiver, C: Clock> Scheduler<'a, T, C> {
    /// Creates a scheduler with the default capacities
    pub fn new(transceiver: T, clock: C) -> Self {
        Self::with_capacity(transceiver, clock)
    }
}

impl<
    'a,
    T: Transceiver,
    C: Clock,
    const PRODUCERS: usize,
    const CONSUMERS: usize,
    const EMERGENCIES: usize,
    const NODES: usize,
> Scheduler<'a, T, C, PRODUCERS, CONSUMERS, EMERGENCIES, NODES>
{
    /// Creates a scheduler with the capacities given by the type parameters
    pub fn with_capacity(transceiver: T, clock: C) -> Self {
        let start = clock.now();
        Self {
            transceiver,
            clock,
            config: Config::default(),
            codec: Codec::default(),
            producers: Registry::new(),
            consumers: Registry::new(),
            emergencies: EmergencyBuffer::new(),
            pending: PendingList::new(),
            gates: CycleGates::new(start),
            stats: Statistics::default(),
        }
    }

    /// Starts the transceiver and resets the transmission state
    ///
    /// Queued frames are discarded and every cycle gate restarts at the current instant.
    /// Registrations and staged emergency requests are kept.
    pub fn initialize(&mut self, config: Config) {
        let now = self.clock.now();
        self.transceiver.start(config.bitrate);
        self.pending.clear();
        self.gates.restart(now);
        self.codec = Codec::new(config.byte_order);
        self.config = config;
        debug!(
            "[{}] scheduler initialized, bit rate {}",
            now.as_millis(),
            config.bitrate
        );
    }

    /// Registers a cyclic producer
    ///
    /// The buffer is read when its frame is transmitted, not when it is queued. The flag is
    /// cleared now and set whenever a frame is queued for the producer.
    pub fn register_producer(
        &mut self,
        data: &'a [Cell<u8>],
        id: MessageId,
        flag: &'a Cell<bool>,
        cycle: Cycle,
    ) -> Result<(), RegistrationError> {
        let now = self.clock.now();
        let data = clamp_payload(data, id, now);
        let producer = Producer {
            endpoint: Endpoint { id, data },
            flag,
            cycle,
        };
        if self.producers.register(producer).is_err() {
            bump(&mut self.stats.registrations_rejected);
            warn!(
                "[{}] producer {:#x} rejected, registry full",
                now.as_millis(),
                id.into_u16()
            );
            return Err(RegistrationError::NoSlotLeft);
        }
        flag.set(false);
        Ok(())
    }

    /// Registers a consumer
    ///
    /// Every received frame with the identifier is copied into the buffer and sets the flag.
    /// Several consumers may share an identifier.
    pub fn register_consumer(
        &mut self,
        data: &'a [Cell<u8>],
        id: MessageId,
        flag: &'a Cell<bool>,
    ) -> Result<(), RegistrationError> {
        let now = self.clock.now();
        let data = clamp_payload(data, id, now);
        let consumer = Consumer {
            endpoint: Endpoint { id, data },
            flag,
        };
        if self.consumers.register(consumer).is_err() {
            bump(&mut self.stats.registrations_rejected);
            warn!(
                "[{}] consumer {:#x} rejected, registry full",
                now.as_millis(),
                id.into_u16()
            );
            return Err(RegistrationError::NoSlotLeft);
        }
        flag.set(false);
        Ok(())
    }

    /// Registers the port as a cyclic producer
    pub fn publish<const N: usize>(
        &mut self,
        port: &'a Port<N>,
        id: MessageId,
        cycle: Cycle,
    ) -> Result<(), RegistrationError> {
        self.register_producer(port.data(), id, port.flag(), cycle)
    }

    /// Registers the port as a consumer
    pub fn subscribe<const N: usize>(
        &mut self,
        port: &'a Port<N>,
        id: MessageId,
    ) -> Result<(), RegistrationError> {
        self.register_consumer(port.data(), id, port.flag())
    }

    /// Requests an out-of-cycle transmission of a registered producer
    ///
    /// The first producer registered with the identifier is used. Its cyclic schedule is
    /// not affected.
    pub fn fire(&mut self, id: MessageId) -> Result<(), FireError> {
        let now = self.clock.now();
        let endpoint = self
            .producers
            .iter()
            .find(|producer| producer.endpoint.id == id)
            .map(|producer| producer.endpoint);
        let Some(endpoint) = endpoint else {
            bump(&mut self.stats.unknown_fires);
            warn!(
                "[{}] fire of unknown id {:#x}",
                now.as_millis(),
                id.into_u16()
            );
            return Err(FireError::UnknownId);
        };
        self.stage(endpoint, now)
    }

    /// Requests a one-shot transmission of an unregistered buffer
    ///
    /// The buffer is read when the frame is transmitted, so it must stay untouched until
    /// then if its current content matters.
    pub fn fire_raw(&mut self, data: &'a [Cell<u8>], id: MessageId) -> Result<(), FireError> {
        let now = self.clock.now();
        let data = clamp_payload(data, id, now);
        self.stage(Endpoint { id, data }, now)
    }

    fn stage(&mut self, endpoint: Endpoint<'a>, now: Instant) -> Result<(), FireError> {
        let result = self.emergencies.stage(endpoint);
        if result.is_err() {
            bump(&mut self.stats.emergency_overflows);
            warn!(
                "[{}] emergency {:#x} dropped, buffer full",
                now.as_millis(),
                endpoint.id.into_u16()
            );
        }
        result
    }

    /// Runs one scheduling step
    ///
    /// The step drains the transceiver reception, queues the staged emergency requests and
    /// the producers whose cycle is due, and makes a single transmission attempt for the
    /// queued frame with the lowest identifier. A frame the transceiver does not accept stays
    /// at the head of the queue and is retried on the next tick.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let due = self.gates.evaluate(now);

        self.ingest(now);
        self.drain_emergencies(now);
        self.enqueue_cyclic(due, now);
        self.transmit(now);
    }

    fn ingest(&mut self, now: Instant) {
        while let Some(frame) = self.transceiver.try_receive() {
            bump(&mut self.stats.rx_frames);
            trace!(
                "[{}] rx {:#x}, {} bytes",
                now.as_millis(),
                frame.id.into_u16(),
                frame.data.len()
            );

            let payload = self.codec.decode(&frame.data);
            let mut matched = false;
            for consumer in self.consumers.iter() {
                if consumer.endpoint.id != frame.id {
                    continue;
                }
                for (dst, src) in consumer.endpoint.data.iter().zip(payload.iter()) {
                    dst.set(*src);
                }
                consumer.flag.set(true);
                matched = true;
            }
            if !matched {
                bump(&mut self.stats.rx_unmatched);
            }
        }
    }

    fn drain_emergencies(&mut self, now: Instant) {
        while let Some(endpoint) = self.emergencies.pop() {
            if self.pending.insert(endpoint.id, endpoint.data).is_err() {
                bump(&mut self.stats.emergency_dropped);
                warn!(
                    "[{}] emergency {:#x} dropped, no free node",
                    now.as_millis(),
                    endpoint.id.into_u16()
                );
            }
        }
    }

    fn enqueue_cyclic(&mut self, due: CycleSet, now: Instant) {
        if due.is_empty() {
            return;
        }
        for producer in self.producers.iter() {
            if !due.contains(producer.cycle) {
                continue;
            }
            let Endpoint { id, data } = producer.endpoint;
            if self.pending.insert(id, data).is_ok() {
                producer.flag.set(true);
            } else {
                bump(&mut self.stats.cyclic_dropped);
                warn!(
                    "[{}] cyclic {:#x} dropped, no free node",
                    now.as_millis(),
                    id.into_u16()
                );
            }
        }
    }

    fn transmit(&mut self, now: Instant) {
        let Some((id, data)) = self.pending.head() else {
            return;
        };
        let frame = Frame::new(id, self.codec.encode_cells(data));

        if self.transceiver.try_send(&frame) {
            trace!("[{}] tx {:#x}", now.as_millis(), id.into_u16());
            self.pending.pop_head();
            bump(&mut self.stats.tx_frames);
        } else {
            trace!("[{}] tx {:#x} not accepted", now.as_millis(), id.into_u16());
            bump(&mut self.stats.tx_rejected);
        }
    }

    /// Number of frames waiting for transmission
    pub fn queue_depth(&self) -> usize {
        self.pending.len()
    }

    /// High-water mark of the queue depth
    ///
    /// The mark drops back to zero whenever the queue fills the whole node pool. A zero value
    /// after traffic therefore means either an idle queue or a saturated one.
    pub fn peak_queue_depth(&self) -> usize {
        self.pending.peak_len()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Emergency requests waiting for the next tick
    pub fn staged_emergencies(&self) -> usize {
        self.emergencies.len()
    }

    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }

    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.transceiver
    }
}
