mod common;

use common::{ManualClock, MockTransceiver, msg_id};
use cyclecan::core::Cycle;
use cyclecan::{Config, FireError, Port, Scheduler, SharedScheduler};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;

#[test]
fn test_shared_access() {
    let clock = ManualClock::new();
    let telemetry = Port::<2>::new();
    let command = Port::<2>::new();

    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());
    let shared = SharedScheduler::<NoopRawMutex, _, _>::new(scheduler);

    shared
        .register_producer(telemetry.data(), msg_id(0x10), telemetry.flag(), Cycle::Ms10)
        .unwrap();
    shared
        .register_consumer(command.data(), msg_id(0x20), command.flag())
        .unwrap();
    assert_eq!(shared.fire(msg_id(0x30)), Err(FireError::UnknownId));
    shared.fire_raw(command.data(), msg_id(0x05)).unwrap();

    shared.lock(|scheduler| scheduler.transceiver_mut().deliver(0x20, &[1, 2]));
    clock.advance(10);
    shared.tick();
    assert_eq!(shared.queue_depth(), 1);
    shared.tick();

    assert!(command.is_flagged());
    assert!(telemetry.is_flagged());

    let scheduler = shared.into_inner();
    assert_eq!(scheduler.transceiver().sent_ids(), [0x05, 0x10]);
    assert_eq!(scheduler.producer_count(), 1);
    assert_eq!(scheduler.consumer_count(), 1);
}
