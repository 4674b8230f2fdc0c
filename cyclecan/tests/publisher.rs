mod common;

use common::{ManualClock, MockTransceiver, msg_id};
use cyclecan::core::{ByteOrder, Cycle};
use cyclecan::{Config, Port, Scheduler};

#[test]
fn test_lower_id_first() {
    let clock = ManualClock::new();
    let a = Port::<2>::new();
    let b = Port::<2>::new();
    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());

    scheduler.publish(&a, msg_id(0x100), Cycle::FASTEST).unwrap();
    scheduler.publish(&b, msg_id(0x050), Cycle::FASTEST).unwrap();

    clock.advance(10);
    scheduler.tick();
    assert_eq!(scheduler.transceiver().sent_ids(), [0x050]);
    assert_eq!(scheduler.queue_depth(), 1);

    scheduler.tick();
    assert_eq!(scheduler.transceiver().sent_ids(), [0x050, 0x100]);
    assert!(a.is_flagged());
    assert!(b.is_flagged());
}

#[test]
fn test_cycle_rates() {
    let clock = ManualClock::new();
    let fast = Port::<1>::new();
    let slow = Port::<1>::new();
    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());
    scheduler.publish(&fast, msg_id(0x10), Cycle::Ms10).unwrap();
    scheduler.publish(&slow, msg_id(0x20), Cycle::Ms40).unwrap();

    for _ in 0..8 {
        clock.advance(5);
        scheduler.tick();
    }
    // Both are due at 40 ms, the slower one goes out one tick later
    scheduler.tick();

    let sent = scheduler.transceiver().sent_ids();
    assert_eq!(sent.iter().filter(|id| **id == 0x10).count(), 4);
    assert_eq!(sent.iter().filter(|id| **id == 0x20).count(), 1);
}

#[test]
fn test_rate_independent_of_tick_length() {
    let clock = ManualClock::new();
    let port = Port::<1>::new();
    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());
    scheduler.publish(&port, msg_id(0x10), Cycle::Ms10).unwrap();

    for _ in 0..400 {
        clock.advance(3);
        scheduler.tick();
    }

    // 1200 ms of a 10 ms cycle
    assert_eq!(scheduler.transceiver().sent.len(), 120);
}

#[test]
fn test_read_at_send_time() {
    let clock = ManualClock::new();
    let port = Port::<2>::new();
    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::new(500_000, ByteOrder::LsbFirst));
    scheduler.publish(&port, msg_id(0x30), Cycle::Ms10).unwrap();

    port.write(&[1, 1]);
    scheduler.transceiver_mut().accept = false;
    clock.advance(10);
    scheduler.tick();
    assert_eq!(scheduler.queue_depth(), 1);

    // The queued frame picks up the latest buffer content
    port.write(&[2, 2]);
    scheduler.transceiver_mut().accept = true;
    scheduler.tick();
    assert_eq!(scheduler.transceiver().sent.len(), 1);
    assert_eq!(scheduler.transceiver().sent[0].data.as_ref(), [2, 2]);
}

#[test]
fn test_one_attempt_per_tick() {
    let clock = ManualClock::new();
    let ports: [Port<1>; 6] = Default::default();
    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());
    for (value, port) in ports.iter().enumerate() {
        scheduler
            .publish(port, msg_id(0x100 + value as u16), Cycle::Ms10)
            .unwrap();
    }

    clock.advance(10);
    scheduler.tick();
    assert_eq!(scheduler.transceiver().send_attempts, 1);
    assert_eq!(scheduler.queue_depth(), 5);

    scheduler.transceiver_mut().accept = false;
    for _ in 0..3 {
        scheduler.tick();
    }
    assert_eq!(scheduler.transceiver().send_attempts, 4);
    assert_eq!(scheduler.queue_depth(), 5);
    assert_eq!(scheduler.statistics().tx_rejected, 3);
}

#[test]
fn test_flag_marks_queued_frame() {
    let clock = ManualClock::new();
    let port = Port::<1>::new();
    port.flag().set(true);
    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());
    scheduler.publish(&port, msg_id(0x40), Cycle::Ms20).unwrap();
    assert!(!port.is_flagged());

    // Set on queueing even though the transceiver refuses it
    scheduler.transceiver_mut().accept = false;
    clock.advance(20);
    scheduler.tick();
    assert!(port.take_flag());
    assert!(scheduler.transceiver().sent.is_empty());
}

#[test]
fn test_pool_exhaustion() {
    let clock = ManualClock::new();
    let ports: [Port<1>; 4] = Default::default();
    let mut scheduler =
        Scheduler::<_, _, 8, 8, 8, 3>::with_capacity(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());
    scheduler.transceiver_mut().accept = false;
    for (value, port) in ports.iter().enumerate() {
        scheduler
            .publish(port, msg_id(value as u16), Cycle::Ms10)
            .unwrap();
    }

    clock.advance(10);
    scheduler.tick();
    assert_eq!(scheduler.queue_depth(), 3);
    assert!(!ports[3].is_flagged());
    assert_eq!(scheduler.statistics().cyclic_dropped, 1);
    // A saturated pool resets the high-water mark
    assert_eq!(scheduler.peak_queue_depth(), 0);

    scheduler.transceiver_mut().accept = true;
    scheduler.tick();
    assert_eq!(scheduler.transceiver().sent_ids(), [0]);
    assert_eq!(scheduler.queue_depth(), 2);
}

#[test]
fn test_peak_queue_depth() {
    let clock = ManualClock::new();
    let ports: [Port<1>; 3] = Default::default();
    let mut scheduler = Scheduler::new(MockTransceiver::new(), &clock);
    scheduler.initialize(Config::default());
    scheduler.transceiver_mut().accept = false;
    for (value, port) in ports.iter().enumerate() {
        scheduler
            .publish(port, msg_id(value as u16), Cycle::Ms10)
            .unwrap();
    }

    clock.advance(10);
    scheduler.tick();
    assert_eq!(scheduler.queue_depth(), 3);
    assert_eq!(scheduler.peak_queue_depth(), 3);

    scheduler.transceiver_mut().accept = true;
    scheduler.tick();
    assert_eq!(scheduler.queue_depth(), 2);
    assert_eq!(scheduler.peak_queue_depth(), 3);
}
