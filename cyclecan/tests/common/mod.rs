#![allow(dead_code)]

use cyclecan::core::MessageId;
use cyclecan::frame::{Data, Frame};
use cyclecan::link::Transceiver;
use cyclecan::time::{Clock, Duration, Instant};
use std::cell::Cell;
use std::collections::VecDeque;

/// Transceiver recording every transmission attempt
pub struct MockTransceiver {
    pub bitrate: Option<u32>,
    pub accept: bool,
    pub send_attempts: usize,
    pub sent: Vec<Frame>,
    pub inbox: VecDeque<Frame>,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self {
            bitrate: None,
            accept: true,
            send_attempts: 0,
            sent: Vec::new(),
            inbox: VecDeque::new(),
        }
    }

    pub fn sent_ids(&self) -> Vec<u16> {
        self.sent.iter().map(|frame| frame.id.into_u16()).collect()
    }

    pub fn deliver(&mut self, id: u16, payload: &[u8]) {
        self.inbox
            .push_back(Frame::new(msg_id(id), Data::new(payload).unwrap()));
    }
}

impl Transceiver for MockTransceiver {
    fn start(&mut self, bitrate: u32) {
        self.bitrate = Some(bitrate);
    }

    fn try_send(&mut self, frame: &Frame) -> bool {
        self.send_attempts += 1;
        if self.accept {
            self.sent.push(*frame);
        }
        self.accept
    }

    fn try_receive(&mut self) -> Option<Frame> {
        self.inbox.pop_front()
    }
}

/// Clock advanced by hand
pub struct ManualClock(Cell<Instant>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Cell::new(Instant::from_millis(0)))
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

pub fn msg_id(value: u16) -> MessageId {
    MessageId::new(value).unwrap()
}
