//! Mock hardware for integration tests.
//!
//! Pin and delay mocks write into one shared timeline so tests can assert
//! on the exact order of level changes and waits.  `CountingStore` wraps a
//! RAM store and counts writes.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use thermostat::adapters::ram::RamStore;
use thermostat::app::ports::ByteStore;

// ── Timeline ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwEvent {
    High,
    Low,
    WaitMs(u32),
}

#[derive(Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<HwEvent>>>);

#[allow(dead_code)]
impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: HwEvent) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<HwEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Durations of every HIGH period.
    pub fn high_periods(&self) -> Vec<u32> {
        self.periods(HwEvent::High)
    }

    /// Durations of every LOW period that is followed by another HIGH.
    pub fn low_gaps(&self) -> Vec<u32> {
        let events = self.events();
        let mut gaps = Vec::new();
        let mut current: Option<u32> = None;
        for e in events {
            match e {
                HwEvent::Low => current = Some(0),
                HwEvent::WaitMs(ms) => {
                    if let Some(acc) = current.as_mut() {
                        *acc += ms;
                    }
                }
                HwEvent::High => {
                    if let Some(acc) = current.take() {
                        gaps.push(acc);
                    }
                }
            }
        }
        gaps
    }

    /// Time spent LOW after the final edge.
    pub fn trailing_low_ms(&self) -> u32 {
        let events = self.events();
        let Some(last_low) = events.iter().rposition(|e| *e == HwEvent::Low) else {
            return 0;
        };
        events[last_low..]
            .iter()
            .map(|e| match e {
                HwEvent::WaitMs(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    pub fn total_wait_ms(&self) -> u32 {
        self.events()
            .iter()
            .map(|e| match e {
                HwEvent::WaitMs(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    pub fn final_level(&self) -> Option<HwEvent> {
        self.events()
            .into_iter()
            .rev()
            .find(|e| matches!(e, HwEvent::High | HwEvent::Low))
    }

    fn periods(&self, level: HwEvent) -> Vec<u32> {
        let mut out = Vec::new();
        let mut current: Option<u32> = None;
        for e in self.events() {
            match e {
                HwEvent::WaitMs(ms) => {
                    if let Some(acc) = current.as_mut() {
                        *acc += ms;
                    }
                }
                edge if edge == level => current = Some(0),
                _ => {
                    if let Some(acc) = current.take() {
                        out.push(acc);
                    }
                }
            }
        }
        out
    }
}

// ── MockPin / MockDelay ───────────────────────────────────────

pub struct MockPin {
    timeline: Timeline,
}

impl MockPin {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
        }
    }
}

impl ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.timeline.push(HwEvent::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.timeline.push(HwEvent::High);
        Ok(())
    }
}

pub struct MockDelay {
    timeline: Timeline,
}

impl MockDelay {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.push(HwEvent::WaitMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(HwEvent::WaitMs(ms));
    }
}

// ── FaultyPin ─────────────────────────────────────────────────

#[derive(Debug)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin whose every write fails.
pub struct FaultyPin;

impl ErrorType for FaultyPin {
    type Error = PinFault;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }
}

// ── CountingStore ─────────────────────────────────────────────

pub struct CountingStore<const N: usize> {
    pub inner: RamStore<N>,
    pub writes: usize,
}

#[allow(dead_code)]
impl<const N: usize> CountingStore<N> {
    pub fn new() -> Self {
        Self {
            inner: RamStore::new(),
            writes: 0,
        }
    }

    pub fn reset_count(&mut self) {
        self.writes = 0;
    }
}

impl<const N: usize> ByteStore for CountingStore<N> {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn read_byte(&self, address: usize) -> u8 {
        self.inner.read_byte(address)
    }

    fn write_byte(&mut self, address: usize, value: u8) {
        self.writes += 1;
        self.inner.write_byte(address, value);
    }
}
