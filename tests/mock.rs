#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;
use lmic_hal::{
    EdgeLine, HalError, Halt, InterruptMask, Line, OverflowCounter, RadioIrqHandler,
    ReleasablePin, TimerConfig,
};

/// Interrupt mask recording its state in a shared handle
#[derive(Clone, Default)]
pub struct MockMask {
    pub masked: Rc<Cell<bool>>,
    pub enables: Rc<Cell<u32>>,
    pub sleeps: Rc<Cell<u32>>,
}

impl InterruptMask for MockMask {
    fn disable(&self) {
        self.masked.set(true);
    }

    fn enable(&self) {
        self.masked.set(false);
        self.enables.set(self.enables.get() + 1);
    }

    fn wait_for_interrupt(&self) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}

/// Hardware counter whose value is set by the test
#[derive(Clone, Default)]
pub struct MockCounter {
    pub count: Rc<Cell<u16>>,
    pub pending: Rc<Cell<bool>>,
    pub started: Rc<Cell<bool>>,
}

impl MockCounter {
    /// Advance by `ticks`, latching the overflow flag on a wrap
    pub fn advance(&self, ticks: u16) {
        let (next, wrapped) = self.count.get().overflowing_add(ticks);
        self.count.set(next);
        if wrapped {
            self.pending.set(true);
        }
    }
}

impl OverflowCounter for MockCounter {
    fn start(&self, _config: &TimerConfig) {
        self.started.set(true);
    }

    fn count(&self) -> u16 {
        self.count.get()
    }

    fn overflow_pending(&self) -> bool {
        self.pending.get()
    }

    fn clear_overflow(&self) {
        self.pending.set(false);
    }
}

/// Free-running simulated timer shared between a mask and a counter
///
/// Time advances by one tick every time interrupts are unmasked, and a wrap
/// immediately runs the overflow interrupt.
pub struct SimClock {
    count: AtomicU32,
    pending: AtomicBool,
    reads: AtomicU32,
    last_read: AtomicU32,
}

impl SimClock {
    pub const fn new(count: u16) -> Self {
        Self {
            count: AtomicU32::new(count as u32),
            pending: AtomicBool::new(false),
            reads: AtomicU32::new(0),
            last_read: AtomicU32::new(0),
        }
    }

    fn tick(&self) -> bool {
        let next = (self.count.load(Ordering::SeqCst) + 1) & 0xFFFF;
        self.count.store(next, Ordering::SeqCst);
        if next == 0 {
            self.pending.store(true, Ordering::SeqCst);
        }
        self.pending.load(Ordering::SeqCst)
    }

    /// Number of counter samples taken
    pub fn reads(&self) -> u32 {
        self.reads.load(Ordering::SeqCst)
    }

    /// Raw counter value of the last sample
    pub fn last_read(&self) -> u16 {
        self.last_read.load(Ordering::SeqCst) as u16
    }
}

/// Mask side of a [`SimClock`]; `isr` is the timer overflow handler
pub struct SimMask {
    sim: &'static SimClock,
    isr: fn(),
}

impl SimMask {
    pub const fn new(sim: &'static SimClock, isr: fn()) -> Self {
        Self { sim, isr }
    }
}

impl InterruptMask for SimMask {
    fn disable(&self) {}

    fn enable(&self) {
        if self.sim.tick() {
            (self.isr)();
        }
    }
}

/// Counter side of a [`SimClock`]
pub struct SimCounter(pub &'static SimClock);

impl OverflowCounter for SimCounter {
    fn start(&self, _config: &TimerConfig) {}

    fn count(&self) -> u16 {
        let value = self.0.count.load(Ordering::SeqCst);
        self.0.reads.fetch_add(1, Ordering::SeqCst);
        self.0.last_read.store(value, Ordering::SeqCst);
        value as u16
    }

    fn overflow_pending(&self) -> bool {
        self.0.pending.load(Ordering::SeqCst)
    }

    fn clear_overflow(&self) {
        self.0.pending.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinEvent {
    Low,
    High,
    Released,
}

/// Output pin logging every level change
#[derive(Clone, Default)]
pub struct MockPin {
    pub log: Rc<RefCell<Vec<PinEvent, 16>>>,
    pub fail: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn events(&self) -> std::vec::Vec<PinEvent> {
        self.log.borrow().iter().copied().collect()
    }

    fn record(&self, event: PinEvent) -> Result<(), ()> {
        if self.fail.get() {
            return Err(());
        }
        self.log.borrow_mut().push(event).unwrap();
        Ok(())
    }
}

impl OutputPin for MockPin {
    type Error = ();

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(PinEvent::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(PinEvent::High)
    }
}

impl ReleasablePin for MockPin {
    fn release(&mut self) -> Result<(), Self::Error> {
        self.record(PinEvent::Released)
    }
}

/// SPI peripheral answering every exchange with a programmed byte
#[derive(Clone, Default)]
pub struct MockSpi {
    pub response: Rc<Cell<u8>>,
    pub sent: Rc<RefCell<Vec<u8, 32>>>,
    pub fail: Rc<Cell<bool>>,
}

impl MockSpi {
    pub fn with_response(response: u8) -> Self {
        let spi = Self::default();
        spi.response.set(response);
        spi
    }

    pub fn sent(&self) -> std::vec::Vec<u8> {
        self.sent.borrow().iter().copied().collect()
    }
}

impl Transfer<u8> for MockSpi {
    type Error = ();

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        if self.fail.get() {
            return Err(());
        }
        for word in words.iter_mut() {
            self.sent.borrow_mut().push(*word).unwrap();
            *word = self.response.get();
        }
        Ok(words)
    }
}

/// DIO line with a test-controlled edge latch
#[derive(Clone, Default)]
pub struct MockLine {
    pub edge: Rc<Cell<bool>>,
    pub armed: Rc<Cell<bool>>,
    pub fail: Rc<Cell<bool>>,
}

impl MockLine {
    pub fn raise(&self) {
        self.edge.set(true);
    }
}

impl EdgeLine for MockLine {
    type Error = ();

    fn listen_rising(&mut self) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(());
        }
        self.armed.set(true);
        Ok(())
    }

    fn take_edge(&mut self) -> bool {
        self.edge.replace(false)
    }
}

/// Upstream handler recording every event
#[derive(Default)]
pub struct RecordingHandler {
    pub events: Vec<Line, 16>,
}

impl RadioIrqHandler for RecordingHandler {
    fn on_radio_irq(&mut self, line: Line) {
        self.events.push(line).unwrap();
    }
}

/// Halt that unwinds so tests can observe the failure
#[derive(Clone, Default)]
pub struct PanicHalt {
    pub reason: Rc<Cell<Option<HalError>>>,
}

impl Halt for PanicHalt {
    fn halt(&mut self, reason: HalError) -> ! {
        self.reason.set(Some(reason));
        panic!("halted: {}", reason);
    }
}
