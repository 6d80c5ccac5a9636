//! Time keeping
//!
//! This module contains the HAL's notion of time:
//! - [`TickCount`], the monotonic 32-bit tick
//! - The tick clock extending a 16-bit hardware counter
//! - Wraparound-safe deadline arithmetic
//! - [`Timebase`], bundling the clock with the critical section and
//!   providing the busy-wait and timer-expiry primitives

use core::convert::Infallible;

/// 16-bit counter extension
pub mod clock;

/// Deadline arithmetic
pub mod deadline;

pub use clock::{OverflowCounter, TickClock};
pub use deadline::{delta_ticks, Deadline};

use crate::{
    config::TimerConfig,
    critical::{CriticalSection, InterruptMask},
    error::HalError,
};

/// Monotonic tick count, wrapping at 2^32
pub type TickCount = u32;

/// Critical section and tick clock shared by foreground and interrupt context
///
/// Every method takes `&self`, so a board can keep the timebase in a
/// `static` and call [`Timebase::on_overflow`] from the timer interrupt while
/// the foreground owns the rest of the HAL.
#[derive(Debug)]
pub struct Timebase<M, C> {
    critical: CriticalSection<M>,
    clock: TickClock<C>,
    config: TimerConfig,
}

impl<M: InterruptMask, C: OverflowCounter> Timebase<M, C> {
    /// Create a timebase; the counter is not started until [`Timebase::start`]
    pub const fn new(mask: M, counter: C, config: TimerConfig) -> Self {
        Self {
            critical: CriticalSection::new(mask),
            clock: TickClock::new(counter),
            config,
        }
    }

    /// Start the hardware counter
    pub fn start(&self) {
        self.clock.start(&self.config);
        debug!("timebase: started at {} ticks/s", self.config.ticks_per_sec());
    }

    /// Current tick count
    pub fn now(&self) -> TickCount {
        self.critical.with(|| self.clock.sample())
    }

    /// Timer overflow interrupt handler
    pub fn on_overflow(&self) {
        self.clock.on_overflow();
    }

    /// Ticks until `target`, saturated to `0..=0xFFFF`
    pub fn ticks_until(&self, target: TickCount) -> u16 {
        delta_ticks(self.now(), target)
    }

    /// Classified distance to `target`
    pub fn deadline(&self, target: TickCount) -> Deadline {
        Deadline::classify(self.now(), target)
    }

    /// Whether `target` has been reached, without blocking
    pub fn check_timer(&self, target: TickCount) -> bool {
        self.ticks_until(target) == 0
    }

    /// Non-blocking wait for `target`
    ///
    /// Returns `WouldBlock` until the target is due, so callers can write
    /// `nb::block!(timebase.poll_until(target))`.
    pub fn poll_until(&self, target: TickCount) -> nb::Result<(), Infallible> {
        if self.check_timer(target) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Spin until `target` is due
    ///
    /// Blocks the foreground only; interrupts keep running. If the tick count
    /// does not advance for `stall_limit` consecutive polls the tick source is
    /// considered dead and [`HalError::TickStalled`] is returned.
    pub fn wait_until(&self, target: TickCount) -> Result<(), HalError> {
        let mut last = self.now();
        let mut idle_polls: u32 = 0;
        trace!("timebase: wait {} -> {}", last, target);

        while delta_ticks(last, target) != 0 {
            core::hint::spin_loop();
            let now = self.now();
            if now != last {
                last = now;
                idle_polls = 0;
                continue;
            }

            idle_polls += 1;
            if self.config.stall_limit != 0 && idle_polls >= self.config.stall_limit {
                error!("timebase: tick stalled at {}", now);
                return Err(HalError::TickStalled);
            }
        }
        Ok(())
    }

    /// Sleep until the next interrupt
    pub fn sleep(&self) {
        self.critical.mask().wait_for_interrupt();
    }

    /// The critical section guarding the tick state
    pub fn critical(&self) -> &CriticalSection<M> {
        &self.critical
    }

    /// The tick clock
    pub fn clock(&self) -> &TickClock<C> {
        &self.clock
    }

    /// Timer configuration
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }
}
