//! 32-bit tick clock over a 16-bit hardware counter
//!
//! The timer counts continuously from `0` to `0xFFFF` and raises an overflow
//! interrupt on every wrap. The overflow handler bumps a software high word;
//! a sample combines it with the live counter as `(high << 16) | count`.

use core::sync::atomic::{AtomicU32, Ordering};

use super::TickCount;
use crate::config::TimerConfig;

/// Free-running 16-bit hardware counter with an overflow flag
pub trait OverflowCounter {
    /// Configure the prescaler, start counting in continuous mode and
    /// enable the overflow interrupt
    fn start(&self, config: &TimerConfig);

    /// Current raw counter value
    fn count(&self) -> u16;

    /// Whether an overflow has happened that the interrupt handler has not
    /// serviced yet
    fn overflow_pending(&self) -> bool;

    /// Acknowledge the overflow interrupt
    fn clear_overflow(&self);
}

/// Extends an [`OverflowCounter`] to a 32-bit [`TickCount`]
#[derive(Debug)]
pub struct TickClock<C> {
    counter: C,
    high: AtomicU32,
}

impl<C: OverflowCounter> TickClock<C> {
    /// Create a clock whose high word starts at zero
    pub const fn new(counter: C) -> Self {
        Self {
            counter,
            high: AtomicU32::new(0),
        }
    }

    /// Start the hardware counter
    pub fn start(&self, config: &TimerConfig) {
        self.counter.start(config);
    }

    /// Combine the high word with the hardware counter
    ///
    /// Must run with interrupts masked. If the counter wrapped after the
    /// last serviced overflow, the local high word is advanced and the
    /// counter re-read, so a count taken just before the wrap is never
    /// paired with the advanced high word.
    pub fn sample(&self) -> TickCount {
        let mut high = self.high.load(Ordering::Relaxed);
        let mut count = self.counter.count();
        if self.counter.overflow_pending() {
            count = self.counter.count();
            high = high.wrapping_add(1);
        }
        (high << 16) | TickCount::from(count)
    }

    /// Overflow interrupt handler
    ///
    /// Runs in interrupt context; foreground readers exclude it by masking.
    pub fn on_overflow(&self) {
        self.counter.clear_overflow();
        let high = self.high.load(Ordering::Relaxed);
        self.high.store(high.wrapping_add(1), Ordering::Relaxed);
    }

    /// The underlying hardware counter
    pub fn counter(&self) -> &C {
        &self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Counter that can be scripted to wrap in the middle of a sample
    #[derive(Default)]
    struct ScriptedCounter {
        count: Cell<u16>,
        pending: Cell<bool>,
        wrap_after_read: Cell<Option<u16>>,
    }

    impl OverflowCounter for ScriptedCounter {
        fn start(&self, _config: &TimerConfig) {}

        fn count(&self) -> u16 {
            let value = self.count.get();
            if let Some(next) = self.wrap_after_read.take() {
                self.count.set(next);
                self.pending.set(true);
            }
            value
        }

        fn overflow_pending(&self) -> bool {
            self.pending.get()
        }

        fn clear_overflow(&self) {
            self.pending.set(false);
        }
    }

    #[test]
    fn test_sample_combines_words() {
        let clock = TickClock::new(ScriptedCounter::default());
        clock.counter().count.set(0x1234);
        assert_eq!(clock.sample(), 0x0000_1234);

        clock.on_overflow();
        clock.on_overflow();
        assert_eq!(clock.sample(), 0x0002_1234);
    }

    #[test]
    fn test_unserviced_overflow_is_peeked() {
        let clock = TickClock::new(ScriptedCounter::default());
        clock.counter().count.set(0xFFFE);
        let before = clock.sample();
        assert_eq!(before, 0x0000_FFFE);

        // Counter wrapped, interrupt not serviced yet
        clock.counter().count.set(0x0003);
        clock.counter().pending.set(true);
        let racing = clock.sample();
        assert_eq!(racing, 0x0001_0003);

        // Servicing the interrupt does not change the reading
        clock.on_overflow();
        assert!(!clock.counter().pending.get());
        assert_eq!(clock.sample(), racing);
    }

    #[test]
    fn test_wrap_between_count_and_flag_reads() {
        let clock = TickClock::new(ScriptedCounter::default());
        clock.counter().count.set(0xFFFF);
        // The first read sees 0xFFFF, then the counter wraps to 1
        clock.counter().wrap_after_read.set(Some(0x0001));

        assert_eq!(clock.sample(), 0x0001_0001);
    }

    #[test]
    fn test_high_word_wraps_silently() {
        let clock = TickClock::new(ScriptedCounter::default());
        for _ in 0..0xFFFF {
            clock.on_overflow();
        }
        clock.counter().count.set(0xFFFF);
        assert_eq!(clock.sample(), 0xFFFF_FFFF);

        clock.counter().count.set(0x0000);
        clock.on_overflow();
        assert_eq!(clock.sample(), 0x0000_0000);
    }
}
