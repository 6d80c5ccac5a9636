use crate::time::TickCount;

/// Tick rate of the default timer configuration
///
/// Deadlines handed to the HAL are expressed in these units; convert with
/// [`ms_to_ticks`] and friends.
pub const OSTICKS_PER_SEC: u32 = TimerConfig::DEFAULT.ticks_per_sec();

/// Tick timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Input clock of the timer peripheral in Hz
    pub clock_hz: u32,
    /// Timer prescaler (input clock divider), never zero
    pub prescaler: u16,
    /// Consecutive busy-wait polls without tick progress before the tick
    /// source is declared stalled. Zero disables the check.
    pub stall_limit: u32,
}

impl TimerConfig {
    /// 48 MHz peripheral clock divided by 1024
    pub const DEFAULT: TimerConfig = TimerConfig {
        clock_hz: 48_000_000,
        prescaler: 1024,
        stall_limit: 1_000_000,
    };

    /// Create a timer configuration
    ///
    /// Panics if `prescaler` is zero.
    pub const fn new(clock_hz: u32, prescaler: u16) -> Self {
        assert!(prescaler != 0, "timer prescaler must be non-zero");
        Self {
            clock_hz,
            prescaler,
            stall_limit: Self::DEFAULT.stall_limit,
        }
    }

    /// Override the stall detection limit
    pub const fn with_stall_limit(mut self, stall_limit: u32) -> Self {
        self.stall_limit = stall_limit;
        self
    }

    /// Resulting tick rate in Hz
    ///
    /// A zero prescaler written directly into the field counts as 1.
    pub const fn ticks_per_sec(&self) -> u32 {
        let prescaler = if self.prescaler == 0 { 1 } else { self.prescaler as u32 };
        self.clock_hz / prescaler
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Convert milliseconds to ticks, truncating
pub const fn ms_to_ticks(ms: u32) -> TickCount {
    (ms as u64 * OSTICKS_PER_SEC as u64 / 1_000) as TickCount
}

/// Convert milliseconds to ticks, rounding up
pub const fn ms_to_ticks_ceil(ms: u32) -> TickCount {
    ((ms as u64 * OSTICKS_PER_SEC as u64 + 999) / 1_000) as TickCount
}

/// Convert microseconds to ticks, truncating
pub const fn us_to_ticks(us: u32) -> TickCount {
    (us as u64 * OSTICKS_PER_SEC as u64 / 1_000_000) as TickCount
}

/// Convert microseconds to ticks, rounding up
pub const fn us_to_ticks_ceil(us: u32) -> TickCount {
    ((us as u64 * OSTICKS_PER_SEC as u64 + 999_999) / 1_000_000) as TickCount
}

/// Convert seconds to ticks
pub const fn sec_to_ticks(sec: u32) -> TickCount {
    sec.wrapping_mul(OSTICKS_PER_SEC)
}

/// Convert ticks to milliseconds, truncating
pub const fn ticks_to_ms(ticks: TickCount) -> u32 {
    (ticks as u64 * 1_000 / OSTICKS_PER_SEC as u64) as u32
}

/// Convert ticks to microseconds, truncating
pub const fn ticks_to_us(ticks: TickCount) -> u32 {
    (ticks as u64 * 1_000_000 / OSTICKS_PER_SEC as u64) as u32
}
