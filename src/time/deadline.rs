//! Wraparound-safe deadline arithmetic
//!
//! Deadlines are absolute [`TickCount`]s. The distance to a deadline is the
//! signed 32-bit difference `target - now`, which stays correct across the
//! 2^32 wrap as long as both instants are within 2^31 ticks of each other.

use super::TickCount;

/// Saturated distance reported for deadlines more than `0xFFFF` ticks away
pub const FAR_AHEAD: u16 = 0xFFFF;

/// Ticks remaining from `now` until `target`
///
/// Returns `0` when the target is now or in the past, the exact distance
/// when it is at most `0xFFFF` ticks ahead, and [`FAR_AHEAD`] otherwise.
pub const fn delta_ticks(now: TickCount, target: TickCount) -> u16 {
    let d = target.wrapping_sub(now) as i32;
    if d <= 0 {
        0
    } else if (d >> 16) != 0 {
        FAR_AHEAD
    } else {
        d as u16
    }
}

/// Classified distance to a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deadline {
    /// The deadline is now or in the past
    Due,
    /// The deadline is this many ticks ahead (`1..=0xFFFF`)
    Near(u16),
    /// The deadline is more than `0xFFFF` ticks ahead
    Far,
}

impl Deadline {
    /// Classify the distance from `now` to `target`
    pub const fn classify(now: TickCount, target: TickCount) -> Self {
        let d = target.wrapping_sub(now) as i32;
        if d <= 0 {
            Deadline::Due
        } else if d > FAR_AHEAD as i32 {
            Deadline::Far
        } else {
            Deadline::Near(d as u16)
        }
    }

    /// Whether the deadline has been reached
    pub const fn is_due(self) -> bool {
        matches!(self, Deadline::Due)
    }

    /// Remaining ticks in the saturated form returned by [`delta_ticks`]
    pub const fn ticks(self) -> u16 {
        match self {
            Deadline::Due => 0,
            Deadline::Near(ticks) => ticks,
            Deadline::Far => FAR_AHEAD,
        }
    }
}
