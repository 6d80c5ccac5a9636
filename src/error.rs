//! HAL error type
//!
//! Every variant is unrecoverable from the HAL's point of view: the [`Hal`]
//! facade routes them to the fatal-failure sink. Lower layers return them so
//! they can be tested and so boards can wire their own policy.
//!
//! [`Hal`]: crate::hal::Hal

use core::fmt;

use crate::radio::{irq::Line, pins::RadioPin};

/// Errors raised by the HAL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// SPI bus error during initialization or a byte exchange
    Spi,
    /// GPIO error while driving a radio pin
    Pin(RadioPin),
    /// GPIO error while arming a radio interrupt line
    Line(Line),
    /// `Floating` requested for a pin that can only be driven
    InvalidPinState(RadioPin),
    /// The tick counter stopped advancing during a busy-wait
    TickStalled,
    /// Critical section exited without a matching enter
    UnbalancedCritical,
    /// `init` called a second time without a hardware reset
    AlreadyInitialized,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::Spi => f.write_str("spi transfer failed"),
            HalError::Pin(pin) => write!(f, "failed to drive {:?} pin", pin),
            HalError::Line(line) => write!(f, "failed to arm {:?} interrupt line", line),
            HalError::InvalidPinState(pin) => {
                write!(f, "invalid pin state: {:?} cannot float", pin)
            }
            HalError::TickStalled => f.write_str("tick counter stalled"),
            HalError::UnbalancedCritical => {
                f.write_str("critical section exit without matching enter")
            }
            HalError::AlreadyInitialized => f.write_str("hal already initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}
