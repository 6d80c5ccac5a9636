//! HAL configuration
//!
//! This module contains the compile-time parameters of the HAL:
//! - Tick timer clocking and the resulting tick rate
//! - Tick/time unit conversions used to build deadlines
//! - Radio bus parameters

/// Tick timer configuration and unit conversions
pub mod timer;

/// Radio bus parameters
pub mod radio;

pub use radio::{RADIO_SPI_FREQUENCY_HZ, RADIO_SPI_MODE};
pub use timer::{
    ms_to_ticks, ms_to_ticks_ceil, sec_to_ticks, ticks_to_ms, ticks_to_us, us_to_ticks,
    us_to_ticks_ceil, TimerConfig, OSTICKS_PER_SEC,
};
