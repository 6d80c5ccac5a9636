//! Bare-metal hardware abstraction layer for a LoRaWAN stack
//!
//! This crate provides the services an LMIC-style LoRaWAN MAC expects from
//! the board it runs on. It targets a single core with no operating system
//! and a single SX127x-family radio on SPI.
//!
//! # Features
//! - 32-bit monotonic tick clock extended from a 16-bit hardware timer
//! - Nestable, interrupt-safe critical sections
//! - Wraparound-safe deadlines, busy-wait and timer-expiry checks
//! - Radio pin control (chip-select, antenna switch, floating reset)
//! - DIO0..DIO2 interrupt demultiplexing into one upstream handler
//! - Single-byte full-duplex SPI exchange
//! - Fatal-failure sink
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            │    LoRaWAN MAC (upstream)    │
//!            └──────────────────────────────┘
//!               │ calls              ▲ on_radio_irq(Line)
//!               ▼                    │
//!  ┌────────────────────────┐  ┌───────────┐
//!  │ Hal (foreground owner) │  │ IrqDemux  │◄── GPIO ISR
//!  │  pins · spi · halt     │  └───────────┘
//!  └────────────────────────┘
//!               │ &'static
//!               ▼
//!  ┌────────────────────────┐
//!  │ Timebase               │◄── timer overflow ISR
//!  │  critical · tick clock │
//!  └────────────────────────┘
//! ```
//!
//! # Example
//! ```ignore
//! static TIMEBASE: Timebase<CortexM, Tmr1> =
//!     Timebase::new(CortexM, Tmr1, TimerConfig::DEFAULT);
//!
//! let pins = RadioPins::new(Some(nss), None::<NoPin>, Some(rst));
//! let mut demux = IrqDemux::new(Some(dio0), Some(dio1), Some(dio2), radio_irq as fn(Line));
//! let mut hal = Hal::new(&TIMEBASE, spi, pins, WfiHalt);
//! hal.init(&mut demux);
//!
//! let deadline = hal.now().wrapping_add(ms_to_ticks(10));
//! hal.wait_until(deadline);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

/// HAL configuration
pub mod config;

/// Nestable critical sections
pub mod critical;

/// Error type
pub mod error;

/// Fatal-failure sink
pub mod fail;

/// HAL facade
pub mod hal;

/// Radio pins and interrupt lines
pub mod radio;

/// Tick clock, deadlines and busy-waiting
pub mod time;

/// Cortex-M backend
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
pub mod cortex;

pub use config::{ms_to_ticks, sec_to_ticks, us_to_ticks, TimerConfig, OSTICKS_PER_SEC};
pub use critical::{CriticalSection, InterruptMask};
pub use error::HalError;
pub use fail::{Halt, SpinHalt};
pub use hal::Hal;
pub use radio::{
    EdgeLine, IrqDemux, Line, NoPin, PinState, RadioIrqHandler, RadioPin, RadioPins, ReleasablePin,
};
pub use time::{Deadline, OverflowCounter, TickCount, Timebase};
