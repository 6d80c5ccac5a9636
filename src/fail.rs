//! Fatal-failure sink
//!
//! The last stop for unrecoverable HAL errors. [`Hal::fail`] masks
//! interrupts, logs the reason and hands control to a [`Halt`], which never
//! returns.
//!
//! [`Hal::fail`]: crate::hal::Hal::fail

use crate::error::HalError;

/// Terminal state of the device after a fatal error
pub trait Halt {
    /// Stop forward progress for good
    ///
    /// Called with interrupts masked. Unless the crate is built with the
    /// `defmt` feature nothing has logged `reason` yet, so boards wanting a
    /// diagnostic report it here before parking the core.
    fn halt(&mut self, reason: HalError) -> !;
}

/// Parks the core in a spin loop
///
/// Prints nothing; the reason is lost without the `defmt` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinHalt;

impl Halt for SpinHalt {
    fn halt(&mut self, _reason: HalError) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}
