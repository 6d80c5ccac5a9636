//! Cortex-M backend
//!
//! Interrupt masking through PRIMASK and a `wfi`-based halt.

use crate::{critical::InterruptMask, error::HalError, fail::Halt};

/// PRIMASK-based interrupt mask
#[derive(Debug, Clone, Copy, Default)]
pub struct CortexM;

impl InterruptMask for CortexM {
    fn disable(&self) {
        ::cortex_m::interrupt::disable();
    }

    #[allow(unsafe_code)]
    fn enable(&self) {
        // SAFETY: only called by `CriticalSection` when the outermost
        // section exits, so no masked region is cut short.
        unsafe { ::cortex_m::interrupt::enable() }
    }

    fn wait_for_interrupt(&self) {
        ::cortex_m::asm::wfi();
    }
}

/// Parks the core in `wfi`
#[derive(Debug, Clone, Copy, Default)]
pub struct WfiHalt;

impl Halt for WfiHalt {
    fn halt(&mut self, _reason: HalError) -> ! {
        loop {
            ::cortex_m::asm::wfi();
        }
    }
}
