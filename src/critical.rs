//! Nestable critical sections
//!
//! The HAL runs on a single core with one interrupt domain. A critical
//! section masks that domain; sections nest, and the mask is only lifted
//! when the outermost section exits. A function can therefore enter a
//! critical section whether or not its caller already holds one.
//!
//! Guarded intervals must stay short: every radio line interrupt is held off
//! for their whole duration.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::HalError;

/// Hardware interrupt mask of the single interrupt domain
pub trait InterruptMask {
    /// Mask all interrupts
    fn disable(&self);

    /// Unmask all interrupts
    fn enable(&self);

    /// Sleep until the next interrupt
    ///
    /// Parts without a low-power wait keep the default, which returns
    /// immediately.
    fn wait_for_interrupt(&self) {}
}

/// Nestable critical section over an [`InterruptMask`]
///
/// The depth is only touched with interrupts masked, so plain atomic loads
/// and stores are enough and no read-modify-write support is required from
/// the core.
#[derive(Debug)]
pub struct CriticalSection<M> {
    mask: M,
    depth: AtomicU32,
}

impl<M: InterruptMask> CriticalSection<M> {
    /// Create a critical section with nothing held
    pub const fn new(mask: M) -> Self {
        Self {
            mask,
            depth: AtomicU32::new(0),
        }
    }

    /// Mask interrupts and increase the nesting depth
    pub fn enter(&self) {
        self.mask.disable();
        let depth = self.depth.load(Ordering::Relaxed);
        self.depth.store(depth.wrapping_add(1), Ordering::Relaxed);
    }

    /// Decrease the nesting depth, unmasking interrupts when it reaches zero
    ///
    /// Returns [`HalError::UnbalancedCritical`] without touching the mask if
    /// no section is held.
    pub fn try_exit(&self) -> Result<(), HalError> {
        let depth = self.depth.load(Ordering::Relaxed);
        if depth == 0 {
            error!("critical: exit without matching enter");
            return Err(HalError::UnbalancedCritical);
        }
        self.depth.store(depth - 1, Ordering::Relaxed);
        if depth == 1 {
            self.mask.enable();
        }
        Ok(())
    }

    /// Decrease the nesting depth, unmasking interrupts when it reaches zero
    ///
    /// # Panics
    ///
    /// Panics if no section is held.
    pub fn exit(&self) {
        if self.try_exit().is_err() {
            panic!("critical section exit without matching enter");
        }
    }

    /// Run `f` inside a critical section
    pub fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        self.enter();
        let result = f();
        self.exit();
        result
    }

    /// Enter a critical section that exits when the returned guard drops
    pub fn lock(&self) -> CriticalGuard<'_, M> {
        self.enter();
        CriticalGuard { section: self }
    }

    /// Whether at least one section is currently held
    pub fn is_held(&self) -> bool {
        self.depth.load(Ordering::Relaxed) != 0
    }

    /// The underlying interrupt mask
    pub fn mask(&self) -> &M {
        &self.mask
    }
}

/// RAII token for a held critical section
#[must_use = "the critical section exits as soon as the guard is dropped"]
pub struct CriticalGuard<'a, M: InterruptMask> {
    section: &'a CriticalSection<M>,
}

impl<M: InterruptMask> Drop for CriticalGuard<'_, M> {
    fn drop(&mut self) {
        self.section.exit();
    }
}
