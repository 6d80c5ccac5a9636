//! HAL facade used by the LoRaWAN stack
//!
//! [`Hal`] bundles the shared [`Timebase`] with the radio's SPI bus and
//! control pins and exposes the flat surface the MAC layer calls into. Every
//! hardware error that reaches this layer is fatal and ends in [`Hal::fail`];
//! the only conditions a caller sees are return values of the timer queries.

use embedded_hal::{
    blocking::{
        delay::{DelayMs, DelayUs},
        spi::Transfer,
    },
    digital::v2::OutputPin,
};

use crate::{
    critical::InterruptMask,
    error::HalError,
    fail::Halt,
    radio::{
        irq::{EdgeLine, IrqDemux, RadioIrqHandler},
        pins::{PinState, RadioPin, RadioPins, ReleasablePin},
    },
    time::{OverflowCounter, TickCount, Timebase},
};

/// Longest single wait that deadline arithmetic can still tell from the past
const MAX_WAIT_TICKS: TickCount = i32::MAX as TickCount;

/// LoRaWAN HAL over a radio on SPI
pub struct Hal<'t, M, C, SPI, NSS, RXTX, RST, H> {
    timebase: &'t Timebase<M, C>,
    spi: SPI,
    pins: RadioPins<NSS, RXTX, RST>,
    halt: H,
    initialized: bool,
}

impl<'t, M, C, SPI, NSS, RXTX, RST, H> Hal<'t, M, C, SPI, NSS, RXTX, RST, H>
where
    M: InterruptMask,
    C: OverflowCounter,
    SPI: Transfer<u8>,
    NSS: OutputPin,
    RXTX: OutputPin,
    RST: ReleasablePin,
    H: Halt,
{
    /// Create the HAL; nothing is touched until [`Hal::init`]
    pub fn new(
        timebase: &'t Timebase<M, C>,
        spi: SPI,
        pins: RadioPins<NSS, RXTX, RST>,
        halt: H,
    ) -> Self {
        Self {
            timebase,
            spi,
            pins,
            halt,
            initialized: false,
        }
    }

    /// One-time bring-up of pins, DIO interrupts, SPI and the tick timer
    ///
    /// Runs with interrupts masked. Calling it twice without a hardware
    /// reset is fatal.
    pub fn init<L, IH>(&mut self, demux: &mut IrqDemux<L, IH>)
    where
        L: EdgeLine,
        IH: RadioIrqHandler,
    {
        if self.initialized {
            self.fail(HalError::AlreadyInitialized);
        }

        self.timebase.critical().enter();

        if let Err(e) = self.pins.init() {
            self.fail(e);
        }
        if let Err(e) = demux.listen() {
            self.fail(e);
        }
        // Probe the bus so a dead SPI is caught before the stack starts
        self.transfer(0x00);
        self.timebase.start();
        self.initialized = true;

        self.exit_critical();
        info!("hal: initialized");
    }

    /// Current tick count
    pub fn now(&self) -> TickCount {
        self.timebase.now()
    }

    /// Spin until `target`; a stalled tick source is fatal
    pub fn wait_until(&mut self, target: TickCount) {
        if let Err(e) = self.timebase.wait_until(target) {
            self.fail(e);
        }
    }

    /// Whether `target` has been reached, without blocking
    pub fn check_timer(&self, target: TickCount) -> bool {
        self.timebase.check_timer(target)
    }

    /// Enter a (possibly nested) critical section
    pub fn enter_critical(&self) {
        self.timebase.critical().enter();
    }

    /// Leave a critical section; an unmatched exit is fatal
    pub fn exit_critical(&mut self) {
        if let Err(e) = self.timebase.critical().try_exit() {
            self.fail(e);
        }
    }

    /// Drive a radio control pin
    ///
    /// Unwired pins are ignored. `Floating` on anything but the reset pin,
    /// or a GPIO error, is fatal.
    pub fn set_pin(&mut self, pin: RadioPin, state: PinState) {
        if let Err(e) = self.pins.set(pin, state) {
            self.fail(e);
        }
    }

    /// Exchange one byte with the radio
    ///
    /// The caller frames transactions by asserting chip-select around a
    /// sequence of exchanges.
    pub fn transfer(&mut self, out: u8) -> u8 {
        let mut buffer = [out];
        let result = self.spi.transfer(&mut buffer).map(|received| received[0]);
        match result {
            Ok(received) => received,
            Err(_) => self.fail(HalError::Spi),
        }
    }

    /// Sleep until the next interrupt
    pub fn sleep(&self) {
        self.timebase.sleep();
    }

    /// Halt the device after an unrecoverable error
    ///
    /// The reason is logged only with the `defmt` feature. Without it the
    /// board's [`Halt`] is the only place `reason` can surface;
    /// [`SpinHalt`](crate::fail::SpinHalt) reports nothing.
    pub fn fail(&mut self, reason: HalError) -> ! {
        self.timebase.critical().enter();
        error!("hal: failure: {}", reason);
        self.sleep();
        self.halt.halt(reason)
    }

    /// Whether [`Hal::init`] has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The shared timebase
    pub fn timebase(&self) -> &'t Timebase<M, C> {
        self.timebase
    }

    /// The radio control pins
    pub fn pins(&self) -> &RadioPins<NSS, RXTX, RST> {
        &self.pins
    }

    /// Tick rate the timebase was configured with
    fn ticks_per_sec(&self) -> u64 {
        u64::from(self.timebase.config().ticks_per_sec())
    }

    /// Busy-wait for `ticks`, split into waits deadline arithmetic can track
    fn delay_ticks(&mut self, ticks: u64) {
        let mut remaining = ticks;
        loop {
            let step = remaining.min(u64::from(MAX_WAIT_TICKS)) as TickCount;
            let target = self.now().wrapping_add(step);
            self.wait_until(target);
            remaining -= u64::from(step);
            if remaining == 0 {
                break;
            }
        }
    }
}

const fn ceil_div(value: u64, divisor: u64) -> u64 {
    (value + divisor - 1) / divisor
}

macro_rules! impl_delay {
    ($($word:ty),*) => {$(
        impl<'t, M, C, SPI, NSS, RXTX, RST, H> DelayMs<$word> for Hal<'t, M, C, SPI, NSS, RXTX, RST, H>
        where
            M: InterruptMask,
            C: OverflowCounter,
            SPI: Transfer<u8>,
            NSS: OutputPin,
            RXTX: OutputPin,
            RST: ReleasablePin,
            H: Halt,
        {
            fn delay_ms(&mut self, ms: $word) {
                self.delay_ticks(ceil_div(u64::from(ms) * self.ticks_per_sec(), 1_000));
            }
        }

        impl<'t, M, C, SPI, NSS, RXTX, RST, H> DelayUs<$word> for Hal<'t, M, C, SPI, NSS, RXTX, RST, H>
        where
            M: InterruptMask,
            C: OverflowCounter,
            SPI: Transfer<u8>,
            NSS: OutputPin,
            RXTX: OutputPin,
            RST: ReleasablePin,
            H: Halt,
        {
            fn delay_us(&mut self, us: $word) {
                self.delay_ticks(ceil_div(u64::from(us) * self.ticks_per_sec(), 1_000_000));
            }
        }
    )*};
}

impl_delay!(u8, u16, u32);
