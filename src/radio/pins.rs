//! Radio control pins
//!
//! The radio is driven through three discrete outputs: chip-select (NSS),
//! the antenna switch direction (RXTX) and reset. Boards that do not wire a
//! pin pass `None`, and every operation on it becomes a no-op.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::error::HalError;

/// Logical radio pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioPin {
    /// Chip-select, active low
    Nss,
    /// Antenna switch direction: high for TX, low for RX
    RxTx,
    /// Radio reset
    Reset,
}

/// Level applied to a radio pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// Drive low
    Low,
    /// Drive high
    High,
    /// High impedance input; only valid for [`RadioPin::Reset`]
    Floating,
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high {
            PinState::High
        } else {
            PinState::Low
        }
    }
}

/// Output pin that can also be released to a high-impedance input
///
/// Driving the pin again after [`release`](ReleasablePin::release) must
/// reconfigure it as an output.
pub trait ReleasablePin: OutputPin {
    /// Reconfigure the pin as a floating input
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// Placeholder for a pin a board does not wire
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl OutputPin for NoPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl ReleasablePin for NoPin {
    fn release(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// The radio's control pins
pub struct RadioPins<NSS, RXTX, RST> {
    nss: Option<NSS>,
    rxtx: Option<RXTX>,
    reset: Option<RST>,
}

impl<NSS, RXTX, RST> RadioPins<NSS, RXTX, RST>
where
    NSS: OutputPin,
    RXTX: OutputPin,
    RST: ReleasablePin,
{
    /// Create the pin set; `None` marks a pin as not wired
    pub fn new(nss: Option<NSS>, rxtx: Option<RXTX>, reset: Option<RST>) -> Self {
        Self { nss, rxtx, reset }
    }

    /// Apply power-on levels: radio deselected, antenna on RX, reset low
    pub fn init(&mut self) -> Result<(), HalError> {
        self.set(RadioPin::Nss, PinState::High)?;
        self.set(RadioPin::RxTx, PinState::Low)?;
        self.set(RadioPin::Reset, PinState::Low)
    }

    /// Drive `pin` to `state`
    ///
    /// `Floating` is only accepted for the reset pin; asking for it on any
    /// other pin is rejected even when that pin is not wired.
    pub fn set(&mut self, pin: RadioPin, state: PinState) -> Result<(), HalError> {
        match (pin, state) {
            (RadioPin::Reset, PinState::Floating) => match self.reset.as_mut() {
                Some(reset) => reset.release().map_err(|_| HalError::Pin(pin)),
                None => Ok(()),
            },
            (_, PinState::Floating) => Err(HalError::InvalidPinState(pin)),
            (RadioPin::Nss, _) => drive(self.nss.as_mut(), pin, state),
            (RadioPin::RxTx, _) => drive(self.rxtx.as_mut(), pin, state),
            (RadioPin::Reset, _) => drive(self.reset.as_mut(), pin, state),
        }
    }

    /// Whether `pin` is wired on this board
    pub fn is_wired(&self, pin: RadioPin) -> bool {
        match pin {
            RadioPin::Nss => self.nss.is_some(),
            RadioPin::RxTx => self.rxtx.is_some(),
            RadioPin::Reset => self.reset.is_some(),
        }
    }
}

fn drive<P: OutputPin>(pin: Option<&mut P>, id: RadioPin, state: PinState) -> Result<(), HalError> {
    let Some(pin) = pin else {
        return Ok(());
    };
    let result = match state {
        PinState::High => pin.set_high(),
        _ => pin.set_low(),
    };
    result.map_err(|_| HalError::Pin(id))
}
