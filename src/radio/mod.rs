//! Radio-facing I/O: control pins and DIO interrupt lines

pub mod irq;
pub mod pins;

pub use irq::{EdgeLine, IrqDemux, Line, RadioIrqHandler};
pub use pins::{NoPin, PinState, RadioPin, RadioPins, ReleasablePin};
