//! Radio interrupt demultiplexer
//!
//! The radio signals events on up to three DIO lines. All of them share one
//! GPIO interrupt vector; [`IrqDemux::on_interrupt`] works out which lines
//! fired and forwards each as a separate [`Line`] event to the single
//! upstream [`RadioIrqHandler`].

use crate::error::HalError;

/// Radio interrupt line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Line {
    /// DIO0
    Dio0 = 0,
    /// DIO1
    Dio1 = 1,
    /// DIO2
    Dio2 = 2,
}

impl Line {
    /// All lines, in dispatch order
    pub const ALL: [Line; 3] = [Line::Dio0, Line::Dio1, Line::Dio2];

    /// Line identifier passed upstream
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Line for an identifier, if it names one
    pub const fn from_index(index: u8) -> Option<Line> {
        match index {
            0 => Some(Line::Dio0),
            1 => Some(Line::Dio1),
            2 => Some(Line::Dio2),
            _ => None,
        }
    }
}

/// GPIO input wired to a radio DIO line
pub trait EdgeLine {
    /// GPIO error type
    type Error;

    /// Arm rising-edge detection and unmask the line's interrupt
    fn listen_rising(&mut self) -> Result<(), Self::Error>;

    /// Whether this line latched an edge; clears the latch
    fn take_edge(&mut self) -> bool;
}

/// Upstream consumer of radio interrupts
///
/// Called in interrupt context; must return quickly and never block.
pub trait RadioIrqHandler {
    /// Handle an edge on `line`
    fn on_radio_irq(&mut self, line: Line);
}

impl RadioIrqHandler for fn(Line) {
    fn on_radio_irq(&mut self, line: Line) {
        self(line)
    }
}

/// Defers events to the foreground through a single-producer queue
impl<const N: usize> RadioIrqHandler for heapless::spsc::Producer<'_, Line, N> {
    fn on_radio_irq(&mut self, line: Line) {
        if self.enqueue(line).is_err() {
            warn!("irq: queue full, dropped {}", line);
        }
    }
}

/// Demultiplexes the shared GPIO interrupt into per-line events
pub struct IrqDemux<L, H> {
    lines: [Option<L>; 3],
    handler: H,
}

impl<L: EdgeLine, H: RadioIrqHandler> IrqDemux<L, H> {
    /// Create a demultiplexer; `None` marks a line as not wired
    pub fn new(dio0: Option<L>, dio1: Option<L>, dio2: Option<L>, handler: H) -> Self {
        Self {
            lines: [dio0, dio1, dio2],
            handler,
        }
    }

    /// Arm rising-edge interrupts on every wired line
    pub fn listen(&mut self) -> Result<(), HalError> {
        for (line, pin) in Line::ALL.into_iter().zip(self.lines.iter_mut()) {
            if let Some(pin) = pin {
                pin.listen_rising().map_err(|_| HalError::Line(line))?;
                debug!("irq: listening on {}", line);
            }
        }
        Ok(())
    }

    /// Shared GPIO interrupt entry point
    ///
    /// Every line that latched an edge produces one handler call, in line
    /// order. Returns the number of events dispatched.
    pub fn on_interrupt(&mut self) -> usize {
        let mut dispatched = 0;
        for (line, pin) in Line::ALL.into_iter().zip(self.lines.iter_mut()) {
            if let Some(pin) = pin {
                if pin.take_edge() {
                    trace!("irq: edge on {}", line);
                    self.handler.on_radio_irq(line);
                    dispatched += 1;
                }
            }
        }
        dispatched
    }

    /// Forward an edge on a known line
    ///
    /// For boards whose interrupt vector already identifies the line.
    /// Returns `false` without calling the handler if the line is not wired.
    pub fn dispatch(&mut self, line: Line) -> bool {
        if self.lines[line as usize].is_none() {
            return false;
        }
        self.handler.on_radio_irq(line);
        true
    }

    /// Whether `line` is wired on this board
    pub fn is_wired(&self, line: Line) -> bool {
        self.lines[line as usize].is_some()
    }

    /// The upstream handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The upstream handler, mutably
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}
