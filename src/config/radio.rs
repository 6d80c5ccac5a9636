use embedded_hal::spi::{Mode, MODE_0};

/// SPI mode expected by SX127x-family radios (CPOL=0, CPHA=0)
pub const RADIO_SPI_MODE: Mode = MODE_0;

/// Bus clock used when bringing up the radio SPI
///
/// Well below the radio's 10 MHz limit so long ribbon cables on
/// development boards still work.
pub const RADIO_SPI_FREQUENCY_HZ: u32 = 125_000;
