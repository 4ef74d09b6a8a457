//! Pin assignments of the reference carrier board
//!
//! These match the wiring the driver was brought up on; they are plain
//! numbers so any HAL can map them to its own pin types.

/// Pin configuration constants for the panel connection
pub struct Pins;

#[allow(dead_code)]
impl Pins {
    /// SPI Clock pin
    pub const SCK: u8 = 12;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 11;
    /// Chip Select pin, active low
    pub const CS: u8 = 13;
    /// Reset pin, active low
    pub const RST: u8 = 15;
    /// Data/Command control pin (high for data, low for command)
    pub const DC: u8 = 14;
    /// Busy status pin; the UC8179 drives it low while busy, wire it through
    /// an inverted [`Pin`](crate::pin::Pin)
    pub const BUSY: u8 = 16;
    /// Panel power rail switch
    pub const PWR: u8 = 17;
}
