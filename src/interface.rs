//! Command/data framing over SPI
//!
//! The UC8179 speaks a half-duplex protocol where every transfer is either a
//! command byte (D/C low) or payload data (D/C high), gated by an active-low
//! chip select that this layer sequences itself. The busy line and the reset
//! line are optional: a missing busy pin means the panel is assumed ready,
//! a missing reset pin turns the reset sequence into a no-op.

use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// Fixed poll interval while waiting for the busy line to clear.
pub const BUSY_POLL_INTERVAL_MS: u32 = 20;

/// Settle time after releasing reset.
pub const RESET_SETTLE_MS: u32 = 20;

/// The connection to the panel: SPI bus plus the four control lines.
///
/// Wrap a pin in [`Pin::inverted`](crate::pin::Pin::inverted) before handing
/// it in when the board wires it with the opposite polarity; the busy line
/// must read logically high while the controller is busy.
pub struct DisplayInterface<SPI, CS, BSY, DC, RST, DELAY> {
    spi: SPI,
    /// Chip select, asserted low around every command/data frame
    cs: CS,
    /// High while the controller is mid-operation
    busy: Option<BSY>,
    /// Data/command select (high for data, low for command)
    dc: DC,
    /// Hardware reset, active low
    rst: Option<RST>,
    delay: DELAY,
}

impl<SPI, CS, BSY, DC, RST, DELAY> DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(spi: SPI, cs: CS, busy: Option<BSY>, dc: DC, rst: Option<RST>, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            cs,
            busy,
            dc,
            rst,
            delay,
        }
    }

    /// Drive the control lines to their rest state: command mode selected,
    /// reset released.
    pub fn init_pins(&mut self) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.rst_high()
    }

    /// Send a single command byte.
    pub fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.select()?;
        let result = self.write(&[command]);
        self.deselect()?;
        result
    }

    /// Send a block of payload data.
    pub fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.select()?;
        let result = self.write(data);
        self.deselect()?;
        result
    }

    /// Send a command and its payload within a single chip-select window.
    ///
    /// Used where command and arguments must go out as one frame, such as the
    /// deep-sleep command with its check byte.
    pub fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.select()?;
        let result = self.write(&[command]).and_then(|()| {
            self.dc.set_high().map_err(|_| DisplayError::DCError)?;
            self.write(data)
        });
        self.deselect()?;
        result
    }

    /// Poll the busy line until it clears or `timeout_ms` elapses.
    ///
    /// Returns `true` as soon as the line reads idle (immediately when no
    /// busy pin is configured) and `false` once the timeout has been spent
    /// with the line continuously asserted. Elapsed time is tracked by
    /// accumulating the poll delays, so the granularity is
    /// [`BUSY_POLL_INTERVAL_MS`].
    pub fn wait_idle(&mut self, timeout_ms: u32) -> bool {
        let Some(busy) = self.busy.as_mut() else {
            return true;
        };

        let mut waited_ms = 0u32;
        loop {
            match busy.is_high() {
                Ok(false) => return true,
                Ok(true) => {}
                Err(_) => {
                    log::error!("Failed to read the busy pin, assuming the panel is ready");
                    return true;
                }
            }
            if waited_ms >= timeout_ms {
                log::error!("Timeout while displaying image!");
                return false;
            }
            self.delay.delay_ms(BUSY_POLL_INTERVAL_MS);
            waited_ms += BUSY_POLL_INTERVAL_MS;
        }
    }

    /// Whether a busy pin is wired at all.
    pub fn has_busy_pin(&self) -> bool {
        self.busy.is_some()
    }

    /// One-shot read of the busy line; `false` when no pin is configured or
    /// the read fails.
    pub fn is_busy(&mut self) -> bool {
        let Some(busy) = self.busy.as_mut() else {
            return false;
        };
        match busy.is_high() {
            Ok(level) => level,
            Err(_) => {
                log::error!("Failed to read the busy pin, assuming the panel is ready");
                false
            }
        }
    }

    /// Standard reset sequence: pull reset low for `duration_ms`, release,
    /// then let the controller settle. No-op without a reset pin.
    pub fn reset_pulse(&mut self, duration_ms: u32) -> Result<(), DisplayError> {
        if self.rst.is_none() {
            return Ok(());
        }
        self.rst_low()?;
        self.delay_ms(duration_ms);
        self.rst_high()?;
        self.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Release the reset line. No-op without a reset pin.
    pub fn rst_high(&mut self) -> Result<(), DisplayError> {
        match self.rst.as_mut() {
            Some(rst) => rst.set_high().map_err(|_| DisplayError::RSError),
            None => Ok(()),
        }
    }

    /// Assert the reset line. No-op without a reset pin.
    pub fn rst_low(&mut self) -> Result<(), DisplayError> {
        match self.rst.as_mut() {
            Some(rst) => rst.set_low().map_err(|_| DisplayError::RSError),
            None => Ok(()),
        }
    }

    /// Whether a reset pin is wired at all.
    pub fn has_reset_pin(&self) -> bool {
        self.rst.is_some()
    }

    /// Blocking millisecond delay on the interface's timing source.
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn select(&mut self) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)
    }

    fn deselect(&mut self) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::CSError)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::BusWriteError)?;
        // The bus may buffer; data must be on the wire before chip select
        // deasserts or the data/command line moves.
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)
    }
}
