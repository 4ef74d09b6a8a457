//! UC8179 driver
//!
//! Owns the connection to the panel, the 1bpp framebuffer and the refresh
//! bookkeeping. The embedding firmware renders into the buffer (directly or
//! through the `embedded-graphics` target) and calls [`Uc8179::update`]; one
//! call is one complete blocking panel transaction.

pub use display_interface::DisplayError;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::color::Color;
use crate::interface::DisplayInterface;
use crate::model::Model;
use crate::{HEIGHT, WIDTH};

/// Panel geometry and refresh policy. Immutable once the driver is built.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Number of updates between two full refreshes; the first update after
    /// setup is always a full one
    pub full_update_every: u32,
    /// Reset pulse length for the standard reset sequence
    pub reset_duration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: WIDTH,
            height: HEIGHT,
            full_update_every: 30,
            reset_duration_ms: 200,
        }
    }
}

impl Config {
    /// Framebuffer length in bytes: one bit per pixel, rows padded to a
    /// whole byte.
    pub fn buffer_len(&self) -> usize {
        usize::from(self.width).div_ceil(8) * usize::from(self.height)
    }
}

/// Which refresh sequence an [`Uc8179::update`] call performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// Complete redraw clearing prior ghosting
    Full,
    /// Lighter command sequence between full refreshes; still covers the
    /// whole panel
    Partial,
}

/// UC8179 e-paper panel driver.
///
/// Generic over the SPI bus, the four control lines, the delay source and
/// the controller revision ([`Model`]). The busy and reset lines are
/// optional; wrap pins in [`Pin`](crate::pin::Pin) when the board inverts
/// their polarity.
pub struct Uc8179<SPI, CS, BSY, DC, RST, DELAY, M> {
    interface: DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
    model: M,
    config: Config,
    buffer: Vec<u8>,
    at_update: u32,
}

impl<SPI, CS, BSY, DC, RST, DELAY, M> Uc8179<SPI, CS, BSY, DC, RST, DELAY, M>
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
    M: Model<SPI, CS, BSY, DC, RST, DELAY>,
{
    /// Create the driver and allocate its framebuffer (blank white).
    ///
    /// The pins must already be configured for their direction by the HAL;
    /// a pin the platform cannot provide should be treated as fatal by the
    /// caller, the device cannot work without its control lines.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spi: SPI,
        cs: CS,
        busy: Option<BSY>,
        dc: DC,
        rst: Option<RST>,
        delay: DELAY,
        model: M,
        config: Config,
    ) -> Self {
        let buffer = vec![Color::White.get_byte_value(); config.buffer_len()];
        Uc8179 {
            interface: DisplayInterface::new(spi, cs, busy, dc, rst, delay),
            model,
            config,
            buffer,
            at_update: 0,
        }
    }

    /// Bring the panel from power-up to Idle: precondition the control
    /// lines, run the revision's reset sequence, then its initialization
    /// command sequence.
    pub fn setup(&mut self) -> Result<(), DisplayError> {
        log::info!("Setting up the panel");
        self.interface.init_pins()?;
        self.model.reset(&mut self.interface, &self.config)?;
        self.model.initialize(&mut self.interface, &self.config)
    }

    /// Push the framebuffer to the panel and refresh it.
    ///
    /// Performs a full refresh whenever the update counter is at zero and a
    /// partial one otherwise; the counter advances modulo
    /// `full_update_every` on every call, whether or not the panel finished
    /// its previous operation in time. Blocks until the transaction is done
    /// (hundreds of milliseconds up to seconds).
    pub fn update(&mut self) -> Result<Refresh, DisplayError> {
        let refresh = if self.at_update == 0 {
            Refresh::Full
        } else {
            Refresh::Partial
        };
        self.at_update = (self.at_update + 1) % self.config.full_update_every.max(1);

        log::info!("Updating the panel ({:?} refresh)", refresh);
        self.model
            .display(&mut self.interface, &self.config, &self.buffer, refresh)?;
        Ok(refresh)
    }

    /// Power the panel down into deep sleep. Only a fresh [`Uc8179::setup`]
    /// (with a reset pin wired) brings it back.
    pub fn deep_sleep(&mut self) -> Result<(), DisplayError> {
        log::info!("Putting the panel into deep sleep");
        self.model.deep_sleep(&mut self.interface)
    }

    /// Panel width in pixels.
    pub fn width(&self) -> u16 {
        self.config.width
    }

    /// Panel height in pixels.
    pub fn height(&self) -> u16 {
        self.config.height
    }

    /// The framebuffer as sent on the next update: MSB-first, row-major,
    /// one bit per pixel, set bit = black ink.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable access for renderers that write the packed format directly.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Fill the whole framebuffer with one color.
    pub fn clear_buffer(&mut self, color: Color) {
        self.buffer.fill(color.get_byte_value());
    }

    /// Set a single pixel; coordinates outside the panel are ignored.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Color) {
        if x >= self.config.width || y >= self.config.height {
            return;
        }
        let bytes_per_row = usize::from(self.config.width).div_ceil(8);
        let index = usize::from(y) * bytes_per_row + usize::from(x) / 8;
        let mask = 0x80u8 >> (x % 8);
        match color {
            Color::Black => self.buffer[index] |= mask,
            Color::White => self.buffer[index] &= !mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Epd7in5V2;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;
    use embedded_hal_mock::eh1::spi::Mock as SpiMock;

    type TestDriver =
        Uc8179<SpiMock<u8>, PinMock, PinMock, PinMock, PinMock, NoopDelay, Epd7in5V2>;

    /// Driver over expectation-free mocks, for the host-side buffer surface.
    ///
    /// These tests only exercise the in-memory framebuffer and never drive
    /// the bus or pins, so the mocks stay expectation-empty. The mock's
    /// done-call detector is shared across clones, so marking the retained
    /// handles done here keeps the clones moved into the driver from
    /// panicking when they drop at the end of the test.
    fn driver(config: Config) -> TestDriver {
        let mut spi = SpiMock::new(&[]);
        let mut cs = PinMock::new(&[]);
        let mut dc = PinMock::new(&[]);
        let drv = Uc8179::new(
            spi.clone(),
            cs.clone(),
            None,
            dc.clone(),
            None,
            NoopDelay,
            Epd7in5V2::default(),
            config,
        );
        spi.done();
        cs.done();
        dc.done();
        drv
    }

    fn small() -> Config {
        Config {
            width: 16,
            height: 2,
            ..Config::default()
        }
    }

    #[test]
    fn buffer_len_rounds_rows_up_to_whole_bytes() {
        let config = Config {
            width: 10,
            height: 3,
            ..Config::default()
        };
        assert_eq!(config.buffer_len(), 2 * 3);

        assert_eq!(Config::default().buffer_len(), 48_000);
    }

    #[test]
    fn a_fresh_buffer_is_blank_white() {
        let drv = driver(small());
        assert_eq!(drv.buffer(), &[0x00; 4]);
    }

    #[test]
    fn set_pixel_packs_msb_first_row_major() {
        let mut drv = driver(small());

        drv.set_pixel(0, 0, Color::Black);
        drv.set_pixel(9, 1, Color::Black);
        assert_eq!(drv.buffer(), &[0x80, 0x00, 0x00, 0x40]);

        drv.set_pixel(0, 0, Color::White);
        assert_eq!(drv.buffer(), &[0x00, 0x00, 0x00, 0x40]);
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds_coordinates() {
        let mut drv = driver(small());

        drv.set_pixel(16, 0, Color::Black);
        drv.set_pixel(0, 2, Color::Black);
        assert_eq!(drv.buffer(), &[0x00; 4]);
    }

    #[test]
    fn clear_buffer_fills_with_the_color_byte() {
        let mut drv = driver(small());

        drv.clear_buffer(Color::Black);
        assert_eq!(drv.buffer(), &[0xFF; 4]);

        drv.clear_buffer(Color::White);
        assert_eq!(drv.buffer(), &[0x00; 4]);
    }
}
