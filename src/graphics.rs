//! embedded-graphics support
//!
//! The driver itself is the draw target: pixels land directly in its owned
//! framebuffer, in the packed format `update()` transmits. `BinaryColor::On`
//! is ink (black), matching the monochrome e-paper convention.

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::color::Color;
use crate::driver::Uc8179;
use crate::model::Model;

impl<SPI, CS, BSY, DC, RST, DELAY, M> OriginDimensions for Uc8179<SPI, CS, BSY, DC, RST, DELAY, M>
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
    M: Model<SPI, CS, BSY, DC, RST, DELAY>,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

impl<SPI, CS, BSY, DC, RST, DELAY, M> DrawTarget for Uc8179<SPI, CS, BSY, DC, RST, DELAY, M>
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
    M: Model<SPI, CS, BSY, DC, RST, DELAY>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                self.set_pixel(x, y, Color::from(color));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Config;
    use crate::model::Epd7in5V2;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;
    use embedded_hal_mock::eh1::spi::Mock as SpiMock;

    type TestDriver =
        Uc8179<SpiMock<u8>, PinMock, PinMock, PinMock, PinMock, NoopDelay, Epd7in5V2>;

    fn driver(width: u16, height: u16) -> TestDriver {
        // These tests only exercise the in-memory framebuffer, never the bus
        // or pins, so the mocks stay expectation-empty. The done-call
        // detector is shared across clones, so marking the retained handles
        // done keeps the clones moved into the driver from panicking on drop.
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
            Config {
                width,
                height,
                ..Config::default()
            },
        );
        spi.done();
        cs.done();
        dc.done();
        drv
    }

    #[test]
    fn reports_the_configured_dimensions() {
        let drv = driver(16, 4);
        assert_eq!(drv.size(), Size::new(16, 4));
    }

    #[test]
    fn on_pixels_become_set_bits() {
        let mut drv = driver(16, 2);

        Pixel(Point::new(0, 0), BinaryColor::On)
            .draw(&mut drv)
            .unwrap();
        Pixel(Point::new(15, 1), BinaryColor::On)
            .draw(&mut drv)
            .unwrap();

        assert_eq!(drv.buffer(), &[0x80, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn negative_and_out_of_bounds_points_are_dropped() {
        let mut drv = driver(16, 2);

        Pixel(Point::new(-1, 0), BinaryColor::On)
            .draw(&mut drv)
            .unwrap();
        Pixel(Point::new(0, 5), BinaryColor::On)
            .draw(&mut drv)
            .unwrap();

        assert_eq!(drv.buffer(), &[0x00; 4]);
    }

    #[test]
    fn filled_rectangle_covers_the_expected_bytes() {
        let mut drv = driver(16, 2);

        Rectangle::new(Point::new(0, 0), Size::new(8, 2))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut drv)
            .unwrap();

        assert_eq!(drv.buffer(), &[0xFF, 0x00, 0xFF, 0x00]);
    }
}
