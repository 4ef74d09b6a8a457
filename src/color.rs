//! Ink color for the black/white panel

#[cfg(feature = "graphics")]
use embedded_graphics::pixelcolor::BinaryColor;

/// The two states a pixel can take in the host framebuffer.
///
/// In the host convention a set bit is black ink; the driver inverts every
/// byte on the way to the panel, whose native encoding has a set bit mean
/// an unlit (white) pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    Black,
    /// Background color of a blank panel
    #[default]
    White,
}

impl Color {
    /// Byte that fills a whole row-chunk of the framebuffer with this color.
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::Black => 0xFF,
            Color::White => 0x00,
        }
    }

    /// The opposite color.
    pub fn inverse(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(value: BinaryColor) -> Self {
        match value {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for BinaryColor {
    fn from(value: Color) -> Self {
        match value {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_bytes_follow_the_host_convention() {
        assert_eq!(Color::Black.get_byte_value(), 0xFF);
        assert_eq!(Color::White.get_byte_value(), 0x00);
    }

    #[test]
    fn inverse_swaps_the_colors() {
        assert_eq!(Color::Black.inverse(), Color::White);
        assert_eq!(Color::White.inverse(), Color::Black);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn binary_color_on_is_ink() {
        use embedded_graphics::pixelcolor::BinaryColor;

        assert_eq!(Color::from(BinaryColor::On), Color::Black);
        assert_eq!(Color::from(BinaryColor::Off), Color::White);
    }
}
