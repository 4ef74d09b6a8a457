//! UC8179 e-paper panel driver
//!
//! Drives the Waveshare 7.5" V2 monochrome panel family (800×480, 1bpp) over
//! SPI: command/data framing, busy-line polling with timeout, full versus
//! partial refresh bookkeeping and the deep-sleep sequence. Two controller
//! revisions are supported with materially different reset, initialization
//! and busy-poll behavior; see [`Epd7in5V2`] and [`Epd7in5V2Alt`].
//!
//! The driver is a pixel sink: it owns a packed framebuffer, something else
//! decides what the pixels mean.
//!
//! ### Usage
//!
//! 1. Construct [`Uc8179`] with an `embedded-hal` SPI bus, the control pins
//!    and the controller revision, then call [`Uc8179::setup`].
//! 1. Render into the framebuffer, either through
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//!    (the driver is a `DrawTarget`) or by writing the packed bytes via
//!    [`Uc8179::buffer_mut`].
//! 1. Call [`Uc8179::update`] to push the frame to the glass.
//! 1. Call [`Uc8179::deep_sleep`] before powering down.
//!
//! Updates are long blocking calls and the driver owns its bus and pins
//! exclusively; there is nothing to share and nothing to lock.

pub mod cmd;
pub mod color;
pub mod driver;
pub mod flag;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;
pub mod model;
pub mod pin;
pub mod pins;

/// Panel width in pixels
pub const WIDTH: u16 = 800;

/// Panel height in pixels
pub const HEIGHT: u16 = 480;

pub use display_interface::DisplayError;

pub use crate::color::Color;
pub use crate::driver::{Config, Refresh, Uc8179};
pub use crate::interface::DisplayInterface;
pub use crate::model::{Epd7in5V2, Epd7in5V2Alt, Model};
pub use crate::pin::Pin;
pub use crate::pins::Pins;
