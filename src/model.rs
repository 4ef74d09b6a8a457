//! Controller revision behavior
//!
//! Both supported revisions of the 7.5" V2 panel drive the same UC8179
//! command set and share one display/deep-sleep sequence, but they differ in
//! reset pulse shape, initialization (the alt revision uploads its waveform
//! tables instead of using the OTP ones) and in how the busy line has to be
//! polled. [`Model`] captures those capabilities; the driver is generic over
//! it, so the revision is picked at construction with no dynamic dispatch.

use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::cmd::Cmd;
use crate::driver::{Config, Refresh};
use crate::flag::Flag;
use crate::interface::{DisplayInterface, BUSY_POLL_INTERVAL_MS, RESET_SETTLE_MS};

/// Idle timeout for controllers that do not declare their own.
pub const IDLE_TIMEOUT_DEFAULT_MS: u32 = 120_000;

/// Frame data is pushed to the panel in blocks of this many bytes.
const FRAME_CHUNK: usize = 64;

/// What a concrete controller revision has to provide.
///
/// `display` and `deep_sleep` are shared between the known revisions and
/// come as default implementations; a revision overrides the pieces where
/// its wire behavior diverges.
pub trait Model<SPI, CS, BSY, DC, RST, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Upper bound on a single busy wait.
    fn idle_timeout_ms(&self) -> u32 {
        IDLE_TIMEOUT_DEFAULT_MS
    }

    /// Hardware reset sequence.
    fn reset(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        config: &Config,
    ) -> Result<(), DisplayError> {
        iface.reset_pulse(config.reset_duration_ms)
    }

    /// Block until the controller reports idle or the timeout elapses.
    ///
    /// `Ok(false)` is the soft timeout outcome; the error channel is
    /// reserved for bus failures from revisions that poll over SPI.
    fn wait_idle(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
    ) -> Result<bool, DisplayError> {
        Ok(iface.wait_idle(self.idle_timeout_ms()))
    }

    /// One-time command sequence bringing the controller from reset to Idle.
    fn initialize(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        config: &Config,
    ) -> Result<(), DisplayError>;

    /// One complete refresh transaction: power up, transmit the frame,
    /// refresh, power back down.
    ///
    /// The frame bytes go out bit-inverted: a set bit on the wire is an
    /// unlit pixel in the panel's native encoding, the host buffer uses the
    /// opposite convention. Idle-wait timeouts are logged and do not abort
    /// the transaction.
    fn display(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        config: &Config,
        frame: &[u8],
        refresh: Refresh,
    ) -> Result<(), DisplayError> {
        log::info!("Powering on the panel");
        iface.cmd(Cmd::POWER_ON)?;
        iface.delay_ms(200);
        self.wait_idle(iface)?;

        if refresh == Refresh::Partial {
            // The partial sequence still covers the full panel extent; only
            // the command framing differs from a full refresh.
            let x_end = config.width - 1;
            let y_end = config.height - 1;
            iface.cmd(Cmd::PARTIAL_IN)?;
            iface.cmd(Cmd::PARTIAL_WINDOW)?;
            iface.data(&[
                0x00,
                0x00,
                0x00,
                0x00,
                (x_end >> 8) as u8,
                (x_end & 0xFF) as u8,
                (y_end >> 8) as u8,
                (y_end & 0xFF) as u8,
                Flag::PARTIAL_GATE_SCAN_INSIDE,
            ])?;
            iface.cmd(Cmd::DATA_START_TRANSMISSION_PARTIAL)?;
        } else {
            iface.cmd(Cmd::DATA_START_TRANSMISSION_NEW)?;
        }

        iface.delay_ms(2);
        let mut chunk = [0u8; FRAME_CHUNK];
        for bytes in frame.chunks(FRAME_CHUNK) {
            for (out, byte) in chunk.iter_mut().zip(bytes) {
                *out = !byte;
            }
            iface.data(&chunk[..bytes.len()])?;
        }

        iface.delay_ms(100);
        self.wait_idle(iface)?;

        iface.cmd(Cmd::DISPLAY_REFRESH)?;
        iface.delay_ms(100);
        self.wait_idle(iface)?;

        if refresh == Refresh::Partial {
            iface.cmd(Cmd::PARTIAL_OUT)?;
        }

        log::debug!("Powering off the panel");
        iface.cmd(Cmd::POWER_OFF)?;
        self.wait_idle(iface)?;
        Ok(())
    }

    /// Power off and enter deep sleep. The controller ignores everything
    /// afterwards until a hardware reset.
    fn deep_sleep(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
    ) -> Result<(), DisplayError> {
        iface.cmd(Cmd::POWER_OFF)?;
        self.wait_idle(iface)?;
        iface.cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK])
    }
}

fn resolution_bytes(config: &Config) -> [u8; 4] {
    [
        (config.width >> 8) as u8,
        (config.width & 0xFF) as u8,
        (config.height >> 8) as u8,
        (config.height & 0xFF) as u8,
    ]
}

/// The common 7.5" V2 revision: waveform tables from OTP, busy line usable
/// directly.
pub struct Epd7in5V2 {
    /// Upper bound on a single busy wait.
    pub idle_timeout_ms: u32,
}

impl Default for Epd7in5V2 {
    fn default() -> Self {
        Epd7in5V2 {
            idle_timeout_ms: 10_000,
        }
    }
}

impl<SPI, CS, BSY, DC, RST, DELAY> Model<SPI, CS, BSY, DC, RST, DELAY> for Epd7in5V2
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn idle_timeout_ms(&self) -> u32 {
        self.idle_timeout_ms
    }

    fn initialize(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        config: &Config,
    ) -> Result<(), DisplayError> {
        log::info!("Initializing display");

        iface.cmd(Cmd::POWER_SETTING)?;
        iface.data(&[0x07, 0x07, 0x3F, 0x3F])?;

        // The panel must not be powered at this point

        iface.delay_ms(100);
        self.wait_idle(iface)?;

        iface.cmd(Cmd::VCOM_AND_DATA_INTERVAL)?;
        iface.data(&[Flag::VCOM_BORDER_FLOATING, Flag::DATA_INTERVAL_10])?;

        iface.cmd(Cmd::TCON_SETTING)?;
        iface.data(&[Flag::TCON_S2G_G2S_12])?;

        iface.cmd(Cmd::PANEL_SETTING)?;
        iface.data(&[Flag::PSR_KW_LUT_OTP])?;

        iface.cmd(Cmd::RESOLUTION_SETTING)?;
        iface.data(&resolution_bytes(config))?;

        iface.cmd(Cmd::DUAL_SPI)?;
        iface.data(&[Flag::DUAL_SPI_DISABLED])?;

        // Leave the booster, source and gate drivers off until the first
        // refresh; register contents survive the power-off.
        iface.cmd(Cmd::POWER_OFF)?;
        Ok(())
    }
}

/// The alt 7.5" V2 revision: inverted reset pulse, register-loaded waveform
/// tables, and a busy flag that only updates while the controller is being
/// polled over SPI.
pub struct Epd7in5V2Alt {
    /// Upper bound on a single busy wait.
    pub idle_timeout_ms: u32,
}

impl Default for Epd7in5V2Alt {
    fn default() -> Self {
        Epd7in5V2Alt {
            idle_timeout_ms: 10_000,
        }
    }
}

impl<SPI, CS, BSY, DC, RST, DELAY> Model<SPI, CS, BSY, DC, RST, DELAY> for Epd7in5V2Alt
where
    SPI: SpiBus,
    CS: OutputPin,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn idle_timeout_ms(&self) -> u32 {
        self.idle_timeout_ms
    }

    fn reset(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        _config: &Config,
    ) -> Result<(), DisplayError> {
        if !iface.has_reset_pin() {
            return Ok(());
        }
        iface.rst_high()?;
        iface.delay_ms(200);
        iface.rst_low()?;
        iface.delay_ms(2);
        iface.rst_high()?;
        iface.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    fn wait_idle(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
    ) -> Result<bool, DisplayError> {
        if !iface.has_busy_pin() {
            return Ok(true);
        }
        let mut waited_ms = 0u32;
        loop {
            // The busy flag on this revision goes stale unless the
            // controller is queried; issue a status read before every poll.
            iface.cmd(Cmd::GET_STATUS)?;
            if !iface.is_busy() {
                return Ok(true);
            }
            if waited_ms >= self.idle_timeout_ms {
                log::error!("Timeout while displaying image!");
                return Ok(false);
            }
            iface.delay_ms(BUSY_POLL_INTERVAL_MS);
            waited_ms += BUSY_POLL_INTERVAL_MS;
        }
    }

    fn initialize(
        &self,
        iface: &mut DisplayInterface<SPI, CS, BSY, DC, RST, DELAY>,
        config: &Config,
    ) -> Result<(), DisplayError> {
        log::info!("Initializing display (alt revision)");

        self.reset(iface, config)?;

        iface.cmd(Cmd::POWER_SETTING)?;
        // internal power, VGH/VGL, VSH, VSL, VSHR
        iface.data(&[0x07, 0x17, 0x3F, 0x26, 0x11])?;

        iface.cmd(Cmd::VCOM_DC_SETTING)?;
        iface.data(&[0x24])?;

        iface.cmd(Cmd::BOOSTER_SOFT_START)?;
        iface.data(&[0x27, 0x27, 0x2F, 0x17])?;

        iface.cmd(Cmd::POWER_ON)?;
        iface.delay_ms(100);
        self.wait_idle(iface)?;

        iface.cmd(Cmd::PANEL_SETTING)?;
        iface.data(&[Flag::PSR_KW_LUT_REG])?;

        iface.cmd(Cmd::RESOLUTION_SETTING)?;
        iface.data(&resolution_bytes(config))?;

        iface.cmd(Cmd::DUAL_SPI)?;
        iface.data(&[Flag::DUAL_SPI_DISABLED])?;

        iface.cmd(Cmd::VCOM_AND_DATA_INTERVAL)?;
        iface.data(&[Flag::VCOM_BORDER_FLOATING, Flag::DATA_INTERVAL_17])?;

        iface.cmd(Cmd::TCON_SETTING)?;
        iface.data(&[Flag::TCON_S2G_G2S_12])?;

        iface.cmd(Cmd::RESOLUTION_SETTING_ALT)?;
        iface.data(&[0x00, 0x00, 0x00, 0x00])?;

        self.wait_idle(iface)?;

        iface.cmd(Cmd::LUT_VCOM)?;
        iface.data(&LUT_VCOM)?;

        iface.cmd(Cmd::LUT_WHITE_TO_WHITE)?;
        iface.data(&LUT_WHITE_TO_WHITE)?;

        iface.cmd(Cmd::LUT_BLACK_TO_WHITE)?;
        iface.data(&LUT_BLACK_TO_WHITE)?;

        iface.cmd(Cmd::LUT_WHITE_TO_BLACK)?;
        iface.data(&LUT_WHITE_TO_BLACK)?;

        iface.cmd(Cmd::LUT_BLACK_TO_BLACK)?;
        iface.data(&LUT_BLACK_TO_BLACK)?;

        Ok(())
    }
}

// Waveform tables for the alt revision, 42 bytes each: seven phase groups of
// level-select byte plus five frame counts.

/// VCOM waveform for [`Epd7in5V2Alt`].
pub const LUT_VCOM: [u8; 42] = [
    0x00, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x00, 0x0F, 0x01, 0x0F, 0x01, 0x02, //
    0x00, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
];

/// White-to-white waveform for [`Epd7in5V2Alt`].
pub const LUT_WHITE_TO_WHITE: [u8; 42] = [
    0x10, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02, //
    0x20, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
];

/// Black-to-white waveform for [`Epd7in5V2Alt`].
pub const LUT_BLACK_TO_WHITE: [u8; 42] = [
    0x10, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02, //
    0x20, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
];

/// White-to-black waveform for [`Epd7in5V2Alt`].
pub const LUT_WHITE_TO_BLACK: [u8; 42] = [
    0x80, 0x0F, 0x0F, 0x00, 0x00, 0x03, //
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x04, //
    0x40, 0x0F, 0x0F, 0x00, 0x00, 0x03, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
];

/// Black-to-black waveform for [`Epd7in5V2Alt`].
pub const LUT_BLACK_TO_BLACK: [u8; 42] = [
    0x80, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x84, 0x0F, 0x01, 0x0F, 0x01, 0x02, //
    0x40, 0x0F, 0x0F, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
];
