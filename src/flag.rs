/// Payload byte values used with the [`Cmd`](crate::cmd::Cmd) command set.
///
/// Only bytes with a meaning beyond "voltage level from the reference design"
/// get a name here; plain tuning values stay inline at the call site.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Deep Sleep (0x07) requires this check byte or the command is ignored
    pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

    // Panel Setting (0x00) flags
    pub const PSR_KW_LUT_OTP: u8 = 0x1F; // black/white, LUTs from OTP
    pub const PSR_KW_LUT_REG: u8 = 0x3F; // black/white, LUTs from registers

    // VCOM and Data Interval Setting (0x50) flags
    pub const VCOM_BORDER_FLOATING: u8 = 0x10;
    pub const DATA_INTERVAL_10: u8 = 0x07;
    pub const DATA_INTERVAL_17: u8 = 0x00;

    // TCON Setting (0x60), gate/source non-overlap periods
    pub const TCON_S2G_G2S_12: u8 = 0x22;

    // Dual SPI Mode (0x15) flags
    pub const DUAL_SPI_DISABLED: u8 = 0x00;

    // Partial Window (0x90) trailing byte
    pub const PARTIAL_GATE_SCAN_INSIDE: u8 = 0x01;
}
