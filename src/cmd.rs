pub struct Cmd;
impl Cmd {
    // Init
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_SETTING: u8 = 0x01;
    pub const BOOSTER_SOFT_START: u8 = 0x06;
    pub const DUAL_SPI: u8 = 0x15;
    pub const VCOM_AND_DATA_INTERVAL: u8 = 0x50;
    pub const TCON_SETTING: u8 = 0x60;
    pub const RESOLUTION_SETTING: u8 = 0x61;
    pub const RESOLUTION_SETTING_ALT: u8 = 0x65;
    pub const VCOM_DC_SETTING: u8 = 0x82;

    // Waveform look-up tables (alt controller revision only)
    pub const LUT_VCOM: u8 = 0x20;
    pub const LUT_WHITE_TO_WHITE: u8 = 0x21;
    pub const LUT_BLACK_TO_WHITE: u8 = 0x22;
    pub const LUT_WHITE_TO_BLACK: u8 = 0x23;
    pub const LUT_BLACK_TO_BLACK: u8 = 0x24;

    // Update
    pub const POWER_OFF: u8 = 0x02;
    pub const POWER_ON: u8 = 0x04;
    pub const DEEP_SLEEP: u8 = 0x07;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const DATA_START_TRANSMISSION_NEW: u8 = 0x13;
    pub const DATA_START_TRANSMISSION_PARTIAL: u8 = 0x24;
    pub const GET_STATUS: u8 = 0x71;
    pub const PARTIAL_WINDOW: u8 = 0x90;
    pub const PARTIAL_IN: u8 = 0x91;
    pub const PARTIAL_OUT: u8 = 0x92;
}

/*
Datasheet command set used by the reference firmware:
0x00 - Panel Setting (PSR)
0x01 - Power Setting (PWR)
0x02 - Power OFF
0x04 - Power ON
0x06 - Booster Soft Start
0x07 - Deep Sleep (requires check byte 0xA5)
0x12 - Display Refresh
0x13 - Data Start Transmission 2 (new data)
0x15 - Dual SPI Mode
0x20..0x24 - Waveform LUTs (VCOM/WW/BW/WB/BB)
0x24 - Data Start Transmission inside a partial window
0x50 - VCOM and Data Interval Setting
0x60 - TCON Setting
0x61 - Resolution Setting
0x65 - Alternative Resolution Setting
0x71 - Get Status (keeps the busy flag updated on some revisions)
0x82 - VCOM DC Setting
0x90 - Partial Window
0x91 - Partial In
0x92 - Partial Out
*/
