//! SSD1306 command definitions and encoder
//!
//! Every transmission to the controller starts with a control byte. Commands
//! use [`COMMAND`]; pixel bursts use [`DATA_STREAM_HEADER`]. A command is
//! encoded as one self-contained write: `[COMMAND, opcode, operands...]`.
//!
//! The builders in this module are pure: they return [`Command`] values and
//! never touch a transport. [`Command::encode`] produces the exact bytes.
//!
//! ## Example
//!
//! ```
//! use ssd1306_text::command::{self, Command, COMMAND};
//!
//! // Display on: base enable opcode with the low bit set
//! let on = command::power_toggle(true).encode();
//! assert_eq!(on.as_bytes(), &[COMMAND, 0xAF]);
//!
//! let pump = Command::ChargePump(0x14).encode();
//! assert_eq!(pump.as_bytes(), &[0x00, 0x8D, 0x14]);
//! ```

use crate::config::{Config, Dimensions};

// Control bytes

/// Control byte announcing a command
pub const COMMAND: u8 = 0x00;

/// Control byte flagging the following byte as display RAM data
pub const DATA: u8 = 0x40;

/// Continuation bit of the control byte
pub const STREAM: u8 = 0x80;

/// Header byte prefixed to a bulk pixel transfer
pub const DATA_STREAM_HEADER: u8 = STREAM | DATA;

// Fundamental commands

/// Display sleep/wake (0xAE)
///
/// Bit 0 selects the state: 0xAE = off (sleep), 0xAF = on.
pub const DISPLAY_ENABLE_BASE: u8 = 0xAE;

/// Set contrast control (0x81)
///
/// Requires 1 byte: contrast level.
pub const SET_CONTRAST: u8 = 0x81;

/// Resume display from RAM content (0xA4)
pub const RESUME_RAM: u8 = 0xA4;

/// Normal display polarity (0xA6)
///
/// 0xA7 inverts the panel.
pub const NORMAL_DISPLAY: u8 = 0xA6;

// Addressing commands

/// Set memory addressing mode (0x20)
///
/// Requires 1 byte, see [`AddressingMode`].
pub const SET_ADDRESSING_MODE: u8 = 0x20;

/// Set column address window (0x21)
///
/// Requires 2 bytes: [start column, end column]. Horizontal and vertical
/// addressing modes only.
pub const SET_COLUMN_ADDRESS: u8 = 0x21;

/// Set page address window (0x22)
///
/// Requires 2 bytes: [start page, end page]. Horizontal and vertical
/// addressing modes only.
pub const SET_PAGE_ADDRESS: u8 = 0x22;

// Hardware configuration commands

/// Set display start line (0x40 - 0x7F)
///
/// The start line is OR-ed into the opcode.
pub const SET_START_LINE: u8 = 0x40;

/// Segment remap (0xA0)
///
/// 0xA1 maps column 127 to SEG0.
pub const SET_SEGMENT_REMAP: u8 = 0xA0;

/// Set multiplex ratio (0xA8)
///
/// Requires 1 byte: number of rows minus one.
pub const SET_MULTIPLEX: u8 = 0xA8;

/// COM output scan direction, normal (0xC0)
pub const SET_COM_SCAN_NORMAL: u8 = 0xC0;

/// COM output scan direction, remapped (0xC8)
pub const SET_COM_SCAN_REVERSED: u8 = 0xC8;

/// Set display offset (0xD3)
///
/// Requires 1 byte: vertical shift.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration (0xDA)
///
/// Requires 1 byte: 0x02 sequential (32 rows), 0x12 alternative (64 rows).
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving commands

/// Set display clock divide ratio / oscillator frequency (0xD5)
pub const SET_CLOCK_DIVIDER: u8 = 0xD5;

/// Set pre-charge period (0xD9)
pub const SET_PRECHARGE: u8 = 0xD9;

/// Set VCOMH deselect level (0xDB)
pub const SET_VCOMH_DESELECT: u8 = 0xDB;

/// Charge pump setting (0x8D)
///
/// Requires 1 byte: 0x14 enables the pump, 0x10 disables it.
pub const CHARGE_PUMP: u8 = 0x8D;

/// Longest encoded command: control byte, opcode, two operands
pub const MAX_ENCODED_LEN: usize = 4;

/// Number of commands in the power-up sequence
pub const POWER_SEQUENCE_LEN: usize = 15;

/// Memory addressing mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressingMode {
    /// Column pointer wraps into the next page at the end of the window
    #[default]
    Horizontal = 0x00,
    /// Page pointer wraps into the next column at the end of the window
    Vertical = 0x01,
    /// Column pointer wraps within the current page
    Page = 0x02,
}

/// A single controller command with its operands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Wake (`true`) or sleep (`false`) the panel
    DisplayOn(bool),
    /// Charge pump setting byte
    ChargePump(u8),
    /// Clock divide ratio and oscillator frequency
    ClockDivider(u8),
    /// Multiplex ratio (rows minus one)
    Multiplex(u8),
    /// Vertical display offset
    DisplayOffset(u8),
    /// RAM line mapped to row 0
    StartLine(u8),
    /// Memory addressing mode
    AddressingMode(AddressingMode),
    /// Mirror columns
    SegmentRemap(bool),
    /// Scan COM outputs from COM[N-1] to COM0
    ComScanReversed(bool),
    /// COM pins hardware configuration byte
    ComPins(u8),
    /// Contrast level
    Contrast(u8),
    /// VCOMH deselect level byte
    VcomhDeselect(u8),
    /// Show RAM content instead of forcing every pixel on
    ResumeRam,
    /// Inverted (`true`) or normal (`false`) polarity
    Invert(bool),
    /// Pre-charge period byte
    PrechargePeriod(u8),
    /// Page window for RAM writes
    PageAddress {
        /// First page
        start: u8,
        /// Last page (inclusive)
        end: u8,
    },
    /// Column window for RAM writes
    ColumnAddress {
        /// First column
        start: u8,
        /// Last column (inclusive)
        end: u8,
    },
}

impl Command {
    /// Encode as one bus write, control byte included
    pub fn encode(self) -> Encoded {
        match self {
            Self::DisplayOn(on) => Encoded::new(&[COMMAND, DISPLAY_ENABLE_BASE | u8::from(on)]),
            Self::ChargePump(setting) => Encoded::new(&[COMMAND, CHARGE_PUMP, setting]),
            Self::ClockDivider(value) => Encoded::new(&[COMMAND, SET_CLOCK_DIVIDER, value]),
            Self::Multiplex(ratio) => Encoded::new(&[COMMAND, SET_MULTIPLEX, ratio]),
            Self::DisplayOffset(offset) => Encoded::new(&[COMMAND, SET_DISPLAY_OFFSET, offset]),
            Self::StartLine(line) => Encoded::new(&[COMMAND, SET_START_LINE | (line & 0x3F)]),
            Self::AddressingMode(mode) => {
                Encoded::new(&[COMMAND, SET_ADDRESSING_MODE, mode as u8])
            }
            Self::SegmentRemap(remap) => {
                Encoded::new(&[COMMAND, SET_SEGMENT_REMAP | u8::from(remap)])
            }
            Self::ComScanReversed(reversed) => {
                let opcode = if reversed {
                    SET_COM_SCAN_REVERSED
                } else {
                    SET_COM_SCAN_NORMAL
                };
                Encoded::new(&[COMMAND, opcode])
            }
            Self::ComPins(value) => Encoded::new(&[COMMAND, SET_COM_PINS, value]),
            Self::Contrast(level) => Encoded::new(&[COMMAND, SET_CONTRAST, level]),
            Self::VcomhDeselect(level) => Encoded::new(&[COMMAND, SET_VCOMH_DESELECT, level]),
            Self::ResumeRam => Encoded::new(&[COMMAND, RESUME_RAM]),
            Self::Invert(inverted) => Encoded::new(&[COMMAND, NORMAL_DISPLAY | u8::from(inverted)]),
            Self::PrechargePeriod(value) => Encoded::new(&[COMMAND, SET_PRECHARGE, value]),
            Self::PageAddress { start, end } => {
                Encoded::new(&[COMMAND, SET_PAGE_ADDRESS, start, end])
            }
            Self::ColumnAddress { start, end } => {
                Encoded::new(&[COMMAND, SET_COLUMN_ADDRESS, start, end])
            }
        }
    }
}

/// Encoded command bytes, ready for a single transmission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; MAX_ENCODED_LEN],
    len: usize,
}

impl Encoded {
    fn new(src: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_ENCODED_LEN];
        let len = src.len().min(MAX_ENCODED_LEN);
        bytes[..len].copy_from_slice(&src[..len]);
        Self { bytes, len }
    }

    /// The bytes to put on the bus
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Power-up sequence for the configured panel
///
/// Leaves the panel asleep; [`power_toggle`] wakes it. The order is part of
/// the controller contract: the charge pump is configured while the panel is
/// off, and the addressing mode is set before any window command is issued.
pub fn power_sequence(config: &Config) -> [Command; POWER_SEQUENCE_LEN] {
    let rows = config.dimensions.height;
    [
        Command::DisplayOn(false),
        Command::ChargePump(config.charge_pump),
        Command::ClockDivider(config.clock_divider),
        Command::Multiplex((rows - 1) as u8),
        Command::DisplayOffset(config.display_offset),
        Command::StartLine(config.start_line),
        Command::AddressingMode(config.addressing_mode),
        Command::SegmentRemap(config.segment_remap),
        Command::ComScanReversed(config.com_scan_reversed),
        Command::ComPins(config.com_pins),
        Command::Contrast(config.contrast),
        Command::VcomhDeselect(config.vcomh_level),
        Command::ResumeRam,
        Command::Invert(false),
        Command::PrechargePeriod(config.precharge),
    ]
}

/// Sleep or wake the panel
pub const fn power_toggle(on: bool) -> Command {
    Command::DisplayOn(on)
}

/// Window commands returning the RAM write pointer to the origin
///
/// Issued before and after every bulk pixel transfer.
pub fn cursor_reset_sequence(dimensions: Dimensions) -> [Command; 2] {
    [
        Command::PageAddress {
            start: 0,
            end: (dimensions.pages() - 1) as u8,
        },
        Command::ColumnAddress {
            start: 0,
            end: (dimensions.width - 1) as u8,
        },
    ]
}
