//! Display configuration types and builder

use crate::command::{AddressingMode, DATA_STREAM_HEADER};
pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};
use crate::glyph::GLYPH_WIDTH;

/// Height of one page in pixels
pub const PAGE_HEIGHT: u16 = 8;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (segment outputs)
    pub width: u16,
    /// Height in pixels (COM outputs)
    pub height: u16,
}

impl Dimensions {
    /// The 128x32 panel this driver targets
    pub const DEFAULT: Self = Self {
        width: 128,
        height: 32,
    };

    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is narrower than one glyph or wider than MAX_COLUMNS
    /// - height is 0 or taller than MAX_ROWS
    /// - height % 8 != 0 (must be a whole number of pages)
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if (width as usize) < GLYPH_WIDTH || width > MAX_COLUMNS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_ROWS || height % PAGE_HEIGHT != 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of 8-pixel pages
    pub fn pages(&self) -> u16 {
        self.height / PAGE_HEIGHT
    }

    /// Pixel data size in bytes, header excluded
    pub fn pixel_bytes(&self) -> usize {
        self.width as usize * self.pages() as usize
    }

    /// Frame buffer size in bytes: one header byte plus the pixel data
    pub fn buffer_size(&self) -> usize {
        1 + self.pixel_bytes()
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Display configuration
///
/// Holds the operands of the power-up sequence and the bulk data header.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Charge pump setting byte (0x14 = enabled)
    pub charge_pump: u8,
    /// Clock divide ratio / oscillator frequency byte
    pub clock_divider: u8,
    /// Vertical display offset
    pub display_offset: u8,
    /// RAM start line
    pub start_line: u8,
    /// Memory addressing mode
    pub addressing_mode: AddressingMode,
    /// Mirror columns (SEG0 = column 127)
    pub segment_remap: bool,
    /// Scan COM outputs in reverse
    pub com_scan_reversed: bool,
    /// COM pins hardware configuration byte
    pub com_pins: u8,
    /// Contrast level
    pub contrast: u8,
    /// VCOMH deselect level byte
    pub vcomh_level: u8,
    /// Pre-charge period byte
    pub precharge: u8,
    /// Header byte prefixed to every bulk pixel transfer
    pub data_header: u8,
}

impl Config {
    /// Check fields that may have been edited after [`Builder::build`]
    ///
    /// # Errors
    ///
    /// - `BuilderError::InvalidDimensions` if the dimensions break the limits
    ///   of [`Dimensions::new`].
    /// - `BuilderError::UnsupportedAddressingMode` for anything but
    ///   horizontal addressing.
    pub fn validate(&self) -> Result<(), BuilderError> {
        Dimensions::new(self.dimensions.width, self.dimensions.height)?;
        if self.addressing_mode != AddressingMode::Horizontal {
            return Err(BuilderError::UnsupportedAddressingMode(
                self.addressing_mode,
            ));
        }
        Ok(())
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use ssd1306_text::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).contrast(0xCF).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.com_pins, 0x12);
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions
    dimensions: Dimensions,
    /// Charge pump setting byte
    charge_pump: u8,
    /// Clock divide ratio / oscillator frequency byte
    clock_divider: u8,
    /// Vertical display offset
    display_offset: u8,
    /// RAM start line
    start_line: u8,
    /// Memory addressing mode
    addressing_mode: AddressingMode,
    /// Mirror columns
    segment_remap: bool,
    /// Scan COM outputs in reverse
    com_scan_reversed: bool,
    /// COM pins configuration, derived from the height when unset
    com_pins: Option<u8>,
    /// Contrast level
    contrast: u8,
    /// VCOMH deselect level byte
    vcomh_level: u8,
    /// Pre-charge period byte
    precharge: u8,
    /// Bulk transfer header byte
    data_header: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::DEFAULT,
            // Internal charge pump on (no external VCC)
            charge_pump: 0x14,
            // Divide ratio 1, oscillator frequency 8 (reset value)
            clock_divider: 0x80,
            display_offset: 0,
            start_line: 0,
            // Window commands only take effect in horizontal/vertical mode
            addressing_mode: AddressingMode::Horizontal,
            // Default orientation for common 128x32 modules
            segment_remap: true,
            com_scan_reversed: true,
            com_pins: None,
            contrast: 0x8F,
            // ~0.77 x VCC
            vcomh_level: 0x40,
            // Phase 1 = 1 DCLK, phase 2 = 15 DCLK (internal pump)
            precharge: 0xF1,
            data_header: DATA_STREAM_HEADER,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (defaults to 128x32)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = dims;
        self
    }

    /// Set the charge pump setting byte
    pub fn charge_pump(mut self, value: u8) -> Self {
        self.charge_pump = value;
        self
    }

    /// Set the clock divide ratio / oscillator frequency byte
    pub fn clock_divider(mut self, value: u8) -> Self {
        self.clock_divider = value;
        self
    }

    /// Set the vertical display offset
    pub fn display_offset(mut self, value: u8) -> Self {
        self.display_offset = value;
        self
    }

    /// Set the RAM start line (0-63)
    pub fn start_line(mut self, value: u8) -> Self {
        self.start_line = value;
        self
    }

    /// Set the memory addressing mode
    ///
    /// Only [`AddressingMode::Horizontal`] (the default) passes
    /// [`build`](Self::build); flushing sends the buffer as one burst
    /// across every page.
    pub fn addressing_mode(mut self, mode: AddressingMode) -> Self {
        self.addressing_mode = mode;
        self
    }

    /// Mirror columns
    pub fn segment_remap(mut self, value: bool) -> Self {
        self.segment_remap = value;
        self
    }

    /// Scan COM outputs in reverse
    pub fn com_scan_reversed(mut self, value: bool) -> Self {
        self.com_scan_reversed = value;
        self
    }

    /// Override the COM pins configuration byte
    ///
    /// By default it is derived from the height: 0x02 for 32 rows, 0x12 otherwise.
    pub fn com_pins(mut self, value: u8) -> Self {
        self.com_pins = Some(value);
        self
    }

    /// Set contrast level
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set VCOMH deselect level byte
    pub fn vcomh_level(mut self, value: u8) -> Self {
        self.vcomh_level = value;
        self
    }

    /// Set pre-charge period byte
    pub fn precharge(mut self, value: u8) -> Self {
        self.precharge = value;
        self
    }

    /// Set the header byte of bulk pixel transfers
    ///
    /// Defaults to [`DATA_STREAM_HEADER`] (0xC0). Some modules expect the
    /// plain data control byte, [`DATA`](crate::command::DATA) (0x40).
    pub fn data_header(mut self, value: u8) -> Self {
        self.data_header = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if the dimensions were
    /// assembled by hand and violate the limits enforced by [`Dimensions::new`],
    /// or `BuilderError::UnsupportedAddressingMode` for a non-horizontal mode.
    pub fn build(self) -> Result<Config, BuilderError> {
        let com_pins = self
            .com_pins
            .unwrap_or(if self.dimensions.height == 32 { 0x02 } else { 0x12 });
        let config = Config {
            dimensions: self.dimensions,
            charge_pump: self.charge_pump,
            clock_divider: self.clock_divider,
            display_offset: self.display_offset,
            start_line: self.start_line,
            addressing_mode: self.addressing_mode,
            segment_remap: self.segment_remap,
            com_scan_reversed: self.com_scan_reversed,
            com_pins,
            contrast: self.contrast,
            vcomh_level: self.vcomh_level,
            precharge: self.precharge,
            data_header: self.data_header,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions_are_128x32() {
        let dims = Dimensions::default();
        assert_eq!(dims.width, 128);
        assert_eq!(dims.height, 32);
        assert_eq!(dims.pages(), 4);
        assert_eq!(dims.buffer_size(), 1 + 128 * 4);
    }

    #[test]
    fn test_height_must_be_whole_pages() {
        assert!(matches!(
            Dimensions::new(128, 30),
            Err(BuilderError::InvalidDimensions {
                width: 128,
                height: 30
            })
        ));
        assert!(Dimensions::new(128, 0).is_err());
        assert!(Dimensions::new(128, 72).is_err());
    }

    #[test]
    fn test_width_limits() {
        assert!(Dimensions::new(129, 32).is_err());
        assert!(Dimensions::new(4, 32).is_err());
        assert!(Dimensions::new(64, 48).is_ok());
    }

    #[test]
    fn test_hand_built_dimensions_are_revalidated() {
        let bogus = Dimensions {
            width: 128,
            height: 12,
        };
        assert!(Builder::new().dimensions(bogus).build().is_err());
    }

    #[test]
    fn test_com_pins_follow_height() {
        let short = Builder::new().build().unwrap();
        assert_eq!(short.com_pins, 0x02);

        let tall = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .build()
            .unwrap();
        assert_eq!(tall.com_pins, 0x12);

        let custom = Builder::new().com_pins(0x22).build().unwrap();
        assert_eq!(custom.com_pins, 0x22);
    }

    #[test]
    fn test_default_data_header_is_stream() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.data_header, DATA_STREAM_HEADER);
        assert_eq!(config.addressing_mode, AddressingMode::Horizontal);
    }

    #[test]
    fn test_only_horizontal_addressing_builds() {
        for mode in [AddressingMode::Vertical, AddressingMode::Page] {
            assert_eq!(
                Builder::new().addressing_mode(mode).build().err(),
                Some(BuilderError::UnsupportedAddressingMode(mode))
            );
        }
        assert!(
            Builder::new()
                .addressing_mode(AddressingMode::Horizontal)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_validate_catches_edited_fields() {
        let mut config = Builder::new().build().unwrap();
        assert_eq!(config.validate(), Ok(()));

        config.dimensions = Dimensions {
            width: 300,
            height: 32,
        };
        assert_eq!(
            config.validate(),
            Err(BuilderError::InvalidDimensions {
                width: 300,
                height: 32
            })
        );

        config.dimensions = Dimensions::DEFAULT;
        config.addressing_mode = AddressingMode::Page;
        assert_eq!(
            config.validate(),
            Err(BuilderError::UnsupportedAddressingMode(AddressingMode::Page))
        );
    }
}
