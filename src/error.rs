//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! frame buffer access ([`BufferError`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`BufferError`] - Rejected frame buffer writes, independent of the transport
//! - [`Error`] - Runtime errors during display operations
//!
//! ## Example
//!
//! ```
//! use ssd1306_text::{BufferError, Dimensions, FrameBuffer};
//!
//! // Invalid dimensions
//! assert!(Dimensions::new(128, 30).is_err());
//!
//! // Glyph past the right edge
//! let mut buffer = FrameBuffer::new();
//! let result = buffer.write_glyph(124, 0, &[0xFF; 5]);
//! assert!(matches!(result, Err(BufferError::OutOfBounds { x: 124, page: 0 })));
//! ```

use crate::command::AddressingMode;
use crate::control::Attribute;
use crate::interface::DisplayInterface;

/// Maximum segment outputs (columns) supported by the SSD1306 controller
pub const MAX_COLUMNS: u16 = 128;

/// Maximum COM outputs (rows) supported by the SSD1306 controller
pub const MAX_ROWS: u16 = 64;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Transport error
    ///
    /// Wraps the underlying bus error from the [`DisplayInterface`] implementation.
    /// The driver never retries.
    Interface(I::Error),
    /// Malformed control input
    ///
    /// The write was rejected before any state change or bus traffic.
    InvalidInput,
    /// A glyph write would leave the display geometry
    ///
    /// The render was aborted and nothing was sent.
    OutOfBounds {
        /// Column the write started at
        x: u16,
        /// Page the write targeted
        page: u16,
    },
    /// Buffer is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// The configuration was rejected
    ///
    /// Raised by `Display::new` for a `Config` whose public fields were
    /// edited past the limits `Builder::build` enforces.
    InvalidConfig(BuilderError),
    /// The power-up sequence has not been sent yet
    NotInitialized,
    /// The control point has no handler for this access
    Unsupported(Attribute),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::InvalidInput => write!(f, "Invalid input"),
            Self::OutOfBounds { x, page } => {
                write!(f, "Write out of bounds: x={x}, page={page}")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
            Self::NotInitialized => write!(f, "Display not initialized"),
            Self::Unsupported(attribute) => {
                write!(f, "Unsupported access to '{}'", attribute.name())
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<BufferError> for Error<I> {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::OutOfBounds { x, page } => Self::OutOfBounds { x, page },
            BufferError::BufferTooSmall { required, provided } => {
                Self::BufferTooSmall { required, provided }
            }
        }
    }
}

impl<I: DisplayInterface> From<BuilderError> for Error<I> {
    fn from(e: BuilderError) -> Self {
        Self::InvalidConfig(e)
    }
}

/// Errors raised by the frame buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Column or page outside the display geometry
    OutOfBounds {
        /// Requested column
        x: u16,
        /// Requested page
        page: u16,
    },
    /// Backing storage shorter than `dimensions.buffer_size()`
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds { x, page } => {
                write!(f, "Write out of bounds: x={x}, page={page}")
            }
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for BufferError {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: u16,
        /// Height requested
        height: u16,
    },
    /// Flushing needs a window that spans every page
    ///
    /// Only [`AddressingMode::Horizontal`] lets the whole buffer go out as
    /// one burst.
    UnsupportedAddressingMode(AddressingMode),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS}, height must be multiple of 8)"
            ),
            Self::UnsupportedAddressingMode(mode) => {
                write!(f, "Unsupported addressing mode {mode:?} (horizontal required)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
