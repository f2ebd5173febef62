//! SSD1306 Text Display Driver
//!
//! A driver that turns ASCII text into the byte stream an SSD1306 OLED
//! controller expects, for 128x32 panels on an I2C bus.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Built-in 5x8 ASCII font with line wrapping
//! - Bounds-checked, page-addressed frame buffer
//! - Attribute-style control surface (`enable`, `display`, `brightness`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use ssd1306_text::{Builder, Display, FrameBuffer, Interface};
//!
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let i2c = MockI2c;
//! let interface = Interface::new(i2c);
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = match Display::new(interface, config, FrameBuffer::new()) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.init();
//! let _ = display.set_power(true);
//! let _ = display.render_text(b"Current card is 7.\nHigher or Lower?");
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// SSD1306 command definitions and encoder
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Named control points
pub mod control;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Page-addressed pixel buffer
pub mod framebuffer;
/// Built-in ASCII font
pub mod glyph;
/// Hardware interface abstraction
pub mod interface;
/// Text layout engine
pub mod layout;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use command::{AddressingMode, Command};
pub use config::{Builder, Config, Dimensions, MAX_COLUMNS, MAX_ROWS};
pub use control::{Access, Attribute};
pub use display::Display;
pub use error::{BufferError, BuilderError, Error};
pub use framebuffer::{DEFAULT_BUFFER_LEN, FrameBuffer};
pub use interface::{DEFAULT_ADDRESS, DisplayInterface, Interface};
pub use layout::{Cursor, TextLayout};
