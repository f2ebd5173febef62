//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the SSD1306 controller over I2C.
//!
//! The driver hands the transport fully framed byte sequences (control byte
//! first), so the transport only moves bytes. Binding to a device address is
//! the transport's concern.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use ssd1306_text::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! // Create interface on the default address (0x3C)
//! let mut interface = Interface::new(MockI2c);
//!
//! // Send "display on"
//! let _ = interface.transmit(&[0x00, 0xAF]);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::I2c;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default 7-bit I2C address of SSD1306 modules (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Trait for the transport to the SSD1306 controller
///
/// This trait abstracts over different bus implementations, allowing the
/// [`Display`](crate::display::Display) to work with anything that can move
/// a byte sequence to the device.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this
/// trait on your own type for other buses or for testing.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send one byte sequence to the controller as a single bus write
    ///
    /// The sequence is already framed: its first byte is the control byte.
    /// The call blocks until the write completes or fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus write fails or the device rejects it.
    fn transmit(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error>;
}

/// I2C interface implementation for SSD1306
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 I2C buses.
///
/// ## Example
///
/// ```rust,no_run
/// use ssd1306_text::{Builder, Display, FrameBuffer, Interface};
/// # use core::convert::Infallible;
/// # use embedded_hal::i2c::{ErrorType, I2c, Operation};
/// # struct MockI2c;
/// # impl ErrorType for MockI2c { type Error = Infallible; }
/// # impl I2c for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// let interface = Interface::new(MockI2c).with_address(0x3D);
///
/// # let config = match Builder::new().build() {
/// #     Ok(config) => config,
/// #     Err(_) => return,
/// # };
/// let _display = Display::new(interface, config, FrameBuffer::new());
/// ```
#[derive(Debug)]
pub struct Interface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
}

impl<I2C> Interface<I2C>
where
    I2C: I2c,
{
    /// Create a new Interface on [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
        }
    }

    /// Use a different 7-bit device address (0x3D when SA0 is high)
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Get the device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DisplayInterface for Interface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn transmit(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(self.address, bytes)
    }
}
