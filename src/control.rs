//! Named control points
//!
//! A small attribute-style surface for hosts that expose the driver through
//! named read/write endpoints:
//!
//! | Name         | Access     | Read            | Write                          |
//! |--------------|------------|-----------------|--------------------------------|
//! | `enable`     | read/write | `"0\n"`/`"1\n"` | leading `'0'` or `'1'`         |
//! | `display`    | write-only | -               | text, rendered and flushed     |
//! | `brightness` | read/write | unsupported     | unsupported                    |
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_text::{Attribute, Builder, Display, FrameBuffer, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::i2c::{ErrorType, I2c, Operation};
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
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut display = match Display::new(Interface::new(MockI2c), config, FrameBuffer::new()) {
//! #     Ok(display) => display,
//! #     Err(_) => return,
//! # };
//! # let _ = display.init();
//! let _ = display.store(Attribute::Enable, b"1\n");
//! let _ = display.store(Attribute::Display, b"Higher or Lower?");
//! assert_eq!(display.show(Attribute::Enable).ok(), Some("1\n"));
//! ```

use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Control points exposed by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    /// Panel power state
    Enable,
    /// Text to show
    Display,
    /// Reserved; no handler
    Brightness,
}

/// Which directions an attribute accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Can be read
    pub read: bool,
    /// Can be written
    pub write: bool,
}

impl Access {
    /// Unix permission bits for a world-accessible endpoint
    pub const fn mode(self) -> u16 {
        let mut mode = 0;
        if self.read {
            mode |= 0o444;
        }
        if self.write {
            mode |= 0o222;
        }
        mode
    }
}

impl Attribute {
    /// Every control point, in registration order
    pub const ALL: [Self; 3] = [Self::Display, Self::Brightness, Self::Enable];

    /// Endpoint name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Display => "display",
            Self::Brightness => "brightness",
        }
    }

    /// Look up a control point by endpoint name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attribute| attribute.name() == name)
    }

    /// Advertised access
    pub const fn access(self) -> Access {
        match self {
            Self::Enable | Self::Brightness => Access {
                read: true,
                write: true,
            },
            Self::Display => Access {
                read: false,
                write: true,
            },
        }
    }
}

impl<I, B> Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Read a control point
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` for `display` (write-only) and
    /// `brightness` (no handler).
    pub fn show(&self, attribute: Attribute) -> Result<&'static str, Error<I>> {
        match attribute {
            Attribute::Enable => Ok(if self.is_on() { "1\n" } else { "0\n" }),
            Attribute::Display | Attribute::Brightness => Err(Error::Unsupported(attribute)),
        }
    }

    /// Write a control point
    ///
    /// Returns the number of input bytes consumed, which is the whole input
    /// on success.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` if `enable` gets anything but a leading `'0'`
    ///   or `'1'`. State is unchanged and nothing is sent.
    /// - `Error::Unsupported` for `brightness`.
    /// - Any error of [`set_power`](Display::set_power) or
    ///   [`render_text`](Display::render_text).
    pub fn store(&mut self, attribute: Attribute, input: &[u8]) -> Result<usize, Error<I>> {
        match attribute {
            Attribute::Enable => {
                let on = match input.first() {
                    Some(b'0') => false,
                    Some(b'1') => true,
                    _ => return Err(Error::InvalidInput),
                };
                self.set_power(on)?;
                Ok(input.len())
            }
            Attribute::Display => self.render_text(input),
            Attribute::Brightness => Err(Error::Unsupported(attribute)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::tests::test_display;

    #[test]
    fn test_enable_round_trip() {
        let mut display = test_display();
        assert_eq!(display.show(Attribute::Enable).unwrap(), "0\n");

        assert_eq!(display.store(Attribute::Enable, b"1").unwrap(), 1);
        assert_eq!(display.show(Attribute::Enable).unwrap(), "1\n");

        assert_eq!(display.store(Attribute::Enable, b"0\n").unwrap(), 2);
        assert_eq!(display.show(Attribute::Enable).unwrap(), "0\n");
    }

    #[test]
    fn test_enable_rejects_unknown_value() {
        let mut display = test_display();
        display.store(Attribute::Enable, b"1").unwrap();
        assert!(matches!(
            display.store(Attribute::Enable, b"2"),
            Err(Error::InvalidInput)
        ));
        assert!(matches!(
            display.store(Attribute::Enable, b""),
            Err(Error::InvalidInput)
        ));
        assert_eq!(display.show(Attribute::Enable).unwrap(), "1\n");
        assert_eq!(display.release().writes.len(), 1);
    }

    #[test]
    fn test_enable_only_looks_at_first_byte() {
        let mut display = test_display();
        assert_eq!(display.store(Attribute::Enable, b"1xyz").unwrap(), 4);
        assert!(display.is_on());
    }

    #[test]
    fn test_display_store_renders_text() {
        let mut display = test_display();
        let consumed = display.store(Attribute::Display, b"Good Guess!").unwrap();
        assert_eq!(consumed, 11);
        assert_eq!(display.cursor().x, 66);
        assert_eq!(display.release().writes.len(), 5);
    }

    #[test]
    fn test_write_only_and_unimplemented_points() {
        let mut display = test_display();
        assert!(matches!(
            display.show(Attribute::Display),
            Err(Error::Unsupported(Attribute::Display))
        ));
        assert!(matches!(
            display.show(Attribute::Brightness),
            Err(Error::Unsupported(Attribute::Brightness))
        ));
        assert!(matches!(
            display.store(Attribute::Brightness, b"255"),
            Err(Error::Unsupported(Attribute::Brightness))
        ));
        assert!(display.release().writes.is_empty());
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Attribute::from_name("enable"), Some(Attribute::Enable));
        assert_eq!(Attribute::from_name("display"), Some(Attribute::Display));
        assert_eq!(Attribute::from_name("brightness"), Some(Attribute::Brightness));
        assert_eq!(Attribute::from_name("contrast"), None);
    }

    #[test]
    fn test_access_modes() {
        assert_eq!(Attribute::Enable.access().mode(), 0o666);
        assert_eq!(Attribute::Brightness.access().mode(), 0o666);
        assert_eq!(Attribute::Display.access().mode(), 0o222);
    }
}
