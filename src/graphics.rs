//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] with [`BinaryColor`], so anything the
//! embedded-graphics ecosystem can draw lands in the frame buffer as raw
//! pixels. Nothing reaches the panel until [`Display::flush`] is called.
//!
//! [`Display::render_text`] clears the buffer first; draw after rendering
//! text, then flush.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use ssd1306_text::{Builder, Display, FrameBuffer, Interface};
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
//! let _ = display.init();
//! let _ = display.render_text(b"Battery");
//!
//! // Frame around the text
//! let _ = Rectangle::new(Point::new(0, 10), Size::new(128, 6))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut display);
//!
//! let _ = display.flush();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::display::Display;
use crate::interface::DisplayInterface;

impl<I, B> DrawTarget for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let buffer = self.frame_buffer_mut();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            // Off-screen pixels are dropped by the buffer
            buffer.set_pixel(x as u32, y as u32, color.is_on());
        }

        Ok(())
    }
}

impl<I, B> OriginDimensions for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(u32::from(dims.width), u32::from(dims.height))
    }
}
