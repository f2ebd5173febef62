//! Text layout
//!
//! Rasterizes ASCII text into a [`FrameBuffer`] with a fixed 6-pixel advance
//! and one text line per page.
//!
//! Rules, applied per input byte:
//! - `\n`, or a cursor at or past `width - CHARACTER_SPACE`, moves the cursor
//!   to column 0 of the next page.
//! - A printable byte is drawn at the cursor, which then advances by
//!   [`CHARACTER_SPACE`]. A space landing on column 0 is dropped so wrapped
//!   lines do not start indented.
//! - Every other byte is ignored.
//!
//! Text running past the last page aborts the render with
//! [`BufferError::OutOfBounds`] at the first glyph that would not fit, and
//! leaves the buffer blank.

use crate::error::BufferError;
use crate::framebuffer::FrameBuffer;
use crate::glyph::{CHARACTER_SPACE, glyph_columns};

/// Text write position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Column in pixels
    pub x: u16,
    /// Page (text line)
    pub page: u16,
}

/// Cursor state for rendering text into a frame buffer
#[derive(Clone, Debug, Default)]
pub struct TextLayout {
    cursor: Cursor,
}

impl TextLayout {
    /// Layout with the cursor at the origin
    pub const fn new() -> Self {
        Self {
            cursor: Cursor { x: 0, page: 0 },
        }
    }

    /// Where the next glyph would go
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor back to `(0, 0)`
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
    }

    /// Replace the buffer contents with `text`
    ///
    /// Clears the buffer and resets the cursor first, so identical input
    /// always yields identical pixels. Returns the number of bytes consumed,
    /// which is all of `text` on success.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfBounds` when the text runs past the last
    /// page. The buffer is cleared and the cursor reset, so no partial
    /// render survives.
    pub fn render<B>(&mut self, buffer: &mut FrameBuffer<B>, text: &[u8]) -> Result<usize, BufferError>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        buffer.clear();
        self.reset();

        let wrap_at = buffer
            .dimensions()
            .width
            .saturating_sub(CHARACTER_SPACE as u16);

        for &byte in text {
            if byte == b'\n' || self.cursor.x >= wrap_at {
                self.line_break();
            }

            let Some(columns) = glyph_columns(byte) else {
                continue;
            };
            if self.cursor.x == 0 && byte == b' ' {
                continue;
            }

            if let Err(e) = buffer.write_glyph(self.cursor.x, self.cursor.page, columns) {
                buffer.clear();
                self.reset();
                return Err(e);
            }
            self.cursor.x += CHARACTER_SPACE as u16;
        }

        Ok(text.len())
    }

    fn line_break(&mut self) {
        self.cursor.x = 0;
        self.cursor.page = self.cursor.page.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GLYPH_WIDTH;

    fn glyph_at(buffer: &FrameBuffer, x: u16, page: u16) -> [u8; GLYPH_WIDTH] {
        let mut out = [0u8; GLYPH_WIDTH];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = buffer.column(x + i as u16, page).unwrap();
        }
        out
    }

    fn glyph(byte: u8) -> [u8; GLYPH_WIDTH] {
        *glyph_columns(byte).unwrap()
    }

    #[test]
    fn test_render_places_consecutive_glyphs() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        let consumed = layout.render(&mut buffer, b"HI").unwrap();

        assert_eq!(consumed, 2);
        assert_eq!(glyph_at(&buffer, 0, 0), glyph(b'H'));
        assert_eq!(glyph_at(&buffer, 6, 0), glyph(b'I'));
        // Inter-glyph gap stays blank
        assert_eq!(buffer.column(5, 0), Some(0));
        assert_eq!(layout.cursor(), Cursor { x: 12, page: 0 });
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        layout.render(&mut buffer, b"WWWW\nWWWW").unwrap();
        layout.render(&mut buffer, b"i").unwrap();

        assert_eq!(glyph_at(&buffer, 0, 0), glyph(b'i'));
        assert_eq!(glyph_at(&buffer, 6, 0), [0; GLYPH_WIDTH]);
        assert_eq!(glyph_at(&buffer, 0, 1), [0; GLYPH_WIDTH]);
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        layout.render(&mut buffer, b"Hello,\nworld").unwrap();
        let first = buffer.pixels().to_vec();
        layout.render(&mut buffer, b"Hello,\nworld").unwrap();

        assert_eq!(buffer.pixels(), first.as_slice());
    }

    #[test]
    fn test_line_wraps_after_twenty_one_characters() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        layout.render(&mut buffer, &[b'A'; 21]).unwrap();
        assert_eq!(layout.cursor(), Cursor { x: 126, page: 0 });
        assert_eq!(glyph_at(&buffer, 120, 0), glyph(b'A'));

        layout.render(&mut buffer, &[b'A'; 22]).unwrap();
        assert_eq!(layout.cursor(), Cursor { x: 6, page: 1 });
        assert_eq!(glyph_at(&buffer, 0, 1), glyph(b'A'));

        layout.render(&mut buffer, &[b'A'; 43]).unwrap();
        assert_eq!(layout.cursor(), Cursor { x: 6, page: 2 });
    }

    #[test]
    fn test_newline_moves_to_next_page() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        layout.render(&mut buffer, b"\nA").unwrap();

        assert_eq!(glyph_at(&buffer, 0, 0), [0; GLYPH_WIDTH]);
        assert_eq!(glyph_at(&buffer, 0, 1), glyph(b'A'));
    }

    #[test]
    fn test_space_after_line_break_is_dropped() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        layout.render(&mut buffer, b"\n A").unwrap();

        assert_eq!(glyph_at(&buffer, 0, 1), glyph(b'A'));
        assert_eq!(layout.cursor(), Cursor { x: 6, page: 1 });
    }

    #[test]
    fn test_space_after_wrap_is_dropped() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        let mut text = [b'A'; 23];
        text[21] = b' ';
        layout.render(&mut buffer, &text).unwrap();

        assert_eq!(glyph_at(&buffer, 0, 1), glyph(b'A'));
    }

    #[test]
    fn test_space_mid_line_advances() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        layout.render(&mut buffer, b"A B").unwrap();

        assert_eq!(glyph_at(&buffer, 12, 0), glyph(b'B'));
    }

    #[test]
    fn test_control_bytes_are_skipped() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        let consumed = layout.render(&mut buffer, b"A\x01\t\x7fB\r").unwrap();

        assert_eq!(consumed, 6);
        assert_eq!(glyph_at(&buffer, 6, 0), glyph(b'B'));
        assert_eq!(layout.cursor(), Cursor { x: 12, page: 0 });
    }

    #[test]
    fn test_four_lines_fit() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        let result = layout.render(&mut buffer, b"one\ntwo\nthree\nfour\n");

        assert_eq!(result, Ok(19));
        assert_eq!(glyph_at(&buffer, 0, 3), glyph(b'f'));
    }

    #[test]
    fn test_fifth_line_is_out_of_bounds() {
        let mut buffer = FrameBuffer::new();
        let mut layout = TextLayout::new();

        let result = layout.render(&mut buffer, b"1\n2\n3\n4\n5");

        assert_eq!(result, Err(BufferError::OutOfBounds { x: 0, page: 4 }));
        assert!(buffer.pixels().iter().all(|b| *b == 0));
        assert_eq!(layout.cursor(), Cursor::default());
    }

    #[test]
    fn test_narrow_buffer_wraps_earlier() {
        let dims = crate::config::Dimensions::new(32, 16).unwrap();
        let mut buffer = FrameBuffer::try_new(dims, alloc::vec![0u8; dims.buffer_size()]).unwrap();
        let mut layout = TextLayout::new();

        // Columns 0..=24 are below 32 - 6, so five glyphs fit per line
        layout.render(&mut buffer, b"abcdefg").unwrap();

        assert_eq!(layout.cursor(), Cursor { x: 12, page: 1 });
    }
}
