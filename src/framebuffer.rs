//! Page-addressed pixel buffer
//!
//! The buffer mirrors the controller's RAM layout: one byte per column per
//! page, bit `n` being row `n` of that page. Byte 0 is reserved for the
//! header of the bulk transfer so the whole buffer goes out in one write
//! without copying.
//!
//! ```text
//! [header][page 0: col 0 .. col W-1][page 1: ...]...[page P-1: ...]
//! ```

use crate::config::{Dimensions, PAGE_HEIGHT};
use crate::error::BufferError;
use crate::glyph::GLYPH_WIDTH;

/// Buffer length for the default 128x32 panel
pub const DEFAULT_BUFFER_LEN: usize = 1 + 128 * 4;

type BufferResult = core::result::Result<(), BufferError>;

/// Pixel buffer with a reserved header byte
///
/// Generic over its storage so it can live in a static array, on the stack,
/// or in a `Vec`. The default storage fits a 128x32 panel.
#[derive(Clone, Debug)]
pub struct FrameBuffer<B = [u8; DEFAULT_BUFFER_LEN]> {
    dimensions: Dimensions,
    storage: B,
}

impl FrameBuffer {
    /// Zeroed buffer for the default 128x32 panel
    pub fn new() -> Self {
        Self {
            dimensions: Dimensions::DEFAULT,
            storage: [0; DEFAULT_BUFFER_LEN],
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap caller-provided storage
    ///
    /// # Errors
    ///
    /// Returns `BufferError::BufferTooSmall` if `storage` is shorter than
    /// `dimensions.buffer_size()`. Extra bytes are ignored.
    pub fn try_new(dimensions: Dimensions, storage: B) -> Result<Self, BufferError> {
        let required = dimensions.buffer_size();
        let provided = storage.as_ref().len();
        if provided < required {
            return Err(BufferError::BufferTooSmall { required, provided });
        }
        Ok(Self {
            dimensions,
            storage,
        })
    }

    /// Geometry the buffer was created for
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Zero every pixel byte; the header byte is left as is
    pub fn clear(&mut self) {
        self.pixels_mut().fill(0);
    }

    /// Copy a glyph's columns to `(x, page)`
    ///
    /// Overwrites whatever was there.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfBounds` if the glyph does not fit entirely
    /// inside the display. Nothing is written in that case.
    pub fn write_glyph(&mut self, x: u16, page: u16, columns: &[u8; GLYPH_WIDTH]) -> BufferResult {
        if x as usize + GLYPH_WIDTH > self.dimensions.width as usize
            || page >= self.dimensions.pages()
        {
            return Err(BufferError::OutOfBounds { x, page });
        }
        let start = self.offset(x, page);
        self.storage.as_mut()[start..start + GLYPH_WIDTH].copy_from_slice(columns);
        Ok(())
    }

    /// Column byte at `(x, page)`, or `None` outside the display
    pub fn column(&self, x: u16, page: u16) -> Option<u8> {
        if x >= self.dimensions.width || page >= self.dimensions.pages() {
            return None;
        }
        self.storage.as_ref().get(self.offset(x, page)).copied()
    }

    /// Set or clear a single pixel
    ///
    /// Returns `false` and leaves the buffer untouched when `(x, y)` lies
    /// outside the display.
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) -> bool {
        if x >= u32::from(self.dimensions.width) || y >= u32::from(self.dimensions.height) {
            return false;
        }
        let page = (y / u32::from(PAGE_HEIGHT)) as u16;
        let bit = 1u8 << (y % u32::from(PAGE_HEIGHT));
        let index = self.offset(x as u16, page);
        let byte = &mut self.storage.as_mut()[index];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
        true
    }

    /// Current header byte
    pub fn header(&self) -> u8 {
        self.storage.as_ref()[0]
    }

    /// Pixel data without the header byte
    pub fn pixels(&self) -> &[u8] {
        &self.storage.as_ref()[1..self.dimensions.buffer_size()]
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        let end = self.dimensions.buffer_size();
        &mut self.storage.as_mut()[1..end]
    }

    /// Commit the header byte sent ahead of the pixel data
    pub fn set_header(&mut self, header: u8) {
        self.storage.as_mut()[0] = header;
    }

    /// The complete transfer: the stored header followed by every pixel byte
    ///
    /// A read-only view of `dimensions.buffer_size()` bytes. Use
    /// [`set_header`](Self::set_header) to choose the header first.
    pub fn as_wire_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[..self.dimensions.buffer_size()]
    }

    /// Unwrap the backing storage
    pub fn into_storage(self) -> B {
        self.storage
    }

    fn offset(&self, x: u16, page: u16) -> usize {
        1 + x as usize + self.dimensions.width as usize * page as usize
    }
}
