//! Core display operations

use crate::command::{Command, cursor_reset_sequence, power_sequence, power_toggle};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::interface::DisplayInterface;
use crate::layout::{Cursor, TextLayout};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Text-mode driver for an SSD1306 panel
///
/// Owns the transport, the frame buffer, the text cursor and the power flag.
/// Every operation takes `&mut self`, so one render or toggle runs at a time;
/// wrap the whole `Display` in a mutex to share it between threads.
///
/// ## Lifecycle
///
/// 1. [`Display::new()`] - no bus traffic.
/// 2. [`Display::init()`] - sends the power-up sequence. The panel stays asleep.
/// 3. [`Display::set_power()`], [`Display::render_text()`], [`Display::flush()`].
/// 4. [`Display::release()`] - hands the transport back.
pub struct Display<I, B = [u8; crate::framebuffer::DEFAULT_BUFFER_LEN]>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Pixel buffer sent on flush
    buffer: FrameBuffer<B>,
    /// Text cursor
    layout: TextLayout,
    /// Whether the panel is awake
    is_display_on: bool,
    /// Whether the power-up sequence has been sent
    initialized: bool,
}

impl<I, B> Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new Display instance
    ///
    /// No bus traffic is generated. The buffer is re-wrapped for the
    /// configured dimensions.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidConfig` if `config` fails [`Config::validate`].
    /// - `Error::BufferTooSmall` if the buffer cannot hold
    ///   `config.dimensions.buffer_size()` bytes.
    pub fn new(interface: I, config: Config, buffer: FrameBuffer<B>) -> Result<Self, Error<I>> {
        config.validate()?;
        let buffer = if buffer.dimensions() == config.dimensions {
            buffer
        } else {
            FrameBuffer::try_new(config.dimensions, buffer.into_storage())?
        };
        Ok(Self {
            interface,
            config,
            buffer,
            layout: TextLayout::new(),
            is_display_on: false,
            initialized: false,
        })
    }

    /// Send the power-up sequence and clear the buffer
    ///
    /// The panel is left asleep; call [`set_power(true)`](Self::set_power)
    /// to show it. Calling `init` again re-sends the sequence, which also
    /// puts the panel back to sleep.
    pub fn init(&mut self) -> DisplayResult<I> {
        log::debug!("ssd1306: sending power-up sequence");
        for command in power_sequence(&self.config) {
            self.send_command(command)?;
        }
        self.is_display_on = false;
        self.buffer.clear();
        self.layout.reset();
        self.initialized = true;
        log::debug!(
            "ssd1306: ready ({}x{})",
            self.config.dimensions.width,
            self.config.dimensions.height
        );
        Ok(())
    }

    /// Wake (`true`) or sleep (`false`) the panel
    ///
    /// The power flag is updated before the command goes out, so it holds the
    /// requested state even if the bus write fails.
    pub fn set_power(&mut self, on: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.is_display_on = on;
        log::debug!("ssd1306: display {}", if on { "on" } else { "off" });
        self.send_command(power_toggle(on))
    }

    /// Whether the panel was last switched on
    pub fn is_on(&self) -> bool {
        self.is_display_on
    }

    /// Whether [`init`](Self::init) has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Replace the screen contents with `text` and flush it
    ///
    /// Returns the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// - `Error::OutOfBounds` if the text does not fit. Nothing is sent and
    ///   the buffer is left blank.
    /// - `Error::Interface` if a bus write fails.
    pub fn render_text(&mut self, text: &[u8]) -> Result<usize, Error<I>> {
        self.ensure_initialized()?;
        let consumed = self.layout.render(&mut self.buffer, text)?;
        self.flush()?;
        let cursor = self.layout.cursor();
        log::debug!(
            "ssd1306: rendered {} bytes, cursor at ({}, {})",
            consumed,
            cursor.x,
            cursor.page
        );
        Ok(consumed)
    }

    /// Send the frame buffer to the panel
    ///
    /// Points the RAM window at the origin, sends the buffer as one burst and
    /// resets the window again so the next burst starts from a known address.
    pub fn flush(&mut self) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.reset_cursor()?;
        self.buffer.set_header(self.config.data_header);
        let frame = self.buffer.as_wire_bytes();
        log::trace!("ssd1306: flushing {} bytes", frame.len());
        self.interface.transmit(frame).map_err(Error::Interface)?;
        self.reset_cursor()
    }

    /// Blank the buffer and the panel
    pub fn clear(&mut self) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.buffer.clear();
        self.layout.reset();
        self.flush()
    }

    /// Position of the text cursor after the last render
    pub fn cursor(&self) -> Cursor {
        self.layout.cursor()
    }

    /// Read access to the frame buffer
    pub fn frame_buffer(&self) -> &FrameBuffer<B> {
        &self.buffer
    }

    /// Write access to the frame buffer, for raw writes before a [`flush`](Self::flush)
    pub fn frame_buffer_mut(&mut self) -> &mut FrameBuffer<B> {
        &mut self.buffer
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tear down the driver and return the transport
    pub fn release(self) -> I {
        self.interface
    }

    fn reset_cursor(&mut self) -> DisplayResult<I> {
        for command in cursor_reset_sequence(self.config.dimensions) {
            self.send_command(command)?;
        }
        Ok(())
    }

    /// Send a command to the display controller
    fn send_command(&mut self, command: Command) -> DisplayResult<I> {
        self.interface
            .transmit(command.encode().as_bytes())
            .map_err(Error::Interface)
    }

    fn ensure_initialized(&self) -> DisplayResult<I> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::command::{AddressingMode, DATA_STREAM_HEADER, POWER_SEQUENCE_LEN};
    use crate::config::Builder;
    use crate::error::BuilderError;
    use crate::glyph::glyph_columns;
    use alloc::vec::Vec;

    #[derive(Debug, Default)]
    pub(crate) struct MockInterface {
        pub(crate) writes: Vec<Vec<u8>>,
        pub(crate) fail: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct MockError;

    impl DisplayInterface for MockInterface {
        type Error = MockError;

        fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.writes.push(bytes.to_vec());
            Ok(())
        }
    }

    pub(crate) fn test_display() -> Display<MockInterface> {
        let config = Builder::new().build().unwrap();
        let mut display = Display::new(MockInterface::default(), config, FrameBuffer::new()).unwrap();
        display.init().unwrap();
        display.interface.writes.clear();
        display
    }

    fn cursor_reset() -> [Vec<u8>; 2] {
        [
            alloc::vec![0x00, 0x22, 0x00, 0x03],
            alloc::vec![0x00, 0x21, 0x00, 0x7F],
        ]
    }

    #[test]
    fn test_init_sends_power_sequence_in_order() {
        let config = Builder::new().build().unwrap();
        let expected: Vec<Vec<u8>> = power_sequence(&config)
            .iter()
            .map(|cmd| cmd.encode().as_bytes().to_vec())
            .collect();
        let mut display = Display::new(MockInterface::default(), config, FrameBuffer::new()).unwrap();

        display.init().unwrap();

        assert!(display.is_initialized());
        assert!(!display.is_on());
        assert_eq!(display.interface.writes.len(), POWER_SEQUENCE_LEN);
        assert_eq!(display.interface.writes, expected);
    }

    #[test]
    fn test_operations_before_init_fail() {
        let config = Builder::new().build().unwrap();
        let mut display = Display::new(MockInterface::default(), config, FrameBuffer::new()).unwrap();

        assert!(matches!(display.set_power(true), Err(Error::NotInitialized)));
        assert!(matches!(display.render_text(b"A"), Err(Error::NotInitialized)));
        assert!(matches!(display.flush(), Err(Error::NotInitialized)));
        assert!(!display.is_on());
        assert!(display.release().writes.is_empty());
    }

    #[test]
    fn test_new_rejects_small_buffer() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .build()
            .unwrap();
        let result = Display::new(MockInterface::default(), config, FrameBuffer::new());
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 1025,
                provided: 513
            })
        ));
    }

    #[test]
    fn test_new_adopts_configured_dimensions() {
        let dims = Dimensions::new(128, 64).unwrap();
        let config = Builder::new().dimensions(dims).build().unwrap();
        let storage = FrameBuffer::try_new(Dimensions::DEFAULT, alloc::vec![0u8; 1025]).unwrap();

        let display = Display::new(MockInterface::default(), config, storage).unwrap();

        assert_eq!(display.frame_buffer().dimensions(), dims);
        assert_eq!(display.frame_buffer().pixels().len(), 1024);
    }

    #[test]
    fn test_set_power_sends_enable_opcode() {
        let mut display = test_display();

        display.set_power(true).unwrap();
        assert!(display.is_on());
        display.set_power(false).unwrap();
        assert!(!display.is_on());

        assert_eq!(
            display.interface.writes,
            alloc::vec![alloc::vec![0x00, 0xAF], alloc::vec![0x00, 0xAE]]
        );
    }

    #[test]
    fn test_render_hi_end_to_end() {
        let mut display = test_display();

        let consumed = display.render_text(b"HI").unwrap();
        assert_eq!(consumed, 2);

        let writes = &display.interface.writes;
        assert_eq!(writes.len(), 5);
        assert_eq!(writes[0..2], cursor_reset());
        assert_eq!(writes[3..5], cursor_reset());

        let frame = &writes[2];
        assert_eq!(frame.len(), 1 + 128 * 4);
        assert_eq!(frame[0], DATA_STREAM_HEADER);
        assert_eq!(&frame[1..6], glyph_columns(b'H').unwrap());
        assert_eq!(&frame[7..12], glyph_columns(b'I').unwrap());
        assert!(frame[12..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_render_twice_sends_identical_bytes() {
        let mut display = test_display();

        display.render_text(b"Current card is K.\nHigher or Lower?").unwrap();
        let first = core::mem::take(&mut display.interface.writes);
        display.render_text(b"Current card is K.\nHigher or Lower?").unwrap();

        assert_eq!(display.interface.writes, first);
    }

    #[test]
    fn test_render_overflow_sends_nothing() {
        let mut display = test_display();

        let result = display.render_text(b"a\nb\nc\nd\ne");

        assert!(matches!(result, Err(Error::OutOfBounds { x: 0, page: 4 })));
        assert!(display.interface.writes.is_empty());

        // A later flush must not carry the aborted text
        display.flush().unwrap();
        let frame = &display.interface.writes[2];
        assert!(frame[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_new_rejects_hand_edited_geometry() {
        for (width, height) in [(0, 0), (300, 32), (128, 12)] {
            let mut config = Builder::new().build().unwrap();
            config.dimensions = Dimensions { width, height };
            let result = Display::new(MockInterface::default(), config, FrameBuffer::new());
            assert!(matches!(
                result,
                Err(Error::InvalidConfig(BuilderError::InvalidDimensions { .. }))
            ));
        }
    }

    #[test]
    fn test_new_rejects_page_addressing() {
        let mut config = Builder::new().build().unwrap();
        config.addressing_mode = AddressingMode::Page;

        let result = Display::new(MockInterface::default(), config, FrameBuffer::new());

        assert!(matches!(
            result,
            Err(Error::InvalidConfig(BuilderError::UnsupportedAddressingMode(
                AddressingMode::Page
            )))
        ));
    }

    #[test]
    fn test_flush_commits_configured_header() {
        let mut display = test_display();
        assert_eq!(display.frame_buffer().header(), 0);

        display.flush().unwrap();

        assert_eq!(display.frame_buffer().header(), DATA_STREAM_HEADER);
        assert_eq!(display.interface.writes[2][0], DATA_STREAM_HEADER);
    }

    #[test]
    fn test_transport_failure_is_surfaced() {
        let mut display = test_display();
        display.interface.fail = true;

        assert!(matches!(
            display.render_text(b"A"),
            Err(Error::Interface(MockError))
        ));
        assert!(matches!(
            display.set_power(true),
            Err(Error::Interface(MockError))
        ));
    }

    #[test]
    fn test_custom_data_header() {
        let config = Builder::new()
            .data_header(crate::command::DATA)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::default(), config, FrameBuffer::new()).unwrap();
        display.init().unwrap();

        display.flush().unwrap();

        let frame = display.interface.writes.iter().find(|w| w.len() > 4).unwrap();
        assert_eq!(frame[0], 0x40);
    }

    #[test]
    fn test_clear_blanks_panel() {
        let mut display = test_display();
        display.render_text(b"XYZ").unwrap();
        display.interface.writes.clear();

        display.clear().unwrap();

        assert_eq!(display.cursor(), Cursor::default());
        let frame = &display.interface.writes[2];
        assert!(frame[1..].iter().all(|b| *b == 0));
    }
}
