//! RF frames
//!
//! Frames exchanged with the RF engine are length-prefixed:
//!
//! | byte | content                                  |
//! |------|------------------------------------------|
//! | 0    | total length, including this byte        |
//! | 1    | command (or response) code               |
//! | 2..  | payload                                  |
//!
//! [`Frame`] is the 256-byte working buffer the driver reads a frame into and
//! hands to the [`FrameHandler`](crate::FrameHandler). Handlers build their
//! response in place, and byte 0 decides how much of it is written back.

/// Physical size of the frame buffer
pub const FRAME_CAPACITY: usize = 256;

/// Bytes fetched by the first phase of an RF buffer read
pub const FIRST_READ_LEN: usize = 16;

/// An RF frame and the buffer that holds it.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buffer: [u8; FRAME_CAPACITY],
}

impl Frame {
    /// Creates an empty frame.
    pub const fn new() -> Self {
        Self {
            buffer: [0; FRAME_CAPACITY],
        }
    }

    /// Creates a frame holding a copy of `bytes`. Byte 0 is taken as is; the
    /// caller is responsible for it matching the frame's length.
    ///
    /// Returns `None` if `bytes` does not fit in [`FRAME_CAPACITY`].
    pub fn copy_from(bytes: &[u8]) -> Option<Self> {
        let mut frame = Self::new();
        frame.buffer.get_mut(..bytes.len())?.copy_from_slice(bytes);
        Some(frame)
    }

    /// Declared length of the frame (byte 0)
    pub fn len(&self) -> usize {
        usize::from(self.buffer[0])
    }

    /// Whether the declared length is zero
    pub fn is_empty(&self) -> bool {
        self.buffer[0] == 0
    }

    /// Overwrites the declared length.
    pub fn set_len(&mut self, len: u8) {
        self.buffer[0] = len;
    }

    /// Command or response code (byte 1)
    pub fn code(&self) -> u8 {
        self.buffer[1]
    }

    /// The frame as declared by its length byte
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len()]
    }

    /// Payload after the length and code bytes, as declared by the length byte
    pub fn payload(&self) -> &[u8] {
        let len = self.len().max(2);
        &self.buffer[2..len]
    }

    /// The whole buffer, regardless of the declared length
    pub fn buffer(&self) -> &[u8; FRAME_CAPACITY] {
        &self.buffer
    }

    /// The whole buffer for building a response in place
    pub fn buffer_mut(&mut self) -> &mut [u8; FRAME_CAPACITY] {
        &mut self.buffer
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("bytes", &self.as_bytes())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Frame {{ {=[u8]:02x} }}", self.as_bytes())
    }
}
