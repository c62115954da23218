//! Frame buffer for bytes collected between silence gaps.
//!
//! Observed frames are around 10 bytes long. The buffer is sized well above
//! that so a misconfigured gap or a chattering line shows up as a typed
//! overflow instead of a corrupted buffer.

use core::ops::Deref;

use heapless::Vec;

/// Maximum number of bytes a single frame can hold
pub const FRAME_CAPACITY: usize = 256;

/// Errors that can occur while filling a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame is already at capacity; the byte was not stored
    BufferOverflow,
}

/// A run of bytes bounded by silence gaps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: Vec<u8, FRAME_CAPACITY>,
}

impl Frame {
    /// Create an empty frame
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create a frame from a byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FrameError> {
        let mut frame = Self::new();
        frame
            .bytes
            .extend_from_slice(bytes)
            .map_err(|_| FrameError::BufferOverflow)?;
        Ok(frame)
    }

    /// Append a byte to the frame
    pub fn push(&mut self, byte: u8) -> Result<(), FrameError> {
        self.bytes.push(byte).map_err(|_| FrameError::BufferOverflow)
    }

    /// Remove all bytes
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Returns true if no more bytes fit
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// Frame contents
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
