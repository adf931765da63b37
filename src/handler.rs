//! Application hooks for received RF commands
//!
//! When the chip hands a host-through command to the host, the driver reads
//! the frame and calls the matching [`FrameHandler`] method. The handler may
//! rewrite the frame in place to build the response; returning `true` asks the
//! driver to send it back and re-arm the RF engine.
//!
//! Handlers run inside [`Device::service_interrupt`](crate::Device::service_interrupt),
//! so they must finish before the reader on the RF side times out.

use crate::frame::Frame;

/// Handlers for FeliCa commands received in host-through mode.
///
/// Both methods default to "not handled": nothing is sent back and the RF
/// engine stays stalled until its own timeout.
pub trait FrameHandler {
    /// Read Without Encryption (command code 0x06)
    ///
    /// If `true` is returned, byte 0 of `frame` must hold the response length.
    fn read_without_encryption(&mut self, frame: &mut Frame) -> bool {
        let _ = frame;
        false
    }

    /// Write Without Encryption (command code 0x08)
    ///
    /// If `true` is returned, byte 0 of `frame` must hold the response length.
    fn write_without_encryption(&mut self, frame: &mut Frame) -> bool {
        let _ = frame;
        false
    }
}

impl<H: FrameHandler + ?Sized> FrameHandler for &mut H {
    fn read_without_encryption(&mut self, frame: &mut Frame) -> bool {
        H::read_without_encryption(self, frame)
    }

    fn write_without_encryption(&mut self, frame: &mut Frame) -> bool {
        H::write_without_encryption(self, frame)
    }
}

/// Handler that ignores every command
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHandler;

impl FrameHandler for NoHandler {}
