//! Forwarding RF commands to a wireless peer
//!
//! [`LinkBridge`] is a ready-made [`FrameHandler`] for the common setup where
//! the emulated card is backed by a peer on some wireless link. The link
//! itself (stack bring-up, advertising, characteristics) stays with the
//! application; the bridge only needs the [`Link`] view of it.
//!
//! Read commands are forwarded to the peer and answered with the blocks it
//! supplies. Write commands are forwarded and acknowledged. While no peer is
//! connected every command is answered with a memory error, so the reader on
//! the RF side always gets a well-formed response.

use crate::felica::{self, status, CommandCode, Request};
use crate::frame::Frame;
use crate::handler::FrameHandler;

/// The wireless peer as seen by the bridge
pub trait Link {
    /// Whether a peer is connected
    fn is_connected(&self) -> bool;

    /// Passes a received command frame to the peer.
    fn forward(&mut self, frame: &[u8]);

    /// Fills `data` with the blocks requested by `request`.
    ///
    /// `data` holds 16 bytes per requested block. Returning `false` answers
    /// the command with a memory error.
    fn read_blocks(&mut self, request: &Frame, data: &mut [u8]) -> bool;
}

/// [`FrameHandler`] that serves FeliCa commands through a [`Link`]
#[derive(Debug, Default)]
pub struct LinkBridge<L> {
    link: L,
}

impl<L> LinkBridge<L> {
    /// Creates a bridge over `link`.
    pub fn new(link: L) -> Self {
        Self { link }
    }

    /// The wrapped link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// The wrapped link, mutably
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Releases the wrapped link.
    pub fn release(self) -> L {
        self.link
    }
}

impl<L: Link> FrameHandler for LinkBridge<L> {
    fn read_without_encryption(&mut self, frame: &mut Frame) -> bool {
        const CODE: CommandCode = CommandCode::ReadWithoutEncryption;

        if !self.link.is_connected() {
            felica::respond_error(frame, CODE, status::MEMORY_ERROR);
            return true;
        }

        let request = match Request::parse(frame) {
            Ok(request) => request,
            Err(err) => {
                felica::respond_error(frame, CODE, err.status_code());
                return true;
            }
        };

        // The response overwrites the block list, keep the command around
        let received = frame.clone();
        self.link.forward(received.as_bytes());

        let Some(data) = felica::respond_read(frame, request.block_count()) else {
            felica::respond_error(frame, CODE, status::ILLEGAL_BLOCK_COUNT);
            return true;
        };
        if !self.link.read_blocks(&received, data) {
            felica::respond_error(frame, CODE, status::MEMORY_ERROR);
        }

        true
    }

    fn write_without_encryption(&mut self, frame: &mut Frame) -> bool {
        const CODE: CommandCode = CommandCode::WriteWithoutEncryption;

        if !self.link.is_connected() {
            felica::respond_error(frame, CODE, status::MEMORY_ERROR);
            return true;
        }

        if let Err(err) = Request::parse(frame) {
            felica::respond_error(frame, CODE, err.status_code());
            return true;
        }

        self.link.forward(frame.as_bytes());
        felica::respond_write(frame);

        true
    }
}
