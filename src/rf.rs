//! RF communication buffer access
//!
//! Frames from the RF side land in the RF communication buffer (0x0C00).
//! Most frames are short, so the buffer is read in two phases: a fixed
//! 16-byte window that carries the length byte, then the remainder only if
//! the frame is longer than that.
//!
//! A response is staged in the same buffer and released to the RF engine by
//! setting the send-enable bit of the Tag TX Control register.

use crate::device::Device;
use crate::error::Error;
use crate::frame::{Frame, FIRST_READ_LEN};
use crate::registers::{map, TagTxControl};
use crate::transport::Transport;

impl<T, H> Device<T, H>
where
    T: Transport,
{
    /// Reads the frame waiting in the RF communication buffer into `frame`.
    ///
    /// Returns the frame length (byte 0). If the second phase fails the whole
    /// frame is reported as failed, never as a truncated one.
    pub fn read_rf_frame(&mut self, frame: &mut Frame) -> Result<usize, Error<T::Error>> {
        let buffer = frame.buffer_mut();
        self.sequential_read(map::buf::RF_COMM, &mut buffer[..FIRST_READ_LEN])?;

        let len = usize::from(buffer[0]);
        if len > FIRST_READ_LEN {
            self.sequential_read(
                map::buf::RF_COMM + FIRST_READ_LEN as u16,
                &mut buffer[FIRST_READ_LEN..len],
            )?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("rf frame in: {}", frame);

        Ok(len)
    }

    /// Stages `frame` in the RF communication buffer and re-arms the RF engine.
    ///
    /// The number of bytes written is taken from byte 0 of the frame. If the
    /// buffer write fails the RF engine is left stalled: the send-enable bit is
    /// only set after the response is in place.
    pub fn write_rf_frame_and_rearm(&mut self, frame: &Frame) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("rf frame out: {}", frame);

        self.page_write(map::buf::RF_COMM, frame.as_bytes())?;
        self.write_register(TagTxControl {
            rf_send_enable: true,
        })
    }
}
