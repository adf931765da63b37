//! IRQ servicing
//!
//! [`Device::service_interrupt`] is the entry point for a falling edge on the
//! chip's IRQ pin. One call runs the whole exchange:
//!
//! 1. read the Interrupt Status register once
//! 2. if a host-through read/write command arrived, read the frame and hand
//!    it to the registered [`FrameHandler`]
//! 3. if the handler asked for it, stage the response and re-arm the RF engine
//! 4. clear exactly the status bits read in step 1
//!
//! Bits raised after step 1 stay pending and pull the IRQ line again, so no
//! event is lost. Other interrupt sources are acknowledged without any
//! further action.
//!
//! The call is synchronous and bounded: each transaction is retried at most
//! [`RETRY_LIMIT`](crate::RETRY_LIMIT) times. It must not be re-entered; run
//! it from a single interrupt context or serialize callers.

use crate::device::Device;
use crate::error::Error;
use crate::felica::{CommandCode, UnknownCommand};
use crate::frame::Frame;
use crate::handler::FrameHandler;
use crate::registers::{InterruptClear, InterruptStatus, Interrupts};
use crate::transport::Transport;

impl<T, H> Device<T, H>
where
    T: Transport,
    H: FrameHandler,
{
    /// Services one IRQ.
    ///
    /// Returns the interrupt bits that were serviced and cleared. Failures
    /// while reading the frame or writing the response are not reported: the
    /// status bits are cleared anyway and the reader on the RF side retries.
    ///
    /// # Errors
    /// * `Error::Bus` - the status could not be read (nothing was cleared), or
    ///   the clear write failed
    pub fn service_interrupt(&mut self) -> Result<Interrupts, Error<T::Error>> {
        let status: InterruptStatus = self.read_register()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("irq status {}", status.flags);

        if status.flags.contains(Interrupts::TAG_RW_RX_DONE2) {
            self.service_host_through();
        }

        self.write_register(InterruptClear {
            flags: status.flags,
        })?;

        Ok(status.flags)
    }

    fn service_host_through(&mut self) {
        let mut frame = Frame::new();

        let len = match self.read_rf_frame(&mut frame) {
            Ok(len) => len,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("rf frame read failed");
                return;
            }
        };
        if len == 0 {
            return;
        }

        let respond = match CommandCode::try_from(frame.code()) {
            Ok(CommandCode::ReadWithoutEncryption) => {
                self.handler.read_without_encryption(&mut frame)
            }
            Ok(CommandCode::WriteWithoutEncryption) => {
                self.handler.write_without_encryption(&mut frame)
            }
            Err(UnknownCommand(_code)) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("no handler for command {=u8:#04x}", _code);
                false
            }
        };

        if respond && self.write_rf_frame_and_rearm(&frame).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("rf response not sent");
        }
    }
}
