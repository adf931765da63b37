//! RC-S730 Device Interface
//!
//! This module provides the register-level interface to the RC-S730 over a
//! [`Transport`]. Every access is a fresh bus transaction; the driver keeps no
//! shadow copy of any register.
//!
//! The interface is built around the `Device<T, H>` struct which owns the
//! transport, the current slave address and the registered
//! [`FrameHandler`], and provides methods for:
//! - Raw page writes and sequential reads of the 16-bit address space
//! - Reading and writing 32-bit registers, including masked read-modify-write
//! - Typed register access through `regiface` register definitions
//!
//! # Wire format
//! Every transaction starts with the 2-byte big-endian memory address.
//! Register payloads are 4 bytes, little-endian.
//!
//! # Example
//! ```no_run
//! use rcs730::{Device, I2cTransport, InterruptStatus};
//!
//! fn pending<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<u32, rcs730::Error<I2C::Error>> {
//!     let mut device = Device::new(I2cTransport::new(i2c));
//!     let status: InterruptStatus = device.read_register()?;
//!     Ok(status.flags.bits())
//! }
//! ```

use core::convert::Infallible;

use regiface::{ByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::error::Error;
use crate::handler::{FrameHandler, NoHandler};
use crate::transport::{with_retry, SlaveAddress, Stop, Transport};

/// Length of the memory address header that starts every transaction
pub const ADDRESS_HEADER_LEN: usize = 2;

/// Size of the staging buffer used for page writes
const STAGING_LEN: usize = 256;

/// Longest payload accepted by [`Device::page_write`]
pub const MAX_PAGE_WRITE_LEN: usize = STAGING_LEN - ADDRESS_HEADER_LEN;

/// Longest read accepted by [`Device::sequential_read`]
pub const MAX_SEQUENTIAL_READ_LEN: usize = 255;

/// Main device interface for the RC-S730.
///
/// The device assumes it is the only user of the bus. If other peripherals
/// share it, the integrator has to serialize access.
pub struct Device<T, H = NoHandler> {
    pub(crate) transport: T,
    pub(crate) address: SlaveAddress,
    pub(crate) handler: H,
}

impl<T> Device<T> {
    /// Creates a new Device talking to the chip at its default address
    /// (0x40), with no handler registered.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            address: SlaveAddress::default(),
            handler: NoHandler,
        }
    }
}

impl<T, H> Device<T, H> {
    /// Registers a handler of a different type, replacing the current one.
    pub fn with_handler<N: FrameHandler>(self, handler: N) -> Device<T, N> {
        Device {
            transport: self.transport,
            address: self.address,
            handler,
        }
    }

    /// Replaces the registered handler. The last registration wins.
    pub fn set_handler(&mut self, handler: H) {
        self.handler = handler;
    }

    /// The registered handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The registered handler, mutably
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Slave address the driver currently talks to
    pub fn slave_address(&self) -> SlaveAddress {
        self.address
    }

    /// Releases the underlying transport.
    ///
    /// This method consumes the Device instance and returns the wrapped transport.
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T, H> Device<T, H>
where
    T: Transport,
{
    /// Writes `data` to the chip starting at `address`.
    ///
    /// The header and payload go out as one transaction, retried as a whole.
    ///
    /// # Errors
    /// * `Error::PayloadTooLong` - `data` is longer than 254 bytes; nothing is sent
    /// * `Error::Bus` - every attempt failed
    pub fn page_write(&mut self, address: u16, data: &[u8]) -> Result<(), Error<T::Error>> {
        if data.len() > MAX_PAGE_WRITE_LEN {
            return Err(Error::PayloadTooLong(data.len()));
        }

        let len = ADDRESS_HEADER_LEN + data.len();
        let mut staging = [0u8; STAGING_LEN];
        staging[..ADDRESS_HEADER_LEN].copy_from_slice(&address.to_be_bytes());
        staging[ADDRESS_HEADER_LEN..len].copy_from_slice(data);

        #[cfg(feature = "defmt")]
        defmt::trace!("page write {=u16:#06x}: {=[u8]:02x}", address, data);

        let bus_address = self.address.write_address();
        let transport = &mut self.transport;
        with_retry(|| transport.transfer(bus_address, &mut staging[..len], Stop::Issue))
            .map_err(Error::Bus)
    }

    /// Reads `buffer.len()` bytes from the chip starting at `address`.
    ///
    /// The address header is written without releasing the bus, then the data
    /// is read. The read is only issued once the header went through. A failed
    /// attempt re-issues both, since the read alone would not re-latch the
    /// memory address.
    ///
    /// # Errors
    /// * `Error::PayloadTooLong` - `buffer` is longer than 255 bytes; nothing is sent
    /// * `Error::Bus` - every attempt failed
    pub fn sequential_read(&mut self, address: u16, buffer: &mut [u8]) -> Result<(), Error<T::Error>> {
        if buffer.len() > MAX_SEQUENTIAL_READ_LEN {
            return Err(Error::PayloadTooLong(buffer.len()));
        }

        let slave = self.address;
        let transport = &mut self.transport;
        with_retry(|| {
            let mut header = address.to_be_bytes();
            transport.transfer(slave.write_address(), &mut header, Stop::Hold)?;
            transport.transfer(slave.read_address(), &mut *buffer, Stop::Issue)
        })
        .map_err(Error::Bus)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("sequential read {=u16:#06x}: {=[u8]:02x}", address, &buffer[..]);

        Ok(())
    }

    /// Reads the 32-bit register at `address`.
    pub fn read_register_at(&mut self, address: u16) -> Result<u32, Error<T::Error>> {
        let mut raw = [0u8; 4];
        self.sequential_read(address, &mut raw)?;
        Ok(u32::from_le_bytes(raw))
    }

    /// Writes `value` to the 32-bit register at `address`, whatever it
    /// currently holds.
    pub fn write_register_forced(&mut self, address: u16, value: u32) -> Result<(), Error<T::Error>> {
        self.page_write(address, &value.to_le_bytes())
    }

    /// Read-modify-write of the 32-bit register at `address`.
    ///
    /// The new value is `value | (current & !mask)`. It is only written when
    /// it differs from the current one, which spares the chip's non-volatile
    /// memory a redundant write.
    ///
    /// # Errors
    /// * `Error::Bus` - the read failed (nothing is written) or the write failed
    pub fn write_register_masked(
        &mut self,
        address: u16,
        value: u32,
        mask: u32,
    ) -> Result<(), Error<T::Error>> {
        let current = self.read_register_at(address)?;
        let new = value | (current & !mask);

        if new == current {
            #[cfg(feature = "defmt")]
            defmt::trace!("register {=u16:#06x} already {=u32:#010x}", address, current);
            return Ok(());
        }

        self.write_register_forced(address, new)
    }

    /// Reads a register value from the device.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u16 ID
    ///
    /// # Errors
    /// * `Error::Bus` - I2C communication failed
    /// * `Error::Deserialization` - Failed to parse register value
    pub fn read_register<R>(&mut self) -> Result<R, Error<T::Error>>
    where
        R: ReadableRegister<IdType = u16>,
    {
        let mut raw_value = R::Array::new();
        self.sequential_read(R::id(), raw_value.as_mut())?;

        R::from_bytes(raw_value).map_err(|_| Error::Deserialization)
    }

    /// Writes a value to a device register, whatever it currently holds.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing WritableRegister with u16 ID
    pub fn write_register<R>(&mut self, register: R) -> Result<(), Error<T::Error>>
    where
        R: WritableRegister<IdType = u16, Error = Infallible>,
    {
        let raw_value = infallible(register.to_bytes());
        self.page_write(R::id(), raw_value.as_ref())
    }

    /// Masked write of a 32-bit register.
    ///
    /// Only the bits in `mask` are taken from `register`; see
    /// [`write_register_masked`](Device::write_register_masked).
    pub fn modify_register<R>(&mut self, register: R, mask: u32) -> Result<(), Error<T::Error>>
    where
        R: WritableRegister<IdType = u16> + ToByteArray<Error = Infallible, Array = [u8; 4]>,
    {
        let value = u32::from_le_bytes(infallible(register.to_bytes()));
        self.write_register_masked(R::id(), value, mask)
    }
}

fn infallible<V>(result: Result<V, Infallible>) -> V {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
