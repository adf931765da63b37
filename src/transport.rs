//! Two-wire transport for the RC-S730
//!
//! The chip sits on an I2C bus behind a single (reconfigurable) slave address.
//! Every exchange with it is one of two shapes:
//!
//! - a write of a 2-byte big-endian memory address followed by payload,
//!   terminated by a stop condition
//! - a write of the 2-byte memory address that holds the bus (no stop),
//!   followed by a read that releases it
//!
//! The [`Transport`] trait captures exactly that contract so the driver can be
//! run against any bus implementation, including scripted ones in tests.
//! [`I2cTransport`] adapts any [`embedded_hal::i2c::I2c`] implementation.

use embedded_hal::i2c::I2c;

/// Default 7-bit slave address of the RC-S730
pub const DEFAULT_SLAVE_ADDRESS: u8 = 0x40;

/// Number of attempts made for a retried transaction before giving up
pub const RETRY_LIMIT: usize = 10;

/// Read/write bit of the 8-bit bus address
pub const READ_BIT: u8 = 0x01;

/// Bus condition at the end of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stop {
    /// Release the bus with a stop condition
    Issue,
    /// Keep the bus for a follow-on read (repeated start). Only used for the
    /// 2-byte memory address header of a sequential read.
    Hold,
}

/// Bus-level access to the chip.
///
/// `address` is the 8-bit form of the slave address: the 7-bit address shifted
/// left by one, with [`READ_BIT`] set for reads. For writes `buffer` holds the
/// bytes to send; for reads it is filled with the received bytes.
///
/// A transfer either completes fully or fails; callers retry from scratch. A
/// held write and the read that follows it are retried together, since an
/// implementation may only put the held write on the bus along with the read.
pub trait Transport {
    /// Error reported by the bus
    type Error;

    /// Performs a single addressed transfer.
    ///
    /// # Panics
    /// Implementations may panic when asked to hold a write longer than the
    /// 2-byte memory address header.
    fn transfer(&mut self, address: u8, buffer: &mut [u8], stop: Stop) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn transfer(&mut self, address: u8, buffer: &mut [u8], stop: Stop) -> Result<(), Self::Error> {
        T::transfer(self, address, buffer, stop)
    }
}

/// Slave address of the chip, stored in its 8-bit (shifted) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlaveAddress(u8);

impl SlaveAddress {
    /// Builds a slave address from its 7-bit form.
    ///
    /// Returns `None` if `address` does not fit in 7 bits.
    pub const fn new(address: u8) -> Option<Self> {
        if address > 0x7F {
            None
        } else {
            Some(Self(address << 1))
        }
    }

    /// The 7-bit address
    pub const fn seven_bit(self) -> u8 {
        self.0 >> 1
    }

    /// Bus address used for write transfers
    pub const fn write_address(self) -> u8 {
        self.0
    }

    /// Bus address used for read transfers
    pub const fn read_address(self) -> u8 {
        self.0 | READ_BIT
    }
}

impl Default for SlaveAddress {
    fn default() -> Self {
        Self(DEFAULT_SLAVE_ADDRESS << 1)
    }
}

/// Runs `attempt` until it succeeds or [`RETRY_LIMIT`] attempts have failed.
///
/// Each attempt re-issues the whole transaction from scratch. The error of the
/// last attempt is returned.
pub(crate) fn with_retry<E>(mut attempt: impl FnMut() -> Result<(), E>) -> Result<(), E> {
    let mut tries = 1;
    loop {
        match attempt() {
            Ok(()) => return Ok(()),
            Err(err) if tries >= RETRY_LIMIT => return Err(err),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("transfer failed, attempt {=usize}", tries);
                tries += 1;
            }
        }
    }
}

/// Longest write that can be held for a following read: the memory address
/// header
const HELD_CAPACITY: usize = 2;

/// [`Transport`] over an `embedded-hal` I2C bus.
///
/// `embedded-hal` cannot keep the bus between two calls, so a write issued
/// with [`Stop::Hold`] is kept back and sent together with the next read as a
/// single write-read (repeated start). Bus errors of the held write therefore
/// surface on that read.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    held: [u8; HELD_CAPACITY],
    held_len: Option<usize>,
}

impl<I2C> I2cTransport<I2C> {
    /// Wraps an I2C bus.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            held: [0; HELD_CAPACITY],
            held_len: None,
        }
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = I2C::Error;

    fn transfer(&mut self, address: u8, buffer: &mut [u8], stop: Stop) -> Result<(), Self::Error> {
        let target = address >> 1;

        if address & READ_BIT != 0 {
            return match self.held_len.take() {
                Some(len) => self.i2c.write_read(target, &self.held[..len], buffer),
                None => self.i2c.read(target, buffer),
            };
        }

        match stop {
            Stop::Hold => {
                assert!(
                    buffer.len() <= HELD_CAPACITY,
                    "only the memory address header can be held"
                );
                self.held[..buffer.len()].copy_from_slice(buffer);
                self.held_len = Some(buffer.len());
                Ok(())
            }
            Stop::Issue => {
                self.held_len = None;
                self.i2c.write(target, buffer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::Device;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use std::vec;

    #[test]
    fn slave_address_forms() {
        let address = SlaveAddress::default();
        assert_eq!(address.seven_bit(), 0x40);
        assert_eq!(address.write_address(), 0x80);
        assert_eq!(address.read_address(), 0x81);

        assert_eq!(SlaveAddress::new(0x7F).map(SlaveAddress::write_address), Some(0xFE));
        assert_eq!(SlaveAddress::new(0x80), None);
    }

    #[test]
    fn held_header_joins_following_read() {
        let expectations = [I2cTransaction::write_read(0x40, vec![0x0B, 0x28], vec![1, 2, 3, 4])];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = I2cTransport::new(i2c.clone());

        let mut header = [0x0B, 0x28];
        transport.transfer(0x80, &mut header, Stop::Hold).unwrap();
        let mut value = [0u8; 4];
        transport.transfer(0x81, &mut value, Stop::Issue).unwrap();

        assert_eq!(value, [1, 2, 3, 4]);
        i2c.done();
    }

    #[test]
    fn write_with_stop_goes_out_immediately() {
        let expectations = [
            I2cTransaction::write(0x40, vec![0x0B, 0x04, 0x01, 0x00, 0x00, 0x00]),
            I2cTransaction::read(0x40, vec![0xAA]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = I2cTransport::new(i2c.clone());

        let mut frame = [0x0B, 0x04, 0x01, 0x00, 0x00, 0x00];
        transport.transfer(0x80, &mut frame, Stop::Issue).unwrap();
        let mut byte = [0u8; 1];
        transport.transfer(0x81, &mut byte, Stop::Issue).unwrap();

        assert_eq!(byte, [0xAA]);
        i2c.done();
    }

    #[test]
    fn retry_gives_up_after_limit() {
        let expectations: std::vec::Vec<_> = (0..RETRY_LIMIT)
            .map(|_| I2cTransaction::write(0x40, vec![0x0B, 0x38]).with_error(ErrorKind::Other))
            .collect();
        let mut i2c = I2cMock::new(&expectations);
        let mut transport = I2cTransport::new(i2c.clone());

        let mut buffer = [0x0B, 0x38];
        let result = with_retry(|| transport.transfer(0x80, &mut buffer, Stop::Issue));

        assert_eq!(result, Err(ErrorKind::Other));
        i2c.done();
    }

    #[test]
    fn failed_write_read_replays_header() {
        let expectations = [
            I2cTransaction::write_read(0x40, vec![0x0B, 0x28], vec![0, 0, 0, 0])
                .with_error(ErrorKind::Other),
            I2cTransaction::write_read(0x40, vec![0x0B, 0x28], vec![8, 0, 0, 0]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = Device::new(I2cTransport::new(i2c.clone()));

        assert_eq!(device.read_register_at(0x0B28), Ok(8));
        i2c.done();
    }

    #[test]
    fn write_read_gives_up_after_limit() {
        let expectations: std::vec::Vec<_> = (0..RETRY_LIMIT)
            .map(|_| {
                I2cTransaction::write_read(0x40, vec![0x0C, 0x00], vec![0; 16])
                    .with_error(ErrorKind::Other)
            })
            .collect();
        let mut i2c = I2cMock::new(&expectations);
        let mut device = Device::new(I2cTransport::new(i2c.clone()));

        let mut buffer = [0u8; 16];
        assert_eq!(
            device.sequential_read(0x0C00, &mut buffer),
            Err(crate::Error::Bus(ErrorKind::Other))
        );
        i2c.done();
    }

    struct IdleBus;

    impl ErrorType for IdleBus {
        type Error = ErrorKind;
    }

    impl I2c for IdleBus {
        fn transaction(&mut self, _address: u8, _operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    #[test]
    #[should_panic(expected = "only the memory address header can be held")]
    fn holding_more_than_header_panics() {
        let mut transport = I2cTransport::new(IdleBus);
        let mut frame = [0x0B, 0x04, 0x01];
        let _ = transport.transfer(0x80, &mut frame, Stop::Hold);
    }
}
