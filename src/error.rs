//! Driver error type

use crate::registers::OperationMode;

/// Errors reported by the RC-S730 driver.
///
/// `E` is the error type of the underlying [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport kept failing until the retry limit was reached
    Bus(E),
    /// A page write or sequential read was asked to move more bytes than the
    /// 256-byte staging buffer allows. Nothing was sent on the bus.
    PayloadTooLong(usize),
    /// The value does not name an operation mode
    InvalidMode(u8),
    /// The operation mode is valid but not accepted by the requested operation
    UnsupportedMode(OperationMode),
    /// The slave address does not fit in 7 bits
    InvalidAddress(u8),
    /// A register payload could not be decoded
    Deserialization,
}

/// Error type for invalid operation mode values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidOperationMode(pub u8);

impl<E> From<InvalidOperationMode> for Error<E> {
    fn from(err: InvalidOperationMode) -> Self {
        Error::InvalidMode(err.0)
    }
}
