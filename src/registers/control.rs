//! Mode and control registers
//!
//! Registers that select how the chip behaves on the RF side and how it is
//! reached on the host side. Operation mode, slave address and plug
//! configuration are persisted in the chip's non-volatile memory, so writes
//! to them should only happen when the value actually changes.

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::error::InvalidOperationMode;

/// Operation mode of the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Lite-S host-through mode
    LiteSHostThrough = 0x00,
    /// Plug mode
    Plug = 0x01,
    /// NFC-DEP mode
    NfcDep = 0x02,
    /// Lite-S mode
    LiteS = 0x03,
}

impl OperationMode {
    /// Whether RF commands for host-through blocks are handed to the host
    /// in this mode.
    pub const fn is_felica_through(self) -> bool {
        matches!(self, Self::LiteSHostThrough | Self::Plug)
    }
}

impl TryFrom<u8> for OperationMode {
    type Error = InvalidOperationMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::LiteSHostThrough),
            0x01 => Ok(Self::Plug),
            0x02 => Ok(Self::NfcDep),
            0x03 => Ok(Self::LiteS),
            invalid => Err(InvalidOperationMode(invalid)),
        }
    }
}

impl From<OperationMode> for u8 {
    fn from(mode: OperationMode) -> Self {
        mode as u8
    }
}

/// Operation Mode register (address: 0x0B00)
///
/// # Important Notes
/// - Stored in non-volatile memory
/// - Changing the mode raises [`Interrupts::MODE_CHANGED`](super::Interrupts::MODE_CHANGED)
#[register(0x0B00u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperationModeRegister {
    /// Current operation mode
    pub mode: OperationMode,
}

impl FromByteArray for OperationModeRegister {
    type Error = InvalidOperationMode;
    type Array = [u8; 4];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        let raw = u32::from_le_bytes(bytes);
        let value = u8::try_from(raw).map_err(|_| InvalidOperationMode(bytes[0]))?;
        Ok(Self {
            mode: OperationMode::try_from(value)?,
        })
    }
}

impl ToByteArray for OperationModeRegister {
    type Error = Infallible;
    type Array = [u8; 4];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(u32::from(self.mode as u8).to_le_bytes())
    }
}

/// Tag TX Control register (address: 0x0B04)
///
/// Setting `rf_send_enable` tells the RF engine that a response frame has
/// been staged in the RF communication buffer and may be transmitted.
#[register(0x0B04u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TagTxControl {
    /// Release the staged response to the RF side
    pub rf_send_enable: bool,
}

impl FromByteArray for TagTxControl {
    type Error = Infallible;
    type Array = [u8; 4];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            rf_send_enable: bytes[0] & 0x01 != 0,
        })
    }
}

impl ToByteArray for TagTxControl {
    type Error = Infallible;
    type Array = [u8; 4];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(u32::from(self.rf_send_enable).to_le_bytes())
    }
}

/// RF Status register (address: 0x0B0C)
///
/// Read-only view of the RF engine state. The bit layout is kept raw.
#[register(0x0B0Cu16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RfStatus {
    /// Raw register value
    pub value: u32,
}

impl FromByteArray for RfStatus {
    type Error = Infallible;
    type Array = [u8; 4];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            value: u32::from_le_bytes(bytes),
        })
    }
}

/// I2C Slave Address register (address: 0x0B10)
///
/// # Important Notes
/// - Holds the 7-bit address
/// - Stored in non-volatile memory; default 0x40
/// - Takes effect immediately: the chip stops answering on the old address
#[register(0x0B10u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cSlaveAddress {
    /// 7-bit slave address
    pub address: u8,
}

impl FromByteArray for I2cSlaveAddress {
    type Error = Infallible;
    type Array = [u8; 4];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            address: bytes[0] & 0x7F,
        })
    }
}

impl ToByteArray for I2cSlaveAddress {
    type Error = Infallible;
    type Array = [u8; 4];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(u32::from(self.address).to_le_bytes())
    }
}

/// Initialize Control register (address: 0x0B38)
///
/// Writing [`InitControl::INITIALIZE`] sends the chip into its initialize
/// sequence. There is nothing to read back.
#[register(0x0B38u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitControl {
    /// Raw control value
    pub value: u32,
}

impl InitControl {
    /// Value that starts the initialize sequence
    pub const INITIALIZE: Self = Self { value: 0x0000_004A };
}

impl ToByteArray for InitControl {
    type Error = Infallible;
    type Array = [u8; 4];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.value.to_le_bytes())
    }
}

/// System code answered in plug mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlugSystemCode {
    /// System code 0xFEE1
    #[default]
    Feel = 0,
    /// System code 0x12FC (NDEF)
    Ndef = 2,
}

/// Plug Configuration 1 register (address: 0x0B80)
///
/// Only the system code selection (bit 1) is modelled. Use
/// [`PlugConfiguration1::SYSTEM_CODE_MASK`] with a masked write to leave the
/// other bits untouched.
#[register(0x0B80u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlugConfiguration1 {
    /// System code answered to polling in plug mode
    pub system_code: PlugSystemCode,
}

impl PlugConfiguration1 {
    /// Bits owned by the system code field
    pub const SYSTEM_CODE_MASK: u32 = 0x0000_0002;
}

impl FromByteArray for PlugConfiguration1 {
    type Error = Infallible;
    type Array = [u8; 4];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        let system_code = if u32::from_le_bytes(bytes) & Self::SYSTEM_CODE_MASK != 0 {
            PlugSystemCode::Ndef
        } else {
            PlugSystemCode::Feel
        };
        Ok(Self { system_code })
    }
}

impl ToByteArray for PlugConfiguration1 {
    type Error = Infallible;
    type Array = [u8; 4];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok((self.system_code as u32).to_le_bytes())
    }
}
