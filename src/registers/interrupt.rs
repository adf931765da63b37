//! Interrupt registers
//!
//! The RC-S730 signals events on its IRQ pin. Four registers share the same
//! bit layout ([`Interrupts`]):
//!
//! - Interrupt Mask: a set bit keeps the event off the IRQ pin
//! - Interrupt Raw Status: events regardless of the mask
//! - Interrupt Status: unmasked events; sticky until cleared
//! - Interrupt Clear: writing a set bit clears that event
//!
//! The mask is stored in non-volatile memory on the chip.

use bitflags::bitflags;
use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

bitflags! {
    /// Interrupt sources
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Interrupts: u32 {
        /// Operation mode changed
        const MODE_CHANGED = 0x8000_0000;
        /// [R/W] RX error
        const RW_RX_ERROR = 0x0008_0000;
        /// [R/W] RX timeout
        const RW_RX_TIMEOUT = 0x0004_0000;
        /// [R/W] RX done
        const RW_RX_DONE = 0x0002_0000;
        /// [R/W] TX done
        const RW_TX_DONE = 0x0001_0000;
        /// [I2C] FeliCa command error
        const I2C_FELICA_CMD_ERROR = 0x0000_0200;
        /// [I2C] FeliCa command done
        const I2C_FELICA_CMD_DONE = 0x0000_0100;
        /// [tag/DEP] TX done
        const TAG_TX_DONE = 0x0000_0040;
        /// [DEP] D4 command RX done
        const TAG_NFC_DEP_RX_DONE = 0x0000_0020;
        /// [tag] Write w/o encryption RX done for a host-through block
        const TAG_RW_RX_DONE3 = 0x0000_0010;
        /// [tag] Read or write w/o encryption RX done for a host-through block
        const TAG_RW_RX_DONE2 = 0x0000_0008;
        /// [tag] Write w/o encryption RX done for a user block
        const TAG_RW_RX_DONE1 = 0x0000_0004;
        /// [tag] Polling RX done
        const TAG_PL_RX_DONE = 0x0000_0002;
        /// [tag] Read or write w/o encryption RX done
        const TAG_RX_DONE = 0x0000_0001;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Interrupts {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Interrupts {{ {=u32:#010x} }}", self.bits())
    }
}

macro_rules! interrupt_register {
    ($(#[$meta:meta])* $address:literal, $name:ident) => {
        $(#[$meta])*
        #[register($address)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ReadableRegister, WritableRegister)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            /// Interrupt bits; unknown bits are kept as read
            pub flags: Interrupts,
        }

        impl FromByteArray for $name {
            type Error = Infallible;
            type Array = [u8; 4];

            fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
                Ok(Self {
                    flags: Interrupts::from_bits_retain(u32::from_le_bytes(bytes)),
                })
            }
        }

        impl ToByteArray for $name {
            type Error = Infallible;
            type Array = [u8; 4];

            fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                Ok(self.flags.bits().to_le_bytes())
            }
        }
    };
}

interrupt_register!(
    /// Interrupt Mask register (address: 0x0B20)
    ///
    /// A set bit disables the corresponding interrupt on the IRQ pin.
    0x0B20u16,
    InterruptMask
);

interrupt_register!(
    /// Interrupt Raw Status register (address: 0x0B24)
    ///
    /// Reports events whether or not they are masked. Read-only.
    0x0B24u16,
    InterruptRawStatus
);

interrupt_register!(
    /// Interrupt Status register (address: 0x0B28)
    ///
    /// Reports unmasked events. Bits stay set until written to
    /// [`InterruptClear`]. Read-only.
    0x0B28u16,
    InterruptStatus
);

interrupt_register!(
    /// Interrupt Clear register (address: 0x0B2C)
    ///
    /// Writing a set bit clears the event in [`InterruptStatus`]. Write-only.
    0x0B2Cu16,
    InterruptClear
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_little_endian() {
        let status = InterruptStatus::from_bytes([0x08, 0x00, 0x01, 0x80]).unwrap();
        assert_eq!(
            status.flags,
            Interrupts::TAG_RW_RX_DONE2 | Interrupts::RW_TX_DONE | Interrupts::MODE_CHANGED
        );
    }

    #[test]
    fn clear_keeps_unknown_bits() {
        let clear = InterruptClear {
            flags: Interrupts::from_bits_retain(0x0000_0480),
        };
        assert_eq!(clear.to_bytes().unwrap(), [0x80, 0x04, 0x00, 0x00]);
    }

    #[test]
    fn all_known_bits() {
        assert_eq!(Interrupts::all().bits(), 0x800F_037F);
    }
}
