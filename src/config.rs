//! Chip configuration
//!
//! Operation mode, slave address, interrupt mask and plug configuration are
//! stored in the chip's non-volatile memory. They are all changed through
//! masked writes, so calling these again with the same value costs one
//! register read and no write.

use crate::device::Device;
use crate::error::Error;
use crate::registers::{
    I2cSlaveAddress, InitControl, InterruptMask, InterruptRawStatus, InterruptStatus,
    Interrupts, OperationMode, OperationModeRegister, PlugConfiguration1, PlugSystemCode,
    RfStatus,
};
use crate::transport::{SlaveAddress, Transport};

/// Mask covering a whole 32-bit register
const FULL_MASK: u32 = 0xFFFF_FFFF;

impl<T, H> Device<T, H>
where
    T: Transport,
{
    /// Sets the operation mode.
    ///
    /// Raw mode values are validated by `OperationMode::try_from`, before
    /// anything reaches the bus.
    pub fn set_operation_mode(&mut self, mode: OperationMode) -> Result<(), Error<T::Error>> {
        self.modify_register(OperationModeRegister { mode }, FULL_MASK)
    }

    /// Reads the current operation mode.
    pub fn operation_mode(&mut self) -> Result<OperationMode, Error<T::Error>> {
        let register: OperationModeRegister = self.read_register()?;
        Ok(register.mode)
    }

    /// Moves the chip to a new 7-bit slave address.
    ///
    /// The driver only switches to the new address once the chip accepted
    /// it. On failure it keeps talking to the old one.
    ///
    /// # Errors
    /// * `Error::InvalidAddress` - `address` does not fit in 7 bits; nothing is sent
    /// * `Error::Bus` - the register update failed
    pub fn set_slave_address(&mut self, address: u8) -> Result<(), Error<T::Error>> {
        let new_address = SlaveAddress::new(address).ok_or(Error::InvalidAddress(address))?;

        self.modify_register(I2cSlaveAddress { address }, FULL_MASK)?;
        self.address = new_address;

        #[cfg(feature = "defmt")]
        defmt::debug!("slave address now {=u8:#04x}", address);

        Ok(())
    }

    /// Updates the interrupt mask bits selected by `mask` to `value`.
    ///
    /// A set bit in the mask register keeps that interrupt off the IRQ pin.
    pub fn set_interrupt_mask(
        &mut self,
        mask: Interrupts,
        value: Interrupts,
    ) -> Result<(), Error<T::Error>> {
        self.modify_register(InterruptMask { flags: value & mask }, mask.bits())
    }

    /// Selects the system code answered in plug mode.
    pub fn set_plug_system_code(&mut self, system_code: PlugSystemCode) -> Result<(), Error<T::Error>> {
        self.modify_register(
            PlugConfiguration1 { system_code },
            PlugConfiguration1::SYSTEM_CODE_MASK,
        )
    }

    /// Starts the chip's initialize sequence.
    ///
    /// The write is unconditional and not verified. The chip is not usable
    /// for the rest of the current session once this succeeds.
    pub fn enter_initialize_state(&mut self) -> Result<(), Error<T::Error>> {
        self.write_register(InitControl::INITIALIZE)
    }

    /// Prepares the chip to hand host-through RF commands to the host.
    ///
    /// Sets the operation mode and enables the "read or write without
    /// encryption for a host-through block" interrupt.
    ///
    /// # Errors
    /// * `Error::UnsupportedMode` - `mode` is neither Lite-S HT nor Plug; nothing is sent
    /// * `Error::Bus` - a register update failed
    pub fn init_felica_through(&mut self, mode: OperationMode) -> Result<(), Error<T::Error>> {
        if !mode.is_felica_through() {
            return Err(Error::UnsupportedMode(mode));
        }

        self.set_operation_mode(mode)?;
        self.set_interrupt_mask(Interrupts::TAG_RW_RX_DONE2, Interrupts::empty())
    }

    /// Reads the interrupt status (unmasked, pending events).
    pub fn interrupt_status(&mut self) -> Result<Interrupts, Error<T::Error>> {
        let status: InterruptStatus = self.read_register()?;
        Ok(status.flags)
    }

    /// Reads the raw interrupt status (events regardless of the mask).
    pub fn raw_interrupt_status(&mut self) -> Result<Interrupts, Error<T::Error>> {
        let status: InterruptRawStatus = self.read_register()?;
        Ok(status.flags)
    }

    /// Reads the interrupt mask.
    pub fn interrupt_mask(&mut self) -> Result<Interrupts, Error<T::Error>> {
        let mask: InterruptMask = self.read_register()?;
        Ok(mask.flags)
    }

    /// Reads the RF status register.
    pub fn rf_status(&mut self) -> Result<u32, Error<T::Error>> {
        let status: RfStatus = self.read_register()?;
        Ok(status.value)
    }

    /// Reads the slave address stored in the chip.
    pub fn stored_slave_address(&mut self) -> Result<u8, Error<T::Error>> {
        let stored: I2cSlaveAddress = self.read_register()?;
        Ok(stored.address)
    }
}
