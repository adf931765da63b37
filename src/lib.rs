#![no_std]
//! RC-S730 FeliCa Link Driver
//!
//! This crate provides a type-safe interface for the Sony RC-S730 (FeliCa
//! Link), a contactless front-end that emulates a FeliCa Lite-S card and
//! hands selected RF commands to a host over I2C.
//!
//! # Features
//! - FeliCa Lite-S card emulation, with host-through blocks served by the host
//! - Plug mode with selectable system code (0xFEE1 or NDEF 0x12FC)
//! - 32-bit register file and 256-byte RF communication buffer over I2C
//! - Reconfigurable slave address (default 0x40)
//! - IRQ pin with maskable, sticky interrupt sources
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`transport`]: The two-wire transport and its bounded retry
//!   - [`Transport`] trait the driver is generic over
//!   - [`I2cTransport`] adapter for `embedded-hal` I2C buses
//!
//! - [`device`]: Main device interface for hardware interaction
//!   - Page writes and sequential reads of the chip's address space
//!   - Forced and masked 32-bit register writes
//!   - Typed register access through `regiface`
//!
//! - [`registers`]: Register definitions and the chip's memory map
//!
//! - Configuration, RF buffer and IRQ servicing, implemented on [`Device`]:
//!   - operation mode, slave address, interrupt mask, plug system code
//!   - reading received frames and sending responses
//!   - [`Device::service_interrupt`], the IRQ entry point
//!
//! - [`felica`]: Decoding Read/Write Without Encryption commands and
//!   building their responses
//!
//! - [`bridge`]: A [`FrameHandler`] forwarding commands to a wireless peer
//!
//! # Usage
//! 1. Create a [`Device`] over an I2C bus with [`I2cTransport`]
//! 2. Register a [`FrameHandler`] with [`Device::with_handler`]
//! 3. Call [`Device::init_felica_through`] with Lite-S HT or Plug mode
//! 4. Call [`Device::service_interrupt`] on every falling edge of IRQ
//!
//! # Important Notes
//! - Operation mode, slave address, interrupt mask and plug configuration
//!   live in the chip's non-volatile memory
//! - [`Device::service_interrupt`] runs the whole bus exchange synchronously;
//!   its worst case is bounded by [`RETRY_LIMIT`] attempts per transaction
//! - The driver assumes it owns the bus; other users must be serialized
//!
//! # Example
//! ```no_run
//! use embedded_hal::i2c::I2c;
//! use rcs730::{Device, Error, Frame, FrameHandler, I2cTransport, OperationMode};
//!
//! struct Echo;
//!
//! impl FrameHandler for Echo {
//!     fn write_without_encryption(&mut self, frame: &mut Frame) -> bool {
//!         rcs730::felica::respond_write(frame);
//!         true
//!     }
//! }
//!
//! fn start<I2C: I2c>(i2c: I2C) -> Result<(), Error<I2C::Error>> {
//!     let mut device = Device::new(I2cTransport::new(i2c)).with_handler(Echo);
//!     device.init_felica_through(OperationMode::Plug)?;
//!
//!     // On each IRQ falling edge:
//!     device.service_interrupt()?;
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod device;
pub mod felica;
pub mod registers;
pub mod transport;

mod config;
mod error;
mod frame;
mod handler;
mod irq;
mod rf;

pub use device::Device;
pub use error::{Error, InvalidOperationMode};
pub use frame::{Frame, FIRST_READ_LEN, FRAME_CAPACITY};
pub use handler::{FrameHandler, NoHandler};
pub use registers::*;
pub use transport::{I2cTransport, SlaveAddress, Stop, Transport, DEFAULT_SLAVE_ADDRESS, RETRY_LIMIT};
