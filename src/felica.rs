//! FeliCa host-through commands
//!
//! In Lite-S HT and Plug modes the chip passes Read/Write Without Encryption
//! commands for host-through blocks to the host. This module decodes those
//! command frames and builds the matching responses in place, in the same
//! [`Frame`] the command arrived in.
//!
//! # Command layout
//! | bytes        | content                                      |
//! |--------------|----------------------------------------------|
//! | 0            | length                                       |
//! | 1            | command code                                 |
//! | 2..10        | IDm                                          |
//! | 10           | number of services (n)                       |
//! | 11..11+2n    | service codes, little-endian                 |
//! | 11+2n        | number of blocks (m)                         |
//! | ..           | block list, 2 or 3 bytes per element         |
//! | ..           | block data, 16 bytes per block (write only)  |
//!
//! # Response layout
//! | bytes  | content                          |
//! |--------|----------------------------------|
//! | 0      | length                           |
//! | 1      | code, left as received           |
//! | 2..10  | IDm, left as received            |
//! | 10, 11 | status flags 1 and 2             |
//! | 12     | number of blocks (read only)     |
//! | 13..   | block data (read only)           |

use crate::frame::{Frame, FRAME_CAPACITY};

/// Size of a FeliCa block
pub const BLOCK_LEN: usize = 16;

/// Most services a single command may name
pub const MAX_SERVICES: usize = 16;

const IDM_OFFSET: usize = 2;
const SERVICE_COUNT_OFFSET: usize = 10;
const STATUS_OFFSET: usize = 10;
const READ_BLOCK_COUNT_OFFSET: usize = 12;
const READ_DATA_OFFSET: usize = 13;
const WRITE_RESPONSE_LEN: u8 = 12;
const READ_ERROR_RESPONSE_LEN: u8 = 13;

/// Most blocks a read response can carry in one frame
pub const MAX_READ_BLOCKS: usize = (FRAME_CAPACITY - 1 - READ_DATA_OFFSET) / BLOCK_LEN;

/// Status flag 2 values
pub mod status {
    /// Status flag 1 reported with any error
    pub const ERROR: u8 = 0xFF;
    /// Memory (read/write) error
    pub const MEMORY_ERROR: u8 = 0x70;
    /// Number of services out of range
    pub const ILLEGAL_SERVICE_COUNT: u8 = 0xA1;
    /// Number of blocks out of range
    pub const ILLEGAL_BLOCK_COUNT: u8 = 0xA2;
}

/// Commands passed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandCode {
    /// Read Without Encryption
    ReadWithoutEncryption = 0x06,
    /// Write Without Encryption
    WriteWithoutEncryption = 0x08,
}

/// Error type for command codes the host is not asked to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownCommand(pub u8);

impl TryFrom<u8> for CommandCode {
    type Error = UnknownCommand;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x06 => Ok(Self::ReadWithoutEncryption),
            0x08 => Ok(Self::WriteWithoutEncryption),
            unknown => Err(UnknownCommand(unknown)),
        }
    }
}

/// Why a command frame could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MalformedRequest {
    /// The frame code is not a host-through command
    UnknownCommand(u8),
    /// Number of services is 0 or above [`MAX_SERVICES`]
    ServiceCount(u8),
    /// Number of blocks is 0
    BlockCount(u8),
    /// The declared length ends before the fields it should carry
    Truncated,
}

impl MalformedRequest {
    /// Status flag 2 to report for this error
    pub fn status_code(self) -> u8 {
        match self {
            Self::ServiceCount(_) => status::ILLEGAL_SERVICE_COUNT,
            Self::BlockCount(_) => status::ILLEGAL_BLOCK_COUNT,
            Self::UnknownCommand(_) | Self::Truncated => status::MEMORY_ERROR,
        }
    }
}

/// One element of a block list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockElement {
    /// Index into the command's service code list
    pub service_index: u8,
    /// Access mode
    pub access_mode: u8,
    /// Block number
    pub number: u16,
}

/// Decoded header of a Read/Write Without Encryption command.
///
/// Holds offsets only, so the frame can be rewritten into a response while
/// the request is still around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    code: CommandCode,
    service_count: usize,
    block_count: usize,
    block_list: usize,
    data: usize,
    len: usize,
}

impl Request {
    /// Decodes the command in `frame`.
    pub fn parse(frame: &Frame) -> Result<Self, MalformedRequest> {
        let bytes = frame.as_bytes();
        let len = bytes.len();

        let code = CommandCode::try_from(frame.code())
            .map_err(|UnknownCommand(code)| MalformedRequest::UnknownCommand(code))?;

        let raw_services = *bytes.get(SERVICE_COUNT_OFFSET).ok_or(MalformedRequest::Truncated)?;
        let service_count = usize::from(raw_services);
        if service_count == 0 || service_count > MAX_SERVICES {
            return Err(MalformedRequest::ServiceCount(raw_services));
        }

        let block_count_offset = SERVICE_COUNT_OFFSET + 1 + 2 * service_count;
        let raw_blocks = *bytes.get(block_count_offset).ok_or(MalformedRequest::Truncated)?;
        let block_count = usize::from(raw_blocks);
        if block_count == 0 {
            return Err(MalformedRequest::BlockCount(raw_blocks));
        }

        let block_list = block_count_offset + 1;
        let mut cursor = block_list;
        for _ in 0..block_count {
            let head = *bytes.get(cursor).ok_or(MalformedRequest::Truncated)?;
            cursor += if head & 0x80 != 0 { 2 } else { 3 };
        }
        if cursor > len {
            return Err(MalformedRequest::Truncated);
        }

        if code == CommandCode::WriteWithoutEncryption && cursor + block_count * BLOCK_LEN > len {
            return Err(MalformedRequest::Truncated);
        }

        Ok(Self {
            code,
            service_count,
            block_count,
            block_list,
            data: cursor,
            len,
        })
    }

    /// Command code
    pub fn code(&self) -> CommandCode {
        self.code
    }

    /// Number of blocks named by the command
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Number of services named by the command
    pub fn service_count(&self) -> usize {
        self.service_count
    }

    /// IDm the reader addressed
    pub fn idm(&self, frame: &Frame) -> [u8; 8] {
        let mut idm = [0u8; 8];
        idm.copy_from_slice(&frame.buffer()[IDM_OFFSET..IDM_OFFSET + 8]);
        idm
    }

    /// Service codes named by the command
    pub fn service_codes<'f>(&self, frame: &'f Frame) -> impl Iterator<Item = u16> + 'f {
        let start = SERVICE_COUNT_OFFSET + 1;
        frame.buffer()[start..start + 2 * self.service_count]
            .chunks_exact(2)
            .map(|code| u16::from_le_bytes([code[0], code[1]]))
    }

    /// Block list of the command
    pub fn block_elements<'f>(&self, frame: &'f Frame) -> BlockElements<'f> {
        BlockElements {
            bytes: &frame.buffer()[self.block_list..self.data],
        }
    }

    /// Block data carried by a write command; empty for reads
    pub fn write_data<'f>(&self, frame: &'f Frame) -> &'f [u8] {
        match self.code {
            CommandCode::WriteWithoutEncryption => {
                &frame.buffer()[self.data..self.data + self.block_count * BLOCK_LEN]
            }
            CommandCode::ReadWithoutEncryption => &[],
        }
    }

    /// Declared length of the command frame
    pub fn frame_len(&self) -> usize {
        self.len
    }
}

/// Iterator over the elements of a block list
#[derive(Debug, Clone)]
pub struct BlockElements<'f> {
    bytes: &'f [u8],
}

impl Iterator for BlockElements<'_> {
    type Item = BlockElement;

    fn next(&mut self) -> Option<Self::Item> {
        let head = *self.bytes.first()?;
        let service_index = head & 0x0F;
        let access_mode = (head >> 4) & 0x07;

        let (number, consumed) = if head & 0x80 != 0 {
            (u16::from(*self.bytes.get(1)?), 2)
        } else {
            let low = *self.bytes.get(1)?;
            let high = *self.bytes.get(2)?;
            (u16::from_le_bytes([low, high]), 3)
        };
        self.bytes = &self.bytes[consumed..];

        Some(BlockElement {
            service_index,
            access_mode,
            number,
        })
    }
}

/// Turns `frame` into a successful read response for `block_count` blocks.
///
/// Returns the block data area for the caller to fill, or `None` if that many
/// blocks do not fit in one frame (the frame is left untouched).
pub fn respond_read(frame: &mut Frame, block_count: usize) -> Option<&mut [u8]> {
    if block_count > MAX_READ_BLOCKS {
        return None;
    }

    let data_len = block_count * BLOCK_LEN;
    let len = READ_DATA_OFFSET + data_len;
    frame.set_len(len as u8);

    let buffer = frame.buffer_mut();
    buffer[STATUS_OFFSET] = 0x00;
    buffer[STATUS_OFFSET + 1] = 0x00;
    buffer[READ_BLOCK_COUNT_OFFSET] = block_count as u8;
    Some(&mut buffer[READ_DATA_OFFSET..len])
}

/// Turns `frame` into a successful write response.
pub fn respond_write(frame: &mut Frame) {
    frame.set_len(WRITE_RESPONSE_LEN);
    let buffer = frame.buffer_mut();
    buffer[STATUS_OFFSET] = 0x00;
    buffer[STATUS_OFFSET + 1] = 0x00;
}

/// Turns `frame` into an error response for `code` with status flag 2 set to
/// `status_code`.
pub fn respond_error(frame: &mut Frame, code: CommandCode, status_code: u8) {
    let buffer = frame.buffer_mut();
    buffer[STATUS_OFFSET] = status::ERROR;
    buffer[STATUS_OFFSET + 1] = status_code;

    match code {
        CommandCode::ReadWithoutEncryption => {
            buffer[READ_BLOCK_COUNT_OFFSET] = 0;
            frame.set_len(READ_ERROR_RESPONSE_LEN);
        }
        CommandCode::WriteWithoutEncryption => frame.set_len(WRITE_RESPONSE_LEN),
    }
}
