//! Scripted RC-S730 stand-in for driver tests
//!
//! Models the chip's address space as a flat memory behind an address
//! pointer: a write sets the pointer from its 2-byte header and stores the
//! rest, a read returns bytes from the pointer on. Writes to Interrupt Clear
//! clear the matching Interrupt Status bits. Every attempted transfer is
//! logged, including failed ones.

#![allow(dead_code)]

use rcs730::registers::map;
use rcs730::{Stop, Transport};

const MEMORY_LEN: usize = 0x1_0000 + 0x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub address: u8,
    pub bytes: Vec<u8>,
    pub stop: Stop,
    pub ok: bool,
}

impl Record {
    pub fn is_read(&self) -> bool {
        self.address & 0x01 != 0
    }

    /// Memory address of a write, taken from its header
    pub fn target(&self) -> Option<u16> {
        if self.is_read() || self.bytes.len() < 2 {
            None
        } else {
            Some(u16::from_be_bytes([self.bytes[0], self.bytes[1]]))
        }
    }

    /// Payload of a write after its header
    pub fn payload(&self) -> &[u8] {
        &self.bytes[2..]
    }
}

type FailRule = Box<dyn FnMut(&Record) -> bool>;
type Hook = Box<dyn FnMut(&Record, &mut [u8])>;

pub struct Chip {
    pub memory: Vec<u8>,
    pub log: Vec<Record>,
    pointer: usize,
    fail: Option<FailRule>,
    after: Option<Hook>,
}

impl Chip {
    pub fn new() -> Self {
        Self {
            memory: vec![0; MEMORY_LEN],
            log: Vec::new(),
            pointer: 0,
            fail: None,
            after: None,
        }
    }

    /// Makes every transfer for which `rule` returns true fail.
    pub fn fail_when(&mut self, rule: impl FnMut(&Record) -> bool + 'static) {
        self.fail = Some(Box::new(rule));
    }

    /// Runs `hook` after every successful transfer.
    pub fn after_transfer(&mut self, hook: impl FnMut(&Record, &mut [u8]) + 'static) {
        self.after = Some(Box::new(hook));
    }

    pub fn set_register(&mut self, address: u16, value: u32) {
        set_register(&mut self.memory, address, value);
    }

    pub fn register(&self, address: u16) -> u32 {
        let at = usize::from(address);
        u32::from_le_bytes(self.memory[at..at + 4].try_into().unwrap())
    }

    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        let at = usize::from(address);
        self.memory[at..at + bytes.len()].copy_from_slice(bytes);
    }

    pub fn bytes(&self, address: u16, len: usize) -> &[u8] {
        let at = usize::from(address);
        &self.memory[at..at + len]
    }

    pub fn attempts(&self) -> usize {
        self.log.len()
    }

    /// Successful reads, in order
    pub fn reads(&self) -> Vec<&Record> {
        self.log.iter().filter(|r| r.ok && r.is_read()).collect()
    }

    /// Successful writes, in order
    pub fn writes(&self) -> Vec<&Record> {
        self.log.iter().filter(|r| r.ok && !r.is_read()).collect()
    }

    /// Successful writes carrying data to `address`
    pub fn writes_to(&self, address: u16) -> Vec<&Record> {
        self.log
            .iter()
            .filter(|r| r.ok && r.target() == Some(address) && r.bytes.len() > 2)
            .collect()
    }

    /// Every attempted data write to `address`, failed ones included
    pub fn attempted_writes_to(&self, address: u16) -> usize {
        self.log
            .iter()
            .filter(|r| r.target() == Some(address) && r.bytes.len() > 2)
            .count()
    }
}

pub fn set_register(memory: &mut [u8], address: u16, value: u32) {
    let at = usize::from(address);
    memory[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

impl Transport for Chip {
    type Error = BusError;

    fn transfer(&mut self, address: u8, buffer: &mut [u8], stop: Stop) -> Result<(), Self::Error> {
        let mut record = Record {
            address,
            bytes: buffer.to_vec(),
            stop,
            ok: true,
        };

        if let Some(rule) = self.fail.as_mut() {
            if rule(&record) {
                record.ok = false;
                self.log.push(record);
                return Err(BusError);
            }
        }

        if record.is_read() {
            let end = self.pointer + buffer.len();
            buffer.copy_from_slice(&self.memory[self.pointer..end]);
            self.pointer = end;
            record.bytes = buffer.to_vec();
        } else {
            let target = u16::from_be_bytes([buffer[0], buffer[1]]);
            self.pointer = usize::from(target);
            let data = &buffer[2..];

            if target == map::reg::INT_CLEAR && data.len() == 4 {
                let clear = u32::from_le_bytes(data.try_into().unwrap());
                let status = self.register(map::reg::INT_STATUS);
                self.set_register(map::reg::INT_STATUS, status & !clear);
            }

            let end = self.pointer + data.len();
            self.memory[self.pointer..end].copy_from_slice(data);
        }

        if let Some(hook) = self.after.as_mut() {
            hook(&record, &mut self.memory);
        }
        self.log.push(record);

        Ok(())
    }
}
