use std::ops::{Index, IndexMut, Range};

use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::LoadError;

/// # Memory
/// 4096 bytes of flat addressable memory.
///
/// ```text
/// 0x000 - 0x04F  font sprite sheet
/// 0x050 - 0x1FF  reserved
/// 0x200 - 0xFFF  program
/// ```
///
/// Addresses outside of memory are a bug in the running program; indexing them panics.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet preloaded and no program.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Builds a memory image holding `program` at `PROGRAM_START`.
    ///
    /// A program that exactly fills the remaining space is fine; one byte more is not.
    pub fn initialize(program: &[u8]) -> Result<Self, LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::too_large(program.len()));
        }
        let mut memory = Memory::new();
        let start = PROGRAM_START as usize;
        memory.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(memory)
    }

    /// Reads the big-endian word starting at `addr`.
    pub fn word(&self, addr: u16) -> u16 {
        let addr = addr as usize;
        u16::from_be_bytes([self.bytes[addr], self.bytes[addr + 1]])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u16> for Memory {
    type Output = u8;

    fn index(&self, addr: u16) -> &u8 {
        &self.bytes[addr as usize]
    }
}

impl IndexMut<u16> for Memory {
    fn index_mut(&mut self, addr: u16) -> &mut u8 {
        &mut self.bytes[addr as usize]
    }
}

impl Index<Range<u16>> for Memory {
    type Output = [u8];

    fn index(&self, range: Range<u16>) -> &[u8] {
        &self.bytes[range.start as usize..range.end as usize]
    }
}

impl IndexMut<Range<u16>> for Memory {
    fn index_mut(&mut self, range: Range<u16>) -> &mut [u8] {
        &mut self.bytes[range.start as usize..range.end as usize]
    }
}
