#[cfg(test)]
#[path = "./raw_test.rs"]
mod raw_test;

use std::fmt;

use crate::arch::nibble::byte_to_nibbles;
use crate::error::DasmError;

/// Number of nibbles in one instruction.
pub const NIBBLES: usize = 4;

/// One undecoded CHIP-8 instruction, stored big-endian as read from the ROM.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawInstruction([u8; RawInstruction::SIZE]);

impl RawInstruction {
    pub const SIZE: usize = 2;

    pub fn new(bytes: &[u8]) -> Result<RawInstruction, DasmError> {
        let data: [u8; RawInstruction::SIZE] = bytes
            .try_into()
            .map_err(|_| DasmError::InvalidRawInstruction { len: bytes.len() })?;
        Ok(RawInstruction(data))
    }

    pub fn from_word(word: u16) -> RawInstruction {
        RawInstruction(word.to_be_bytes())
    }

    pub fn word(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// most significant nibble first
    pub fn as_nibbles(&self) -> [u8; NIBBLES] {
        let (n0, n1) = byte_to_nibbles(self.0[0]);
        let (n2, n3) = byte_to_nibbles(self.0[1]);
        [n0, n1, n2, n3]
    }
}

impl TryFrom<&[u8]> for RawInstruction {
    type Error = DasmError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        RawInstruction::new(bytes)
    }
}

impl From<u16> for RawInstruction {
    fn from(word: u16) -> Self {
        RawInstruction::from_word(word)
    }
}

impl fmt::Debug for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawInstruction<0x{:04X}>", self.word())
    }
}

impl fmt::Display for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.word())
    }
}
