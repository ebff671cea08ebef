#[cfg(test)]
#[path = "./reader_test.rs"]
mod reader_test;

use std::io::{ErrorKind, Read};

use log::trace;

use crate::arch::chip8::RawInstruction;
use crate::error::DasmError;

/// Reads a ROM as a sequence of [`RawInstruction`]s.
///
/// A dangling byte at the end of the stream is reported once as
/// [`DasmError::IncompleteInstruction`], after which the iterator is done.
pub struct RomReader<R> {
    source: R,
    offset: usize,
    done: bool,
}

impl<R: Read> RomReader<R> {
    pub fn new(source: R) -> RomReader<R> {
        RomReader {
            source,
            offset: 0,
            done: false,
        }
    }

    /// byte offset of the next instruction
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn read_chunk(&mut self) -> Result<Option<RawInstruction>, DasmError> {
        let mut buf = [0u8; RawInstruction::SIZE];
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        match filled {
            0 => Ok(None),
            RawInstruction::SIZE => {
                let raw = RawInstruction::new(&buf)?;
                trace!("0x{:04X}: {:?}", self.offset, raw);
                self.offset += RawInstruction::SIZE;
                Ok(Some(raw))
            }
            _ => Err(DasmError::IncompleteInstruction {
                offset: self.offset,
                bytes: buf[..filled].to_vec(),
            }),
        }
    }
}

impl<R: Read> Iterator for RomReader<R> {
    type Item = Result<RawInstruction, DasmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let r = self.read_chunk();
        if !matches!(r, Ok(Some(_))) {
            self.done = true;
        }
        r.transpose()
    }
}
