#[cfg(test)]
#[path = "./symbol_test.rs"]
mod symbol_test;

use std::fmt;

use crate::arch::nibble::{nibbles_to_hex, nibbles_to_int};

/// Kind of field a run of nibbles decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Fixed digits that select the instruction.
    OpCode,
    /// `X`/`Y`: a `V0`..`VF` register.
    Register,
    /// `N`: an immediate value, one or more nibbles wide.
    Constant,
}

impl SymbolKind {
    /// `N`, `X` and `Y` are operand symbols, anything else
    /// (literal digits, mask placeholders) belongs to the opcode.
    pub fn from_mask_char(ch: char) -> SymbolKind {
        match ch {
            'N' => SymbolKind::Constant,
            'X' | 'Y' => SymbolKind::Register,
            _ => SymbolKind::OpCode,
        }
    }

    pub fn is_symbol_char(ch: char) -> bool {
        SymbolKind::from_mask_char(ch) != SymbolKind::OpCode
    }

    pub fn variable(self) -> bool {
        self != SymbolKind::OpCode
    }
}

/// A decoded field together with the nibbles it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionSymbol {
    OpCode(Vec<u8>),
    Register(Vec<u8>),
    Constant(Vec<u8>),
}

impl InstructionSymbol {
    pub fn build(kind: SymbolKind, nibbles: &[u8]) -> InstructionSymbol {
        let nibbles = nibbles.to_vec();
        match kind {
            SymbolKind::OpCode => InstructionSymbol::OpCode(nibbles),
            SymbolKind::Register => InstructionSymbol::Register(nibbles),
            SymbolKind::Constant => InstructionSymbol::Constant(nibbles),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            InstructionSymbol::OpCode(_) => SymbolKind::OpCode,
            InstructionSymbol::Register(_) => SymbolKind::Register,
            InstructionSymbol::Constant(_) => SymbolKind::Constant,
        }
    }

    pub fn nibbles(&self) -> &[u8] {
        match self {
            InstructionSymbol::OpCode(nibbles)
            | InstructionSymbol::Register(nibbles)
            | InstructionSymbol::Constant(nibbles) => nibbles,
        }
    }

    pub fn size(&self) -> usize {
        self.nibbles().len()
    }

    /// operands are rendered in the listing, opcode fragments are not
    pub fn variable(&self) -> bool {
        self.kind().variable()
    }

    /// big-endian value of the nibbles
    pub fn value(&self) -> u32 {
        nibbles_to_int(self.nibbles())
    }

    /// the register index is carried by the first nibble of the run
    pub fn register_number(&self) -> Option<u8> {
        match self {
            InstructionSymbol::Register(nibbles) => nibbles.first().copied(),
            _ => None,
        }
    }
}

impl fmt::Display for InstructionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.register_number() {
            Some(register) => write!(f, "V{:01X}", register),
            None => f.write_str(&nibbles_to_hex(self.nibbles(), true, true)),
        }
    }
}

/// Builds one symbol out of the next `symbol_length` nibbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolBuilder {
    pub symbol_kind: SymbolKind,
    pub symbol_length: usize,
}

impl SymbolBuilder {
    pub fn new(symbol_kind: SymbolKind, symbol_length: usize) -> SymbolBuilder {
        SymbolBuilder {
            symbol_kind,
            symbol_length,
        }
    }

    pub fn build_symbol(&self, nibbles: &[u8]) -> InstructionSymbol {
        let len = self.symbol_length.min(nibbles.len());
        InstructionSymbol::build(self.symbol_kind, &nibbles[..len])
    }

    pub fn variable(&self) -> bool {
        self.symbol_kind.variable()
    }
}
