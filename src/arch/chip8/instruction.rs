#[cfg(test)]
#[path = "./instruction_test.rs"]
mod instruction_test;

use std::fmt;

use crate::arch::chip8::pattern::FixedNibbles;
use crate::arch::chip8::raw::{NIBBLES, RawInstruction};
use crate::arch::chip8::symbol::{InstructionSymbol, SymbolBuilder, SymbolKind};

pub const UNKNOWN_OP_CODE: &str = "UNKNOWN";

/// A decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInstruction {
    Decoded {
        raw: RawInstruction,
        op_code: String,
        symbols: Vec<InstructionSymbol>,
    },
    /// No pattern matched, the whole word is kept as one opcode symbol.
    Unknown {
        raw: RawInstruction,
        symbol: InstructionSymbol,
    },
}

impl AsmInstruction {
    pub fn unknown(raw: RawInstruction) -> AsmInstruction {
        AsmInstruction::Unknown {
            raw,
            symbol: InstructionSymbol::build(SymbolKind::OpCode, &raw.as_nibbles()),
        }
    }

    pub fn raw(&self) -> RawInstruction {
        match self {
            AsmInstruction::Decoded { raw, .. } | AsmInstruction::Unknown { raw, .. } => *raw,
        }
    }

    pub fn op_code(&self) -> &str {
        match self {
            AsmInstruction::Decoded { op_code, .. } => op_code,
            AsmInstruction::Unknown { .. } => UNKNOWN_OP_CODE,
        }
    }

    pub fn symbols(&self) -> &[InstructionSymbol] {
        match self {
            AsmInstruction::Decoded { symbols, .. } => symbols,
            AsmInstruction::Unknown { symbol, .. } => std::slice::from_ref(symbol),
        }
    }

    /// the operand symbols, in nibble order
    pub fn variable_symbols(&self) -> impl Iterator<Item = &InstructionSymbol> {
        self.symbols().iter().filter(|symbol| symbol.variable())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AsmInstruction::Unknown { .. })
    }
}

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInstruction::Decoded { op_code, .. } => {
                f.write_str(op_code)?;
                for symbol in self.variable_symbols() {
                    write!(f, " {}", symbol)?;
                }
                Ok(())
            }
            AsmInstruction::Unknown { symbol, .. } => write!(f, "{} {}", UNKNOWN_OP_CODE, symbol),
        }
    }
}

/// Splits every instruction of one shape into symbols.
///
/// The builders are laid out left to right and their lengths add up to
/// [`NIBBLES`], so each nibble ends up in exactly one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmInstructionBuilder {
    symbol_builders: Vec<SymbolBuilder>,
}

impl AsmInstructionBuilder {
    pub fn new(symbol_builders: Vec<SymbolBuilder>) -> AsmInstructionBuilder {
        AsmInstructionBuilder { symbol_builders }
    }

    pub fn symbol_builders(&self) -> &[SymbolBuilder] {
        &self.symbol_builders
    }

    /// Projects the instruction onto this shape: fixed nibbles are kept,
    /// operand nibbles become `None`.
    pub fn fixed_nibbles(&self, raw: &RawInstruction) -> FixedNibbles {
        let nibbles = raw.as_nibbles();
        let mut fixed = [None; NIBBLES];
        let mut pos = 0;
        for symbol_builder in &self.symbol_builders {
            let end = (pos + symbol_builder.symbol_length).min(NIBBLES);
            if !symbol_builder.variable() {
                for (slot, nibble) in fixed[pos..end].iter_mut().zip(&nibbles[pos..end]) {
                    *slot = Some(*nibble);
                }
            }
            pos = end;
        }
        fixed
    }

    pub fn build_instruction(&self, raw: RawInstruction, op_code: &str) -> AsmInstruction {
        let nibbles = raw.as_nibbles();
        let mut remaining: &[u8] = &nibbles;

        let mut symbols = Vec::with_capacity(self.symbol_builders.len());
        for symbol_builder in &self.symbol_builders {
            let (symbol_nibbles, rest) =
                remaining.split_at(symbol_builder.symbol_length.min(remaining.len()));
            symbols.push(symbol_builder.build_symbol(symbol_nibbles));
            remaining = rest;
        }

        AsmInstruction::Decoded {
            raw,
            op_code: op_code.to_string(),
            symbols,
        }
    }
}
