//! CHIP-8 instruction set: 16-bit big-endian words described by a table
//! of hex patterns such as `6XNN`.

pub mod instruction;
pub mod pattern;
pub mod raw;
pub mod symbol;

pub use instruction::{AsmInstruction, AsmInstructionBuilder, UNKNOWN_OP_CODE};
pub use pattern::{FixedNibbles, INSTRUCTION_PATTERNS, InstructionPattern};
pub use raw::RawInstruction;
pub use symbol::{InstructionSymbol, SymbolBuilder, SymbolKind};
