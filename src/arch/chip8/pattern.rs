#[cfg(test)]
#[path = "./pattern_test.rs"]
mod pattern_test;

use crate::arch::chip8::instruction::AsmInstructionBuilder;
use crate::arch::chip8::raw::NIBBLES;
use crate::arch::chip8::symbol::{SymbolBuilder, SymbolKind};
use crate::error::PatternError;

/// Per nibble: the literal digit the pattern requires, or `None` for an operand.
pub type FixedNibbles = [Option<u8>; NIBBLES];

/// Placeholder for "don't care" positions in both masks.
pub const MASK_CHARACTER: char = '_';

/// The shipped CHIP-8 table as (hex pattern, mnemonic).
///
/// `0NNN` (machine code call) is left out on purpose: everything under
/// `0x0000` except `00E0`/`00EE` decodes as unknown.
pub const INSTRUCTION_PATTERNS: &[(&str, &str)] = &[
    ("00E0", "CLEAR"),
    ("00EE", "RETURN"),
    ("1NNN", "GOTO"),
    ("2NNN", "CALL"),
    ("3XNN", "SIEQ"),
    ("4XNN", "SINE"),
    ("5XY0", "SREQ"),
    ("6XNN", "SETR"),
    ("7XNN", "ADDI"),
    ("8XY0", "COPY"),
    ("8XY1", "OR"),
    ("8XY2", "AND"),
    ("8XY3", "XOR"),
    ("8XY4", "ADD"),
    ("8XY5", "SUB"),
    ("8XY6", "SHIFTR"),
    ("8XY7", "SUB-"),
    ("8XYE", "SHIFTL"),
    ("9XY0", "SRNE"),
    ("ANNN", "SETI"),
    ("BNNN", "JUMPR"),
    ("CXNN", "RAND"),
    ("DXYN", "DRAW"),
    ("EX9E", "SKPR"),
    ("EXA1", "SKNP"),
    ("FX07", "RDEL"),
    ("FX0A", "KEY"),
    ("FX15", "TDEL"),
    ("FX18", "TSND"),
    ("FX1E", "IADD"),
    ("FX29", "CHAR"),
    ("FX33", "DEC"),
    ("FX55", "DUMP"),
    ("FX65", "LOAD"),
];

/// One row of the pattern table, split into its fixed and variable halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionPattern {
    pub op_code: String,
    pub hex_pattern: String,
    fixed_mask: String,
    variable_mask: String,
    fixed_nibbles: FixedNibbles,
}

impl InstructionPattern {
    pub fn new(hex_pattern: &str, op_code: &str) -> Result<InstructionPattern, PatternError> {
        validate_hex_pattern(hex_pattern)?;

        let mut fixed_mask = String::with_capacity(NIBBLES);
        let mut variable_mask = String::with_capacity(NIBBLES);
        let mut fixed_nibbles = [None; NIBBLES];
        for (i, ch) in hex_pattern.chars().enumerate() {
            if SymbolKind::is_symbol_char(ch) {
                fixed_mask.push(MASK_CHARACTER);
                variable_mask.push(ch);
            } else {
                fixed_mask.push(ch);
                variable_mask.push(MASK_CHARACTER);
                fixed_nibbles[i] = ch.to_digit(16).map(|d| d as u8);
            }
        }

        Ok(InstructionPattern {
            op_code: op_code.to_string(),
            hex_pattern: hex_pattern.to_string(),
            fixed_mask,
            variable_mask,
            fixed_nibbles,
        })
    }

    pub fn fixed_mask(&self) -> &str {
        &self.fixed_mask
    }

    /// The shape of the pattern, shared by every pattern that only differs
    /// in its literal digits.
    pub fn variable_mask(&self) -> &str {
        &self.variable_mask
    }

    pub fn fixed_nibbles(&self) -> &FixedNibbles {
        &self.fixed_nibbles
    }
}

fn validate_hex_pattern(hex_pattern: &str) -> Result<(), PatternError> {
    let valid = hex_pattern.chars().count() == NIBBLES
        && hex_pattern
            .chars()
            .all(|ch| matches!(ch, '0'..='9' | 'A'..='F') || SymbolKind::is_symbol_char(ch));
    if !valid {
        return Err(PatternError::InvalidPattern {
            pattern: hex_pattern.to_string(),
        });
    }
    Ok(())
}

/// Compiles the shipped table.
pub fn chip8_patterns() -> Result<Vec<InstructionPattern>, PatternError> {
    INSTRUCTION_PATTERNS
        .iter()
        .map(|(hex_pattern, op_code)| InstructionPattern::new(hex_pattern, op_code))
        .collect()
}

/// Parses a pattern table file: one `<pattern> <mnemonic>` per line,
/// `;` starts a comment.
pub fn parse_pattern_table(text: &str) -> Result<Vec<InstructionPattern>, PatternError> {
    let mut patterns = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let content = match line.find(';') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let fields: Vec<&str> = content.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [hex_pattern, op_code] => patterns.push(InstructionPattern::new(hex_pattern, op_code)?),
            _ => {
                return Err(PatternError::InvalidTableLine {
                    line: i + 1,
                    content: line.to_string(),
                });
            }
        }
    }
    Ok(patterns)
}

/// Coalesces runs of identical mask characters, e.g. `_XNN` → `_`, `X`, `NN`.
fn mask_parts(mask: &str) -> Vec<(char, usize)> {
    let mut parts: Vec<(char, usize)> = Vec::new();
    for ch in mask.chars() {
        match parts.last_mut() {
            Some((last, len)) if *last == ch => *len += 1,
            _ => parts.push((ch, 1)),
        }
    }
    parts
}

pub fn derive_instruction_builder_from_mask(
    mask: &str,
) -> Result<AsmInstructionBuilder, PatternError> {
    if mask.chars().count() != NIBBLES {
        return Err(PatternError::InvalidMask {
            mask: mask.to_string(),
        });
    }
    let symbol_builders = mask_parts(mask)
        .into_iter()
        .map(|(ch, len)| SymbolBuilder::new(SymbolKind::from_mask_char(ch), len))
        .collect();
    Ok(AsmInstructionBuilder::new(symbol_builders))
}
