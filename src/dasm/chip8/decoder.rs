#[cfg(test)]
#[path = "./decoder_test.rs"]
mod decoder_test;

use std::collections::HashMap;
use std::sync::OnceLock;

use log::{debug, warn};

use crate::arch::chip8::pattern::{chip8_patterns, derive_instruction_builder_from_mask};
use crate::arch::chip8::{
    AsmInstruction, AsmInstructionBuilder, FixedNibbles, InstructionPattern, RawInstruction,
};
use crate::error::PatternError;

/// What to do when two patterns share a shape and all of their literal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Refuse to build the decoder.
    #[default]
    Reject,
    /// The pattern registered later replaces the earlier one.
    LastWins,
}

/// All patterns of one shape, indexed by their literal digits.
#[derive(Debug)]
struct DispatcherEntry {
    variable_mask: String,
    instruction_builder: AsmInstructionBuilder,
    instruction_patterns: HashMap<FixedNibbles, InstructionPattern>,
}

impl DispatcherEntry {
    fn new(variable_mask: &str) -> Result<DispatcherEntry, PatternError> {
        Ok(DispatcherEntry {
            variable_mask: variable_mask.to_string(),
            instruction_builder: derive_instruction_builder_from_mask(variable_mask)?,
            instruction_patterns: HashMap::new(),
        })
    }

    fn add_instruction_pattern(
        &mut self,
        pattern: InstructionPattern,
        policy: CollisionPolicy,
    ) -> Result<(), PatternError> {
        let key = *pattern.fixed_nibbles();
        if let Some(existing) = self.instruction_patterns.get(&key) {
            match policy {
                CollisionPolicy::Reject => {
                    return Err(PatternError::DuplicatePattern {
                        pattern: pattern.hex_pattern.clone(),
                        existing: existing.op_code.clone(),
                        duplicate: pattern.op_code.clone(),
                    });
                }
                CollisionPolicy::LastWins => warn!(
                    "pattern {} ({}) shadows {} ({})",
                    pattern.hex_pattern, pattern.op_code, existing.hex_pattern, existing.op_code
                ),
            }
        }
        self.instruction_patterns.insert(key, pattern);
        Ok(())
    }

    fn get_instruction(&self, raw: RawInstruction) -> Option<AsmInstruction> {
        let key = self.instruction_builder.fixed_nibbles(&raw);
        self.instruction_patterns
            .get(&key)
            .map(|pattern| self.instruction_builder.build_instruction(raw, &pattern.op_code))
    }
}

/// Two-level dispatch: shapes in table order, then an exact lookup on the
/// fixed nibbles within each shape.
///
/// A compiled decoder is never mutated, so one instance can be shared by
/// any number of threads.
#[derive(Debug)]
pub struct Decoder {
    entries: Vec<DispatcherEntry>,
}

impl Decoder {
    pub fn new<I>(patterns: I) -> Result<Decoder, PatternError>
    where
        I: IntoIterator<Item = InstructionPattern>,
    {
        Decoder::with_policy(patterns, CollisionPolicy::default())
    }

    pub fn with_policy<I>(patterns: I, policy: CollisionPolicy) -> Result<Decoder, PatternError>
    where
        I: IntoIterator<Item = InstructionPattern>,
    {
        let mut entries: Vec<DispatcherEntry> = Vec::new();
        let mut pattern_count = 0;
        for pattern in patterns {
            let idx = match entries
                .iter()
                .position(|entry| entry.variable_mask == pattern.variable_mask())
            {
                Some(idx) => idx,
                None => {
                    entries.push(DispatcherEntry::new(pattern.variable_mask())?);
                    entries.len() - 1
                }
            };
            entries[idx].add_instruction_pattern(pattern, policy)?;
            pattern_count += 1;
        }
        debug!(
            "compiled {} patterns into {} shapes",
            pattern_count,
            entries.len()
        );
        Ok(Decoder { entries })
    }

    /// The decoder for the shipped table, compiled on first use.
    pub fn chip8() -> Result<&'static Decoder, PatternError> {
        static DECODER: OnceLock<Result<Decoder, PatternError>> = OnceLock::new();
        DECODER
            .get_or_init(|| Decoder::new(chip8_patterns()?))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Variable masks in lookup order.
    pub fn shapes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.variable_mask.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.instruction_patterns.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First shape with an exact hit wins, `None` if no pattern matches.
    pub fn try_decode(&self, raw: RawInstruction) -> Option<AsmInstruction> {
        self.entries
            .iter()
            .find_map(|entry| entry.get_instruction(raw))
    }

    /// Never fails: unmatched words become [`AsmInstruction::Unknown`].
    pub fn decode(&self, raw: RawInstruction) -> AsmInstruction {
        match self.try_decode(raw) {
            Some(instruction) => instruction,
            None => {
                let unknown = AsmInstruction::unknown(raw);
                warn!("could not match instruction {:?}, mapping to {}", raw, unknown);
                unknown
            }
        }
    }
}
