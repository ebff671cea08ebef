use thiserror::Error;

/// Errors raised while compiling the instruction pattern table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("invalid hex pattern: {pattern:?}")]
    InvalidPattern { pattern: String },
    #[error("invalid variable mask: {mask:?}")]
    InvalidMask { mask: String },
    #[error("pattern {duplicate} ({pattern}) collides with {existing} ({pattern})")]
    DuplicatePattern {
        pattern: String,
        existing: String,
        duplicate: String,
    },
    #[error("pattern table line {line}: expected '<pattern> <mnemonic>', got {content:?}")]
    InvalidTableLine { line: usize, content: String },
}

#[derive(Debug, Error)]
pub enum DasmError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("invalid data for instruction: expected 2 bytes, got {len}")]
    InvalidRawInstruction { len: usize },
    #[error("read incomplete instruction at offset 0x{offset:04X}: {bytes:02X?}")]
    IncompleteInstruction { offset: usize, bytes: Vec<u8> },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
