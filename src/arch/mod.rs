pub mod chip8;
pub mod nibble;
