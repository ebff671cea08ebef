
pub mod decoder;
pub mod reader;

use std::io::Read;

use crate::arch::chip8::AsmInstruction;
use crate::error::DasmError;

pub use decoder::{CollisionPolicy, Decoder};
pub use reader::RomReader;

/// Disassembles a whole ROM with the shipped pattern table, one line per instruction.
pub fn disassemble(data: &[u8]) -> Result<Vec<String>, DasmError> {
    let decoder = Decoder::chip8()?;
    let instructions = disassemble_from(decoder, RomReader::new(data))?;
    Ok(instructions.iter().map(|instr| instr.to_string()).collect())
}

/// Decodes every instruction of the stream; the first read error aborts,
/// unknown instructions do not.
pub fn disassemble_from<R: Read>(
    decoder: &Decoder,
    reader: RomReader<R>,
) -> Result<Vec<AsmInstruction>, DasmError> {
    let mut result = Vec::new();
    for raw in reader {
        result.push(decoder.decode(raw?));
    }
    Ok(result)
}
