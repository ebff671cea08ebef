use crate::arch::chip8::{InstructionPattern, RawInstruction, INSTRUCTION_PATTERNS};
use crate::dasm::chip8::decoder::{CollisionPolicy, Decoder};
use crate::error::PatternError;

#[test]
fn test_decode_shipped_table() -> Result<(), PatternError> {
    let decoder = Decoder::chip8()?;
    let cases = [
        (0x00E0, "CLEAR", "CLEAR"),
        (0x00EE, "RETURN", "RETURN"),
        (0x1234, "GOTO", "GOTO 0x234"),
        (0x2ABC, "CALL", "CALL 0xABC"),
        (0x3A12, "SIEQ", "SIEQ VA 0x12"),
        (0x5120, "SREQ", "SREQ V1 V2"),
        (0x6A12, "SETR", "SETR VA 0x12"),
        (0x8120, "COPY", "COPY V1 V2"),
        (0x8123, "XOR", "XOR V1 V2"),
        (0x8127, "SUB-", "SUB- V1 V2"),
        (0x812E, "SHIFTL", "SHIFTL V1 V2"),
        (0xA2F0, "SETI", "SETI 0x2F0"),
        (0xC0FF, "RAND", "RAND V0 0xFF"),
        (0xD125, "DRAW", "DRAW V1 V2 0x5"),
        (0xE19E, "SKPR", "SKPR V1"),
        (0xEFA1, "SKNP", "SKNP VF"),
        (0xF10A, "KEY", "KEY V1"),
        (0xF165, "LOAD", "LOAD V1"),
    ];
    for (word, op_code, text) in cases {
        let instr = decoder.decode(RawInstruction::from_word(word));
        assert_eq!(instr.op_code(), op_code, "word={:04X}", word);
        assert_eq!(instr.to_string(), text, "word={:04X}", word);
    }
    Ok(())
}

#[test]
fn test_decode_unknown() -> Result<(), PatternError> {
    let decoder = Decoder::chip8()?;
    let cases = [
        (0x0999, "UNKNOWN 0x0999"),
        (0x0000, "UNKNOWN 0x0000"),
        (0x5121, "UNKNOWN 0x5121"),
        (0x8128, "UNKNOWN 0x8128"),
        (0xE1A2, "UNKNOWN 0xE1A2"),
        (0xF1FF, "UNKNOWN 0xF1FF"),
    ];
    for (word, text) in cases {
        let raw = RawInstruction::from_word(word);
        assert!(decoder.try_decode(raw).is_none(), "word={:04X}", word);
        let instr = decoder.decode(raw);
        assert!(instr.is_unknown());
        assert_eq!(instr.to_string(), text);
    }
    Ok(())
}

#[test]
fn test_decode_is_idempotent() -> Result<(), PatternError> {
    let decoder = Decoder::chip8()?;
    for word in [0x6A12, 0x8123, 0x0999, 0xDFFF] {
        let raw = RawInstruction::from_word(word);
        assert_eq!(decoder.decode(raw), decoder.decode(raw));
        assert_eq!(decoder.decode(raw).to_string(), decoder.decode(raw).to_string());
    }
    Ok(())
}

#[test]
fn test_shapes_in_table_order() -> Result<(), PatternError> {
    let decoder = Decoder::chip8()?;
    let shapes: Vec<&str> = decoder.shapes().collect();
    assert_eq!(
        shapes,
        ["____", "_NNN", "_XNN", "_XY_", "_XYN", "_X__"]
    );
    assert_eq!(decoder.len(), INSTRUCTION_PATTERNS.len());
    assert!(!decoder.is_empty());
    Ok(())
}

#[test]
fn test_every_pattern_matches_its_literals() -> Result<(), PatternError> {
    let decoder = Decoder::chip8()?;
    // fill the operand positions with a few different values
    for filler in [0x0, 0x5, 0xA, 0xF] {
        for (hex, op_code) in INSTRUCTION_PATTERNS {
            let pattern = InstructionPattern::new(hex, op_code)?;
            let nibbles: Vec<u16> = pattern
                .fixed_nibbles()
                .iter()
                .map(|n| n.unwrap_or(filler) as u16)
                .collect();
            let word = nibbles.iter().fold(0u16, |acc, n| (acc << 4) | *n);
            let instr = decoder.decode(RawInstruction::from_word(word));
            assert_eq!(instr.op_code(), *op_code, "pattern={} word={:04X}", hex, word);
        }
    }
    Ok(())
}

#[test]
fn test_duplicate_pattern_rejected() -> Result<(), PatternError> {
    let patterns = vec![
        InstructionPattern::new("6XNN", "SETR")?,
        InstructionPattern::new("6XNN", "LOADI")?,
    ];
    let r = Decoder::new(patterns);
    assert_eq!(
        r.unwrap_err(),
        PatternError::DuplicatePattern {
            pattern: "6XNN".to_string(),
            existing: "SETR".to_string(),
            duplicate: "LOADI".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_duplicate_pattern_last_wins() -> Result<(), PatternError> {
    let patterns = vec![
        InstructionPattern::new("6XNN", "SETR")?,
        InstructionPattern::new("7XNN", "ADDI")?,
        InstructionPattern::new("6XNN", "LOADI")?,
    ];
    let decoder = Decoder::with_policy(patterns, CollisionPolicy::LastWins)?;
    assert_eq!(decoder.len(), 2);
    assert_eq!(
        decoder.decode(RawInstruction::from_word(0x6A12)).to_string(),
        "LOADI VA 0x12"
    );
    assert_eq!(
        decoder.decode(RawInstruction::from_word(0x7A12)).to_string(),
        "ADDI VA 0x12"
    );
    Ok(())
}

#[test]
fn test_same_digits_different_shape_do_not_collide() -> Result<(), PatternError> {
    // 0NNN and 00E0 overlap on 0x00E0, the earlier shape wins the lookup
    let patterns = vec![
        InstructionPattern::new("00E0", "CLEAR")?,
        InstructionPattern::new("0NNN", "INVOKE")?,
    ];
    let decoder = Decoder::new(patterns)?;
    assert_eq!(decoder.decode(RawInstruction::from_word(0x00E0)).to_string(), "CLEAR");
    assert_eq!(
        decoder.decode(RawInstruction::from_word(0x0999)).to_string(),
        "INVOKE 0x999"
    );
    Ok(())
}

#[test]
fn test_decoder_is_order_independent_without_collisions() -> Result<(), PatternError> {
    let forward = Decoder::new(
        INSTRUCTION_PATTERNS
            .iter()
            .map(|(hex, op_code)| InstructionPattern::new(hex, op_code))
            .collect::<Result<Vec<_>, _>>()?,
    )?;
    let backward = Decoder::new(
        INSTRUCTION_PATTERNS
            .iter()
            .rev()
            .map(|(hex, op_code)| InstructionPattern::new(hex, op_code))
            .collect::<Result<Vec<_>, _>>()?,
    )?;
    for word in (0..=u16::MAX).step_by(7) {
        let raw = RawInstruction::from_word(word);
        assert_eq!(forward.try_decode(raw), backward.try_decode(raw), "word={:04X}", word);
    }
    Ok(())
}

#[test]
fn test_empty_decoder_maps_everything_to_unknown() -> Result<(), PatternError> {
    let decoder = Decoder::new(Vec::new())?;
    assert!(decoder.is_empty());
    assert!(decoder.decode(RawInstruction::from_word(0x00E0)).is_unknown());
    Ok(())
}
