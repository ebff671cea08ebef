use crate::arch::chip8::raw::RawInstruction;
use crate::error::DasmError;

#[test]
fn test_new_ok() -> Result<(), DasmError> {
    let cases: [(&[u8], u16, [u8; 4]); 3] = [
        (&[0x00, 0xE0], 0x00E0, [0, 0, 0xE, 0]),
        (&[0x6A, 0x12], 0x6A12, [6, 0xA, 1, 2]),
        (&[0xFF, 0xFF], 0xFFFF, [0xF, 0xF, 0xF, 0xF]),
    ];
    for (bytes, word, nibbles) in cases {
        let raw = RawInstruction::new(bytes)?;
        assert_eq!(raw.word(), word);
        assert_eq!(raw.bytes(), bytes);
        assert_eq!(raw.as_nibbles(), nibbles);
        assert_eq!(raw, RawInstruction::from_word(word));
    }
    Ok(())
}

#[test]
fn test_new_fails() {
    let cases: [&[u8]; 3] = [&[], &[0x12], &[0x12, 0x34, 0x56]];
    for bytes in cases {
        let r = RawInstruction::new(bytes);
        match r {
            Err(DasmError::InvalidRawInstruction { len }) => assert_eq!(len, bytes.len()),
            other => panic!("expected InvalidRawInstruction for {:?}, got {:?}", bytes, other),
        }
    }
}

#[test]
fn test_formatting() {
    let raw = RawInstruction::from_word(0x00E0);
    assert_eq!(format!("{:?}", raw), "RawInstruction<0x00E0>");
    assert_eq!(raw.to_string(), "0x00E0");
}

#[test]
fn test_conversions() -> Result<(), DasmError> {
    let bytes: &[u8] = &[0xD1, 0x25];
    assert_eq!(RawInstruction::try_from(bytes)?, RawInstruction::from(0xD125));
    assert!(RawInstruction::try_from(&bytes[..1]).is_err());
    Ok(())
}
