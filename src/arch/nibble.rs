#[cfg(test)]
#[path = "./nibble_test.rs"]
mod nibble_test;

/// splits a byte into its (high, low) nibbles
pub fn byte_to_nibbles(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & 0x0F)
}

/// big-endian: the first nibble is the most significant one
pub fn nibbles_to_int(nibbles: &[u8]) -> u32 {
    nibbles
        .iter()
        .fold(0, |acc, nibble| (acc << 4) | (*nibble as u32 & 0x0F))
}

/// renders the nibbles as hex, zero-padded to one digit per nibble.
/// `with_prefix` adds a leading `0x`.
pub fn nibbles_to_hex(nibbles: &[u8], with_prefix: bool, uppercase: bool) -> String {
    let value = nibbles_to_int(nibbles);
    let width = nibbles.len();
    let prefix = if with_prefix { "0x" } else { "" };
    if uppercase {
        format!("{}{:0width$X}", prefix, value, width = width)
    } else {
        format!("{}{:0width$x}", prefix, value, width = width)
    }
}

pub fn raw_bytes_to_int(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0, |acc, byte| (acc << 8) | *byte as u32)
}
