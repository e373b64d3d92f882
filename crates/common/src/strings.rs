/// Bytes of a fixed field up to (not including) the first NUL.
pub fn trim_at_nul(field: &[u8]) -> &[u8] {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    &field[..end]
}

pub fn decode_fixed_str(field: &[u8]) -> String {
    String::from_utf8_lossy(trim_at_nul(field)).into_owned()
}

pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// Lower-cased multiplicative name hash used by the balance tables.
pub fn name_hash(name: &str) -> i32 {
    name.to_lowercase()
        .chars()
        .fold(0i32, |h, ch| h.wrapping_mul(0x1003F).wrapping_add(ch as i32))
}

/// Case-sensitive `h * 33 + c` hash keying item and item-type records.
pub fn item_hash(name: &str) -> i32 {
    name.chars()
        .fold(0i32, |h, ch| (h << 5).wrapping_add(h).wrapping_add(ch as i32))
}
