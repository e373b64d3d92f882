use common::{is_printable, trim_at_nul};

/// Width of the name field leading every table record.
pub const NAME_FIELD_WIDTH: usize = 256;

/// Whether a fixed NUL-terminated field looks like a real name: non-empty and
/// at least `max(3, 80%)` of its bytes printable ASCII.
pub fn is_plausible_name(field: &[u8]) -> bool {
    let name = trim_at_nul(field);
    if name.is_empty() {
        return false;
    }
    let printable = name.iter().filter(|&&b| is_printable(b)).count();
    printable >= (name.len() * 4 / 5).max(3)
}

/// Slice of up to `width` bytes at `offset`, clipped to the image.
pub fn field_at(image: &[u8], offset: usize, width: usize) -> &[u8] {
    let start = offset.min(image.len());
    let end = offset.saturating_add(width).min(image.len());
    &image[start..end]
}
