use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result};

/// Growable little-endian output image.
///
/// The cursor may be moved anywhere; writing past the current end grows the
/// buffer and zero-fills the gap.
#[derive(Clone, Debug, Default)]
pub struct ByteSink {
    buf: Vec<u8>,
    pos: usize,
}

impl ByteSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn seek_end(&mut self) {
        self.pos = self.buf.len();
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        let end = self.pos + data.len();
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(data);
        self.pos = end;
    }

    pub fn write_u32(&mut self, value: u32) {
        let mut raw = [0u8; 4];
        LittleEndian::write_u32(&mut raw, value);
        self.write_bytes(&raw);
    }

    pub fn write_i32(&mut self, value: i32) {
        let mut raw = [0u8; 4];
        LittleEndian::write_i32(&mut raw, value);
        self.write_bytes(&raw);
    }

    pub fn write_f32(&mut self, value: f32) {
        let mut raw = [0u8; 4];
        LittleEndian::write_f32(&mut raw, value);
        self.write_bytes(&raw);
    }

    pub fn write_i64(&mut self, value: i64) {
        let mut raw = [0u8; 8];
        LittleEndian::write_i64(&mut raw, value);
        self.write_bytes(&raw);
    }

    pub fn write_i32_slice(&mut self, values: &[i32]) {
        for value in values {
            self.write_i32(*value);
        }
    }

    pub fn write_f32_slice(&mut self, values: &[f32]) {
        for value in values {
            self.write_f32(*value);
        }
    }

    pub fn write_zeros(&mut self, count: usize) {
        let end = self.pos + count;
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].fill(0);
        self.pos = end;
    }

    /// Zero-fills up to `offset`. No-op when the cursor is already there or past it.
    pub fn pad_to(&mut self, offset: usize) {
        if offset > self.pos {
            self.write_zeros(offset - self.pos);
        }
    }

    pub fn align_to(&mut self, alignment: usize) {
        if alignment > 1 {
            let rem = self.pos % alignment;
            if rem != 0 {
                self.write_zeros(alignment - rem);
            }
        }
    }

    /// Writes `value` into a `width`-byte field, truncated so a NUL always fits.
    pub fn write_fixed_str(&mut self, value: &str, width: usize) {
        self.write_fixed_bytes(value.as_bytes(), width);
    }

    /// Copies `data` into a `width`-byte NUL-terminated field.
    pub fn write_fixed_bytes(&mut self, data: &[u8], width: usize) {
        if width == 0 {
            return;
        }
        let used = data.len().min(width - 1);
        self.write_bytes(&data[..used]);
        self.write_zeros(width - used);
    }

    /// Writes `data` into exactly `width` bytes, zero padded or truncated.
    pub fn write_blob(&mut self, data: &[u8], width: usize) {
        let used = data.len().min(width);
        self.write_bytes(&data[..used]);
        self.write_zeros(width - used);
    }

    /// Overwrites an already written word without moving the cursor.
    pub fn patch_i32_at(&mut self, offset: usize, value: i32) -> Result<()> {
        let end = offset.checked_add(4).ok_or(Error::IntegerOverflow)?;
        let len = self.buf.len();
        let slot = self.buf.get_mut(offset..end).ok_or(Error::OutOfBounds {
            offset,
            size: 4,
            len,
        })?;
        LittleEndian::write_i32(slot, value);
        Ok(())
    }

    pub fn patch_u32_at(&mut self, offset: usize, value: u32) -> Result<()> {
        self.patch_i32_at(offset, value as i32)
    }
}
