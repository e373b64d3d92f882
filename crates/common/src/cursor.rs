use byteorder::{ByteOrder, LittleEndian};

use crate::{decode_fixed_str, Error, Result};

/// Bounds-checked little-endian reader over an immutable image.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Cursor positioned at an absolute offset.
    pub fn at(bytes: &'a [u8], pos: usize) -> Result<Self> {
        let mut cursor = Self::new(bytes);
        cursor.seek(pos)?;
        Ok(cursor)
    }

    pub fn image(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.bytes.len() {
            return Err(Error::SeekOutOfBounds {
                offset: pos,
                len: self.bytes.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        let target = self.pos.checked_add(count).ok_or(Error::IntegerOverflow)?;
        self.seek(target)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let slice = slice_at(self.bytes, self.pos, count)?;
        self.pos += count;
        Ok(slice)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(8)?))
    }

    pub fn read_i32_array<const N: usize>(&mut self) -> Result<[i32; N]> {
        let mut out = [0i32; N];
        for value in &mut out {
            *value = self.read_i32()?;
        }
        Ok(out)
    }

    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        let mut out = [0f32; N];
        for value in &mut out {
            *value = self.read_f32()?;
        }
        Ok(out)
    }

    pub fn read_f32_vec(&mut self, count: usize) -> Result<Vec<f32>> {
        (0..count).map(|_| self.read_f32()).collect()
    }

    /// Reads a `width`-byte field and decodes it up to the first NUL.
    pub fn read_fixed_str(&mut self, width: usize) -> Result<String> {
        Ok(decode_fixed_str(self.read_bytes(width)?))
    }
}

pub fn slice_at(bytes: &[u8], offset: usize, size: usize) -> Result<&[u8]> {
    let end = offset.checked_add(size).ok_or(Error::IntegerOverflow)?;
    bytes.get(offset..end).ok_or(Error::OutOfBounds {
        offset,
        size,
        len: bytes.len(),
    })
}

pub fn read_u32_at(bytes: &[u8], offset: usize) -> Result<u32> {
    Ok(LittleEndian::read_u32(slice_at(bytes, offset, 4)?))
}

pub fn read_i32_at(bytes: &[u8], offset: usize) -> Result<i32> {
    Ok(LittleEndian::read_i32(slice_at(bytes, offset, 4)?))
}

pub fn read_f32_at(bytes: &[u8], offset: usize) -> Result<f32> {
    Ok(LittleEndian::read_f32(slice_at(bytes, offset, 4)?))
}

/// Lenient read used by probing code: anything out of range reads as zero.
pub fn i32_at_or_zero(bytes: &[u8], offset: usize) -> i32 {
    read_i32_at(bytes, offset).unwrap_or(0)
}

pub fn f32_at_or_zero(bytes: &[u8], offset: usize) -> f32 {
    read_f32_at(bytes, offset).unwrap_or(0.0)
}
