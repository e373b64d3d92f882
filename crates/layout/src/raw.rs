use std::collections::HashSet;
use std::fmt;

use common::{is_printable, read_u32_at};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Minimum length of a NUL-terminated string pulled out of a raw region.
pub const MIN_STRING_LEN: usize = 3;

/// Whether `[offset, offset + size)` is a non-empty range inside the image.
pub fn is_inside(total: usize, offset: i32, size: i32) -> bool {
    offset > 0 && size > 0 && i64::from(offset) + i64::from(size) <= total as i64
}

/// `(offset, size)` of a block as found in the source image.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BlockHeader {
    pub offset: i32,
    pub size: i32,
}

impl BlockHeader {
    pub fn is_inside(&self, total: usize) -> bool {
        is_inside(total, self.offset, self.size)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RawFormat {
    U32Hex,
    BytesHex,
    #[serde(rename = "U32Hex+Strings")]
    U32HexStrings,
    #[serde(rename = "BytesHex+Strings")]
    BytesHexStrings,
    #[default]
    Missing,
}

/// Forensic dump of a byte range nothing else could interpret.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawRegion {
    pub offset: i32,
    pub size_bytes: i32,
    pub format: RawFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u32_hex: Option<Vec<HexWord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_hex: Option<Vec<HexByte>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<Vec<String>>,
}

impl RawRegion {
    /// Dumps a pointed-to block; a zero offset counts as absent.
    pub fn block(image: &[u8], offset: i32, size: i32, with_strings: bool) -> Self {
        if is_inside(image.len(), offset, size) {
            Self::dump(image, offset, size, with_strings)
        } else {
            Self::missing(offset, size)
        }
    }

    /// Dumps a computed section of the file, optionally with its strings.
    pub fn section(image: &[u8], offset: i32, size: i32, with_strings: bool) -> Self {
        let fits = offset >= 0
            && size > 0
            && i64::from(offset) + i64::from(size) <= image.len() as i64;
        if fits {
            Self::dump(image, offset, size, with_strings)
        } else {
            Self::missing(offset, size)
        }
    }

    /// Region holding `data` as if it sat at `offset`.
    pub fn from_bytes(offset: i32, data: &[u8]) -> Self {
        match i32::try_from(data.len()) {
            Ok(size) if size > 0 => {
                let mut region = Self::dump(data, 0, size, false);
                region.offset = offset;
                region
            }
            _ => Self::missing(offset, 0),
        }
    }

    pub fn missing(offset: i32, size: i32) -> Self {
        Self {
            offset,
            size_bytes: size,
            ..Self::default()
        }
    }

    pub fn is_missing(&self) -> bool {
        self.format == RawFormat::Missing
    }

    /// Bytes carried by the dump, `None` for a missing region.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        if let Some(words) = &self.u32_hex {
            return Some(words.iter().flat_map(|w| w.0.to_le_bytes()).collect());
        }
        self.bytes_hex
            .as_ref()
            .map(|bytes| bytes.iter().map(|b| b.0).collect())
    }

    fn dump(image: &[u8], offset: i32, size: i32, with_strings: bool) -> Self {
        // Callers have checked the range.
        let start = offset as usize;
        let end = start + size as usize;
        let data = &image[start..end];
        let word_aligned = data.len() % 4 == 0;

        let format = match (word_aligned, with_strings) {
            (true, false) => RawFormat::U32Hex,
            (true, true) => RawFormat::U32HexStrings,
            (false, false) => RawFormat::BytesHex,
            (false, true) => RawFormat::BytesHexStrings,
        };
        let u32_hex = word_aligned.then(|| {
            (start..end)
                .step_by(4)
                .filter_map(|at| read_u32_at(image, at).ok())
                .map(HexWord)
                .collect()
        });
        let bytes_hex = (!word_aligned).then(|| data.iter().copied().map(HexByte).collect());

        Self {
            offset,
            size_bytes: size,
            format,
            u32_hex,
            bytes_hex,
            strings: with_strings.then(|| extract_ascii_strings(data, MIN_STRING_LEN)),
        }
    }
}

/// Printable runs of at least `min_len` bytes that end in a NUL, first
/// occurrence order, duplicates removed.
pub fn extract_ascii_strings(data: &[u8], min_len: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let start = i;
        while i < data.len() && is_printable(data[i]) {
            i += 1;
        }
        if i - start >= min_len.max(1) && data.get(i) == Some(&0) {
            let value = String::from_utf8_lossy(&data[start..i]).into_owned();
            if seen.insert(value.clone()) {
                out.push(value);
            }
        }
        i += 1;
    }
    out
}

/// Little-endian word rendered as `0x%08X`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexWord(pub u32);

/// Byte rendered as `%02X`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexByte(pub u8);

impl Serialize for HexWord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{:08X}", self.0))
    }
}

impl Serialize for HexByte {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:02X}", self.0))
    }
}

struct HexVisitor {
    max: u64,
}

impl Visitor<'_> for HexVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a hex string or an integer no larger than {:#x}", self.max)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        if value > self.max {
            return Err(E::custom(format!("{value:#x} is out of range")));
        }
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        let value = u64::try_from(value).map_err(|_| E::custom("negative hex value"))?;
        self.visit_u64(value)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        let parsed = u64::from_str_radix(digits, 16)
            .map_err(|_| E::custom(format!("invalid hex value {value:?}")))?;
        self.visit_u64(parsed)
    }
}

impl<'de> Deserialize<'de> for HexWord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = deserializer.deserialize_any(HexVisitor {
            max: u64::from(u32::MAX),
        })?;
        Ok(Self(value as u32))
    }
}

impl<'de> Deserialize<'de> for HexByte {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = deserializer.deserialize_any(HexVisitor {
            max: u64::from(u8::MAX),
        })?;
        Ok(Self(value as u8))
    }
}
