use std::fmt;

use common::{ByteCursor, ByteSink};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::Result;

/// Width assumed for attribute blobs when neither the document nor its
/// records say otherwise.
pub const DEFAULT_ATTR_SIZE: usize = 24;

/// Opaque attribute bytes, kept as one uppercase hex string in documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let text: String = self.0.iter().map(|b| format!("{b:02X}")).collect();
        serializer.serialize_str(&text)
    }
}

struct BlobVisitor;

impl Visitor<'_> for BlobVisitor {
    type Value = Blob;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string of hex digit pairs")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> core::result::Result<Blob, E> {
        let digits: Vec<u8> = value.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
        if digits.len() % 2 != 0 {
            return Err(E::custom("hex blob has an odd number of digits"));
        }
        digits
            .chunks(2)
            .map(|pair| {
                core::str::from_utf8(pair)
                    .ok()
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| E::custom(format!("invalid hex blob {value:?}")))
            })
            .collect::<core::result::Result<Vec<u8>, E>>()
            .map(Blob)
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_str(BlobVisitor)
    }
}

/// Width used when writing a table: the declared one, else the width of a
/// sample blob, else [`DEFAULT_ATTR_SIZE`].
pub fn resolve_width(declared: usize, sample: Option<&Blob>) -> usize {
    resolve_width_or(declared, sample, DEFAULT_ATTR_SIZE)
}

pub fn resolve_width_or(declared: usize, sample: Option<&Blob>, fallback: usize) -> usize {
    if declared > 0 {
        return declared;
    }
    sample
        .map(|blob| blob.0.len())
        .filter(|&len| len > 0)
        .unwrap_or(fallback)
}

pub(crate) fn read_blobs(
    cursor: &mut ByteCursor<'_>,
    count: usize,
    width: usize,
) -> Result<Vec<Blob>> {
    (0..count)
        .map(|_| -> Result<Blob> { Ok(Blob::from(cursor.read_bytes(width)?)) })
        .collect()
}

/// Writes exactly `count` blobs of `width` bytes; missing entries are zero.
pub(crate) fn write_blobs(sink: &mut ByteSink, blobs: &[Blob], count: usize, width: usize) {
    for index in 0..count {
        let data = blobs.get(index).map(Blob::as_bytes).unwrap_or_default();
        sink.write_blob(data, width);
    }
}
