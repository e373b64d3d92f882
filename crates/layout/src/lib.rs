//! Adaptive layout resolution for version-drifted SNO files.
//!
//! None of these formats carries a version tag, so every variable part of a
//! file is located by probing: a directory pointer with a default fallback,
//! zero preambles, blob widths inferred from the next record's name, a
//! scored scan over alignment shifts for the monster trailer, and bounded
//! walks over `(pointer, size)` chains. The writer side mirrors it with a
//! cursor-based [`BlockWriter`] that relocates or preserves block offsets.

pub mod directory;
pub mod error;
pub mod header;
pub mod name;
pub mod options;
pub mod payload;
pub mod raw;
pub mod scan;
pub mod spawn;
pub mod stride;
pub mod writer;

pub use directory::{detect_preamble, locate, DirectoryPointer, PreambleRun, RecordWindow};
pub use error::Error;
pub use header::{ExtendedHeader, SnoHeader};
pub use name::is_plausible_name;
pub use options::LayoutOptions;
pub use payload::{resolve, ItemStructTag, ResolvedPayload, MAX_CHAIN_DEPTH};
pub use raw::{is_inside, BlockHeader, RawFormat, RawRegion};
pub use scan::{MonsterLayoutCandidate, MonsterTrailer, TrailerSource};
pub use spawn::{SpawnGroup, SpawnItem};
pub use stride::{guess_stride_by_divisibility, infer_width, whole_records};
pub use writer::{BlockRef, BlockWriter, ConflictPolicy, OffsetPolicy};

pub type Result<T> = core::result::Result<T, Error>;

/// Converts a buffer offset or length into the `i32` the formats store.
pub fn to_i32(value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::IntegerOverflow)
}

#[cfg(test)]
mod tests;
