//! `.mon` monster definitions.
//!
//! A monster is a 1188-byte fixed part (SNO header, flags, stats, skills,
//! treasure and AI references, tag-map header) followed by a trailer whose
//! position drifted between builds. [`MonsterDocument::read`] locates the
//! trailer with the layout scanner; [`MonsterDocument::write`] always emits
//! the canonical layout with the trailer at `0x4B8`.

pub mod document;
pub mod error;

mod reader;
mod writer;

pub use document::{
    HealthDrop, LayoutReport, MonsterDef, MonsterDocument, MonsterSkillDeclaration,
    SkillDeclaration,
};
pub use error::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Zero words between `PowerType` and the tag-map header.
pub const TAG_MAP_PAD: usize = 12;
/// Eight-word tag-map header; offset at `+12`, size at `+16`.
pub const TAG_MAP_HEADER_OFFSET: usize = 1156;
/// End of the fixed part and first trailer hypothesis.
pub const TRAILER_SCAN_BASE: usize = TAG_MAP_HEADER_OFFSET + 32;
/// End of the canonical trailer (three tail words behind the name).
pub const TRAILER_END: usize = layout::scan::LEGACY_TAIL_OFFSET + 12;

#[cfg(test)]
mod tests;
