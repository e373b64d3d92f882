use crate::writer::{ConflictPolicy, OffsetPolicy};

/// Behaviour switches resolved once by the caller and passed into every
/// reader and writer call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Skip the trailer scan and read monster trailers at fixed offsets.
    pub force_legacy_monster: bool,
    /// Re-emit variable blocks at their recorded offsets.
    pub preserve_offsets: bool,
    /// With `preserve_offsets`, relocate a block instead of failing when its
    /// recorded offset is already behind the write cursor.
    pub relocate_on_conflict: bool,
}

impl LayoutOptions {
    pub fn offset_policy(&self) -> OffsetPolicy {
        if !self.preserve_offsets {
            return OffsetPolicy::Relocate;
        }
        let on_conflict = if self.relocate_on_conflict {
            ConflictPolicy::Relocate
        } else {
            ConflictPolicy::Fail
        };
        OffsetPolicy::Preserve { on_conflict }
    }
}
