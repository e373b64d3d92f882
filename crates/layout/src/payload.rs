use common::{read_i32_at, read_u32_at};
use serde::{Deserialize, Serialize};

/// Hop limit for `(pointer, size)` chains.
pub const MAX_CHAIN_DEPTH: usize = 3;
pub const CHAIN_HEADER_SIZE: usize = 8;

pub const MINION_ITEM_SIZE: usize = 20;
pub const ACTOR_ITEM_SIZE: usize = 8;

/// Shape of the items stored in a spawn-group payload.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemStructTag {
    /// SNOSpawn, SpawnCountMin, SpawnCountMax, SpawnSpreadMin, SpawnSpreadMax.
    Minion20,
    /// SNOActor, SpawnCount.
    ActorCount8,
    #[default]
    Unknown,
}

impl ItemStructTag {
    pub fn from_payload_size(size: usize) -> Self {
        if size % MINION_ITEM_SIZE == 0 {
            Self::Minion20
        } else if size % ACTOR_ITEM_SIZE == 0 {
            Self::ActorCount8
        } else {
            Self::Unknown
        }
    }

    /// Sizes divisible by 40 fit both shapes; the declared item count decides.
    pub fn refine_for_count(self, size: usize, count: i32) -> Self {
        let Ok(count) = usize::try_from(count) else {
            return self;
        };
        if self == Self::Minion20
            && size % ACTOR_ITEM_SIZE == 0
            && size / ACTOR_ITEM_SIZE == count
            && size / MINION_ITEM_SIZE != count
        {
            Self::ActorCount8
        } else {
            self
        }
    }

    pub fn item_size(self) -> Option<usize> {
        match self {
            Self::Minion20 => Some(MINION_ITEM_SIZE),
            Self::ActorCount8 => Some(ACTOR_ITEM_SIZE),
            Self::Unknown => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedPayload {
    pub payload_ptr: usize,
    pub payload_size: usize,
    pub header_ptr: usize,
    pub header_size: usize,
    /// Hops taken, tombstones included.
    pub depth: usize,
    pub tag: ItemStructTag,
}

impl ResolvedPayload {
    pub fn item_count(&self) -> Option<usize> {
        self.tag.item_size().map(|size| self.payload_size / size)
    }
}

/// Follows a `(pointer, size)` chain to the payload it describes.
///
/// Every hop reads a header at the current position. A zero size is a
/// tombstone and moves on to the next 8 bytes. A pointer equal to the header
/// position is self-relative and the payload follows the header; any other
/// in-bounds pointer is absolute. Anything else ends the walk unresolved, as
/// does running out of hops.
pub fn resolve(
    image: &[u8],
    candidate_ptr: i32,
    candidate_size: i32,
    max_depth: usize,
) -> Option<ResolvedPayload> {
    let len = image.len();
    if candidate_size < 0 {
        return None;
    }
    let mut curr = usize::try_from(candidate_ptr)
        .ok()
        .filter(|&ptr| ptr > 0 && ptr < len)?;

    for depth in 1..=max_depth {
        let pointer = read_u32_at(image, curr).ok()? as usize;
        let size = read_i32_at(image, curr + 4).ok()?;
        if size == 0 {
            curr += CHAIN_HEADER_SIZE;
            continue;
        }
        let size = usize::try_from(size).ok()?;

        let self_relative_end = curr + CHAIN_HEADER_SIZE + size;
        let payload_ptr = if pointer == curr && self_relative_end <= len {
            curr + CHAIN_HEADER_SIZE
        } else if pointer < len && pointer + size <= len {
            pointer
        } else {
            return None;
        };

        return Some(ResolvedPayload {
            payload_ptr,
            payload_size: size,
            header_ptr: curr,
            header_size: CHAIN_HEADER_SIZE,
            depth,
            tag: ItemStructTag::from_payload_size(size),
        });
    }
    None
}
