//! Recovery of the monster trailer.
//!
//! The trailer (spawn-group counts and block, 128-byte name, three tail
//! words) moved between builds by up to 24 bytes. Each alignment shift is a
//! scored hypothesis; the best one is taken if its name is plausible, and the
//! fixed legacy offsets are used otherwise.

use common::{decode_fixed_str, i32_at_or_zero};
use log::{debug, warn};

use crate::name::{field_at, is_plausible_name};
use crate::raw::is_inside;
use crate::{Error, Result};

pub const SHIFT_STEP: usize = 4;
pub const MAX_SHIFT: usize = 24;
pub const LEGACY_TRAILER_OFFSET: usize = 0x4B8;
pub const LEGACY_NAME_OFFSET: usize = 0x4D0;
pub const LEGACY_TAIL_OFFSET: usize = 0x550;
pub const MONSTER_NAME_WIDTH: usize = 128;
pub const SPAWN_GROUP_SIZE: usize = 24;
/// Scores below this mean no candidate had a plausible name.
pub const ACCEPT_SCORE: i32 = 50;

const NAME_SCORE: i32 = 50;
const GROUPS_SCORE: i32 = 30;
const CANONICAL_OFFSET_SCORE: i32 = 20;
/// Words before the name: minion count, two reserved, champion count, groups pair.
const TRAILER_HEAD_SIZE: usize = 24;

/// Trailer fields in the shape both parsing paths produce.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonsterTrailer {
    pub minion_count: i32,
    /// Champion spawn-group block `(offset, size)` in current builds.
    pub reserved: [i32; 2],
    pub champion_count: i32,
    pub groups_offset: i32,
    pub groups_size: i32,
    pub name_offset: usize,
    pub name: String,
    pub tail: [i32; 3],
}

impl MonsterTrailer {
    /// Reads the trailer whose first word sits at `at`. Out-of-range words read as zero.
    pub fn read_at(image: &[u8], at: usize) -> Self {
        let word = |index: usize| i32_at_or_zero(image, at + index * 4);
        let name_offset = at + TRAILER_HEAD_SIZE;
        let tail_offset = name_offset + MONSTER_NAME_WIDTH;
        Self {
            minion_count: word(0),
            reserved: [word(1), word(2)],
            champion_count: word(3),
            groups_offset: word(4),
            groups_size: word(5),
            name_offset,
            name: decode_fixed_str(field_at(image, name_offset, MONSTER_NAME_WIDTH)),
            tail: [
                i32_at_or_zero(image, tail_offset),
                i32_at_or_zero(image, tail_offset + 4),
                i32_at_or_zero(image, tail_offset + 8),
            ],
        }
    }

    /// Fixed-offset layout of the oldest builds.
    pub fn legacy(image: &[u8]) -> Self {
        Self::read_at(image, LEGACY_TRAILER_OFFSET)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterLayoutCandidate {
    pub shift: usize,
    pub trailer: MonsterTrailer,
    pub name_ok: bool,
    pub groups_ok: bool,
    pub score: i32,
}

impl MonsterLayoutCandidate {
    pub fn at(image: &[u8], base: usize, shift: usize) -> Self {
        let trailer = MonsterTrailer::read_at(image, base + shift);
        let name_field = field_at(image, trailer.name_offset, MONSTER_NAME_WIDTH);
        let name_ok = is_plausible_name(name_field);
        let groups_ok = trailer.groups_size == 0
            || (is_inside(image.len(), trailer.groups_offset, trailer.groups_size)
                && trailer.groups_size % SPAWN_GROUP_SIZE as i32 == 0);

        let mut score = -(shift as i32);
        if name_ok {
            score += NAME_SCORE;
        }
        if groups_ok {
            score += GROUPS_SCORE;
        }
        if trailer.name_offset == LEGACY_NAME_OFFSET {
            score += CANONICAL_OFFSET_SCORE;
        }

        Self {
            shift,
            trailer,
            name_ok,
            groups_ok,
            score,
        }
    }

    /// Plausible name, sane groups and the canonical name offset.
    pub fn is_maximal(&self) -> bool {
        self.name_ok && self.groups_ok && self.trailer.name_offset == LEGACY_NAME_OFFSET
    }
}

/// Every hypothesis the scanner considers, smallest shift first.
pub fn candidates(
    image: &[u8],
    base: usize,
) -> impl Iterator<Item = MonsterLayoutCandidate> + '_ {
    (0..=MAX_SHIFT)
        .step_by(SHIFT_STEP)
        .map(move |shift| MonsterLayoutCandidate::at(image, base, shift))
}

/// Highest score wins and ties keep the smaller shift. A maximal match stops
/// the walk.
pub fn select_best<I>(candidates: I) -> Option<MonsterLayoutCandidate>
where
    I: IntoIterator<Item = MonsterLayoutCandidate>,
{
    let mut best: Option<MonsterLayoutCandidate> = None;
    for candidate in candidates {
        let maximal = candidate.is_maximal();
        if best.as_ref().map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
        if maximal {
            break;
        }
    }
    best
}

/// Best trailer hypothesis around `base`. Never fails; see [`accept`].
pub fn scan(image: &[u8], base: usize) -> MonsterLayoutCandidate {
    select_best(candidates(image, base))
        .unwrap_or_else(|| MonsterLayoutCandidate::at(image, base, 0))
}

pub fn accept(candidate: MonsterLayoutCandidate) -> Result<MonsterLayoutCandidate> {
    if candidate.score < ACCEPT_SCORE {
        return Err(Error::AmbiguousLayout {
            best_score: candidate.score,
        });
    }
    Ok(candidate)
}

/// How a trailer was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrailerSource {
    Scanned { shift: usize, score: i32 },
    LegacyForced,
    LegacyFallback { best_score: i32 },
}

/// Scans for the trailer, dropping to the legacy offsets when forced or
/// when no hypothesis is acceptable.
pub fn resolve_trailer(
    image: &[u8],
    base: usize,
    force_legacy: bool,
) -> (MonsterTrailer, TrailerSource) {
    if force_legacy {
        return (MonsterTrailer::legacy(image), TrailerSource::LegacyForced);
    }
    match accept(scan(image, base)) {
        Ok(candidate) => {
            debug!(
                "monster trailer at shift {} (score {})",
                candidate.shift, candidate.score
            );
            let source = TrailerSource::Scanned {
                shift: candidate.shift,
                score: candidate.score,
            };
            (candidate.trailer, source)
        }
        Err(err) => {
            let best_score = match &err {
                Error::AmbiguousLayout { best_score } => *best_score,
                _ => i32::MIN,
            };
            warn!("{err}, using legacy offsets");
            (
                MonsterTrailer::legacy(image),
                TrailerSource::LegacyFallback { best_score },
            )
        }
    }
}
