//! `.qst` quest definitions.
//!
//! The fixed part is fully decoded. The four blocks it points at (unassigned
//! objectives, unassigned fail conditions, steps, completion steps) hold
//! absolute pointers of their own, so they are carried as raw regions and
//! written back at their recorded offsets whenever that is still possible.

pub mod error;

mod writer;

use common::{is_printable, ByteCursor};
use layout::{to_i32, BlockHeader, RawRegion, SnoHeader};
use log::debug;
use serde::{Deserialize, Serialize};

pub use error::Error;
pub use writer::{BLOCK_ALIGN, COMPLETION_STEP_SIZE, QUEST_SNO_TYPE, STEP_SIZE};

pub type Result<T> = core::result::Result<T, Error>;

/// Zero words in front of each `(pointer, size)` reference.
pub const REFERENCE_PAD: usize = 8;
pub const REFERENCE_COUNT: usize = 4;
/// Start of the four `(pad, pointer, size)` references.
pub const REFERENCES_OFFSET: usize = SnoHeader::SIZE + 9 * 4;
pub const SNO_COUNT: usize = 18;
/// Unused words between the bounty's `I0` and `F0`.
pub const BOUNTY_PAD_WORDS: usize = 19;
pub const QUEST_FIXED_SIZE: usize = 300;
pub const MIN_QUEST_STRING_LEN: usize = 4;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(from = "i32", into = "i32")]
pub enum QuestType {
    #[default]
    MainQuest,
    Event,
    Challenge,
    Bounty,
    HoradricQuest,
    SetDungeon,
    SetDungeonBonus,
    SetDungeonMastery,
    SetDungeonTracker,
    Other(i32),
}

impl From<i32> for QuestType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::MainQuest,
            2 => Self::Event,
            4 => Self::Challenge,
            5 => Self::Bounty,
            6 => Self::HoradricQuest,
            7 => Self::SetDungeon,
            8 => Self::SetDungeonBonus,
            9 => Self::SetDungeonMastery,
            10 => Self::SetDungeonTracker,
            other => Self::Other(other),
        }
    }
}

impl From<QuestType> for i32 {
    fn from(value: QuestType) -> Self {
        match value {
            QuestType::MainQuest => 0,
            QuestType::Event => 2,
            QuestType::Challenge => 4,
            QuestType::Bounty => 5,
            QuestType::HoradricQuest => 6,
            QuestType::SetDungeon => 7,
            QuestType::SetDungeonBonus => 8,
            QuestType::SetDungeonMastery => 9,
            QuestType::SetDungeonTracker => 10,
            QuestType::Other(other) => other,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(from = "i32", into = "i32")]
pub enum QuestMode {
    #[default]
    None,
    TimedDungeon,
    WaveFight,
    Horde,
    Zapper,
    GoblinHunt,
    Other(i32),
}

impl From<i32> for QuestMode {
    fn from(value: i32) -> Self {
        match value {
            -1 => Self::None,
            0 => Self::TimedDungeon,
            1 => Self::WaveFight,
            2 => Self::Horde,
            3 => Self::Zapper,
            4 => Self::GoblinHunt,
            other => Self::Other(other),
        }
    }
}

impl From<QuestMode> for i32 {
    fn from(value: QuestMode) -> Self {
        match value {
            QuestMode::None => -1,
            QuestMode::TimedDungeon => 0,
            QuestMode::WaveFight => 1,
            QuestMode::Horde => 2,
            QuestMode::Zapper => 3,
            QuestMode::GoblinHunt => 4,
            QuestMode::Other(other) => other,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UnassignedStep {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "I0")]
    pub i0: i32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Bounty {
    pub act_data: i32,
    #[serde(rename = "Type")]
    pub r#type: i32,
    #[serde(rename = "I0")]
    pub i0: i32,
    #[serde(rename = "F0")]
    pub f0: f32,
}

/// Printable run found somewhere in the image. Informational only.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct StringAtOffset {
    pub offset: usize,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct QuestDocument {
    pub header: SnoHeader,
    pub quest_type: QuestType,
    pub number_of_steps: i32,
    pub number_of_completion_steps: i32,
    #[serde(rename = "I2")]
    pub i2: i32,
    #[serde(rename = "I3")]
    pub i3: i32,
    #[serde(rename = "I4")]
    pub i4: i32,
    #[serde(rename = "I5")]
    pub i5: i32,
    pub unassigned_step: UnassignedStep,

    pub unassigned_objectives: RawRegion,
    pub unassigned_fail_conditions: RawRegion,
    #[serde(rename = "QuestStepsRaw")]
    pub quest_steps: RawRegion,
    #[serde(rename = "QuestCompletionStepsRaw")]
    pub quest_completion_steps: RawRegion,

    #[serde(rename = "SNOs")]
    pub snos: Vec<i32>,
    #[serde(rename = "WorldSNO")]
    pub world_sno: i32,
    pub mode: QuestMode,
    pub bounty: Bounty,

    pub strings: Vec<StringAtOffset>,
    /// Bytes behind the last referenced block.
    pub tail_raw: RawRegion,
}

/// Printable runs of at least [`MIN_QUEST_STRING_LEN`] bytes over the whole
/// image, in file order. A run need not be NUL terminated; the byte that
/// ends it is never the start of the next one.
pub fn printable_strings(image: &[u8]) -> Vec<StringAtOffset> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < image.len() {
        if !is_printable(image[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < image.len() && is_printable(image[i]) {
            i += 1;
        }
        if i - start >= MIN_QUEST_STRING_LEN {
            out.push(StringAtOffset {
                offset: start,
                value: String::from_utf8_lossy(&image[start..i]).into_owned(),
            });
        }
        i += 1;
    }
    out
}

impl QuestDocument {
    pub fn read(image: &[u8]) -> Result<Self> {
        let mut c = ByteCursor::new(image);
        let header = SnoHeader::read(&mut c)?;
        let [quest_type, number_of_steps, number_of_completion_steps, i2, i3, i4, i5] =
            c.read_i32_array::<7>()?;
        let [id, i0] = c.read_i32_array::<2>()?;

        let mut references = [BlockHeader::default(); REFERENCE_COUNT];
        for reference in &mut references {
            c.skip(REFERENCE_PAD)?;
            let [offset, size] = c.read_i32_array::<2>()?;
            *reference = BlockHeader { offset, size };
        }

        let snos = (0..SNO_COUNT)
            .map(|_| c.read_i32())
            .collect::<common::Result<Vec<_>>>()?;
        let [world_sno, mode] = c.read_i32_array::<2>()?;
        let [act_data, bounty_type, bounty_i0] = c.read_i32_array::<3>()?;
        c.skip(BOUNTY_PAD_WORDS * 4)?;
        let f0 = c.read_f32()?;
        debug_assert_eq!(c.position(), QUEST_FIXED_SIZE);

        let [objectives, fail_conditions, steps, completion_steps] =
            references.map(|block| RawRegion::block(image, block.offset, block.size, true));
        let tail_raw = tail_region(image, &references)?;

        debug!(
            "quest {}: {} steps, {} completion steps, tail {:?}",
            header.sno_id, number_of_steps, number_of_completion_steps, tail_raw.format
        );

        Ok(Self {
            header,
            quest_type: quest_type.into(),
            number_of_steps,
            number_of_completion_steps,
            i2,
            i3,
            i4,
            i5,
            unassigned_step: UnassignedStep { id, i0 },
            unassigned_objectives: objectives,
            unassigned_fail_conditions: fail_conditions,
            quest_steps: steps,
            quest_completion_steps: completion_steps,
            snos,
            world_sno,
            mode: mode.into(),
            bounty: Bounty {
                act_data,
                r#type: bounty_type,
                i0: bounty_i0,
                f0,
            },
            strings: printable_strings(image),
            tail_raw,
        })
    }
}

/// Everything after the furthest referenced block, or a missing region when
/// no block lies inside the image or nothing follows them.
fn tail_region(image: &[u8], references: &[BlockHeader]) -> Result<RawRegion> {
    let total = image.len();
    let start = references
        .iter()
        .filter(|block| block.is_inside(total))
        .map(|block| block.offset as usize + block.size as usize)
        .max();
    match start {
        Some(start) if start < total => Ok(RawRegion::section(
            image,
            to_i32(start)?,
            to_i32(total - start)?,
            false,
        )),
        _ => Ok(RawRegion::default()),
    }
}

#[cfg(test)]
mod tests;
