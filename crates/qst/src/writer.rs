use common::ByteSink;
use layout::header::DEAD_BEEF;
use layout::writer::recorded_offset;
use layout::{BlockRef, BlockWriter, ConflictPolicy, OffsetPolicy, RawRegion, SnoHeader};

use crate::{
    QuestDocument, Result, BOUNTY_PAD_WORDS, QUEST_FIXED_SIZE, REFERENCES_OFFSET,
    REFERENCE_COUNT, REFERENCE_PAD, SNO_COUNT,
};

/// SNO type written when the document leaves it at zero.
pub const QUEST_SNO_TYPE: i32 = 135;
/// Default bytes per step when the steps block has no recorded content.
pub const STEP_SIZE: usize = 176;
pub const COMPLETION_STEP_SIZE: usize = 24;
/// Boundary for blocks that could not keep their recorded offset.
pub const BLOCK_ALIGN: usize = 16;

pub(crate) fn reference_slot(index: usize) -> usize {
    REFERENCES_OFFSET + index * (REFERENCE_PAD + 8) + REFERENCE_PAD
}

fn count(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Places a raw block at its recorded offset when the dump still holds the
/// recorded size, otherwise aligned at the cursor. An empty dump is replaced
/// by `default_size` zero bytes.
fn place_raw_block(
    writer: &mut BlockWriter,
    label: &str,
    region: &RawRegion,
    default_size: usize,
) -> Result<BlockRef> {
    let bytes = region.bytes().unwrap_or_default();
    let intact = usize::try_from(region.size_bytes).ok() == Some(bytes.len());
    let requested = recorded_offset(region.offset).filter(|_| intact && !bytes.is_empty());
    let bytes = if bytes.is_empty() {
        vec![0; default_size]
    } else {
        bytes
    };
    Ok(writer.place_block_aligned(label, requested, BLOCK_ALIGN, &bytes)?)
}

impl QuestDocument {
    /// Encodes the quest. Referenced blocks go back to their recorded
    /// offsets while the layout stays forward-only and are relocated to the
    /// next 16-byte boundary otherwise; the tail follows at its own offset.
    pub fn write(&self) -> Result<Vec<u8>> {
        let mut writer = BlockWriter::new(OffsetPolicy::Preserve {
            on_conflict: ConflictPolicy::Relocate,
        });
        writer.write_record("quest fixed fields", QUEST_FIXED_SIZE, |sink| {
            self.write_fixed(sink)
        })?;

        let blocks = [
            ("unassigned objectives", &self.unassigned_objectives, 0),
            ("unassigned fail conditions", &self.unassigned_fail_conditions, 0),
            (
                "quest steps",
                &self.quest_steps,
                STEP_SIZE * count(self.number_of_steps),
            ),
            (
                "quest completion steps",
                &self.quest_completion_steps,
                COMPLETION_STEP_SIZE * count(self.number_of_completion_steps),
            ),
        ];
        for (index, (label, region, default_size)) in blocks.into_iter().enumerate() {
            let placed = place_raw_block(&mut writer, label, region, default_size)?;
            writer.patch_pointer(reference_slot(index), placed)?;
        }

        if let Some(tail) = self.tail_raw.bytes() {
            writer.place_block("quest tail", recorded_offset(self.tail_raw.offset), &tail)?;
        }
        Ok(writer.into_bytes())
    }

    fn write_fixed(&self, sink: &mut ByteSink) {
        let header = SnoHeader {
            dead_beef: match self.header.dead_beef {
                0 => DEAD_BEEF,
                value => value,
            },
            sno_type: match self.header.sno_type {
                0 => QUEST_SNO_TYPE,
                value => value,
            },
            ..self.header.clone()
        };
        header.write(sink);

        sink.write_i32_slice(&[
            self.quest_type.into(),
            self.number_of_steps.max(0),
            self.number_of_completion_steps.max(0),
            self.i2,
            self.i3,
            self.i4,
            self.i5,
            self.unassigned_step.id,
            self.unassigned_step.i0,
        ]);
        // References are patched once their blocks are placed.
        sink.write_zeros(REFERENCE_COUNT * (REFERENCE_PAD + 8));

        for index in 0..SNO_COUNT {
            sink.write_i32(self.snos.get(index).copied().unwrap_or(0));
        }
        sink.write_i32_slice(&[
            self.world_sno,
            self.mode.into(),
            self.bounty.act_data,
            self.bounty.r#type,
            self.bounty.i0,
        ]);
        sink.write_zeros(BOUNTY_PAD_WORDS * 4);
        sink.write_f32(self.bounty.f0);
    }
}
