use super::*;
use common::read_i32_at;
use layout::header::DEAD_BEEF;
use layout::RawFormat;
use proptest::prelude::*;

use crate::writer::reference_slot;

const OBJECTIVES: usize = 0;
const FAIL_CONDITIONS: usize = 1;
const STEPS: usize = 2;
const COMPLETION: usize = 3;

fn reference(bytes: &[u8], index: usize) -> (i32, i32) {
    let slot = reference_slot(index);
    (
        read_i32_at(bytes, slot).expect("pointer"),
        read_i32_at(bytes, slot + 4).expect("size"),
    )
}

fn step_bytes(count: usize) -> Vec<u8> {
    (0..count * STEP_SIZE / 4)
        .flat_map(|word| (word as u32).to_le_bytes())
        .collect()
}

fn sample() -> QuestDocument {
    QuestDocument {
        header: SnoHeader {
            sno_id: 87700,
            ..SnoHeader::default()
        },
        quest_type: QuestType::Bounty,
        number_of_steps: 1,
        number_of_completion_steps: 1,
        unassigned_step: UnassignedStep { id: 9, i0: 1 },
        unassigned_objectives: RawRegion::from_bytes(0, b"Objective1\0\0"),
        quest_steps: RawRegion::from_bytes(0, &step_bytes(1)),
        quest_completion_steps: RawRegion::from_bytes(0, &[7; COMPLETION_STEP_SIZE]),
        snos: vec![11, 12, 13],
        world_sno: 71150,
        mode: QuestMode::WaveFight,
        bounty: Bounty {
            act_data: 2,
            r#type: 1,
            i0: 0,
            f0: 0.75,
        },
        tail_raw: RawRegion::from_bytes(0, b"tail"),
        ..QuestDocument::default()
    }
}

#[test]
fn blocks_follow_the_fixed_part_on_sixteen_byte_boundaries() {
    let bytes = sample().write().expect("write");

    assert_eq!(reference(&bytes, OBJECTIVES), (304, 12));
    assert_eq!(reference(&bytes, FAIL_CONDITIONS), (0, 0));
    assert_eq!(reference(&bytes, STEPS), (320, STEP_SIZE as i32));
    assert_eq!(reference(&bytes, COMPLETION), (496, COMPLETION_STEP_SIZE as i32));
    assert_eq!(&bytes[520..], b"tail");
    assert!(bytes[QUEST_FIXED_SIZE..304].iter().all(|&b| b == 0));
}

#[test]
fn header_defaults_are_filled_in() {
    let mut doc = sample();
    doc.header.dead_beef = 0;
    let bytes = doc.write().expect("write");
    assert_eq!(read_i32_at(&bytes, 0).expect("magic") as u32, DEAD_BEEF);
    assert_eq!(read_i32_at(&bytes, 4).expect("type"), QUEST_SNO_TYPE);
    assert_eq!(read_i32_at(&bytes, 16).expect("id"), 87700);
}

#[test]
fn fixed_fields_are_decoded_in_order() {
    let doc = QuestDocument::read(&sample().write().expect("write")).expect("read");
    assert_eq!(doc.header.sno_type, QUEST_SNO_TYPE);
    assert_eq!(doc.quest_type, QuestType::Bounty);
    assert_eq!(doc.unassigned_step, UnassignedStep { id: 9, i0: 1 });
    assert_eq!(doc.snos.len(), SNO_COUNT);
    assert_eq!(&doc.snos[..4], &[11, 12, 13, 0]);
    assert_eq!(doc.world_sno, 71150);
    assert_eq!(doc.mode, QuestMode::WaveFight);
    assert_eq!(doc.bounty.f0, 0.75);
    assert_eq!(doc.bounty.act_data, 2);
}

#[test]
fn round_trip_is_idempotent() {
    let written = sample().write().expect("write");
    let doc = QuestDocument::read(&written).expect("read");

    assert_eq!(doc.unassigned_objectives.offset, 304);
    assert_eq!(doc.quest_steps.bytes(), Some(step_bytes(1)));
    assert!(doc.unassigned_fail_conditions.is_missing());
    assert_eq!(doc.tail_raw.offset, 520);
    assert_eq!(doc.tail_raw.bytes(), Some(b"tail".to_vec()));

    let rewritten = doc.write().expect("rewrite");
    assert_eq!(rewritten, written);
}

#[test]
fn reference_blocks_list_their_names() {
    let doc = QuestDocument::read(&sample().write().expect("write")).expect("read");
    assert_eq!(doc.unassigned_objectives.format, RawFormat::U32HexStrings);
    assert_eq!(
        doc.unassigned_objectives.strings,
        Some(vec!["Objective1".to_string()])
    );
    assert_eq!(
        doc.unassigned_objectives.bytes(),
        Some(b"Objective1\0\0".to_vec())
    );
}

#[test]
fn strings_are_collected_across_the_whole_image() {
    let doc = QuestDocument::read(&sample().write().expect("write")).expect("read");
    assert!(doc.strings.contains(&StringAtOffset {
        offset: 304,
        value: "Objective1".to_string(),
    }));
    assert!(doc.strings.contains(&StringAtOffset {
        offset: 520,
        value: "tail".to_string(),
    }));
    assert!(doc.strings.iter().all(|s| s.value.len() >= MIN_QUEST_STRING_LEN));
}

#[test]
fn printable_runs_skip_the_terminating_byte() {
    let strings = printable_strings(b"abc\0wxyz\x01Quest\0\x7Fhi");
    assert_eq!(
        strings,
        vec![
            StringAtOffset {
                offset: 4,
                value: "wxyz".to_string(),
            },
            StringAtOffset {
                offset: 9,
                value: "Quest".to_string(),
            },
        ]
    );
}

#[test]
fn missing_blocks_are_sized_from_the_step_counts() {
    let doc = QuestDocument {
        number_of_steps: 2,
        number_of_completion_steps: 3,
        ..QuestDocument::default()
    };
    let bytes = doc.write().expect("write");
    assert_eq!(reference(&bytes, STEPS), (304, 2 * STEP_SIZE as i32));
    assert_eq!(reference(&bytes, COMPLETION), (656, 3 * COMPLETION_STEP_SIZE as i32));
    assert_eq!(bytes.len(), 656 + 72);
    assert!(bytes[304..].iter().all(|&b| b == 0));
}

#[test]
fn negative_counts_are_written_as_zero() {
    let doc = QuestDocument {
        number_of_steps: -3,
        number_of_completion_steps: -1,
        ..QuestDocument::default()
    };
    let bytes = doc.write().expect("write");
    assert_eq!(read_i32_at(&bytes, SnoHeader::SIZE + 4).expect("steps"), 0);
    assert_eq!(read_i32_at(&bytes, SnoHeader::SIZE + 8).expect("completion"), 0);
    assert_eq!(reference(&bytes, STEPS), (0, 0));
    assert_eq!(bytes.len(), QUEST_FIXED_SIZE);
}

#[test]
fn recorded_offsets_are_kept_when_ahead_of_the_cursor() {
    let mut doc = sample();
    doc.unassigned_objectives = RawRegion::default();
    doc.quest_steps.offset = 0x200;
    doc.tail_raw = RawRegion::from_bytes(0x400, b"late tail");

    let bytes = doc.write().expect("write");
    assert_eq!(reference(&bytes, STEPS), (0x200, STEP_SIZE as i32));
    assert!(bytes[QUEST_FIXED_SIZE..0x200].iter().all(|&b| b == 0));
    // Completion steps had no recorded offset and follow on the next boundary.
    assert_eq!(reference(&bytes, COMPLETION).0, 0x200 + STEP_SIZE as i32);
    assert_eq!(&bytes[0x400..], b"late tail");
}

#[test]
fn conflicting_offsets_are_relocated() {
    let mut doc = sample();
    doc.quest_steps.offset = 0x40;
    let bytes = doc.write().expect("write");
    assert_eq!(reference(&bytes, STEPS), (320, STEP_SIZE as i32));
}

#[test]
fn edited_block_size_drops_the_recorded_offset() {
    let mut doc = sample();
    doc.quest_steps.offset = 0x200;
    doc.quest_steps.size_bytes = 64;
    let bytes = doc.write().expect("write");
    assert_eq!(reference(&bytes, STEPS), (320, STEP_SIZE as i32));
}

#[test]
fn references_outside_the_image_become_missing_regions() {
    let mut bytes = sample().write().expect("write");
    let slot = reference_slot(STEPS);
    bytes[slot..slot + 4].copy_from_slice(&0x10_000i32.to_le_bytes());

    let doc = QuestDocument::read(&bytes).expect("read");
    assert!(doc.quest_steps.is_missing());
    assert_eq!(doc.quest_steps.offset, 0x10_000);
    // The tail still starts behind the furthest block inside the image.
    assert_eq!(doc.tail_raw.offset, 520);
}

#[test]
fn image_ending_with_its_blocks_has_no_tail() {
    let mut doc = sample();
    doc.tail_raw = RawRegion::default();
    let written = doc.write().expect("write");
    let reread = QuestDocument::read(&written).expect("read");
    assert_eq!(reread.tail_raw.format, RawFormat::Missing);
    assert_eq!(reread.write().expect("rewrite"), written);
}

#[test]
fn short_image_reports_truncation() {
    let bytes = sample().write().expect("write");
    assert!(matches!(
        QuestDocument::read(&bytes[..200]),
        Err(Error::Truncated(_))
    ));
    assert!(matches!(
        QuestDocument::read(&bytes[..10]),
        Err(Error::Layout(_))
    ));
}

#[test]
fn documents_use_format_key_names() {
    let json = serde_json::to_value(sample()).expect("json");
    assert_eq!(json["QuestType"], 5);
    assert_eq!(json["Mode"], 1);
    assert_eq!(json["UnassignedStep"]["ID"], 9);
    assert_eq!(json["Bounty"]["F0"], 0.75);
    assert_eq!(json["WorldSNO"], 71150);
    for key in ["SNOs", "QuestStepsRaw", "QuestCompletionStepsRaw", "TailRaw", "Strings"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }

    let defaults: QuestDocument = serde_json::from_str(r#"{"QuestType": 3}"#).expect("defaults");
    assert_eq!(defaults.quest_type, QuestType::Other(3));
    assert_eq!(defaults.mode, QuestMode::None);
    assert_eq!(i32::from(defaults.mode), -1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reader_never_panics_on_random_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
    ) {
        let _ = QuestDocument::read(&data);
    }

    #[test]
    fn random_references_never_panic(
        refs in proptest::array::uniform4(any::<(i32, i32)>()),
    ) {
        let mut image = sample().write().expect("write");
        for (index, (offset, size)) in refs.into_iter().enumerate() {
            let slot = reference_slot(index);
            image[slot..slot + 4].copy_from_slice(&offset.to_le_bytes());
            image[slot + 4..slot + 8].copy_from_slice(&size.to_le_bytes());
        }
        let doc = QuestDocument::read(&image);
        prop_assert!(doc.is_ok());
    }

    #[test]
    fn written_documents_read_back_stably(
        steps in 0usize..4,
        completion in proptest::collection::vec(any::<u8>(), 0..64),
        tail in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut doc = sample();
        doc.number_of_steps = steps as i32;
        doc.quest_steps = RawRegion::from_bytes(0, &step_bytes(steps));
        doc.quest_completion_steps = RawRegion::from_bytes(0, &completion);
        doc.tail_raw = RawRegion::from_bytes(0, &tail);

        let written = doc.write().expect("write");
        let reread = QuestDocument::read(&written).expect("read");
        prop_assert_eq!(reread.write().expect("rewrite"), written);
    }
}
