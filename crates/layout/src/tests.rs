use super::*;
use crate::directory::{locate_with_default, CANONICAL_PREAMBLE, DEFAULT_BLOCK_OFFSET};
use crate::payload::CHAIN_HEADER_SIZE;
use crate::raw::{extract_ascii_strings, HexWord};
use crate::scan::{
    candidates, resolve_trailer, select_best, LEGACY_NAME_OFFSET, LEGACY_TRAILER_OFFSET,
};
use crate::spawn::{decode_spawn_groups, write_spawn_groups, ActorSpawn, MinionSpawn};
use common::{f32_at_or_zero, ByteSink};
use proptest::prelude::*;

fn put_i32(image: &mut [u8], offset: usize, value: i32) {
    image[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_f32(image: &mut [u8], offset: usize, value: f32) {
    image[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_name(image: &mut [u8], offset: usize, name: &str) {
    image[offset..offset + name.len()].copy_from_slice(name.as_bytes());
    image[offset + name.len()] = 0;
}

/// Scan base of a monster file written with a 40-byte header.
const MONSTER_BASE: usize = 1188;

// ---- directory -------------------------------------------------------------

#[test]
fn preamble_of_16_or_17_normalizes_to_16() {
    for zeros in [16usize, 17] {
        let mut image = vec![0u8; zeros];
        image.extend_from_slice(b"Record");
        let run = detect_preamble(&image, 0);
        assert_eq!(run.0, zeros);
        assert_eq!(run.normalized(), CANONICAL_PREAMBLE);
    }
}

#[test]
fn preamble_outside_known_values_is_taken_at_face_value() {
    let mut image = vec![0u8; 5];
    image.push(1);
    assert_eq!(detect_preamble(&image, 0).normalized(), 5);
    assert_eq!(detect_preamble(&[0u8; 64], 0).0, 32);
    assert_eq!(detect_preamble(&image, 100).0, 0);
}

#[test]
fn locate_accepts_valid_directory_pointer() {
    let mut image = vec![0u8; 0x300];
    put_i32(&mut image, 0x230, 0x240);
    put_i32(&mut image, 0x234, 0x40);
    let pointer = locate(&image, 0x230).expect("directory");
    assert_eq!(
        pointer,
        DirectoryPointer {
            offset: 0x240,
            length: 0x40
        }
    );
}

#[test]
fn locate_falls_back_to_default_block() {
    let mut image = vec![0u8; 0x300];
    put_i32(&mut image, 0x230, 0x2F0);
    put_i32(&mut image, 0x234, 0x100);
    let pointer = locate(&image, 0x230).expect("fallback");
    assert_eq!(pointer.offset as usize, DEFAULT_BLOCK_OFFSET);
    assert_eq!(pointer.length as usize, 0x300 - DEFAULT_BLOCK_OFFSET);
}

#[test]
fn locate_fails_when_default_block_is_empty() {
    let image = vec![0u8; DEFAULT_BLOCK_OFFSET];
    assert!(matches!(
        locate(&image, 0x230),
        Err(Error::InvalidDirectory { remaining: 0, .. })
    ));
    assert!(matches!(
        locate_with_default(&[0u8; 4], 0x230, 0x10),
        Err(Error::InvalidDirectory { .. })
    ));
}

#[test]
fn record_window_is_clipped_to_image() {
    let pointer = DirectoryPointer {
        offset: 0x238,
        length: 0x1000,
    };
    let window = RecordWindow::for_block(0x300, pointer, 16);
    assert_eq!(window.start, 0x248);
    assert_eq!(window.end, 0x300);
}

// ---- names and strides -----------------------------------------------------

#[test]
fn name_plausibility_thresholds() {
    assert!(is_plausible_name(b"Zombie\0garbage"));
    assert!(!is_plausible_name(b"ab\0"));
    assert!(!is_plausible_name(b"\0Zombie"));
    assert!(!is_plausible_name(&[0xFF, 0xFE, 0x41, 0x42, 0x43, 0]));
    // 4 of 5 printable is exactly 80%.
    assert!(is_plausible_name(&[b'a', b'b', b'c', b'd', 0x01, 0]));
}

fn blob_record_image(true_width: usize) -> Vec<u8> {
    let stride = 256 + 8 * true_width;
    let mut image = vec![0u8; stride * 2 + 256];
    put_name(&mut image, 0, "FirstRecord");
    image[256..stride].fill(0xFF);
    put_name(&mut image, stride, "SecondRecord");
    image
}

#[test]
fn stride_inference_skips_decoy_width() {
    let image = blob_record_image(32);
    let width = infer_width(&image, 0, &[32, 24, 28], |a| 256 + 8 * a);
    assert_eq!(width, Some(32));
}

#[test]
fn stride_inference_without_match_returns_none() {
    let mut image = vec![0xFFu8; 2048];
    put_name(&mut image, 0, "Only");
    assert_eq!(infer_width(&image, 0, &[24, 28, 32], |a| 256 + 8 * a), None);
    assert_eq!(infer_width(&image[..300], 0, &[24], |a| 256 + 8 * a), None);
}

#[test]
fn divisibility_respects_preference_order() {
    assert_eq!(guess_stride_by_divisibility(272 * 3, &[272, 264]), Some(272));
    assert_eq!(guess_stride_by_divisibility(264 * 2, &[272, 264]), Some(264));
    assert_eq!(guess_stride_by_divisibility(0, &[272]), None);
    assert_eq!(guess_stride_by_divisibility(100, &[272, 264]), None);
}

#[test]
fn whole_records_drop_partial_tail() {
    let window = RecordWindow { start: 16, end: 16 + 32 * 3 + 7 };
    let starts: Vec<usize> = whole_records(window, 32).collect();
    assert_eq!(starts, vec![16, 48, 80]);
    assert_eq!(whole_records(window, 0).count(), 0);
}

// ---- monster trailer scan --------------------------------------------------

fn garbage_monster_image() -> Vec<u8> {
    vec![0xFFu8; 0x600]
}

#[test]
fn scanner_selects_the_exact_plausible_shift() {
    let mut image = garbage_monster_image();
    let at = LEGACY_TRAILER_OFFSET;
    for word in 0..6 {
        put_i32(&mut image, at + word * 4, 0);
    }
    put_i32(&mut image, at, 2);
    put_name(&mut image, LEGACY_NAME_OFFSET, "Zombie_A");

    let best = scan::scan(&image, MONSTER_BASE);
    assert_eq!(best.shift, LEGACY_TRAILER_OFFSET - MONSTER_BASE);
    assert!(best.is_maximal());
    assert_eq!(best.score, 100 - best.shift as i32);
    assert_eq!(best.trailer.name, "Zombie_A");
    assert_eq!(best.trailer.minion_count, 2);
}

#[test]
fn scanner_ties_keep_the_smaller_shift() {
    let image = garbage_monster_image();
    let mut first = MonsterLayoutCandidate::at(&image, MONSTER_BASE, 0);
    let mut second = MonsterLayoutCandidate::at(&image, MONSTER_BASE, 4);
    first.score = 60;
    second.score = 60;
    let best = select_best(vec![first, second]).expect("candidate");
    assert_eq!(best.shift, 0);
}

#[test]
fn scanner_never_accepts_low_scores() {
    let image = garbage_monster_image();
    let best = scan::scan(&image, MONSTER_BASE);
    assert!(best.score < scan::ACCEPT_SCORE);
    assert!(matches!(
        scan::accept(best),
        Err(Error::AmbiguousLayout { .. })
    ));
    assert_eq!(candidates(&image, MONSTER_BASE).count(), 7);
}

#[test]
fn garbage_trailer_falls_back_to_legacy() {
    let mut image = garbage_monster_image();
    put_i32(&mut image, LEGACY_TRAILER_OFFSET + 12, 3);
    let (trailer, source) = resolve_trailer(&image, MONSTER_BASE, false);
    assert!(matches!(source, TrailerSource::LegacyFallback { .. }));
    assert_eq!(trailer.name_offset, LEGACY_NAME_OFFSET);
    assert_eq!(trailer.champion_count, 3);

    let (short, _) = resolve_trailer(&image[..64], MONSTER_BASE, false);
    assert_eq!(short, MonsterTrailer {
        name_offset: LEGACY_NAME_OFFSET,
        ..MonsterTrailer::default()
    });
}

#[test]
fn forced_legacy_skips_the_scan() {
    let mut image = garbage_monster_image();
    put_name(&mut image, LEGACY_NAME_OFFSET, "Legacy");
    let (trailer, source) = resolve_trailer(&image, MONSTER_BASE, true);
    assert_eq!(source, TrailerSource::LegacyForced);
    assert_eq!(trailer.name, "Legacy");
}

// ---- payload chains --------------------------------------------------------

#[test]
fn tombstoned_chain_resolves_to_second_pair() {
    let x = 0x40;
    let mut image = vec![0u8; 0x100];
    put_i32(&mut image, x, 0x77);
    put_i32(&mut image, x + 4, 0);
    put_i32(&mut image, x + 8, (x + 8) as i32);
    put_i32(&mut image, x + 12, 40);

    let payload = resolve(&image, x as i32, 8, MAX_CHAIN_DEPTH).expect("payload");
    assert_eq!(payload.payload_ptr, x + 16);
    assert_eq!(payload.payload_size, 40);
    assert_eq!(payload.header_ptr, x + 8);
    assert_eq!(payload.header_size, CHAIN_HEADER_SIZE);
    assert_eq!(payload.depth, 2);
    assert_eq!(payload.tag, ItemStructTag::Minion20);
}

#[test]
fn absolute_pointer_resolves_in_place() {
    let mut image = vec![0u8; 0x100];
    put_i32(&mut image, 0x10, 0x80);
    put_i32(&mut image, 0x14, 16);
    let payload = resolve(&image, 0x10, 8, MAX_CHAIN_DEPTH).expect("payload");
    assert_eq!(payload.payload_ptr, 0x80);
    assert_eq!(payload.tag, ItemStructTag::ActorCount8);
    assert_eq!(payload.item_count(), Some(2));
}

#[test]
fn chain_walk_stops_after_max_depth() {
    let x = 0x20;
    let mut image = vec![0u8; 0x100];
    for hop in 0..3 {
        put_i32(&mut image, x + hop * 8, (x + hop * 8) as i32);
    }
    let valid = x + 24;
    put_i32(&mut image, valid, valid as i32);
    put_i32(&mut image, valid + 4, 20);

    assert_eq!(resolve(&image, x as i32, 8, MAX_CHAIN_DEPTH), None);
    let deeper = resolve(&image, x as i32, 8, 4).expect("fourth hop");
    assert_eq!(deeper.depth, 4);
}

#[test]
fn chain_rejects_bad_references() {
    let mut image = vec![0u8; 0x40];
    assert_eq!(resolve(&image, 0, 8, 3), None);
    assert_eq!(resolve(&image, -4, 8, 3), None);
    assert_eq!(resolve(&image, 0x40, 8, 3), None);
    assert_eq!(resolve(&image, 0x10, -1, 3), None);
    put_i32(&mut image, 0x10, 0x1000);
    put_i32(&mut image, 0x14, 4);
    assert_eq!(resolve(&image, 0x10, 8, 3), None);
    put_i32(&mut image, 0x14, -8);
    assert_eq!(resolve(&image, 0x10, 8, 3), None);
}

#[test]
fn item_tag_refines_by_declared_count() {
    assert_eq!(ItemStructTag::from_payload_size(40), ItemStructTag::Minion20);
    assert_eq!(ItemStructTag::from_payload_size(16), ItemStructTag::ActorCount8);
    assert_eq!(ItemStructTag::from_payload_size(12), ItemStructTag::Unknown);
    assert_eq!(
        ItemStructTag::Minion20.refine_for_count(40, 5),
        ItemStructTag::ActorCount8
    );
    assert_eq!(
        ItemStructTag::Minion20.refine_for_count(40, 2),
        ItemStructTag::Minion20
    );
}

// ---- spawn groups ----------------------------------------------------------

fn minion(sno: i32) -> SpawnItem {
    SpawnItem::Minion(MinionSpawn {
        sno_spawn: sno,
        spawn_count_min: 1,
        spawn_count_max: 3,
        spawn_spread_min: 0,
        spawn_spread_max: 5,
    })
}

fn actor(sno: i32, count: i32) -> SpawnItem {
    SpawnItem::Actor(ActorSpawn {
        sno_actor: sno,
        spawn_count: count,
    })
}

#[test]
fn spawn_groups_survive_write_and_decode() {
    let groups = vec![
        SpawnGroup {
            weight: 0.75,
            spawn_item_count: 2,
            items: vec![minion(100), minion(101)],
            ..SpawnGroup::default()
        },
        SpawnGroup {
            weight: 1.0,
            spawn_item_count: 5,
            items: (0..5).map(|i| actor(200 + i, 1)).collect(),
            ..SpawnGroup::default()
        },
        SpawnGroup {
            weight: 2.5,
            spawn_item_count: 0,
            ..SpawnGroup::default()
        },
    ];

    let mut writer = BlockWriter::new(OffsetPolicy::Relocate);
    writer.sink().write_zeros(0x20);
    let block = write_spawn_groups(&mut writer, "groups", &groups, None, false).expect("write");
    let image = writer.into_bytes();
    assert_eq!(block.offset, 0x20);
    assert_eq!(block.size, 72);

    let decoded = decode_spawn_groups(&image, block.offset as i32, block.size as i32);
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[0].items, groups[0].items);
    assert_eq!(decoded[0].item_struct, ItemStructTag::Minion20);
    assert_eq!(decoded[1].items, groups[1].items);
    assert_eq!(decoded[1].item_struct, ItemStructTag::ActorCount8);
    assert_eq!(decoded[2].weight, 2.5);
    assert!(decoded[2].items.is_empty());
    for (left, right) in decoded.iter().zip(&groups) {
        assert_eq!(left.weight, right.weight);
        assert_eq!(left.spawn_item_count, right.spawn_item_count);
    }
}

#[test]
fn item_less_group_keeps_an_out_of_range_weight() {
    let groups = vec![SpawnGroup {
        weight: 5.0e7,
        spawn_item_count: 0,
        ..SpawnGroup::default()
    }];
    let mut writer = BlockWriter::new(OffsetPolicy::Relocate);
    writer.sink().write_zeros(0x20);
    let block = write_spawn_groups(&mut writer, "groups", &groups, None, false).expect("write");
    let image = writer.into_bytes();
    assert_eq!(f32_at_or_zero(&image, block.offset), 5.0e7);
    assert_eq!(f32_at_or_zero(&image, block.offset + 0x14), 5.0e7);

    let decoded = decode_spawn_groups(&image, block.offset as i32, block.size as i32);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].weight, 5.0e7);
    assert!(decoded[0].items.is_empty());
}

#[test]
fn layout_a_group_is_used_when_b_does_not_resolve() {
    let mut image = vec![0u8; 0x100];
    let at = 0x20;
    put_f32(&mut image, at, 0.5);
    put_i32(&mut image, at + 0x04, 1);
    put_i32(&mut image, at + 0x08, 0x7FFF);
    put_i32(&mut image, at + 0x0C, 8);
    put_i32(&mut image, at + 0x10, 0x60);
    put_i32(&mut image, at + 0x14, 8);
    put_i32(&mut image, 0x60, 0x80);
    put_i32(&mut image, 0x64, 20);
    put_i32(&mut image, 0x80, 4242);

    let groups = decode_spawn_groups(&image, at as i32, 24);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].weight, 0.5);
    assert_eq!(groups[0].items_offset, 0x80);
    assert_eq!(groups[0].items[0].as_minion().sno_spawn, 4242);
}

#[test]
fn unresolved_group_keeps_reasonable_weight() {
    let mut image = vec![0u8; 0x80];
    put_f32(&mut image, 0x20, 3.0);
    put_i32(&mut image, 0x24, 4);
    put_f32(&mut image, 0x34, f32::NAN);
    let groups = decode_spawn_groups(&image, 0x20, 24);
    assert_eq!(groups[0].weight, 3.0);
    assert_eq!(groups[0].spawn_item_count, 4);
    assert!(groups[0].items.is_empty());
    assert!(decode_spawn_groups(&image, 0x20, 25).is_empty());
}

#[test]
fn spawn_items_pick_shape_from_fields() {
    let minion: SpawnItem = serde_json::from_str(
        r#"{"SNOSpawn":1,"SpawnCountMin":2,"SpawnCountMax":3,"SpawnSpreadMin":4,"SpawnSpreadMax":5}"#,
    )
    .expect("minion");
    let actor: SpawnItem =
        serde_json::from_str(r#"{"SNOActor":9,"SpawnCount":2}"#).expect("actor");
    assert!(matches!(minion, SpawnItem::Minion(_)));
    assert_eq!(actor.as_minion().sno_spawn, 9);
}

// ---- writer ----------------------------------------------------------------

#[test]
fn record_overflow_is_rejected_and_short_records_are_padded() {
    let mut writer = BlockWriter::new(OffsetPolicy::Relocate);
    writer
        .write_record("short", 8, |sink| sink.write_i32(7))
        .expect("short record");
    let err = writer
        .write_record("long", 4, |sink| sink.write_zeros(6))
        .expect_err("overflow");
    assert!(matches!(
        err,
        Error::RecordOverflow {
            written: 6,
            limit: 4,
            ..
        }
    ));
    assert_eq!(writer.into_bytes(), vec![7, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn preserve_places_block_at_requested_offset() {
    let policy = OffsetPolicy::Preserve {
        on_conflict: ConflictPolicy::Fail,
    };
    let mut writer = BlockWriter::new(policy);
    let slot = writer.reserve_pointer();
    let block = writer.place_block("tag map", Some(0x20), &[1, 2, 3, 4]).expect("placed");
    writer.patch_pointer(slot, block).expect("patched");
    let image = writer.into_bytes();
    assert_eq!(block, BlockRef { offset: 0x20, size: 4 });
    assert_eq!(&image[8..0x20], &[0u8; 0x18]);
    assert_eq!(&image[..8], &[0x20, 0, 0, 0, 4, 0, 0, 0]);
}

#[test]
fn preserve_behind_cursor_fails_or_relocates() {
    let mut strict = BlockWriter::new(OffsetPolicy::Preserve {
        on_conflict: ConflictPolicy::Fail,
    });
    strict.sink().write_zeros(0x40);
    let err = strict
        .place_block("groups", Some(0x10), &[9; 4])
        .expect_err("behind cursor");
    assert!(matches!(
        err,
        Error::OffsetBehindCursor {
            requested: 0x10,
            cursor: 0x40,
            ..
        }
    ));

    let mut lenient = BlockWriter::new(OffsetPolicy::Preserve {
        on_conflict: ConflictPolicy::Relocate,
    });
    lenient.sink().write_zeros(0x41);
    let block = lenient
        .place_block_aligned("steps", Some(0x10), 16, &[9; 4])
        .expect("relocated");
    assert_eq!(block.offset, 0x50);
}

#[test]
fn relocation_ignores_recorded_offsets_and_skips_empty_blocks() {
    let mut writer = BlockWriter::new(OffsetPolicy::Relocate);
    writer.sink().write_zeros(4);
    assert_eq!(
        writer.place_block("empty", Some(0x100), &[]).expect("empty"),
        BlockRef::default()
    );
    let block = writer.place_block("data", Some(0x100), &[1]).expect("data");
    assert_eq!(block.offset, 4);
}

#[test]
fn options_map_to_offset_policy() {
    assert_eq!(LayoutOptions::default().offset_policy(), OffsetPolicy::Relocate);
    let strict = LayoutOptions {
        preserve_offsets: true,
        ..LayoutOptions::default()
    };
    assert_eq!(
        strict.offset_policy(),
        OffsetPolicy::Preserve {
            on_conflict: ConflictPolicy::Fail
        }
    );
    let lenient = LayoutOptions {
        relocate_on_conflict: true,
        ..strict
    };
    assert_eq!(
        lenient.offset_policy(),
        OffsetPolicy::Preserve {
            on_conflict: ConflictPolicy::Relocate
        }
    );
}

// ---- raw regions and headers -----------------------------------------------

#[test]
fn raw_block_dumps_words_or_bytes() {
    let mut image = vec![0u8; 0x20];
    put_i32(&mut image, 0x10, 0x1234_ABCD);
    let words = RawRegion::block(&image, 0x10, 8, false);
    assert_eq!(words.format, RawFormat::U32Hex);
    assert_eq!(words.u32_hex, Some(vec![HexWord(0x1234_ABCD), HexWord(0)]));
    let json = serde_json::to_value(&words).expect("json");
    assert_eq!(json["U32Hex"][0], "0x1234ABCD");
    assert_eq!(json["SizeBytes"], 8);

    let bytes = RawRegion::block(&image, 0x10, 3, false);
    assert_eq!(bytes.format, RawFormat::BytesHex);
    assert_eq!(bytes.bytes(), Some(vec![0xCD, 0xAB, 0x34]));

    assert!(RawRegion::block(&image, 0, 8, false).is_missing());
    assert!(RawRegion::block(&image, 0x1C, 8, false).is_missing());
    assert!(!RawRegion::section(&image, 0, 8, false).is_missing());
}

#[test]
fn raw_region_json_round_trip_restores_bytes() {
    let region = RawRegion::from_bytes(0x300, &[1, 2, 3, 4, 5, 6, 7, 8]);
    let text = serde_json::to_string(&region).expect("serialize");
    let back: RawRegion = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, region);
    assert_eq!(back.bytes(), Some(vec![1, 2, 3, 4, 5, 6, 7, 8]));

    let typed: RawRegion =
        serde_json::from_str(r#"{"Offset":4,"SizeBytes":4,"Format":"U32Hex","U32Hex":[16]}"#)
            .expect("integer words");
    assert_eq!(typed.bytes(), Some(vec![16, 0, 0, 0]));
}

#[test]
fn strings_need_terminator_and_are_deduplicated() {
    let data = b"abc\0xy\0abc\0long_name\0tail";
    assert_eq!(
        extract_ascii_strings(data, 3),
        vec!["abc".to_string(), "long_name".to_string()]
    );
    let mut image = vec![0u8; 4];
    image.extend_from_slice(b"Actor\0\0\0");
    let section = RawRegion::section(&image, 0, image.len() as i32, true);
    assert_eq!(section.format, RawFormat::U32HexStrings);
    assert_eq!(section.strings, Some(vec!["Actor".to_string()]));
}

#[test]
fn header_round_trips_through_sink_and_json() {
    let header = ExtendedHeader {
        sno: SnoHeader {
            sno_type: 22,
            sno_id: 6652,
            ..SnoHeader::default()
        },
        balance_type: 3,
        i0: 1,
        i1: 2,
    };
    let mut sink = ByteSink::new();
    header.write(&mut sink);
    let bytes = sink.into_inner();
    assert_eq!(bytes.len(), ExtendedHeader::SIZE);
    let mut cursor = common::ByteCursor::new(&bytes);
    assert_eq!(ExtendedHeader::read(&mut cursor).expect("header"), header);

    let json = serde_json::to_value(&header).expect("json");
    assert_eq!(json["DeadBeef"], 0xDEAD_BEEFu32);
    assert_eq!(json["SNOId"], 6652);
    assert_eq!(json["BalanceType"], 3);
    let missing: ExtendedHeader = serde_json::from_str("{}").expect("defaults");
    assert_eq!(missing.sno.dead_beef, header::DEAD_BEEF);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chain_resolution_is_bounded_on_random_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..512),
        ptr in any::<i32>(),
        size in any::<i32>(),
    ) {
        if let Some(payload) = resolve(&data, ptr, size, MAX_CHAIN_DEPTH) {
            prop_assert!(payload.depth >= 1 && payload.depth <= MAX_CHAIN_DEPTH);
            prop_assert!(payload.payload_ptr + payload.payload_size <= data.len());
        }
    }

    #[test]
    fn trailer_scan_never_panics_on_random_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        force in any::<bool>(),
    ) {
        let (_, source) = resolve_trailer(&data, MONSTER_BASE, force);
        if let TrailerSource::Scanned { score, .. } = source {
            prop_assert!(score >= scan::ACCEPT_SCORE);
        }
    }

    #[test]
    fn spawn_group_decode_never_panics_on_random_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..1024),
        offset in 0i32..1024,
        count in 0i32..8,
    ) {
        let _ = decode_spawn_groups(&data, offset, count * 24);
    }

    #[test]
    fn whole_records_never_exceed_the_window(
        start in 0usize..256,
        usable in 0usize..4096,
        stride in 1usize..600,
    ) {
        let window = RecordWindow { start, end: start + usable };
        let starts: Vec<usize> = whole_records(window, stride).collect();
        prop_assert_eq!(starts.len(), usable / stride);
        if let Some(last) = starts.last() {
            prop_assert!(last + stride <= window.end);
        }
    }
}
