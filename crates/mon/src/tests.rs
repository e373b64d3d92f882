use super::*;
use common::read_i32_at;
use layout::scan::{LEGACY_NAME_OFFSET, LEGACY_TRAILER_OFFSET};
use layout::spawn::{ActorSpawn, MinionSpawn};
use layout::{LayoutOptions, RawRegion, SpawnGroup, SpawnItem};
use proptest::prelude::*;

fn minion(sno: i32) -> SpawnItem {
    SpawnItem::Minion(MinionSpawn {
        sno_spawn: sno,
        spawn_count_min: 1,
        spawn_count_max: 3,
        spawn_spread_min: 2,
        spawn_spread_max: 6,
    })
}

fn sample() -> MonsterDocument {
    let tag_words: Vec<u8> = [0x0001_0000u32, 7, 0xFFFF_FFFF, 42]
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect();
    MonsterDocument {
        actor_sno: 6652,
        r#type: 1,
        race: 2,
        size: 3,
        gold_granted: 15,
        attribute_modifiers: vec![0.5; 4],
        ai_behavior: vec![11, 12],
        tag_map: RawRegion::from_bytes(0, &tag_words),
        minion_spawn_group_count: 1,
        monster_minion_spawn_groups: vec![SpawnGroup {
            weight: 1.5,
            spawn_item_count: 2,
            items: vec![minion(4100), minion(4101)],
            ..SpawnGroup::default()
        }],
        champion_spawn_group_count: 1,
        monster_champion_spawn_groups: vec![SpawnGroup {
            weight: 2.0,
            spawn_item_count: 1,
            items: vec![SpawnItem::Actor(ActorSpawn {
                sno_actor: 5200,
                spawn_count: 4,
            })],
            ..SpawnGroup::default()
        }],
        name: "Zombie".to_string(),
        does_not_drop_necro_corpse: 1,
        sno_ai_state_attacker_cap_reached: 77,
        ..MonsterDocument::default()
    }
}

fn bare(name: &str) -> MonsterDocument {
    MonsterDocument {
        name: name.to_string(),
        pad_tail: 5,
        ..MonsterDocument::default()
    }
}

#[test]
fn canonical_layout_places_trailer_and_blocks() {
    let bytes = sample().write(&LayoutOptions::default()).expect("write");
    assert_eq!(read_i32_at(&bytes, 4 * 7 + 4).expect("actor"), 6652);
    assert_eq!(read_i32_at(&bytes, LEGACY_TRAILER_OFFSET).expect("count"), 1);
    assert_eq!(&bytes[LEGACY_NAME_OFFSET..LEGACY_NAME_OFFSET + 7], b"Zombie\0");

    // Tag map goes first, right behind the trailer.
    let tag_offset = read_i32_at(&bytes, TAG_MAP_HEADER_OFFSET + 12).expect("tag offset");
    let tag_size = read_i32_at(&bytes, TAG_MAP_HEADER_OFFSET + 16).expect("tag size");
    assert_eq!(tag_offset as usize, TRAILER_END);
    assert_eq!(tag_size, 16);

    let groups_offset = read_i32_at(&bytes, LEGACY_TRAILER_OFFSET + 16).expect("groups");
    let groups_size = read_i32_at(&bytes, LEGACY_TRAILER_OFFSET + 20).expect("size");
    assert_eq!(groups_offset as usize, TRAILER_END + 16);
    assert_eq!(groups_size, 24);
    let champion_size = read_i32_at(&bytes, LEGACY_TRAILER_OFFSET + 8).expect("champion");
    assert_eq!(champion_size, 24);
}

#[test]
fn round_trip_is_idempotent() {
    let options = LayoutOptions::default();
    let written = sample().write(&options).expect("write");
    let doc = MonsterDocument::read(&written, &options).expect("read");

    assert_eq!(doc.name, "Zombie");
    assert_eq!(doc.actor_sno, 6652);
    assert_eq!(doc.attribute_modifiers.len(), 146);
    assert_eq!(doc.ai_behavior, vec![11, 12, -1, -1, -1, -1]);
    assert_eq!(doc.sno_ai_state_attacker_cap_reached, 77);
    assert_eq!(
        doc.layout,
        Some(LayoutReport::Scanned {
            shift: 20,
            score: 80
        })
    );
    assert_eq!(doc.tag_map.bytes(), sample().tag_map.bytes());
    assert_eq!(
        doc.monster_minion_spawn_groups[0].items,
        vec![minion(4100), minion(4101)]
    );
    assert_eq!(doc.monster_minion_spawn_groups[0].weight, 1.5);
    assert_eq!(
        doc.monster_champion_spawn_groups[0].items,
        sample().monster_champion_spawn_groups[0].items
    );

    let rewritten = doc.write(&options).expect("rewrite");
    assert_eq!(rewritten, written);
}

#[test]
fn documents_use_format_key_names() {
    let json = serde_json::to_value(sample()).expect("json");
    for key in [
        "ActorSNO",
        "Type",
        "HPChampion",
        "GBIdAffixes",
        "GBIdMovementStyles",
        "AIBehavior",
        "MonsterMinionSpawnGroups",
        "ChampionSpawnGroupsHeader",
        "snoAIStateAttackerCapReached",
        "TagMap",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json.get("Layout").is_none());

    let defaults: MonsterDocument = serde_json::from_str("{}").expect("defaults");
    assert_eq!(defaults.actor_sno, -1);
    assert_eq!(defaults.sno_treasure_class, -1);
    assert_eq!(defaults.no_drop_scalar, 1.0);
    assert_eq!(defaults.summon_count_per, 1);
    assert_eq!(defaults.header.dead_beef, 0xDEAD_BEEF);
}

#[test]
fn shifted_trailer_is_found_and_rewritten_canonically() {
    let options = LayoutOptions::default();
    let canonical = bare("Zombie").write(&options).expect("write");

    // An older build kept the trailer 12 bytes earlier.
    let mut shifted = canonical[..TRAILER_SCAN_BASE + 8].to_vec();
    shifted.extend_from_slice(&canonical[LEGACY_TRAILER_OFFSET..]);

    let doc = MonsterDocument::read(&shifted, &options).expect("read");
    assert_eq!(
        doc.layout,
        Some(LayoutReport::Scanned {
            shift: 8,
            score: 72
        })
    );
    assert_eq!(doc.name, "Zombie");
    assert_eq!(doc.name_offset as usize, TRAILER_SCAN_BASE + 8 + 24);
    assert_eq!(doc.pad_tail, 5);

    assert_eq!(doc.write(&options).expect("rewrite"), canonical);
}

#[test]
fn garbage_trailer_falls_back_to_legacy() {
    let options = LayoutOptions::default();
    let mut bytes = sample().write(&options).expect("write");
    bytes[TRAILER_SCAN_BASE..TRAILER_END].fill(0xFF);

    let doc = MonsterDocument::read(&bytes, &options).expect("read");
    assert!(matches!(doc.layout, Some(LayoutReport::Legacy { .. })));
    assert_eq!(doc.minion_spawn_group_count, -1);
    assert!(doc.monster_minion_spawn_groups.is_empty());
}

#[test]
fn forced_legacy_reads_fixed_offsets() {
    let written = sample().write(&LayoutOptions::default()).expect("write");
    let options = LayoutOptions {
        force_legacy_monster: true,
        ..LayoutOptions::default()
    };
    let doc = MonsterDocument::read(&written, &options).expect("read");
    assert_eq!(
        doc.layout,
        Some(LayoutReport::Legacy {
            reason: "forced".to_string()
        })
    );
    assert_eq!(doc.name, "Zombie");
    assert_eq!(doc.monster_minion_spawn_groups.len(), 1);
    assert_eq!(doc.monster_champion_spawn_groups.len(), 1);
}

#[test]
fn champion_groups_need_a_count() {
    let options = LayoutOptions::default();
    let mut doc = sample();
    doc.champion_spawn_group_count = 0;
    let written = doc.write(&options).expect("write");
    let reread = MonsterDocument::read(&written, &options).expect("read");
    assert_eq!(reread.champion_spawn_groups_header.size, 24);
    assert!(reread.monster_champion_spawn_groups.is_empty());
}

#[test]
fn tag_map_lists_embedded_names() {
    let mut doc = sample();
    doc.tag_map = RawRegion::from_bytes(0, b"\x01\0\0\0Ghoul_Melee\0\0\0\0\0");
    let options = LayoutOptions::default();
    let written = doc.write(&options).expect("write");
    let reread = MonsterDocument::read(&written, &options).expect("read");
    assert_eq!(reread.tag_map.format, layout::RawFormat::U32HexStrings);
    assert_eq!(reread.tag_map.strings, Some(vec!["Ghoul_Melee".to_string()]));
    assert_eq!(reread.tag_map.bytes(), doc.tag_map.bytes());
}

#[test]
fn preserved_tag_map_honours_recorded_offset() {
    let mut doc = sample();
    doc.monster_minion_spawn_groups.clear();
    doc.monster_champion_spawn_groups.clear();
    doc.tag_map.offset = 0x600;
    let options = LayoutOptions {
        preserve_offsets: true,
        ..LayoutOptions::default()
    };
    let bytes = doc.write(&options).expect("write");
    assert_eq!(
        read_i32_at(&bytes, TAG_MAP_HEADER_OFFSET + 12).expect("offset"),
        0x600
    );
    assert!(bytes[TRAILER_END..0x600].iter().all(|&b| b == 0));
    assert_eq!(read_i32_at(&bytes, 0x600 + 12).expect("word"), 42);
}

#[test]
fn preserved_offset_behind_cursor_fails_unless_relocating() {
    let mut doc = sample();
    doc.tag_map.offset = 0x100;
    let strict = LayoutOptions {
        preserve_offsets: true,
        ..LayoutOptions::default()
    };
    let err = doc.write(&strict).expect_err("conflict");
    assert!(matches!(
        err,
        Error::Layout(layout::Error::OffsetBehindCursor { requested: 0x100, .. })
    ));

    let relaxed = LayoutOptions {
        relocate_on_conflict: true,
        ..strict
    };
    let bytes = doc.write(&relaxed).expect("relocated");
    let offset = read_i32_at(&bytes, TAG_MAP_HEADER_OFFSET + 12).expect("offset");
    assert_eq!(offset as usize, TRAILER_END);
}

#[test]
fn truncated_fixed_part_is_an_error() {
    let written = bare("Zombie").write(&LayoutOptions::default()).expect("write");
    let result = MonsterDocument::read(&written[..600], &LayoutOptions::default());
    assert!(matches!(result, Err(Error::Truncated(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reader_never_panics_on_random_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        force in any::<bool>(),
    ) {
        let options = LayoutOptions {
            force_legacy_monster: force,
            ..LayoutOptions::default()
        };
        let _ = MonsterDocument::read(&data, &options);
    }

    #[test]
    fn reader_never_panics_on_random_trailers(
        tail in proptest::collection::vec(any::<u8>(), 0..1024),
    ) {
        let fixed = bare("Zombie").write(&LayoutOptions::default()).expect("write");
        let mut image = fixed[..TRAILER_SCAN_BASE].to_vec();
        image.extend_from_slice(&tail);
        let doc = MonsterDocument::read(&image, &LayoutOptions::default());
        prop_assert!(doc.is_ok());
    }

    #[test]
    fn written_documents_read_back_stably(
        name in "[A-Za-z_]{3,40}",
        weight in 0.5f32..100.0,
        count in 1usize..5,
    ) {
        let mut doc = sample();
        doc.name = name.clone();
        doc.monster_minion_spawn_groups[0].weight = weight;
        doc.monster_minion_spawn_groups[0].items = (0..count as i32).map(minion).collect();
        doc.monster_minion_spawn_groups[0].spawn_item_count = count as i32;
        let options = LayoutOptions::default();
        let written = doc.write(&options).expect("write");
        let reread = MonsterDocument::read(&written, &options).expect("read");
        prop_assert_eq!(&reread.name, &name);
        prop_assert_eq!(reread.write(&options).expect("rewrite"), written);
    }
}
