use super::*;
use common::ByteSink;
use layout::RawFormat;
use proptest::prelude::*;

fn put_i32(image: &mut [u8], offset: usize, value: i32) {
    image[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_f32(image: &mut [u8], offset: usize, value: f32) {
    image[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

const TAG_AT: usize = ACTOR_FIXED_SIZE;
const MSG_AT: usize = TAG_AT + 16 + 8;
const CAST_AT: usize = MSG_AT + 24 + 16;
const VOICE_AT: usize = CAST_AT + 12;

/// Fixed part, 16-byte tag map, 8-byte gap, 24 bytes of events, 16-byte
/// gap, two serialized strings and a 10-byte tail.
fn actor_image() -> Vec<u8> {
    let mut sink = ByteSink::new();
    SnoHeader {
        sno_type: 1,
        sno_id: 3095,
        unknown4: 2,
        ..SnoHeader::default()
    }
    .write(&mut sink);
    sink.pad_to(ACTOR_FIXED_SIZE);
    sink.write_i32_slice(&[1, 2, 3, 4]);
    sink.write_bytes(b"gap\0\0\0\0\0");
    sink.write_bytes(b"\x01\0\0\0Attack\0\0Attack\0Cast\0");
    sink.write_bytes(b"post-msg\0\0\0\0\0\0\0\0");
    sink.write_bytes(b"Hello note\0\0");
    sink.write_bytes(b"Brute\0\0\0");
    sink.write_bytes(b"tail-bytes");
    let mut image = sink.into_inner();

    put_i32(&mut image, 32, 0x10);
    put_i32(&mut image, 36, 4455);
    put_f32(&mut image, 60, 2.5);
    put_i32(&mut image, 104, TAG_AT as i32);
    put_i32(&mut image, 108, 16);
    put_i32(&mut image, 124, 6652);
    put_i32(&mut image, 128, 24);
    put_i32(&mut image, 132, MSG_AT as i32);
    image[164..171].copy_from_slice(b"Default");
    put_i32(&mut image, 164 + LOOK_LINK_WIDTH, 7);
    put_i32(&mut image, 748, 3);
    put_f32(&mut image, 796, 1.25);
    put_i32(&mut image, 856, 99);
    put_i32(&mut image, 880, CAST_AT as i32);
    put_i32(&mut image, 884, 12);
    put_i32(&mut image, 888, VOICE_AT as i32);
    put_i32(&mut image, 892, 8);
    image
}

#[test]
fn fixed_fields_are_decoded_in_order() {
    let doc = ActorDocument::read(&actor_image()).expect("actor");
    assert_eq!(doc.header.sno_id, 3095);
    assert_eq!(doc.actor_type, 2);
    assert_eq!(doc.flags, 0x10);
    assert_eq!(doc.appearance_sno, 4455);
    assert_eq!(doc.cylinder.ax2, 2.5);
    assert_eq!(doc.monster_sno, 6652);
    assert_eq!(doc.looks.len(), LOOK_COUNT);
    assert_eq!(
        doc.looks[0],
        Look {
            look_link: "Default".to_string(),
            int0: 7
        }
    );
    assert_eq!(doc.actor_collision_data.collision_shape, 3);
    assert_eq!(doc.actor_collision_data.moving_radius_scalar, 1.25);
    assert_eq!(doc.socketed_image, 99);
    assert_eq!(doc.inventory_images.len(), INVENTORY_IMAGE_COUNT);
}

#[test]
fn pointed_blocks_and_strings_are_recovered() {
    let doc = ActorDocument::read(&actor_image()).expect("actor");
    assert_eq!(doc.tag_map.format, RawFormat::U32Hex);
    assert_eq!(doc.tag_map.bytes().map(|b| b.len()), Some(16));

    assert_eq!(doc.msg_triggered_events.format, RawFormat::U32HexStrings);
    assert_eq!(
        doc.msg_triggered_events.strings,
        Some(vec!["Attack".to_string(), "Cast".to_string()])
    );
    assert_eq!(doc.casting_notes, "Hello note");
    assert_eq!(doc.voice_over_role, "Brute");
}

#[test]
fn gaps_and_tail_are_dumped() {
    let image = actor_image();
    let doc = ActorDocument::read(&image).expect("actor");

    assert_eq!(doc.pre_msg_raw.offset as usize, TAG_AT + 16);
    assert_eq!(doc.pre_msg_raw.size_bytes, 8);
    assert_eq!(doc.pre_msg_raw.strings, Some(vec!["gap".to_string()]));

    assert_eq!(doc.post_msg_raw.offset as usize, MSG_AT + 24);
    assert_eq!(doc.post_msg_raw.size_bytes, 16);

    assert_eq!(doc.tail_raw.offset as usize, VOICE_AT + 8);
    assert_eq!(doc.tail_raw.size_bytes, 10);
    assert_eq!(doc.tail_raw.format, RawFormat::BytesHexStrings);
    assert_eq!(doc.tail_raw.bytes(), Some(b"tail-bytes".to_vec()));
}

#[test]
fn unusable_references_become_missing_regions() {
    let mut image = actor_image();
    image.truncate(CAST_AT + 4);
    put_i32(&mut image, 104, 0);
    let doc = ActorDocument::read(&image).expect("actor");

    assert!(doc.tag_map.is_missing());
    assert_eq!(doc.casting_notes, "");
    assert_eq!(doc.voice_over_role, "");
    // Without a tag map the gap before the events starts at offset zero.
    assert_eq!(doc.pre_msg_raw.offset, 0);
    assert_eq!(doc.pre_msg_raw.size_bytes, MSG_AT as i32);
    // The string offsets still bound the gap after the events.
    assert_eq!(doc.post_msg_raw.size_bytes, 16);
    assert!(doc.tail_raw.is_missing());
}

#[test]
fn short_image_reports_truncation() {
    let image = actor_image();
    let err = ActorDocument::read(&image[..400]).expect_err("short");
    assert!(matches!(err, Error::Truncated { needed: ACTOR_FIXED_SIZE, .. }));
    assert!(matches!(
        ActorDocument::read(&image[..10]),
        Err(Error::Layout(_))
    ));
}

#[test]
fn documents_use_format_key_names() {
    let json = serde_json::to_value(ActorDocument::read(&actor_image()).expect("actor"))
        .expect("json");
    assert_eq!(json["AppearanceSNO"], 4455);
    assert_eq!(json["AABBBounds"]["Min"]["X"], 0.0);
    assert_eq!(json["ActorCollisionData"]["CollisionShape"], 3);
    assert_eq!(json["Looks"][0]["LookLink"], "Default");
    assert_eq!(json["MsgTriggeredEvents"]["Format"], "U32Hex+Strings");
    assert_eq!(json["CastingNotesHeader"]["Size"], 12);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reader_never_panics_on_random_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
    ) {
        let _ = ActorDocument::read(&data);
    }

    #[test]
    fn random_references_never_panic(
        tag in any::<(i32, i32)>(),
        msg in any::<(i32, i32)>(),
        cast in any::<(i32, i32)>(),
    ) {
        let mut image = actor_image();
        put_i32(&mut image, 104, tag.0);
        put_i32(&mut image, 108, tag.1);
        put_i32(&mut image, 128, msg.1);
        put_i32(&mut image, 132, msg.0);
        put_i32(&mut image, 880, cast.0);
        put_i32(&mut image, 884, cast.1);
        prop_assert!(ActorDocument::read(&image).is_ok());
    }
}
