//! Spawn-group blocks of the monster format.
//!
//! A group is a 24-byte record whose `(pointer, size)` reference moved
//! between builds:
//!
//! | field  | layout A | layout B |
//! |--------|----------|----------|
//! | weight | `0x00`   | `0x14`   |
//! | count  | `0x04`   | `0x04`   |
//! | ptr    | `0x10`   | `0x08`   |
//! | size   | `0x14`   | `0x0C`   |
//!
//! Both references are resolved and the one agreeing with the declared item
//! count wins, B first.

use common::{f32_at_or_zero, i32_at_or_zero, ByteSink};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::payload::{
    resolve, ItemStructTag, ResolvedPayload, CHAIN_HEADER_SIZE, MAX_CHAIN_DEPTH,
};
use crate::raw::is_inside;
use crate::scan::SPAWN_GROUP_SIZE;
use crate::writer::{recorded_offset, BlockRef, BlockWriter};
use crate::{to_i32, Result};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpawnGroup {
    pub weight: f32,
    pub spawn_item_count: i32,
    pub items_offset: i32,
    pub items_size: i32,
    pub items_header_offset: i32,
    pub items_header_size: i32,
    pub items_container_depth: i32,
    pub item_struct: ItemStructTag,
    pub items: Vec<SpawnItem>,
}

impl SpawnGroup {
    /// Copy with the payload placement fields cleared.
    pub fn without_offsets(&self) -> Self {
        Self {
            items_offset: 0,
            items_size: 0,
            items_header_offset: 0,
            items_header_size: 0,
            items_container_depth: 0,
            ..self.clone()
        }
    }
}

/// One spawn entry; the present id field tells the two shapes apart.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum SpawnItem {
    Minion(MinionSpawn),
    Actor(ActorSpawn),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct MinionSpawn {
    #[serde(rename = "SNOSpawn")]
    pub sno_spawn: i32,
    pub spawn_count_min: i32,
    pub spawn_count_max: i32,
    pub spawn_spread_min: i32,
    pub spawn_spread_max: i32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ActorSpawn {
    #[serde(rename = "SNOActor")]
    pub sno_actor: i32,
    pub spawn_count: i32,
}

impl SpawnItem {
    pub fn as_minion(&self) -> MinionSpawn {
        match *self {
            Self::Minion(minion) => minion,
            Self::Actor(actor) => MinionSpawn {
                sno_spawn: actor.sno_actor,
                spawn_count_min: actor.spawn_count,
                spawn_count_max: actor.spawn_count,
                ..MinionSpawn::default()
            },
        }
    }

    pub fn as_actor(&self) -> ActorSpawn {
        match *self {
            Self::Actor(actor) => actor,
            Self::Minion(minion) => ActorSpawn {
                sno_actor: minion.sno_spawn,
                spawn_count: minion.spawn_count_min,
            },
        }
    }
}

/// Finite and within `(1e-6, 1e6)`.
pub fn is_reasonable_weight(weight: f32) -> bool {
    weight.is_finite() && weight > 1e-6 && weight < 1e6
}

/// Decodes the group block at `(offset, size)`; an unusable block yields no groups.
pub fn decode_spawn_groups(image: &[u8], offset: i32, size: i32) -> Vec<SpawnGroup> {
    if !is_inside(image.len(), offset, size) || size % SPAWN_GROUP_SIZE as i32 != 0 {
        if size != 0 {
            debug!("spawn-group block {offset:#x}+{size} is unusable");
        }
        return Vec::new();
    }
    let start = offset as usize;
    (0..size as usize / SPAWN_GROUP_SIZE)
        .map(|index| decode_group(image, start + index * SPAWN_GROUP_SIZE))
        .collect()
}

fn decode_group(image: &[u8], at: usize) -> SpawnGroup {
    let word = |rel: usize| i32_at_or_zero(image, at + rel);
    let count = word(0x04);
    let weight_a = f32_at_or_zero(image, at);
    let weight_b = f32_at_or_zero(image, at + 0x14);

    let refine = |payload: ResolvedPayload| ResolvedPayload {
        tag: payload.tag.refine_for_count(payload.payload_size, count),
        ..payload
    };
    let layout_a = resolve(image, word(0x10), word(0x14), MAX_CHAIN_DEPTH).map(refine);
    let layout_b = resolve(image, word(0x08), word(0x0C), MAX_CHAIN_DEPTH).map(refine);

    let agrees = |payload: &ResolvedPayload| {
        payload
            .item_count()
            .is_some_and(|items| i64::try_from(items).ok() == Some(i64::from(count)))
    };
    let prefer_b = match (&layout_b, &layout_a) {
        (Some(b), Some(a)) => agrees(b) || !agrees(a),
        (Some(_), None) => true,
        (None, _) => false,
    };
    let chosen = if prefer_b {
        layout_b.map(|payload| (weight_b, payload))
    } else {
        layout_a.map(|payload| (weight_a, payload))
    };

    let Some((weight, payload)) = chosen else {
        let weight = if is_reasonable_weight(weight_b) {
            weight_b
        } else {
            weight_a
        };
        return SpawnGroup {
            weight,
            spawn_item_count: count,
            ..SpawnGroup::default()
        };
    };

    SpawnGroup {
        weight,
        spawn_item_count: count,
        items_offset: payload.payload_ptr as i32,
        items_size: payload.payload_size as i32,
        items_header_offset: payload.header_ptr as i32,
        items_header_size: payload.header_size as i32,
        items_container_depth: payload.depth as i32,
        item_struct: payload.tag,
        items: decode_items(image, &payload),
    }
}

fn decode_items(image: &[u8], payload: &ResolvedPayload) -> Vec<SpawnItem> {
    let Some(item_size) = payload.tag.item_size() else {
        return Vec::new();
    };
    let starts = (0..payload.payload_size / item_size)
        .map(|index| payload.payload_ptr + index * item_size);
    let word = |at: usize, index: usize| i32_at_or_zero(image, at + index * 4);
    match payload.tag {
        ItemStructTag::Minion20 => starts
            .map(|at| {
                SpawnItem::Minion(MinionSpawn {
                    sno_spawn: word(at, 0),
                    spawn_count_min: word(at, 1),
                    spawn_count_max: word(at, 2),
                    spawn_spread_min: word(at, 3),
                    spawn_spread_max: word(at, 4),
                })
            })
            .collect(),
        ItemStructTag::ActorCount8 => starts
            .map(|at| {
                SpawnItem::Actor(ActorSpawn {
                    sno_actor: word(at, 0),
                    spawn_count: word(at, 1),
                })
            })
            .collect(),
        ItemStructTag::Unknown => Vec::new(),
    }
}

/// Item shape used when writing a group.
pub fn item_struct_for(group: &SpawnGroup, champion: bool) -> ItemStructTag {
    match group.item_struct {
        ItemStructTag::Unknown if champion => ItemStructTag::ActorCount8,
        ItemStructTag::Unknown => match group.items.first() {
            Some(SpawnItem::Actor(_)) => ItemStructTag::ActorCount8,
            _ => ItemStructTag::Minion20,
        },
        known => known,
    }
}

fn encode_items(items: &[SpawnItem], tag: ItemStructTag) -> Vec<u8> {
    let mut sink = ByteSink::new();
    for item in items {
        match tag {
            ItemStructTag::ActorCount8 => {
                let actor = item.as_actor();
                sink.write_i32(actor.sno_actor);
                sink.write_i32(actor.spawn_count);
            }
            ItemStructTag::Minion20 | ItemStructTag::Unknown => {
                let minion = item.as_minion();
                sink.write_i32(minion.sno_spawn);
                sink.write_i32(minion.spawn_count_min);
                sink.write_i32(minion.spawn_count_max);
                sink.write_i32(minion.spawn_spread_min);
                sink.write_i32(minion.spawn_spread_max);
            }
        }
    }
    sink.into_inner()
}

/// Writes the group records as one block, then each group's items behind a
/// self-relative header, and points layout B of every record at its header.
/// The weight is stored at both the layout A and layout B positions.
pub fn write_spawn_groups(
    writer: &mut BlockWriter,
    label: &str,
    groups: &[SpawnGroup],
    requested: Option<usize>,
    champion: bool,
) -> Result<BlockRef> {
    if groups.is_empty() {
        return Ok(BlockRef::default());
    }

    let mut records = ByteSink::with_capacity(groups.len() * SPAWN_GROUP_SIZE);
    for group in groups {
        // Weight goes in both layouts so an item-less group reads back either way.
        records.write_f32(group.weight);
        records.write_i32(group.spawn_item_count);
        records.write_zeros(12);
        records.write_f32(group.weight);
    }
    let block = writer.place_block(label, requested, records.as_slice())?;

    for (index, group) in groups.iter().enumerate() {
        let payload = encode_items(&group.items, item_struct_for(group, champion));
        if payload.is_empty() {
            continue;
        }
        let mut chain = ByteSink::with_capacity(CHAIN_HEADER_SIZE + payload.len());
        chain.write_i32(0);
        chain.write_i32(to_i32(payload.len())?);
        chain.write_bytes(&payload);

        let item_label = format!("{label} #{index} items");
        let items = writer.place_block(
            &item_label,
            recorded_offset(group.items_header_offset),
            chain.as_slice(),
        )?;
        let header = to_i32(items.offset)?;
        writer.patch_i32(items.offset, header)?;

        let record = block.offset + index * SPAWN_GROUP_SIZE;
        writer.patch_i32(record + 0x08, header)?;
        writer.patch_i32(record + 0x0C, CHAIN_HEADER_SIZE as i32)?;
    }
    Ok(block)
}
