//! `.acr` actor definitions, read only.
//!
//! The fixed part is decoded field by field. Everything the fields point at
//! (tag map, message-triggered events, serialized strings) is kept as a
//! [`RawRegion`], and the unexplained gaps between those blocks are dumped
//! as well so nothing in the file goes unaccounted for.

pub mod error;
pub mod geometry;

use common::{decode_fixed_str, ByteCursor};
use layout::name::field_at;
use layout::{BlockHeader, RawRegion, SnoHeader};
use log::debug;
use serde::{Deserialize, Serialize};

pub use error::Error;
pub use geometry::{Aabb, Cylinder, Sphere, Vec3};

pub type Result<T> = core::result::Result<T, Error>;

/// Fields start on this boundary whatever the header length.
pub const FIELDS_OFFSET: usize = 0x20;
/// Size of the fixed part, header included.
pub const ACTOR_FIXED_SIZE: usize = 896;
pub const LOOK_COUNT: usize = 8;
pub const LOOK_LINK_WIDTH: usize = 64;
pub const INVENTORY_IMAGE_COUNT: usize = 7;
pub const SOCKET_PAD_COUNT: usize = 5;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActorDocument {
    pub header: SnoHeader,
    /// Mirrors the header's last word.
    pub actor_type: i32,
    pub flags: i32,
    #[serde(rename = "AppearanceSNO")]
    pub appearance_sno: i32,
    #[serde(rename = "PhysMeshSNO")]
    pub phys_mesh_sno: i32,
    pub cylinder: Cylinder,
    pub sphere: Sphere,
    #[serde(rename = "AABBBounds")]
    pub aabb_bounds: Aabb,

    pub tag_map: RawRegion,
    pub tag_map_pad0: i32,
    pub tag_map_pad1: i32,

    #[serde(rename = "AnimSetSNO")]
    pub anim_set_sno: i32,
    #[serde(rename = "MonsterSNO")]
    pub monster_sno: i32,

    pub msg_triggered_events: RawRegion,
    pub pre_msg_raw: RawRegion,
    pub post_msg_raw: RawRegion,
    pub tail_raw: RawRegion,

    #[serde(rename = "AnimTreeSNO")]
    pub anim_tree_sno: i32,
    pub unknown_after_msg: [i32; 3],
    pub location_power_src: Vec3,
    pub looks: Vec<Look>,

    #[serde(rename = "PhysicsSNO")]
    pub physics_sno: i32,
    pub physics_flags: i32,
    pub material: i32,
    pub explosion_factor: f32,
    pub wind_factor: f32,
    pub partial_ragdoll_responsiveness: f32,
    pub actor_collision_data: ActorCollisionData,

    pub inventory_images: Vec<i32>,
    pub inventory_pad: Vec<i32>,
    pub socketed_image: i32,
    pub socket_pad: Vec<i32>,

    pub casting_notes_header: BlockHeader,
    pub voice_over_role_header: BlockHeader,
    pub casting_notes: String,
    pub voice_over_role: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Look {
    pub look_link: String,
    pub int0: i32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActorCollisionData {
    pub coll_flags: [i32; 4],
    pub collision_shape: i32,
    pub cylinder: Cylinder,
    #[serde(rename = "AABBCollision")]
    pub aabb_collision: Aabb,
    pub moving_radius_scalar: f32,
}

impl ActorCollisionData {
    fn read(cursor: &mut ByteCursor<'_>) -> common::Result<Self> {
        Ok(Self {
            coll_flags: cursor.read_i32_array::<4>()?,
            collision_shape: cursor.read_i32()?,
            cylinder: Cylinder::read(cursor)?,
            aabb_collision: Aabb::read(cursor)?,
            moving_radius_scalar: cursor.read_f32()?,
        })
    }
}

fn read_i32_vec(cursor: &mut ByteCursor<'_>, count: usize) -> common::Result<Vec<i32>> {
    (0..count).map(|_| cursor.read_i32()).collect()
}

/// String stored as `(offset, size)`; an unusable reference reads as empty.
pub fn read_serialized_string(image: &[u8], block: BlockHeader) -> String {
    if !block.is_inside(image.len()) {
        return String::new();
    }
    decode_fixed_str(field_at(image, block.offset as usize, block.size as usize))
}

/// End of a block, or its start when it does not fit the image.
fn safe_end(block: BlockHeader, total: usize) -> i32 {
    if block.is_inside(total) {
        block.offset + block.size
    } else {
        block.offset.max(0)
    }
}

fn pointed_region(image: &[u8], block: BlockHeader, with_strings: bool) -> RawRegion {
    if block.is_inside(image.len()) {
        RawRegion::section(image, block.offset, block.size, with_strings)
    } else {
        RawRegion::missing(block.offset, block.size)
    }
}

impl ActorDocument {
    pub fn read(image: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(image);
        let header = SnoHeader::read(&mut cursor)?;
        let mut doc = Self::read_fixed(&mut cursor, header).map_err(|source| Error::Truncated {
            needed: ACTOR_FIXED_SIZE,
            source,
        })?;
        doc.attach_regions(image);
        Ok(doc)
    }

    fn read_fixed(c: &mut ByteCursor<'_>, header: SnoHeader) -> common::Result<Self> {
        if c.position() < FIELDS_OFFSET {
            c.seek(FIELDS_OFFSET)?;
        }
        let [flags, appearance_sno, phys_mesh_sno] = c.read_i32_array::<3>()?;
        let cylinder = Cylinder::read(c)?;
        let sphere = Sphere::read(c)?;
        let aabb_bounds = Aabb::read(c)?;

        let [tag_offset, tag_size, tag_map_pad0, tag_map_pad1] = c.read_i32_array::<4>()?;
        let [anim_set_sno, monster_sno] = c.read_i32_array::<2>()?;
        // Size comes before offset here.
        let [msg_size, msg_offset] = c.read_i32_array::<2>()?;
        let anim_tree_sno = c.read_i32()?;
        let unknown_after_msg = c.read_i32_array::<3>()?;
        let location_power_src = Vec3::read(c)?;

        let looks = (0..LOOK_COUNT)
            .map(|_| -> common::Result<Look> {
                Ok(Look {
                    look_link: c.read_fixed_str(LOOK_LINK_WIDTH)?,
                    int0: c.read_i32()?,
                })
            })
            .collect::<common::Result<Vec<_>>>()?;

        let [physics_sno, physics_flags, material] = c.read_i32_array::<3>()?;
        let [explosion_factor, wind_factor, partial_ragdoll_responsiveness] =
            c.read_f32_array::<3>()?;
        let actor_collision_data = ActorCollisionData::read(c)?;

        let inventory_images = read_i32_vec(c, INVENTORY_IMAGE_COUNT)?;
        let inventory_pad = read_i32_vec(c, INVENTORY_IMAGE_COUNT)?;
        let socketed_image = c.read_i32()?;
        let socket_pad = read_i32_vec(c, SOCKET_PAD_COUNT)?;
        let [cast_offset, cast_size, voice_offset, voice_size] = c.read_i32_array::<4>()?;

        Ok(Self {
            actor_type: header.unknown4,
            header,
            flags,
            appearance_sno,
            phys_mesh_sno,
            cylinder,
            sphere,
            aabb_bounds,
            tag_map: RawRegion::missing(tag_offset, tag_size),
            tag_map_pad0,
            tag_map_pad1,
            anim_set_sno,
            monster_sno,
            msg_triggered_events: RawRegion::missing(msg_offset, msg_size),
            pre_msg_raw: RawRegion::default(),
            post_msg_raw: RawRegion::default(),
            tail_raw: RawRegion::default(),
            anim_tree_sno,
            unknown_after_msg,
            location_power_src,
            looks,
            physics_sno,
            physics_flags,
            material,
            explosion_factor,
            wind_factor,
            partial_ragdoll_responsiveness,
            actor_collision_data,
            inventory_images,
            inventory_pad,
            socketed_image,
            socket_pad,
            casting_notes_header: BlockHeader {
                offset: cast_offset,
                size: cast_size,
            },
            voice_over_role_header: BlockHeader {
                offset: voice_offset,
                size: voice_size,
            },
            casting_notes: String::new(),
            voice_over_role: String::new(),
        })
    }

    /// Dumps the pointed-to blocks and the gaps around them.
    ///
    /// The gap before the events runs from the tag map's end to the events;
    /// the gap after them runs to the first serialized string (or the end of
    /// the file); the tail is whatever follows the last string.
    fn attach_regions(&mut self, image: &[u8]) {
        let total = image.len();
        let tag = BlockHeader {
            offset: self.tag_map.offset,
            size: self.tag_map.size_bytes,
        };
        let msg = BlockHeader {
            offset: self.msg_triggered_events.offset,
            size: self.msg_triggered_events.size_bytes,
        };
        let cast = self.casting_notes_header;
        let voice = self.voice_over_role_header;

        self.tag_map = pointed_region(image, tag, false);
        self.msg_triggered_events = pointed_region(image, msg, true);
        self.casting_notes = read_serialized_string(image, cast);
        self.voice_over_role = read_serialized_string(image, voice);

        let file_len = i32::try_from(total).unwrap_or(i32::MAX);
        let tag_end = safe_end(tag, total);
        let msg_end = safe_end(msg, total);

        let pre_end = if msg.offset > 0 { msg.offset } else { tag_end };
        self.pre_msg_raw =
            RawRegion::section(image, tag_end, (pre_end - tag_end).max(0), true);

        let post_start = tag_end.max(msg_end);
        let next_string = [cast.offset, voice.offset]
            .into_iter()
            .filter(|&offset| offset > 0)
            .min();
        let post_end = next_string.unwrap_or(file_len);
        self.post_msg_raw =
            RawRegion::section(image, post_start, (post_end - post_start).max(0), true);

        let last_string_end = safe_end(cast, total).max(safe_end(voice, total));
        let tail_start = last_string_end.clamp(0, file_len);
        self.tail_raw = RawRegion::section(image, tail_start, file_len - tail_start, true);

        debug!(
            "actor {}: tag map {:?}, events {:?}, tail {} bytes",
            self.header.sno_id,
            self.tag_map.format,
            self.msg_triggered_events.format,
            file_len - tail_start
        );
    }
}

#[cfg(test)]
mod tests;
