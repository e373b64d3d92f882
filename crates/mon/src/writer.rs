use common::ByteSink;
use layout::scan::{LEGACY_NAME_OFFSET, LEGACY_TRAILER_OFFSET, MONSTER_NAME_WIDTH};
use layout::spawn::write_spawn_groups;
use layout::writer::recorded_offset;
use layout::{BlockWriter, LayoutOptions};

use crate::document::{
    HealthDrop, MonsterDocument, AFFIX_COUNT, AI_BEHAVIOR_COUNT, ATTRIBUTE_MODIFIER_COUNT,
    DISALLOWED_AFFIX_COUNT, MOVEMENT_STYLE_COUNT, NO_REFERENCE, SKILL_DECLARATION_COUNT,
    SUMMON_ACTOR_COUNT,
};
use crate::{Result, TAG_MAP_HEADER_OFFSET, TAG_MAP_PAD, TRAILER_END, TRAILER_SCAN_BASE};

/// Trailer slots relative to [`LEGACY_TRAILER_OFFSET`].
const CHAMPION_SLOT: usize = LEGACY_TRAILER_OFFSET + 4;
const MINION_GROUPS_SLOT: usize = LEGACY_TRAILER_OFFSET + 16;

fn write_i32_padded(sink: &mut ByteSink, values: &[i32], count: usize, fill: i32) {
    for index in 0..count {
        sink.write_i32(values.get(index).copied().unwrap_or(fill));
    }
}

fn write_health_drop(sink: &mut ByteSink, drop: &HealthDrop) {
    sink.write_f32(drop.drop_chance);
    sink.write_i32(drop.gbid);
    sink.write_i32(drop.health_drop_style);
}

impl MonsterDocument {
    /// Encodes the document in the canonical layout: fixed fields, trailer at
    /// `0x4B8`, then the tag map and the minion and champion spawn groups.
    ///
    /// Arrays shorter than their fixed count are filled with the format's
    /// empty value and longer ones are cut.
    pub fn write(&self, options: &LayoutOptions) -> Result<Vec<u8>> {
        let mut writer = BlockWriter::new(options.offset_policy());
        writer.write_record("monster fixed fields", TRAILER_SCAN_BASE, |sink| {
            self.write_fixed(sink)
        })?;
        writer.sink().pad_to(LEGACY_TRAILER_OFFSET);
        writer.write_record(
            "monster trailer",
            TRAILER_END - LEGACY_TRAILER_OFFSET,
            |sink| self.write_trailer(sink),
        )?;

        let tag_bytes = self.tag_map.bytes().unwrap_or_default();
        let tag_map = writer.place_block(
            "tag map",
            recorded_offset(self.tag_map.offset),
            &tag_bytes,
        )?;
        writer.patch_pointer(TAG_MAP_HEADER_OFFSET + 12, tag_map)?;

        let minion_groups = write_spawn_groups(
            &mut writer,
            "minion spawn groups",
            &self.monster_minion_spawn_groups,
            recorded_offset(self.minion_spawn_groups_header.offset),
            false,
        )?;
        writer.patch_pointer(MINION_GROUPS_SLOT, minion_groups)?;

        let champion_groups = write_spawn_groups(
            &mut writer,
            "champion spawn groups",
            &self.monster_champion_spawn_groups,
            recorded_offset(self.champion_spawn_groups_header.offset),
            true,
        )?;
        writer.patch_pointer(CHAMPION_SLOT, champion_groups)?;

        Ok(writer.into_bytes())
    }

    fn write_fixed(&self, sink: &mut ByteSink) {
        self.header.write(sink);
        sink.write_i32_slice(&[
            self.flags,
            self.actor_sno,
            self.look_index,
            self.r#type,
            self.race,
            self.size,
        ]);

        let def = &self.monster_def;
        sink.write_f32_slice(&[
            def.idle_radius,
            def.combat_radius,
            def.target_abandon_time,
            def.warn_others_radius,
        ]);
        sink.write_i32(def.require_los_for_all_targets);
        sink.write_i32_slice(&[self.resists, self.default_count_min, self.default_count_delta]);
        for index in 0..ATTRIBUTE_MODIFIER_COUNT {
            sink.write_f32(self.attribute_modifiers.get(index).copied().unwrap_or(0.0));
        }
        sink.write_f32_slice(&[
            self.hp_champion,
            self.hp_delta_champion,
            self.hp_rare,
            self.hp_delta_rare,
            self.hp_minion,
            self.hp_delta_minion,
        ]);
        sink.write_i32(self.gold_granted);
        for drop in [
            &self.health_drop_normal,
            &self.health_drop_champion,
            &self.health_drop_rare,
            &self.health_drop_minion,
        ] {
            write_health_drop(sink, drop);
        }

        sink.write_i32(self.sno_skill_kit);
        for index in 0..SKILL_DECLARATION_COUNT {
            let decl = self.skill_declarations.get(index).copied().unwrap_or_default();
            sink.write_i32_slice(&[decl.sno_power, decl.level_mod]);
        }
        for index in 0..SKILL_DECLARATION_COUNT {
            let decl = self
                .monster_skill_declarations
                .get(index)
                .copied()
                .unwrap_or_default();
            sink.write_f32_slice(&[decl.use_range_min, decl.use_range_max]);
            sink.write_i32(decl.weight);
            sink.write_f32(decl.timer);
        }

        sink.write_i32_slice(&[
            self.sno_treasure_class_first_kill,
            self.sno_treasure_class,
            self.sno_treasure_class_rare,
            self.sno_treasure_class_champion,
            self.sno_treasure_class_champion_light,
        ]);
        sink.write_f32_slice(&[
            self.no_drop_scalar,
            self.flee_chance,
            self.flee_cooldown_min,
            self.flee_cooldown_delta,
        ]);
        sink.write_i32(self.summon_count_per);
        sink.write_f32(self.summon_lifetime);
        sink.write_i32_slice(&[self.summon_max_concurrent, self.summon_max_total]);
        sink.write_i32_slice(&[self.sno_inventory, self.sno_secondary_inventory, self.sno_lore]);

        write_i32_padded(sink, &self.ai_behavior, AI_BEHAVIOR_COUNT, NO_REFERENCE);
        write_i32_padded(sink, &self.gbid_movement_styles, MOVEMENT_STYLE_COUNT, NO_REFERENCE);
        write_i32_padded(sink, &self.sno_summon_actor, SUMMON_ACTOR_COUNT, NO_REFERENCE);
        sink.write_i32(self.random_affixes);
        write_i32_padded(sink, &self.gbid_affixes, AFFIX_COUNT, NO_REFERENCE);
        write_i32_padded(
            sink,
            &self.gbid_disallowed_affixes,
            DISALLOWED_AFFIX_COUNT,
            NO_REFERENCE,
        );
        sink.write_i32_slice(&[
            self.ai_target_style_normal,
            self.ai_target_style_champion,
            self.ai_target_style_rare,
            self.power_type,
        ]);

        sink.write_zeros(TAG_MAP_PAD);
        // Tag map header; offset and size are patched once the map is placed.
        sink.write_zeros(32);
    }

    /// Counts and zeroed group slots, name and tail words.
    fn write_trailer(&self, sink: &mut ByteSink) {
        sink.write_i32(self.minion_spawn_group_count);
        sink.write_zeros(8);
        sink.write_i32(self.champion_spawn_group_count);
        sink.write_zeros(8);
        debug_assert_eq!(LEGACY_TRAILER_OFFSET + sink.position(), LEGACY_NAME_OFFSET);
        sink.write_fixed_str(&self.name, MONSTER_NAME_WIDTH);
        sink.write_i32_slice(&[
            self.does_not_drop_necro_corpse,
            self.pad_tail,
            self.sno_ai_state_attacker_cap_reached,
        ]);
    }
}
