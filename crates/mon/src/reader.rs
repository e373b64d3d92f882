use common::ByteCursor;
use layout::scan::resolve_trailer;
use layout::spawn::decode_spawn_groups;
use layout::{to_i32, BlockHeader, LayoutOptions, RawRegion, SnoHeader};
use log::debug;

use crate::document::{
    HealthDrop, LayoutReport, MonsterDef, MonsterDocument, MonsterSkillDeclaration,
    SkillDeclaration, AFFIX_COUNT, AI_BEHAVIOR_COUNT, ATTRIBUTE_MODIFIER_COUNT,
    DISALLOWED_AFFIX_COUNT, MOVEMENT_STYLE_COUNT, SKILL_DECLARATION_COUNT, SUMMON_ACTOR_COUNT,
};
use crate::{Result, TAG_MAP_PAD, TRAILER_SCAN_BASE};

fn read_i32_vec(cursor: &mut ByteCursor<'_>, count: usize) -> Result<Vec<i32>> {
    Ok((0..count)
        .map(|_| cursor.read_i32())
        .collect::<common::Result<_>>()?)
}

fn read_health_drop(cursor: &mut ByteCursor<'_>) -> Result<HealthDrop> {
    Ok(HealthDrop {
        drop_chance: cursor.read_f32()?,
        gbid: cursor.read_i32()?,
        health_drop_style: cursor.read_i32()?,
    })
}

impl MonsterDocument {
    /// Decodes a monster image.
    ///
    /// The fixed part is read sequentially and must be present in full. The
    /// trailer is located by [`resolve_trailer`] unless `options` force the
    /// legacy offsets; an implausible scan also ends on the legacy offsets.
    pub fn read(image: &[u8], options: &LayoutOptions) -> Result<Self> {
        let mut c = ByteCursor::new(image);
        let header = SnoHeader::read(&mut c)?;
        let [flags, actor_sno, look_index, r#type, race, size] = c.read_i32_array::<6>()?;

        let [idle_radius, combat_radius, target_abandon_time, warn_others_radius] =
            c.read_f32_array::<4>()?;
        let monster_def = MonsterDef {
            idle_radius,
            combat_radius,
            target_abandon_time,
            warn_others_radius,
            require_los_for_all_targets: c.read_i32()?,
        };
        let [resists, default_count_min, default_count_delta] = c.read_i32_array::<3>()?;
        let attribute_modifiers = c.read_f32_vec(ATTRIBUTE_MODIFIER_COUNT)?;
        let [hp_champion, hp_delta_champion, hp_rare, hp_delta_rare, hp_minion, hp_delta_minion] =
            c.read_f32_array::<6>()?;
        let gold_granted = c.read_i32()?;
        let health_drop_normal = read_health_drop(&mut c)?;
        let health_drop_champion = read_health_drop(&mut c)?;
        let health_drop_rare = read_health_drop(&mut c)?;
        let health_drop_minion = read_health_drop(&mut c)?;

        let sno_skill_kit = c.read_i32()?;
        let skill_declarations = (0..SKILL_DECLARATION_COUNT)
            .map(|_| -> Result<SkillDeclaration> {
                Ok(SkillDeclaration {
                    sno_power: c.read_i32()?,
                    level_mod: c.read_i32()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let monster_skill_declarations = (0..SKILL_DECLARATION_COUNT)
            .map(|_| -> Result<MonsterSkillDeclaration> {
                Ok(MonsterSkillDeclaration {
                    use_range_min: c.read_f32()?,
                    use_range_max: c.read_f32()?,
                    weight: c.read_i32()?,
                    timer: c.read_f32()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let [first_kill, treasure, treasure_rare, treasure_champion, treasure_champion_light] =
            c.read_i32_array::<5>()?;
        let [no_drop_scalar, flee_chance, flee_cooldown_min, flee_cooldown_delta] =
            c.read_f32_array::<4>()?;
        let summon_count_per = c.read_i32()?;
        let summon_lifetime = c.read_f32()?;
        let [summon_max_concurrent, summon_max_total] = c.read_i32_array::<2>()?;
        let [sno_inventory, sno_secondary_inventory, sno_lore] = c.read_i32_array::<3>()?;

        let ai_behavior = read_i32_vec(&mut c, AI_BEHAVIOR_COUNT)?;
        let gbid_movement_styles = read_i32_vec(&mut c, MOVEMENT_STYLE_COUNT)?;
        let sno_summon_actor = read_i32_vec(&mut c, SUMMON_ACTOR_COUNT)?;
        let random_affixes = c.read_i32()?;
        let gbid_affixes = read_i32_vec(&mut c, AFFIX_COUNT)?;
        let gbid_disallowed_affixes = read_i32_vec(&mut c, DISALLOWED_AFFIX_COUNT)?;
        let [ai_target_style_normal, ai_target_style_champion, ai_target_style_rare, power_type] =
            c.read_i32_array::<4>()?;

        c.skip(TAG_MAP_PAD)?;
        let tag_header = c.read_i32_array::<8>()?;
        let tag_map = RawRegion::block(image, tag_header[3], tag_header[4], true);
        debug_assert_eq!(c.position(), TRAILER_SCAN_BASE);

        let (trailer, source) =
            resolve_trailer(image, TRAILER_SCAN_BASE, options.force_legacy_monster);
        debug!("monster {:?}: trailer {source:?}", trailer.name);

        let monster_minion_spawn_groups =
            decode_spawn_groups(image, trailer.groups_offset, trailer.groups_size);
        let [champion_offset, champion_size] = trailer.reserved;
        let monster_champion_spawn_groups = if trailer.champion_count > 0 {
            decode_spawn_groups(image, champion_offset, champion_size)
        } else {
            Vec::new()
        };

        Ok(Self {
            header,
            flags,
            actor_sno,
            look_index,
            race,
            size,
            r#type,
            monster_def,
            resists,
            default_count_min,
            default_count_delta,
            attribute_modifiers,
            hp_champion,
            hp_delta_champion,
            hp_rare,
            hp_delta_rare,
            hp_minion,
            hp_delta_minion,
            gold_granted,
            health_drop_normal,
            health_drop_champion,
            health_drop_rare,
            health_drop_minion,
            sno_skill_kit,
            skill_declarations,
            monster_skill_declarations,
            sno_treasure_class_first_kill: first_kill,
            sno_treasure_class: treasure,
            sno_treasure_class_rare: treasure_rare,
            sno_treasure_class_champion: treasure_champion,
            sno_treasure_class_champion_light: treasure_champion_light,
            no_drop_scalar,
            flee_chance,
            flee_cooldown_min,
            flee_cooldown_delta,
            summon_count_per,
            summon_lifetime,
            summon_max_concurrent,
            summon_max_total,
            sno_inventory,
            sno_secondary_inventory,
            sno_lore,
            ai_behavior,
            gbid_movement_styles,
            sno_summon_actor,
            random_affixes,
            gbid_affixes,
            gbid_disallowed_affixes,
            ai_target_style_normal,
            ai_target_style_champion,
            ai_target_style_rare,
            power_type,
            tag_map,
            minion_spawn_group_count: trailer.minion_count,
            minion_spawn_groups_header: BlockHeader {
                offset: trailer.groups_offset,
                size: trailer.groups_size,
            },
            monster_minion_spawn_groups,
            champion_spawn_group_count: trailer.champion_count,
            champion_spawn_groups_header: BlockHeader {
                offset: champion_offset,
                size: champion_size,
            },
            monster_champion_spawn_groups,
            name_offset: to_i32(trailer.name_offset)?,
            name: trailer.name,
            does_not_drop_necro_corpse: trailer.tail[0],
            pad_tail: trailer.tail[1],
            sno_ai_state_attacker_cap_reached: trailer.tail[2],
            layout: Some(LayoutReport::from(&source)),
        })
    }
}
