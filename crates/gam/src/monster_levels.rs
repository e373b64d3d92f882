use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const MONSTER_LEVEL_RECORD_SIZE: usize = 240;

table_record! {
    /// Monster stat curve entry for levels from `LvlMin` up.
    pub struct MonsterLevel {
        "LvlMin" => lvl_min: i32,
        "Str" => strength: f32,
        "Dex" => dexterity: f32,
        "Int" => intelligence: f32,
        "Vit" => vitality: f32,
        "HPMin" => hp_min: f32,
        "HPDelta" => hp_delta: f32,
        "HPRegen" => hp_regen: f32,
        "ResourceBase" => resource_base: f32,
        "ResourceRegen" => resource_regen: f32,
        "Armor" => armor: f32,
        "Dmg" => dmg: f32,
        "DmgDelta" => dmg_delta: f32,
        "DmgFire" => dmg_fire: f32,
        "DmgDeltaFire" => dmg_delta_fire: f32,
        "DmgLightning" => dmg_lightning: f32,
        "DmgDeltaLightning" => dmg_delta_lightning: f32,
        "DmgCold" => dmg_cold: f32,
        "DmgDeltaCold" => dmg_delta_cold: f32,
        "DmgPoison" => dmg_poison: f32,
        "DmgDeltaPoison" => dmg_delta_poison: f32,
        "DmgArcane" => dmg_arcane: f32,
        "DmgDeltaArcane" => dmg_delta_arcane: f32,
        "DmgHoly" => dmg_holy: f32,
        "DmgDeltaHoly" => dmg_delta_holy: f32,
        "DmgSiege" => dmg_siege: f32,
        "DmgDeltaSiege" => dmg_delta_siege: f32,
        "HirelingHPMin" => hireling_hp_min: f32,
        "HirelingHPDelta" => hireling_hp_delta: f32,
        "HirelingHPRegen" => hireling_hp_regen: f32,
        "HirelingDmg" => hireling_dmg: f32,
        "HirelingDmgRange" => hireling_dmg_range: f32,
        "HirelingRetrainCost" => hireling_retrain_cost: f32,
        "GetHitDamage" => get_hit_damage: f32,
        "GetHitScalar" => get_hit_scalar: f32,
        "GetHitMax" => get_hit_max: f32,
        "GetHitRecovery" => get_hit_recovery: f32,
        "WalkSpd" => walk_spd: f32,
        "RunSpd" => run_spd: f32,
        "SprintSpd" => sprint_spd: f32,
        "StrafeSpd" => strafe_spd: f32,
        "AttSpd" => att_spd: f32,
        "ProjSpd" => proj_spd: f32,
        "Exp" => exp: f32,
        "ResistPhysical" => resist_physical: f32,
        "ResistFire" => resist_fire: f32,
        "ResistLightning" => resist_lightning: f32,
        "ResistCold" => resist_cold: f32,
        "ResistPoison" => resist_poison: f32,
        "ResistArcane" => resist_arcane: f32,
        "ResistSiege" => resist_siege: f32,
        "ResistChill" => resist_chill: f32,
        "ResistStun" => resist_stun: f32,
        "ConsoleHealthScalar" => console_health_scalar: f32,
        "ConsoleDamageScalar" => console_damage_scalar: f32,
        "Monster1AffixWeight" => monster1_affix_weight: f32,
        "Monster2AffixWeight" => monster2_affix_weight: f32,
        "Monster3AffixWeight" => monster3_affix_weight: f32,
        "Monster4AffixWeight" => monster4_affix_weight: f32,
        "Pad" => pad: i32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterLevelsFile {
    pub header: ExtendedHeader,
    pub records: Vec<MonsterLevel>,
}

impl GamTable for MonsterLevelsFile {
    const KIND: TableKind = TableKind::MonsterLevels;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            MONSTER_LEVEL_RECORD_SIZE,
            MonsterLevel::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "monster level",
            MONSTER_LEVEL_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
