use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const CHARACTER_RECORD_SIZE: usize = 504;

table_record! {
    /// Base stats of a playable class. Resource and attribute kinds stay
    /// numeric.
    pub struct Character {
        name[NAME_FIELD_WIDTH],
        "I0" => i0: i32,
        "I1" => i1: i32,
        "SNOMaleActor" => sno_male_actor: i32,
        "SNOFemaleActor" => sno_female_actor: i32,
        "SNOInventory" => sno_inventory: i32,
        "MaxTrainableSkills" => max_trainable_skills: i32,
        "SNOStartingLMBSkill" => sno_starting_lmb_skill: i32,
        "SNOStartingRMBSkill" => sno_starting_rmb_skill: i32,
        "SNOSKillKit0" => sno_skill_kit0: i32,
        "SNOSKillKit1" => sno_skill_kit1: i32,
        "SNOSKillKit2" => sno_skill_kit2: i32,
        "SNOSKillKit3" => sno_skill_kit3: i32,
        "PrimaryResource" => primary_resource: i32,
        "SecondaryResource" => secondary_resource: i32,
        "CoreAttribute" => core_attribute: i32,
        "PlayerAwarenessRadius" => player_awareness_radius: f32,
        "IsRanged" => is_ranged: i32,
        "Strength" => strength: f32,
        "Dexterity" => dexterity: f32,
        "Intelligence" => intelligence: f32,
        "Vitality" => vitality: f32,
        "HitpointsMax" => hitpoints_max: f32,
        "HitpointsFactorLevel" => hitpoints_factor_level: f32,
        "HPRegen" => hp_regen: f32,
        "ClassDamageReductionPercent" => class_damage_reduction_percent: f32,
        "ClassDamageReductionPercentPVP" => class_damage_reduction_percent_pvp: f32,
        "PrimaryResourceBase" => primary_resource_base: f32,
        "PrimaryResourceFactorLevel" => primary_resource_factor_level: f32,
        "PrimaryResourceRegen" => primary_resource_regen: f32,
        "SecondaryResourceBase" => secondary_resource_base: f32,
        "SecondaryResourceFactorLevel" => secondary_resource_factor_level: f32,
        "SecondaryResourceRegen" => secondary_resource_regen: f32,
        "Armor" => armor: f32,
        "Dmg" => dmg: f32,
        "WalkingRate" => walking_rate: f32,
        "RunningRate" => running_rate: f32,
        "SprintRate" => sprint_rate: f32,
        "ProjRate" => proj_rate: f32,
        "CritDamageCap" => crit_damage_cap: f32,
        "CritPercentBase" => crit_percent_base: f32,
        "CritPercentCap" => crit_percent_cap: f32,
        "DodgeRatingBase" => dodge_rating_base: f32,
        "GetHitMaxBase" => get_hit_max_base: f32,
        "GetHitMaxPerLevel" => get_hit_max_per_level: f32,
        "GetHitRecoveryBase" => get_hit_recovery_base: f32,
        "GetHitRecoveryPerLevel" => get_hit_recovery_per_level: f32,
        "ResistPhysical" => resist_physical: f32,
        "ResistFire" => resist_fire: f32,
        "ResistLightning" => resist_lightning: f32,
        "ResistCold" => resist_cold: f32,
        "ResistPoison" => resist_poison: f32,
        "ResistArcane" => resist_arcane: f32,
        "ResistChill" => resist_chill: f32,
        "ResistStun" => resist_stun: f32,
        "KnockbackWeight" => knockback_weight: f32,
        "OOCHealthRegen" => ooc_health_regen: f32,
        "OOCManaRegen" => ooc_mana_regen: f32,
        "PotionDilutionDuration" => potion_dilution_duration: f32,
        "PotionDilutionScalar" => potion_dilution_scalar: f32,
        "DualWieldBothAttackChance" => dual_wield_both_attack_chance: f32,
        "Freeze_Capacity" => freeze_capacity: f32,
        "Thaw_Rate" => thaw_rate: f32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CharactersFile {
    pub header: ExtendedHeader,
    pub records: Vec<Character>,
}

impl GamTable for CharactersFile {
    const KIND: TableKind = TableKind::Characters;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records =
            block.read_named_records(block.records(), CHARACTER_RECORD_SIZE, Character::read_field)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(&self.header, "character", CHARACTER_RECORD_SIZE, &self.records)
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
