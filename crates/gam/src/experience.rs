//! Per-level experience curves: the main table and the wide alternate one.

use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

/// Stored stride; the listed fields fill the first 160 bytes.
pub const EXPERIENCE_RECORD_SIZE: usize = 468;
pub const EXPERIENCE_ALT_RECORD_SIZE: usize = 128;

table_record! {
    pub struct ExperienceLevel {
        "Level" => level: i32,
        "Experience" => experience: i32,
        "ParagonExperience" => paragon_experience: i32,
        "LegendaryGemLevelReq" => legendary_gem_level_req: i32,
        "GoldDropScalar" => gold_drop_scalar: f32,
        "MagicFindScalar" => magic_find_scalar: f32,
        "LegendaryFindScalar" => legendary_find_scalar: f32,
        "EnchantCost" => enchant_cost: i32,
        "GambleCost" => gamble_cost: i32,
        "GemUpgradeChanceBonus" => gem_upgrade_chance_bonus: f32,
        "CraftingMatScalar" => crafting_mat_scalar: f32,
        "ReforgeCostScalar" => reforge_cost_scalar: f32,
        "ImbueCostScalar" => imbue_cost_scalar: f32,
        "BountyXPMult" => bounty_xp_mult: f32,
        "RiftXPMult" => rift_xp_mult: f32,
        "GriftXPMult" => grift_xp_mult: f32,
        "HellfireXPMult" => hellfire_xp_mult: f32,
        "ShrineXPMult" => shrine_xp_mult: f32,
        "MonsterHPScalar" => monster_hp_scalar: f32,
        "MonsterDmgScalar" => monster_dmg_scalar: f32,
        "PVPXPWin" => pvp_xp_win: i32,
        "PVPNormalXPWin" => pvp_normal_xp_win: i32,
        "PVPTokensWin" => pvp_tokens_win: i32,
        "PVPAltXPWin" => pvp_alt_xp_win: i32,
        "PVPXPLoss" => pvp_xp_loss: i32,
        "PVPNormalXPLoss" => pvp_normal_xp_loss: i32,
        "PVPTokensLoss" => pvp_tokens_loss: i32,
        "PVPAltXPLoss" => pvp_alt_xp_loss: i32,
        "PVPXPTie" => pvp_xp_tie: i32,
        "PVPNormalXPTie" => pvp_normal_xp_tie: i32,
        "PVPTokensTie" => pvp_tokens_tie: i32,
        "PVPAltXPTie" => pvp_alt_xp_tie: i32,
        "GoldCostLevelScalar" => gold_cost_level_scalar: f32,
        "SidekickPrimaryStatIdeal" => sidekick_primary_stat_ideal: i32,
        "SidekickVitalityIdeal" => sidekick_vitality_ideal: i32,
        "SidekickTotalArmorIdeal" => sidekick_total_armor_ideal: i32,
        "SidekickTotalResistIdeal" => sidekick_total_resist_ideal: i32,
        "SidekickTargetLifeOnHitIdeal" => sidekick_target_life_on_hit_ideal: i32,
        "SidekickTargetDPSIdeal" => sidekick_target_dps_ideal: i32,
        "GearXPScalar" => gear_xp_scalar: f32,
    }
}

table_record! {
    /// One 64-bit threshold followed by thirty unnamed words.
    pub struct ExperienceAltLevel {
        "L0" => l0: i64,
        "I1" => i1: i32,
        "I2" => i2: i32,
        "I3" => i3: i32,
        "I4" => i4: i32,
        "I5" => i5: i32,
        "I6" => i6: i32,
        "I7" => i7: i32,
        "I8" => i8: i32,
        "I9" => i9: i32,
        "I10" => i10: i32,
        "I11" => i11: i32,
        "I12" => i12: i32,
        "I13" => i13: i32,
        "I14" => i14: i32,
        "I15" => i15: i32,
        "I16" => i16: i32,
        "I17" => i17: i32,
        "I18" => i18: i32,
        "I19" => i19: i32,
        "I20" => i20: i32,
        "I21" => i21: i32,
        "I22" => i22: i32,
        "I23" => i23: i32,
        "I24" => i24: i32,
        "I25" => i25: i32,
        "I26" => i26: i32,
        "I27" => i27: i32,
        "I28" => i28: i32,
        "I29" => i29: i32,
        "I30" => i30: i32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExperienceTableFile {
    pub header: ExtendedHeader,
    pub records: Vec<ExperienceLevel>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExperienceTableAltFile {
    pub header: ExtendedHeader,
    pub records: Vec<ExperienceAltLevel>,
}

impl GamTable for ExperienceTableFile {
    const KIND: TableKind = TableKind::ExperienceTable;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            EXPERIENCE_RECORD_SIZE,
            ExperienceLevel::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "experience level",
            EXPERIENCE_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl GamTable for ExperienceTableAltFile {
    const KIND: TableKind = TableKind::ExperienceTableAlt;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            EXPERIENCE_ALT_RECORD_SIZE,
            ExperienceAltLevel::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "alternate experience level",
            EXPERIENCE_ALT_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
