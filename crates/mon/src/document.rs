use layout::{BlockHeader, RawRegion, SnoHeader, SpawnGroup, TrailerSource};
use serde::{Deserialize, Serialize};

pub const ATTRIBUTE_MODIFIER_COUNT: usize = 146;
pub const HEALTH_DROP_COUNT: usize = 4;
pub const SKILL_DECLARATION_COUNT: usize = 8;
pub const AI_BEHAVIOR_COUNT: usize = 6;
pub const MOVEMENT_STYLE_COUNT: usize = 8;
pub const SUMMON_ACTOR_COUNT: usize = 6;
pub const AFFIX_COUNT: usize = 4;
pub const DISALLOWED_AFFIX_COUNT: usize = 6;

/// Id used by the format for an unset SNO or GBID reference.
pub const NO_REFERENCE: i32 = -1;

fn no_reference() -> i32 {
    NO_REFERENCE
}

fn one() -> f32 {
    1.0
}

fn one_i32() -> i32 {
    1
}

/// Editable form of a `.mon` monster definition.
///
/// The fixed fields are listed in file order. Spawn-group placement fields
/// and block header offsets record where blocks sat in the source image;
/// the writer only honours them when preserving offsets.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterDocument {
    pub header: SnoHeader,
    pub flags: i32,
    #[serde(rename = "ActorSNO", default = "no_reference")]
    pub actor_sno: i32,
    pub look_index: i32,
    #[serde(default = "no_reference")]
    pub race: i32,
    #[serde(default = "no_reference")]
    pub size: i32,
    #[serde(rename = "Type", default = "no_reference")]
    pub r#type: i32,

    pub monster_def: MonsterDef,
    pub resists: i32,
    pub default_count_min: i32,
    pub default_count_delta: i32,
    pub attribute_modifiers: Vec<f32>,

    #[serde(rename = "HPChampion")]
    pub hp_champion: f32,
    #[serde(rename = "HPDeltaChampion")]
    pub hp_delta_champion: f32,
    #[serde(rename = "HPRare")]
    pub hp_rare: f32,
    #[serde(rename = "HPDeltaRare")]
    pub hp_delta_rare: f32,
    #[serde(rename = "HPMinion")]
    pub hp_minion: f32,
    #[serde(rename = "HPDeltaMinion")]
    pub hp_delta_minion: f32,

    pub gold_granted: i32,
    pub health_drop_normal: HealthDrop,
    pub health_drop_champion: HealthDrop,
    pub health_drop_rare: HealthDrop,
    pub health_drop_minion: HealthDrop,

    #[serde(rename = "SNOSkillKit", default = "no_reference")]
    pub sno_skill_kit: i32,
    pub skill_declarations: Vec<SkillDeclaration>,
    pub monster_skill_declarations: Vec<MonsterSkillDeclaration>,

    #[serde(rename = "SNOTreasureClassFirstKill", default = "no_reference")]
    pub sno_treasure_class_first_kill: i32,
    #[serde(rename = "SNOTreasureClass", default = "no_reference")]
    pub sno_treasure_class: i32,
    #[serde(rename = "SNOTreasureClassRare", default = "no_reference")]
    pub sno_treasure_class_rare: i32,
    #[serde(rename = "SNOTreasureClassChampion", default = "no_reference")]
    pub sno_treasure_class_champion: i32,
    #[serde(rename = "SNOTreasureClassChampionLight", default = "no_reference")]
    pub sno_treasure_class_champion_light: i32,

    #[serde(default = "one")]
    pub no_drop_scalar: f32,
    pub flee_chance: f32,
    pub flee_cooldown_min: f32,
    pub flee_cooldown_delta: f32,

    #[serde(default = "one_i32")]
    pub summon_count_per: i32,
    pub summon_lifetime: f32,
    pub summon_max_concurrent: i32,
    pub summon_max_total: i32,

    #[serde(rename = "SNOInventory", default = "no_reference")]
    pub sno_inventory: i32,
    #[serde(rename = "SNOSecondaryInventory", default = "no_reference")]
    pub sno_secondary_inventory: i32,
    #[serde(rename = "SNOLore", default = "no_reference")]
    pub sno_lore: i32,

    #[serde(rename = "AIBehavior")]
    pub ai_behavior: Vec<i32>,
    #[serde(rename = "GBIdMovementStyles")]
    pub gbid_movement_styles: Vec<i32>,
    #[serde(rename = "SNOSummonActor")]
    pub sno_summon_actor: Vec<i32>,

    pub random_affixes: i32,
    #[serde(rename = "GBIdAffixes")]
    pub gbid_affixes: Vec<i32>,
    #[serde(rename = "GBIdDisallowedAffixes")]
    pub gbid_disallowed_affixes: Vec<i32>,

    #[serde(rename = "AITargetStyleNormal")]
    pub ai_target_style_normal: i32,
    #[serde(rename = "AITargetStyleChampion")]
    pub ai_target_style_champion: i32,
    #[serde(rename = "AITargetStyleRare")]
    pub ai_target_style_rare: i32,
    #[serde(default = "no_reference")]
    pub power_type: i32,

    pub tag_map: RawRegion,

    pub minion_spawn_group_count: i32,
    pub minion_spawn_groups_header: BlockHeader,
    pub monster_minion_spawn_groups: Vec<SpawnGroup>,

    pub champion_spawn_group_count: i32,
    pub champion_spawn_groups_header: BlockHeader,
    pub monster_champion_spawn_groups: Vec<SpawnGroup>,

    pub name_offset: i32,
    pub name: String,
    pub does_not_drop_necro_corpse: i32,
    pub pad_tail: i32,
    #[serde(rename = "snoAIStateAttackerCapReached")]
    pub sno_ai_state_attacker_cap_reached: i32,

    /// How the trailer was found. Informational; ignored on write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutReport>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterDef {
    pub idle_radius: f32,
    pub combat_radius: f32,
    pub target_abandon_time: f32,
    pub warn_others_radius: f32,
    #[serde(rename = "RequireLOSforAllTargets")]
    pub require_los_for_all_targets: i32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HealthDrop {
    pub drop_chance: f32,
    #[serde(rename = "GBID")]
    pub gbid: i32,
    pub health_drop_style: i32,
}

impl Default for HealthDrop {
    fn default() -> Self {
        Self {
            drop_chance: 0.0,
            gbid: NO_REFERENCE,
            health_drop_style: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SkillDeclaration {
    #[serde(rename = "SNOPower")]
    pub sno_power: i32,
    pub level_mod: i32,
}

impl Default for SkillDeclaration {
    fn default() -> Self {
        Self {
            sno_power: NO_REFERENCE,
            level_mod: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterSkillDeclaration {
    pub use_range_min: f32,
    pub use_range_max: f32,
    pub weight: i32,
    pub timer: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "Mode")]
pub enum LayoutReport {
    Scanned {
        #[serde(rename = "Shift")]
        shift: usize,
        #[serde(rename = "Score")]
        score: i32,
    },
    Legacy {
        #[serde(rename = "Reason")]
        reason: String,
    },
}

impl From<&TrailerSource> for LayoutReport {
    fn from(source: &TrailerSource) -> Self {
        match *source {
            TrailerSource::Scanned { shift, score } => Self::Scanned { shift, score },
            TrailerSource::LegacyForced => Self::Legacy {
                reason: "forced".to_string(),
            },
            TrailerSource::LegacyFallback { best_score } => Self::Legacy {
                reason: format!("no plausible trailer (best score {best_score})"),
            },
        }
    }
}
