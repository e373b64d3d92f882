//! Item definitions, the largest balance record.
//!
//! Documents list records under `Items` and carry a `Hash` for each one. The
//! hash is derived from the name on read and never stored in the image.

use common::{item_hash, ByteCursor, ByteSink};
use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, AttributeSpecifier, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const ITEM_RECORD_SIZE: usize = 1304;

table_record! {
    #[derive(Copy)]
    pub struct RecipeIngredient {
        "ItemsGBID" => items_gbid: i32,
        "Count" => count: i32,
    }
}

table_record! {
    /// Stored fields of an item in image order. Act, quality and gem kinds
    /// stay numeric.
    pub struct ItemFields {
        name[NAME_FIELD_WIDTH],
        "GBID" => gbid: i32,
        "PAD" => pad_word: i32,
        "SNOActor" => sno_actor: i32,
        "ItemTypesGBID" => item_types_gbid: i32,
        "Flags" => flags: i32,
        "DyeType" => dye_type: i32,
        "ItemLevel" => item_level: i32,
        "ItemAct" => item_act: i32,
        "AffixLevel" => affix_level: i32,
        "BonusAffixes" => bonus_affixes: i32,
        "BonusMajorAffixes" => bonus_major_affixes: i32,
        "BonusMinorAffixes" => bonus_minor_affixes: i32,
        "MaxSockets" => max_sockets: i32,
        "MaxStackSize" => max_stack_size: i32,
        "Cost" => cost: i32,
        "CostAlt" => cost_alt: i32,
        "IdentifyCost" => identify_cost: i32,
        "SellOverrideCost" => sell_override_cost: i32,
        "RemoveGemCost" => remove_gem_cost: i32,
        "RequiredLevel" => required_level: i32,
        "CrafterRequiredLevel" => crafter_required_level: i32,
        "BaseDurability" => base_durability: i32,
        "DurabilityVariance" => durability_variance: i32,
        "EnchantAffixCost" => enchant_affix_cost: i32,
        "EnchantAffixCostX1" => enchant_affix_cost_x1: i32,
        "TransmogUnlockCrafterLevel" => transmog_unlock_crafter_level: i32,
        "TransmogCost" => transmog_cost: i32,
        "SNOBaseItem" => sno_base_item: i32,
        "SNOSet" => sno_set: i32,
        "SNOComponentTreasureClass" => sno_component_treasure_class: i32,
        "SNOComponentTreasureClassMagic" => sno_component_treasure_class_magic: i32,
        "SNOComponentTreasureClassRare" => sno_component_treasure_class_rare: i32,
        "SNOComponentTreasureClassLegend" => sno_component_treasure_class_legend: i32,
        "SNORareNamePrefixStringList" => sno_rare_name_prefix_string_list: i32,
        "SNORareNameSuffixStringList" => sno_rare_name_suffix_string_list: i32,
        "StartEffect" => start_effect: i32,
        "EndEffect" => end_effect: i32,
        "PortraitBkgrnd" => portrait_bkgrnd: i32,
        "PortraitHPBar" => portrait_hp_bar: i32,
        "PortraitBanner" => portrait_banner: i32,
        "PortraitFrame" => portrait_frame: i32,
        "Labels" => labels: [i32; 5],
        "Pad" => pad: f32,
        "WeaponDamageMin" => weapon_damage_min: f32,
        "WeaponDamageDelta" => weapon_damage_delta: f32,
        "DamageMinVariance" => damage_min_variance: f32,
        "DamageDeltaVariance" => damage_delta_variance: f32,
        "AttacksPerSecond" => attacks_per_second: f32,
        "Armor" => armor: f32,
        "ArmorDelta" => armor_delta: f32,
        "SNOSkill0" => sno_skill0: i32,
        "SkillI0" => skill_i0: i32,
        "SNOSkill1" => sno_skill1: i32,
        "SkillI1" => skill_i1: i32,
        "SNOSkill2" => sno_skill2: i32,
        "SkillI2" => skill_i2: i32,
        "SNOSkill3" => sno_skill3: i32,
        "SkillI3" => skill_i3: i32,
        "Attribute" => attribute: [AttributeSpecifier; 16],
        "Quality" => quality: i32,
        "RecipeToGrant" => recipe_to_grant: [i32; 10],
        "TransmogsToGrant" => transmogs_to_grant: [i32; 8],
        "Massive0" => massive0: [i32; 9],
        "LegendaryAffixFamily" => legendary_affix_family: [i32; 6],
        "MaxAffixLevel" => max_affix_level: [i32; 6],
        "I38" => i38: [i32; 6],
        "LegendaryFamily" => legendary_family: i32,
        "GemT" => gem_t: i32,
        "CraftingTier" => crafting_tier: i32,
        "CraftingQuality" => crafting_quality: i32,
        "snoActorPageOfFatePortal" => sno_actor_page_of_fate_portal: i32,
        "snoWorldPageOfFate1" => sno_world_page_of_fate1: i32,
        "snoWorldPageOfFate2" => sno_world_page_of_fate2: i32,
        "snoLevelAreaPageOfFatePortal" => sno_level_area_page_of_fate_portal: i32,
        "EnchantAffixIngredientsCount" => enchant_affix_ingredients_count: i32,
        "EnchantAffixIngredients" => enchant_affix_ingredients: [RecipeIngredient; 6],
        "EnchantAffixIngredientsCountX1" => enchant_affix_ingredients_count_x1: i32,
        "EnchantAffixIngredientsX1" => enchant_affix_ingredients_x1: [RecipeIngredient; 6],
        "LegendaryPowerItemReplacement" => legendary_power_item_replacement: i32,
        "SeasonRequiredToDrop" => season_required_to_drop: i32,
        "Attribute1" => attribute1: [AttributeSpecifier; 2],
        "JewelSecondaryEffectUnlockRank" => jewel_secondary_effect_unlock_rank: i32,
        "JewelMaxRank" => jewel_max_rank: i32,
        "MainEffect" => main_effect: i32,
        "DateReleased" => date_released: i32,
        "VacuumPickup" => vacuum_pickup: i32,
        "CostAlt2" => cost_alt2: i32,
        "DynamicCraftCostMagic" => dynamic_craft_cost_magic: i32,
        "DynamicCraftCostRare" => dynamic_craft_cost_rare: i32,
        "DynamicCraftAffixCount" => dynamic_craft_affix_count: i32,
        "SeasonCacheTreasureClass" => season_cache_treasure_class: i32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Item {
    #[serde(rename = "Hash", default)]
    pub hash: i32,
    #[serde(flatten)]
    pub fields: ItemFields,
}

impl Field for Item {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let fields = ItemFields::read_field(cursor)?;
        Ok(Self {
            hash: item_hash(&fields.name),
            fields,
        })
    }

    fn write_field(&self, sink: &mut ByteSink) {
        self.fields.write_field(sink);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemsFile {
    pub header: ExtendedHeader,
    pub items: Vec<Item>,
}

impl GamTable for ItemsFile {
    const KIND: TableKind = TableKind::Items;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let items = block.read_named_records(block.records(), ITEM_RECORD_SIZE, Item::read_field)?;
        Ok(Self {
            header: block.header,
            items,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(&self.header, "item", ITEM_RECORD_SIZE, &self.items)
    }

    fn record_count(&self) -> usize {
        self.items.len()
    }
}
