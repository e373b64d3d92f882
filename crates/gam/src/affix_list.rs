use common::{ByteCursor, ByteSink};
use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{AttributeSpecifier, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const AFFIX_RECORD_SIZE: usize = 784;
pub const EXCLUDED_CATEGORY_COUNT: usize = 6;
pub const ITEM_GROUP_COUNT: usize = 24;
pub const AFFIX_SPECIFIER_COUNT: usize = 4;
/// Short category lists are filled with this on write.
pub const NO_CATEGORY: i32 = -1;
const RESERVED_TAIL: usize = 72;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AffixListFile {
    pub header: ExtendedHeader,
    pub records: Vec<Affix>,
}

/// Item affix definition. Effect, class and affix kinds stay numeric.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Affix {
    pub name: String,
    #[serde(rename = "I0")]
    pub i0: i32,
    pub affix_level: i32,
    pub sup_mask: i32,
    pub frequency: i32,
    pub demon_hunter_frequency: i32,
    pub barbarian_frequency: i32,
    pub wizard_frequency: i32,
    pub witch_doctor_frequency: i32,
    pub monk_frequency: i32,
    /// Stored twice; the second copy is rewritten from this one.
    pub crafter_required_level: i32,
    pub necromancer_frequency: i32,
    pub hireling_none_frequency: i32,
    pub templar_frequency: i32,
    pub scoundrel_frequency: i32,
    pub enchantress_frequency: i32,
    pub affix_level_min: i32,
    pub affix_level_max: i32,
    pub cost: i32,
    pub identify_cost: i32,
    pub override_level_req: i32,
    pub item_effect_type: i32,
    pub item_effect_level: i32,
    pub converts_to: i32,
    pub legendary_uprank_affix: i32,
    #[serde(rename = "SNORareNamePrefixStringList")]
    pub sno_rare_name_prefix_string_list: i32,
    #[serde(rename = "SNORareNameSuffixStringList")]
    pub sno_rare_name_suffix_string_list: i32,
    pub affix_family0: i32,
    pub affix_family1: i32,
    pub player_class: i32,
    pub exclusion_category: i32,
    pub excluded_categories: Vec<i32>,
    pub item_group: Vec<i32>,
    pub legendary_allowed_types: Vec<i32>,
    pub allowed_quality_levels: i32,
    pub affix_type: i32,
    pub associated_affix: i32,
    pub attribute_specifiers: Vec<AttributeSpecifier>,
    pub affix_group: i32,
}

fn read_words(cursor: &mut ByteCursor<'_>, count: usize) -> Result<Vec<i32>> {
    (0..count)
        .map(|_| -> Result<i32> { Ok(cursor.read_i32()?) })
        .collect()
}

/// Writes exactly `count` words, filling with [`NO_CATEGORY`].
fn write_categories(sink: &mut ByteSink, values: &[i32], count: usize) {
    for index in 0..count {
        sink.write_i32(values.get(index).copied().unwrap_or(NO_CATEGORY));
    }
}

impl Affix {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let name = cursor.read_fixed_str(NAME_FIELD_WIDTH)?;
        let [i0, affix_level, sup_mask, frequency, demon_hunter_frequency, barbarian_frequency] =
            cursor.read_i32_array::<6>()?;
        let [wizard_frequency, witch_doctor_frequency, monk_frequency, crafter_required_level] =
            cursor.read_i32_array::<4>()?;
        let [necromancer_frequency, hireling_none_frequency, templar_frequency, scoundrel_frequency, enchantress_frequency] =
            cursor.read_i32_array::<5>()?;
        let [affix_level_min, affix_level_max, cost, identify_cost, override_level_req] =
            cursor.read_i32_array::<5>()?;
        // Second copy of the crafter level.
        cursor.skip(4)?;
        let [item_effect_type, item_effect_level, converts_to, legendary_uprank_affix] =
            cursor.read_i32_array::<4>()?;
        let [prefix_list, suffix_list, affix_family0, affix_family1, player_class, exclusion_category] =
            cursor.read_i32_array::<6>()?;
        let excluded_categories = read_words(cursor, EXCLUDED_CATEGORY_COUNT)?;
        let item_group = read_words(cursor, ITEM_GROUP_COUNT)?;
        let legendary_allowed_types = read_words(cursor, ITEM_GROUP_COUNT)?;
        let [allowed_quality_levels, affix_type, associated_affix] = cursor.read_i32_array::<3>()?;
        let attribute_specifiers = (0..AFFIX_SPECIFIER_COUNT)
            .map(|_| AttributeSpecifier::read_field(cursor))
            .collect::<Result<Vec<_>>>()?;
        cursor.skip(RESERVED_TAIL)?;
        let affix_group = cursor.read_i32()?;

        Ok(Self {
            name,
            i0,
            affix_level,
            sup_mask,
            frequency,
            demon_hunter_frequency,
            barbarian_frequency,
            wizard_frequency,
            witch_doctor_frequency,
            monk_frequency,
            crafter_required_level,
            necromancer_frequency,
            hireling_none_frequency,
            templar_frequency,
            scoundrel_frequency,
            enchantress_frequency,
            affix_level_min,
            affix_level_max,
            cost,
            identify_cost,
            override_level_req,
            item_effect_type,
            item_effect_level,
            converts_to,
            legendary_uprank_affix,
            sno_rare_name_prefix_string_list: prefix_list,
            sno_rare_name_suffix_string_list: suffix_list,
            affix_family0,
            affix_family1,
            player_class,
            exclusion_category,
            excluded_categories,
            item_group,
            legendary_allowed_types,
            allowed_quality_levels,
            affix_type,
            associated_affix,
            attribute_specifiers,
            affix_group,
        })
    }
}

impl Field for Affix {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Self::read(cursor)
    }

    fn write_field(&self, sink: &mut ByteSink) {
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[
            self.i0,
            self.affix_level,
            self.sup_mask,
            self.frequency,
            self.demon_hunter_frequency,
            self.barbarian_frequency,
            self.wizard_frequency,
            self.witch_doctor_frequency,
            self.monk_frequency,
            self.crafter_required_level,
            self.necromancer_frequency,
            self.hireling_none_frequency,
            self.templar_frequency,
            self.scoundrel_frequency,
            self.enchantress_frequency,
            self.affix_level_min,
            self.affix_level_max,
            self.cost,
            self.identify_cost,
            self.override_level_req,
            self.crafter_required_level,
            self.item_effect_type,
            self.item_effect_level,
            self.converts_to,
            self.legendary_uprank_affix,
            self.sno_rare_name_prefix_string_list,
            self.sno_rare_name_suffix_string_list,
            self.affix_family0,
            self.affix_family1,
            self.player_class,
            self.exclusion_category,
        ]);
        write_categories(sink, &self.excluded_categories, EXCLUDED_CATEGORY_COUNT);
        write_categories(sink, &self.item_group, ITEM_GROUP_COUNT);
        write_categories(sink, &self.legendary_allowed_types, ITEM_GROUP_COUNT);
        sink.write_i32_slice(&[
            self.allowed_quality_levels,
            self.affix_type,
            self.associated_affix,
        ]);
        for index in 0..AFFIX_SPECIFIER_COUNT {
            let spec = self.attribute_specifiers.get(index).copied().unwrap_or_default();
            spec.write_field(sink);
        }
        sink.write_zeros(RESERVED_TAIL);
        sink.write_i32(self.affix_group);
    }
}

impl GamTable for AffixListFile {
    const KIND: TableKind = TableKind::AffixList;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_named_records(block.records(), AFFIX_RECORD_SIZE, Affix::read)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(&self.header, "affix", AFFIX_RECORD_SIZE, &self.records)
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
