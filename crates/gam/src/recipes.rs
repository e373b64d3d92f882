use common::{name_hash, ByteCursor, ByteSink};
use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const RECIPE_RECORD_SIZE: usize = 336;
pub const RECIPE_INGREDIENT_SLOTS: usize = 5;

table_record! {
    #[derive(Copy)]
    pub struct RecipeReagent {
        "GBID" => gbid: i32,
        "Count" => count: i32,
    }
}

/// Crafting recipe. A zero `Hash` is filled from the name on write.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Recipe {
    pub name: String,
    pub hash: i32,
    #[serde(rename = "GBID")]
    pub gbid: i32,
    #[serde(rename = "PAD")]
    pub pad: i32,
    #[serde(rename = "SNORecipe")]
    pub sno_recipe: i32,
    pub crafter_type: i32,
    pub flags: i32,
    pub level: i32,
    pub gold: i32,
    pub num_ingredients: i32,
    pub reserved0: i32,
    pub ingredients: Vec<RecipeReagent>,
}

impl Field for Recipe {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let name = cursor.read_fixed_str(NAME_FIELD_WIDTH)?;
        let [hash, gbid, pad, sno_recipe, crafter_type] = cursor.read_i32_array::<5>()?;
        let [flags, level, gold, num_ingredients, reserved0] = cursor.read_i32_array::<5>()?;
        let ingredients = (0..RECIPE_INGREDIENT_SLOTS)
            .map(|_| RecipeReagent::read_field(cursor))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name,
            hash,
            gbid,
            pad,
            sno_recipe,
            crafter_type,
            flags,
            level,
            gold,
            num_ingredients,
            reserved0,
            ingredients,
        })
    }

    fn write_field(&self, sink: &mut ByteSink) {
        let hash = match self.hash {
            0 => name_hash(&self.name),
            stored => stored,
        };
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[
            hash,
            self.gbid,
            self.pad,
            self.sno_recipe,
            self.crafter_type,
            self.flags,
            self.level,
            self.gold,
            self.num_ingredients,
            self.reserved0,
        ]);
        for index in 0..RECIPE_INGREDIENT_SLOTS {
            let reagent = self.ingredients.get(index).copied().unwrap_or_default();
            reagent.write_field(sink);
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct RecipesFile {
    pub header: ExtendedHeader,
    pub records: Vec<Recipe>,
}

impl GamTable for RecipesFile {
    const KIND: TableKind = TableKind::Recipes;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(block.records(), RECIPE_RECORD_SIZE, Recipe::read_field)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(&self.header, "recipe", RECIPE_RECORD_SIZE, &self.records)
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
