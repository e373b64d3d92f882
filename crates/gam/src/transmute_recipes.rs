//! Cube recipes. Each recipe holds eight opaque ingredient blobs whose width
//! changed between builds; it is inferred from where the next record's name
//! lands.

use common::{ByteCursor, ByteSink};
use layout::name::NAME_FIELD_WIDTH;
use layout::{infer_width, ExtendedHeader};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::blob::{read_blobs, resolve_width_or, write_blobs, Blob};
use crate::table::{TableBlock, TableWriter};
use crate::{GamTable, Result, TableKind};

pub const INGREDIENT_COUNT: usize = 8;
pub const DEFAULT_INGREDIENT_SIZE: usize = 8;

/// Candidate ingredient widths, narrowest first.
pub fn ingredient_size_candidates() -> Vec<usize> {
    (8..=32).step_by(4).collect()
}

/// Stored stride for ingredients of `width` bytes. Four zero bytes follow
/// the last field.
pub fn transmute_stride(width: usize) -> usize {
    NAME_FIELD_WIDTH + 16 + INGREDIENT_COUNT * width + 12
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct TransmuteRecipesFile {
    pub header: ExtendedHeader,
    /// Zero means "take it from the first ingredient, else 8".
    pub ingredient_size: usize,
    pub records: Vec<TransmuteRecipe>,
}

/// Transmute kinds stay numeric.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct TransmuteRecipe {
    pub name: String,
    #[serde(rename = "GBID")]
    pub gbid: i32,
    #[serde(rename = "PAD")]
    pub pad: i32,
    pub transmute_type: i32,
    pub ingredients: Vec<Blob>,
    pub ingredients_count: i32,
    pub page: i32,
    pub hidden: i32,
}

impl TransmuteRecipe {
    fn read(cursor: &mut ByteCursor<'_>, width: usize) -> Result<Self> {
        let name = cursor.read_fixed_str(NAME_FIELD_WIDTH)?;
        let [gbid, pad, transmute_type] = cursor.read_i32_array::<3>()?;
        let ingredients = read_blobs(cursor, INGREDIENT_COUNT, width)?;
        let [ingredients_count, page, hidden] = cursor.read_i32_array::<3>()?;
        Ok(Self {
            name,
            gbid,
            pad,
            transmute_type,
            ingredients,
            ingredients_count,
            page,
            hidden,
        })
    }

    fn write(&self, sink: &mut ByteSink, width: usize) {
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[self.gbid, self.pad, self.transmute_type]);
        write_blobs(sink, &self.ingredients, INGREDIENT_COUNT, width);
        sink.write_i32_slice(&[self.ingredients_count, self.page, self.hidden]);
    }
}

impl GamTable for TransmuteRecipesFile {
    const KIND: TableKind = TableKind::TransmuteRecipes;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let window = block.records();
        let width = infer_width(
            image,
            window.start,
            &ingredient_size_candidates(),
            transmute_stride,
        )
        .unwrap_or_else(|| {
            debug!("ingredient width not inferred, assuming {DEFAULT_INGREDIENT_SIZE}");
            DEFAULT_INGREDIENT_SIZE
        });
        let records = block.read_records(window, transmute_stride(width), |cursor| {
            TransmuteRecipe::read(cursor, width)
        })?;
        Ok(Self {
            header: block.header,
            ingredient_size: width,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        let sample = self.records.first().and_then(|r| r.ingredients.first());
        let width = resolve_width_or(self.ingredient_size, sample, DEFAULT_INGREDIENT_SIZE);
        let stride = transmute_stride(width);
        let mut writer = TableWriter::new(&self.header);
        for recipe in &self.records {
            writer.record("transmute recipe", stride, |sink| recipe.write(sink, width))?;
        }
        writer.finish()
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
