use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const LOOT_RUN_LEVEL_RECORD_SIZE: usize = 56;

table_record! {
    pub struct TieredLootRunLevel {
        "F0" => f0: f32,
        "F1" => f1: f32,
        "F2" => f2: f32,
        "F3" => f3: f32,
        "F4" => f4: f32,
        "F5" => f5: f32,
        "F6" => f6: f32,
        "F7" => f7: f32,
        "I0" => i0: i32,
        "I1" => i1: i32,
        "L0" => l0: i64,
        "F8" => f8: f32,
        "F9" => f9: f32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct TieredLootRunLevelsFile {
    pub header: ExtendedHeader,
    pub records: Vec<TieredLootRunLevel>,
}

impl GamTable for TieredLootRunLevelsFile {
    const KIND: TableKind = TableKind::TieredLootRunLevels;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            LOOT_RUN_LEVEL_RECORD_SIZE,
            TieredLootRunLevel::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "tiered loot run level",
            LOOT_RUN_LEVEL_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
