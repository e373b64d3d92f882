use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const ENCHANT_COST_RECORD_SIZE: usize = 8;

table_record! {
    /// Cost multiplier applied after `UseCount` enchants.
    pub struct EnchantCostScalar {
        "UseCount" => use_count: i32,
        "CostMultiplier" => cost_multiplier: f32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct EnchantCostScalarsFile {
    pub header: ExtendedHeader,
    pub records: Vec<EnchantCostScalar>,
}

impl GamTable for EnchantCostScalarsFile {
    const KIND: TableKind = TableKind::EnchantCostScalars;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            ENCHANT_COST_RECORD_SIZE,
            EnchantCostScalar::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "enchant cost scalar",
            ENCHANT_COST_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
