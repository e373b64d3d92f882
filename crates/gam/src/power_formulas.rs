use common::{ByteCursor, ByteSink};
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::Field;
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const FORMULA_NAME_WIDTH: usize = 1024;
pub const FORMULA_VALUE_COUNT: usize = 76;
pub const POWER_FORMULA_RECORD_SIZE: usize = FORMULA_NAME_WIDTH + FORMULA_VALUE_COUNT * 4;

/// Named lookup curve. Short value lists are written padded with zeros.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PowerFormula {
    #[serde(rename = "S0")]
    pub s0: String,
    #[serde(rename = "F0")]
    pub f0: Vec<f32>,
}

impl Field for PowerFormula {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            s0: cursor.read_fixed_str(FORMULA_NAME_WIDTH)?,
            f0: cursor.read_f32_vec(FORMULA_VALUE_COUNT)?,
        })
    }

    fn write_field(&self, sink: &mut ByteSink) {
        sink.write_fixed_str(&self.s0, FORMULA_NAME_WIDTH);
        let values = &self.f0[..self.f0.len().min(FORMULA_VALUE_COUNT)];
        sink.write_f32_slice(values);
        sink.write_zeros((FORMULA_VALUE_COUNT - values.len()) * 4);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct PowerFormulaTablesFile {
    pub header: ExtendedHeader,
    pub records: Vec<PowerFormula>,
}

impl GamTable for PowerFormulaTablesFile {
    const KIND: TableKind = TableKind::PowerFormulaTables;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            POWER_FORMULA_RECORD_SIZE,
            PowerFormula::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "power formula",
            POWER_FORMULA_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
