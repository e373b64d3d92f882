use layout::ExtendedHeader;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const SALVAGE_RECORD_SIZE: usize = 16;
/// Strides seen across builds, in preference order. Only the first 16
/// bytes of a wider record are kept.
pub const SALVAGE_STRIDES: [usize; 7] = [16, 20, 24, 32, 40, 48, 64];

table_record! {
    /// Treasure classes rolled when salvaging items of one level band.
    pub struct ItemSalvageLevel {
        "TreasureClassSNO0" => treasure_class_sno0: i32,
        "TreasureClassSNO1" => treasure_class_sno1: i32,
        "TreasureClassSNO2" => treasure_class_sno2: i32,
        "TreasureClassSNO3" => treasure_class_sno3: i32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemSalvageLevelsFile {
    pub header: ExtendedHeader,
    pub records: Vec<ItemSalvageLevel>,
}

impl GamTable for ItemSalvageLevelsFile {
    const KIND: TableKind = TableKind::ItemSalvageLevels;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let (window, stride) = block.divisible_layout(&SALVAGE_STRIDES, SALVAGE_RECORD_SIZE);
        debug!("salvage records at {:#x} with stride {stride}", window.start);
        let records = block.read_records(window, stride, ItemSalvageLevel::read_field)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(&self.header, "salvage level", SALVAGE_RECORD_SIZE, &self.records)
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
