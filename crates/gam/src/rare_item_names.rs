use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const RARE_ITEM_NAME_RECORD_SIZE: usize = 280;

table_record! {
    pub struct RareItemName {
        name[NAME_FIELD_WIDTH],
        "I0" => i0: i32,
        "I1" => i1: i32,
        "Type" => r#type: i32,
        "RelatedAffixOrItemType" => related_affix_or_item_type: i32,
        "AffixType" => affix_type: i32,
        "I2" => i2: i32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct RareItemNamesFile {
    pub header: ExtendedHeader,
    pub records: Vec<RareItemName>,
}

impl GamTable for RareItemNamesFile {
    const KIND: TableKind = TableKind::RareItemNames;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            RARE_ITEM_NAME_RECORD_SIZE,
            RareItemName::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "rare item name",
            RARE_ITEM_NAME_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
