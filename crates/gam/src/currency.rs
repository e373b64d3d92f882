use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

/// Stored stride; the last four bytes are padding.
pub const CURRENCY_RECORD_SIZE: usize = 304;

table_record! {
    pub struct Currency {
        name[NAME_FIELD_WIDTH],
        "GBID" => gbid: i32,
        "PAD" => pad: i32,
        "CurrencyType" => currency_type: i32,
        "LinkedItemsGBIDs" => linked_items_gbids: [i32; 5],
        "SortOrder" => sort_order: i32,
        "Hidden" => hidden: i32,
        "AutoPickup" => auto_pickup: i32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CurrencyFile {
    pub header: ExtendedHeader,
    pub records: Vec<Currency>,
}

impl GamTable for CurrencyFile {
    const KIND: TableKind = TableKind::Currency;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records =
            block.read_named_records(block.records(), CURRENCY_RECORD_SIZE, Currency::read_field)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(&self.header, "currency", CURRENCY_RECORD_SIZE, &self.records)
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
