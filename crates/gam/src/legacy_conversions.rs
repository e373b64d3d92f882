use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const LEGACY_CONVERSION_RECORD_SIZE: usize = 280;

table_record! {
    /// Maps a retired item to its replacement.
    pub struct LegacyItemConversion {
        name[NAME_FIELD_WIDTH],
        "GBID" => gbid: i32,
        "PAD" => pad_word: i32,
        "OldItemGBID" => old_item_gbid: i32,
        "NewItemGBID" => new_item_gbid: i32,
        "ConsoleIgnore" => console_ignore: i32,
        "Pad" => pad: i32,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct LegacyItemConversionsFile {
    pub header: ExtendedHeader,
    pub records: Vec<LegacyItemConversion>,
}

impl GamTable for LegacyItemConversionsFile {
    const KIND: TableKind = TableKind::LegacyItemConversions;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records = block.read_records(
            block.records(),
            LEGACY_CONVERSION_RECORD_SIZE,
            LegacyItemConversion::read_field,
        )?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(
            &self.header,
            "legacy item conversion",
            LEGACY_CONVERSION_RECORD_SIZE,
            &self.records,
        )
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
