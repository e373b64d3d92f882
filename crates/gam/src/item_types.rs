use common::{item_hash, ByteCursor, ByteSink};
use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::record::{table_record, Field};
use crate::table::{write_fixed_table, TableBlock};
use crate::{GamTable, Result, TableKind};

pub const ITEM_TYPE_RECORD_SIZE: usize = 336;

table_record! {
    pub struct ItemTypeFields {
        name[NAME_FIELD_WIDTH],
        "ParentType" => parent_type: i32,
        "GBID" => gbid: i32,
        "I0" => i0: i32,
        "LootLevelRange" => loot_level_range: i32,
        "ReqCrafterLevelForEnchant" => req_crafter_level_for_enchant: i32,
        "MaxSockets" => max_sockets: i32,
        "Usable" => usable: i32,
        "BodySlot1" => body_slot1: i32,
        "BodySlot2" => body_slot2: i32,
        "BodySlot3" => body_slot3: i32,
        "BodySlot4" => body_slot4: i32,
        "InheritedAffix0" => inherited_affix0: i32,
        "InheritedAffix1" => inherited_affix1: i32,
        "InheritedAffix2" => inherited_affix2: i32,
        "InheritedAffixFamily0" => inherited_affix_family0: i32,
        "Labels" => labels: [i32; 5],
    }
}

/// Item category; `Hash` is derived from the name like an item's.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ItemType {
    #[serde(rename = "Hash", default)]
    pub hash: i32,
    #[serde(flatten)]
    pub fields: ItemTypeFields,
}

impl Field for ItemType {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let fields = ItemTypeFields::read_field(cursor)?;
        Ok(Self {
            hash: item_hash(&fields.name),
            fields,
        })
    }

    fn write_field(&self, sink: &mut ByteSink) {
        self.fields.write_field(sink);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemTypesFile {
    pub header: ExtendedHeader,
    pub records: Vec<ItemType>,
}

impl GamTable for ItemTypesFile {
    const KIND: TableKind = TableKind::ItemTypes;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records =
            block.read_records(block.records(), ITEM_TYPE_RECORD_SIZE, ItemType::read_field)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        write_fixed_table(&self.header, "item type", ITEM_TYPE_RECORD_SIZE, &self.records)
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
