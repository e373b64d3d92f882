use common::{ByteCursor, ByteSink};
use layout::name::NAME_FIELD_WIDTH;
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::table::{TableBlock, TableWriter};
use crate::{GamTable, Result, TableKind};

pub const MONSTER_NAME_RECORD_SIZE: usize = 400;
const SUFFIX_WIDTH: usize = 128;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterNamesFile {
    pub header: ExtendedHeader,
    pub records: Vec<MonsterName>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterName {
    pub name: String,
    #[serde(rename = "I0")]
    pub i0: i32,
    #[serde(rename = "I1")]
    pub i1: i32,
    pub affix_type: i32,
    #[serde(rename = "S0")]
    pub s0: String,
    #[serde(rename = "I2")]
    pub i2: i32,
}

impl MonsterName {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            name: cursor.read_fixed_str(NAME_FIELD_WIDTH)?,
            i0: cursor.read_i32()?,
            i1: cursor.read_i32()?,
            affix_type: cursor.read_i32()?,
            s0: cursor.read_fixed_str(SUFFIX_WIDTH)?,
            i2: cursor.read_i32()?,
        })
    }

    fn write(&self, sink: &mut ByteSink) {
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[self.i0, self.i1, self.affix_type]);
        sink.write_fixed_str(&self.s0, SUFFIX_WIDTH);
        sink.write_i32(self.i2);
    }
}

impl GamTable for MonsterNamesFile {
    const KIND: TableKind = TableKind::MonsterNames;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records =
            block.read_records(block.records(), MONSTER_NAME_RECORD_SIZE, MonsterName::read)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        let mut writer = TableWriter::new(&self.header);
        for name in &self.records {
            writer.record("monster name", MONSTER_NAME_RECORD_SIZE, |sink| name.write(sink))?;
        }
        writer.finish()
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
