use common::{ByteCursor, ByteSink};
use layout::ExtendedHeader;
use serde::{Deserialize, Serialize};

use crate::table::{TableBlock, TableWriter};
use crate::{GamTable, Result, TableKind};

pub const HANDICAP_RECORD_SIZE: usize = 32;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HandicapLevelsFile {
    pub header: ExtendedHeader,
    pub records: Vec<HandicapLevel>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(default)]
pub struct HandicapLevel {
    #[serde(rename = "HPMod")]
    pub hp_mod: f32,
    #[serde(rename = "DmgMod")]
    pub dmg_mod: f32,
    #[serde(rename = "F2")]
    pub f2: f32,
    #[serde(rename = "XPMod")]
    pub xp_mod: f32,
    #[serde(rename = "GoldMod")]
    pub gold_mod: f32,
    #[serde(rename = "F5")]
    pub f5: f32,
    #[serde(rename = "I0")]
    pub i0: i32,
    #[serde(rename = "I1")]
    pub i1: i32,
}

impl HandicapLevel {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let [hp_mod, dmg_mod, f2, xp_mod, gold_mod, f5] = cursor.read_f32_array::<6>()?;
        Ok(Self {
            hp_mod,
            dmg_mod,
            f2,
            xp_mod,
            gold_mod,
            f5,
            i0: cursor.read_i32()?,
            i1: cursor.read_i32()?,
        })
    }

    fn write(&self, sink: &mut ByteSink) {
        sink.write_f32_slice(&[
            self.hp_mod,
            self.dmg_mod,
            self.f2,
            self.xp_mod,
            self.gold_mod,
            self.f5,
        ]);
        sink.write_i32(self.i0);
        sink.write_i32(self.i1);
    }
}

impl GamTable for HandicapLevelsFile {
    const KIND: TableKind = TableKind::HandicapLevels;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let records =
            block.read_records(block.records(), HANDICAP_RECORD_SIZE, HandicapLevel::read)?;
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        let mut writer = TableWriter::new(&self.header);
        for level in &self.records {
            writer.record("handicap level", HANDICAP_RECORD_SIZE, |sink| level.write(sink))?;
        }
        writer.finish()
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
