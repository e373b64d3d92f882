use common::{ByteCursor, ByteSink};
use serde::{Deserialize, Serialize};

use crate::Result;

pub const DEAD_BEEF: u32 = 0xDEAD_BEEF;

/// Seven-word header every SNO file starts with.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnoHeader {
    pub dead_beef: u32,
    pub sno_type: i32,
    pub unknown1: i32,
    pub unknown2: i32,
    #[serde(rename = "SNOId")]
    pub sno_id: i32,
    pub unknown3: i32,
    pub unknown4: i32,
}

impl Default for SnoHeader {
    fn default() -> Self {
        Self {
            dead_beef: DEAD_BEEF,
            sno_type: 0,
            unknown1: 0,
            unknown2: 0,
            sno_id: 0,
            unknown3: 0,
            unknown4: 0,
        }
    }
}

impl SnoHeader {
    pub const SIZE: usize = 28;

    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            dead_beef: cursor.read_u32()?,
            sno_type: cursor.read_i32()?,
            unknown1: cursor.read_i32()?,
            unknown2: cursor.read_i32()?,
            sno_id: cursor.read_i32()?,
            unknown3: cursor.read_i32()?,
            unknown4: cursor.read_i32()?,
        })
    }

    pub fn write(&self, sink: &mut ByteSink) {
        sink.write_u32(self.dead_beef);
        sink.write_i32(self.sno_type);
        sink.write_i32(self.unknown1);
        sink.write_i32(self.unknown2);
        sink.write_i32(self.sno_id);
        sink.write_i32(self.unknown3);
        sink.write_i32(self.unknown4);
    }
}

/// SNO header followed by the balance-type words of tables and monsters.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExtendedHeader {
    #[serde(flatten)]
    pub sno: SnoHeader,
    pub balance_type: i32,
    #[serde(rename = "I0")]
    pub i0: i32,
    #[serde(rename = "I1")]
    pub i1: i32,
}

impl ExtendedHeader {
    pub const SIZE: usize = SnoHeader::SIZE + 12;

    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            sno: SnoHeader::read(cursor)?,
            balance_type: cursor.read_i32()?,
            i0: cursor.read_i32()?,
            i1: cursor.read_i32()?,
        })
    }

    pub fn write(&self, sink: &mut ByteSink) {
        self.sno.write(sink);
        sink.write_i32(self.balance_type);
        sink.write_i32(self.i0);
        sink.write_i32(self.i1);
    }
}
