use common::{ByteCursor, ByteSink};
use layout::name::NAME_FIELD_WIDTH;
use layout::{infer_width, ExtendedHeader};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::blob::{read_blobs, resolve_width, write_blobs, Blob, DEFAULT_ATTR_SIZE};
use crate::table::{TableBlock, TableWriter};
use crate::{GamTable, Result, TableKind};

const ATTRIBUTE_COUNT: usize = 8;

pub fn bonus_stride(attr_size: usize) -> usize {
    NAME_FIELD_WIDTH + 16 + ATTRIBUTE_COUNT * attr_size
}

fn default_attr_size() -> usize {
    DEFAULT_ATTR_SIZE
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SetItemBonusesFile {
    pub header: ExtendedHeader,
    #[serde(default = "default_attr_size")]
    pub attr_size: usize,
    pub records: Vec<SetItemBonus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct SetItemBonus {
    pub name: String,
    #[serde(rename = "I0")]
    pub i0: i32,
    #[serde(rename = "I1")]
    pub i1: i32,
    pub set: i32,
    pub count: i32,
    pub attribute: Vec<Blob>,
}

impl SetItemBonus {
    fn read(cursor: &mut ByteCursor<'_>, attr_size: usize) -> Result<Self> {
        let name = cursor.read_fixed_str(NAME_FIELD_WIDTH)?;
        let [i0, i1, set, count] = cursor.read_i32_array::<4>()?;
        Ok(Self {
            name,
            i0,
            i1,
            set,
            count,
            attribute: read_blobs(cursor, ATTRIBUTE_COUNT, attr_size)?,
        })
    }

    fn write(&self, sink: &mut ByteSink, attr_size: usize) {
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[self.i0, self.i1, self.set, self.count]);
        write_blobs(sink, &self.attribute, ATTRIBUTE_COUNT, attr_size);
    }
}

impl GamTable for SetItemBonusesFile {
    const KIND: TableKind = TableKind::SetItemBonuses;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let window = block.records();
        let candidates: Vec<usize> = (24..=60).step_by(4).collect();
        let attr_size = infer_width(image, window.start, &candidates, bonus_stride)
            .unwrap_or_else(|| {
                debug!("set bonus blob width not inferred, assuming {DEFAULT_ATTR_SIZE}");
                DEFAULT_ATTR_SIZE
            });
        let records = block.read_records(window, bonus_stride(attr_size), |cursor| {
            SetItemBonus::read(cursor, attr_size)
        })?;
        Ok(Self {
            header: block.header,
            attr_size,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        let sample = self.records.first().and_then(|r| r.attribute.first());
        let attr_size = resolve_width(self.attr_size, sample);
        let stride = bonus_stride(attr_size);
        let mut writer = TableWriter::new(&self.header);
        for bonus in &self.records {
            writer.record("set item bonus", stride, |sink| bonus.write(sink, attr_size))?;
        }
        writer.finish()
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
