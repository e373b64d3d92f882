use common::{decode_fixed_str, i32_at_or_zero, ByteSink};
use layout::name::{field_at, NAME_FIELD_WIDTH};
use layout::ExtendedHeader;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::table::{TableBlock, TableWriter};
use crate::{GamTable, Result, TableKind};

pub const LABEL_RECORD_SIZE: usize = 272;
/// Strides seen across builds, in preference order.
pub const LABEL_STRIDES: [usize; 4] = [272, 264, 276, 280];

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct LabelGbidsFile {
    pub header: ExtendedHeader,
    pub records: Vec<LabelGbid>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct LabelGbid {
    pub name: String,
    #[serde(rename = "I0")]
    pub i0: i32,
    #[serde(rename = "I1")]
    pub i1: i32,
    #[serde(rename = "I2")]
    pub i2: i32,
    #[serde(rename = "I3")]
    pub i3: i32,
}

impl LabelGbid {
    /// Words that do not fit a narrow stride read as zero.
    fn read_at(image: &[u8], start: usize, stride: usize) -> Self {
        let word = |index: usize| {
            let rel = NAME_FIELD_WIDTH + index * 4;
            if rel + 4 <= stride {
                i32_at_or_zero(image, start + rel)
            } else {
                0
            }
        };
        Self {
            name: decode_fixed_str(field_at(image, start, NAME_FIELD_WIDTH)),
            i0: word(0),
            i1: word(1),
            i2: word(2),
            i3: word(3),
        }
    }

    fn write(&self, sink: &mut ByteSink) {
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[self.i0, self.i1, self.i2, self.i3]);
    }
}

impl GamTable for LabelGbidsFile {
    const KIND: TableKind = TableKind::LabelGbids;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let (window, stride) = block.divisible_layout(&LABEL_STRIDES, LABEL_RECORD_SIZE);
        debug!("label records at {:#x} with stride {stride}", window.start);
        let records = layout::whole_records(window, stride)
            .map(|start| LabelGbid::read_at(image, start, stride))
            .collect();
        Ok(Self {
            header: block.header,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        let mut writer = TableWriter::new(&self.header);
        for label in &self.records {
            writer.record("label", LABEL_RECORD_SIZE, |sink| label.write(sink))?;
        }
        writer.finish()
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
