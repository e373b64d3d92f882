use common::{name_hash, ByteCursor, ByteSink};
use layout::name::{field_at, NAME_FIELD_WIDTH};
use layout::{infer_width, is_plausible_name, ExtendedHeader};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::blob::{read_blobs, resolve_width, write_blobs, Blob, DEFAULT_ATTR_SIZE};
use crate::table::{TableBlock, TableWriter};
use crate::{GamTable, Result, TableKind};

const SPECIFIER_COUNT: usize = 4;
const ICON_WIDTH: usize = 256;

pub fn paragon_stride(attr_size: usize) -> usize {
    544 + SPECIFIER_COUNT * attr_size
}

/// Small widths first, then the wide specifiers of later builds.
pub fn attr_size_candidates() -> Vec<usize> {
    (24..=60).step_by(4).chain((72..=120).step_by(12)).collect()
}

fn default_attr_size() -> usize {
    DEFAULT_ATTR_SIZE
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParagonBonusesFile {
    pub header: ExtendedHeader,
    #[serde(default = "default_attr_size")]
    pub attr_size: usize,
    pub records: Vec<ParagonBonus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParagonBonus {
    pub name: String,
    /// Stored hash; zero is recomputed from the name on write.
    pub hash: i32,
    #[serde(rename = "I1")]
    pub i1: i32,
    #[serde(rename = "I2")]
    pub i2: i32,
    pub attribute_specifiers: Vec<Blob>,
    pub category: i32,
    pub index: i32,
    pub hero_class: i32,
    pub icon_name: String,
}

impl ParagonBonus {
    fn read(cursor: &mut ByteCursor<'_>, attr_size: usize) -> Result<Self> {
        let name = cursor.read_fixed_str(NAME_FIELD_WIDTH)?;
        let [hash, i1, i2, _pad] = cursor.read_i32_array::<4>()?;
        let attribute_specifiers = read_blobs(cursor, SPECIFIER_COUNT, attr_size)?;
        let [category, index, hero_class] = cursor.read_i32_array::<3>()?;
        let icon_name = cursor.read_fixed_str(ICON_WIDTH)?;
        Ok(Self {
            name,
            hash,
            i1,
            i2,
            attribute_specifiers,
            category,
            index,
            hero_class,
            icon_name,
        })
    }

    fn write(&self, sink: &mut ByteSink, attr_size: usize) {
        let hash = match self.hash {
            0 => name_hash(&self.name),
            stored => stored,
        };
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[hash, self.i1, self.i2, 0]);
        write_blobs(sink, &self.attribute_specifiers, SPECIFIER_COUNT, attr_size);
        sink.write_i32_slice(&[self.category, self.index, self.hero_class]);
        sink.write_fixed_str(&self.icon_name, ICON_WIDTH);
        sink.write_i32(0);
    }
}

impl GamTable for ParagonBonusesFile {
    const KIND: TableKind = TableKind::ParagonBonuses;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let window = block.records();
        let first_named = is_plausible_name(field_at(image, window.start, NAME_FIELD_WIDTH));
        let inferred = first_named
            .then(|| infer_width(image, window.start, &attr_size_candidates(), paragon_stride))
            .flatten();
        let attr_size = inferred.unwrap_or_else(|| {
            debug!("paragon specifier width not inferred, assuming {DEFAULT_ATTR_SIZE}");
            DEFAULT_ATTR_SIZE
        });
        let records = block.read_records(window, paragon_stride(attr_size), |cursor| {
            ParagonBonus::read(cursor, attr_size)
        })?;
        Ok(Self {
            header: block.header,
            attr_size,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        let sample = self
            .records
            .first()
            .and_then(|r| r.attribute_specifiers.first());
        let attr_size = resolve_width(self.attr_size, sample);
        let stride = paragon_stride(attr_size);
        let mut writer = TableWriter::new(&self.header);
        for bonus in &self.records {
            writer.record("paragon bonus", stride, |sink| bonus.write(sink, attr_size))?;
        }
        writer.finish()
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
