use common::{name_hash, ByteCursor, ByteSink};
use layout::name::{field_at, NAME_FIELD_WIDTH};
use layout::{infer_width, is_plausible_name, whole_records, ExtendedHeader};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::blob::{read_blobs, resolve_width, write_blobs, Blob, DEFAULT_ATTR_SIZE};
use crate::table::{TableBlock, TableWriter};
use crate::{GamTable, Result, TableKind};

const ATTRIBUTE_COUNT: usize = 10;
const BS_WIDTH: usize = 99;
/// Name, 13 words, 4 pad, 3 powers, `BS` and 5 pad.
const FIXED_PART: usize = 424;

pub fn affix_stride(attr_size: usize) -> usize {
    FIXED_PART + 2 * ATTRIBUTE_COUNT * attr_size
}

pub fn attr_size_candidates() -> Vec<usize> {
    (24..=60).step_by(4).collect()
}

fn default_attr_size() -> usize {
    DEFAULT_ATTR_SIZE
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterAffixesFile {
    pub header: ExtendedHeader,
    #[serde(default = "default_attr_size")]
    pub attr_size: usize,
    pub records: Vec<MonsterAffix>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct MonsterAffix {
    pub name: String,
    /// Derived from the name; not stored in the record.
    pub hash: i32,
    #[serde(rename = "I0")]
    pub i0: i32,
    #[serde(rename = "I1")]
    pub i1: i32,
    #[serde(rename = "I2")]
    pub i2: i32,
    #[serde(rename = "I3")]
    pub i3: i32,
    #[serde(rename = "I4")]
    pub i4: i32,
    pub monster_affix: i32,
    pub resistance: i32,
    pub affix_type: i32,
    #[serde(rename = "I5")]
    pub i5: i32,
    #[serde(rename = "I6")]
    pub i6: i32,
    #[serde(rename = "I7")]
    pub i7: i32,
    #[serde(rename = "I8")]
    pub i8: i32,
    pub attributes: Vec<Blob>,
    pub minion_attributes: Vec<Blob>,
    #[serde(rename = "SNOOnSpawnPowerMinion")]
    pub sno_on_spawn_power_minion: i32,
    #[serde(rename = "SNOOnSpawnPowerChampion")]
    pub sno_on_spawn_power_champion: i32,
    #[serde(rename = "SNOOnSpawnPowerRare")]
    pub sno_on_spawn_power_rare: i32,
    #[serde(rename = "BS")]
    pub bs: Blob,
}

impl MonsterAffix {
    fn read(cursor: &mut ByteCursor<'_>, attr_size: usize) -> Result<Self> {
        let name = cursor.read_fixed_str(NAME_FIELD_WIDTH)?;
        let [i0, i1, i2, i3, i4, monster_affix, resistance, affix_type, i5, i6, i7, i8] =
            cursor.read_i32_array::<12>()?;
        let attributes = read_blobs(cursor, ATTRIBUTE_COUNT, attr_size)?;
        let minion_attributes = read_blobs(cursor, ATTRIBUTE_COUNT, attr_size)?;
        cursor.skip(4)?;
        let [minion, champion, rare] = cursor.read_i32_array::<3>()?;
        let bs = Blob::from(cursor.read_bytes(BS_WIDTH)?);
        Ok(Self {
            hash: name_hash(&name),
            name,
            i0,
            i1,
            i2,
            i3,
            i4,
            monster_affix,
            resistance,
            affix_type,
            i5,
            i6,
            i7,
            i8,
            attributes,
            minion_attributes,
            sno_on_spawn_power_minion: minion,
            sno_on_spawn_power_champion: champion,
            sno_on_spawn_power_rare: rare,
            bs,
        })
    }

    fn write(&self, sink: &mut ByteSink, attr_size: usize) {
        sink.write_fixed_str(&self.name, NAME_FIELD_WIDTH);
        sink.write_i32_slice(&[
            self.i0,
            self.i1,
            self.i2,
            self.i3,
            self.i4,
            self.monster_affix,
            self.resistance,
            self.affix_type,
            self.i5,
            self.i6,
            self.i7,
            self.i8,
        ]);
        write_blobs(sink, &self.attributes, ATTRIBUTE_COUNT, attr_size);
        write_blobs(sink, &self.minion_attributes, ATTRIBUTE_COUNT, attr_size);
        sink.write_zeros(4);
        sink.write_i32_slice(&[
            self.sno_on_spawn_power_minion,
            self.sno_on_spawn_power_champion,
            self.sno_on_spawn_power_rare,
        ]);
        sink.write_blob(self.bs.as_bytes(), BS_WIDTH);
        sink.write_zeros(5);
    }
}

impl GamTable for MonsterAffixesFile {
    const KIND: TableKind = TableKind::MonsterAffixes;

    fn read(image: &[u8]) -> Result<Self> {
        let block = TableBlock::parse(image)?;
        let window = block.records();
        let attr_size = infer_width(image, window.start, &attr_size_candidates(), affix_stride)
            .unwrap_or_else(|| {
                debug!("monster affix blob width not inferred, assuming {DEFAULT_ATTR_SIZE}");
                DEFAULT_ATTR_SIZE
            });
        let stride = affix_stride(attr_size);

        let mut records = Vec::new();
        for start in whole_records(window, stride) {
            if !is_plausible_name(field_at(image, start, NAME_FIELD_WIDTH)) {
                debug!("monster affixes end at {start:#x}");
                break;
            }
            let mut cursor = ByteCursor::at(image, start)?;
            records.push(MonsterAffix::read(&mut cursor, attr_size)?);
        }
        Ok(Self {
            header: block.header,
            attr_size,
            records,
        })
    }

    fn write(&self) -> Result<Vec<u8>> {
        let sample = self.records.first().and_then(|r| r.attributes.first());
        let attr_size = resolve_width(self.attr_size, sample);
        let stride = affix_stride(attr_size);
        let mut writer = TableWriter::new(&self.header);
        for affix in &self.records {
            writer.record("monster affix", stride, |sink| affix.write(sink, attr_size))?;
        }
        writer.finish()
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
