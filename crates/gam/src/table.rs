//! Framing shared by every balance table.
//!
//! A table is a 40-byte [`ExtendedHeader`], zero fill up to the directory
//! pair at `0x230`, and one block of fixed-size records behind a zero
//! preamble. The writer always produces the canonical shape: block at
//! `0x238`, a 16-byte preamble, and a directory length counting record bytes.

use common::{decode_fixed_str, ByteCursor, ByteSink};
use layout::directory::{CANONICAL_PREAMBLE, DEFAULT_BLOCK_OFFSET, TABLE_DIRECTORY_POSITION};
use layout::name::{field_at, NAME_FIELD_WIDTH};
use layout::{
    detect_preamble, guess_stride_by_divisibility, locate, whole_records, BlockRef, BlockWriter,
    DirectoryPointer, ExtendedHeader, OffsetPolicy, PreambleRun, RecordWindow,
};
use log::debug;

use crate::record::Field;
use crate::Result;

/// Parsed framing of a table image.
#[derive(Clone, Debug)]
pub struct TableBlock<'a> {
    pub image: &'a [u8],
    pub header: ExtendedHeader,
    pub pointer: DirectoryPointer,
    pub preamble: PreambleRun,
}

impl<'a> TableBlock<'a> {
    pub fn parse(image: &'a [u8]) -> Result<Self> {
        let header = ExtendedHeader::read(&mut ByteCursor::new(image))?;
        let pointer = locate(image, TABLE_DIRECTORY_POSITION)?;
        let preamble = detect_preamble(image, pointer.offset as usize);
        debug!(
            "table block {:#x}+{} with a {}-byte preamble",
            pointer.offset, pointer.length, preamble.0
        );
        Ok(Self {
            image,
            header,
            pointer,
            preamble,
        })
    }

    pub fn window(&self, preamble: usize) -> RecordWindow {
        RecordWindow::for_block(self.image.len(), self.pointer, preamble)
    }

    /// Record window behind the detected preamble, which never exceeds the
    /// canonical 16 bytes: a record opening with zeros lengthens the run.
    pub fn records(&self) -> RecordWindow {
        self.window(self.preamble.normalized().min(CANONICAL_PREAMBLE))
    }

    /// Reads one record per whole stride of `window`.
    pub fn read_records<R, F>(
        &self,
        window: RecordWindow,
        stride: usize,
        mut read: F,
    ) -> Result<Vec<R>>
    where
        F: FnMut(&mut ByteCursor<'a>) -> Result<R>,
    {
        whole_records(window, stride)
            .map(|start| read(&mut ByteCursor::at(self.image, start)?))
            .collect()
    }

    /// Like [`read_records`](Self::read_records), but the list ends at the
    /// first record whose leading name field is blank.
    pub fn read_named_records<R, F>(
        &self,
        window: RecordWindow,
        stride: usize,
        mut read: F,
    ) -> Result<Vec<R>>
    where
        F: FnMut(&mut ByteCursor<'a>) -> Result<R>,
    {
        let mut records = Vec::new();
        for start in whole_records(window, stride) {
            let name = decode_fixed_str(field_at(self.image, start, NAME_FIELD_WIDTH));
            if name.trim().is_empty() {
                debug!("records end at blank name {start:#x}");
                break;
            }
            records.push(read(&mut ByteCursor::at(self.image, start)?)?);
        }
        Ok(records)
    }

    /// Record window and stride by divisibility: behind a 16-byte preamble
    /// first, then behind the detected one, else `fallback` records.
    pub fn divisible_layout(&self, strides: &[usize], fallback: usize) -> (RecordWindow, usize) {
        let assumed = self.window(CANONICAL_PREAMBLE);
        if let Some(stride) = guess_stride_by_divisibility(assumed.usable(), strides) {
            return (assumed, stride);
        }
        let detected = self.records();
        if let Some(stride) = guess_stride_by_divisibility(detected.usable(), strides) {
            return (detected, stride);
        }
        debug!("no stride in {strides:?} divides the block, assuming {fallback}");
        (detected, fallback)
    }
}

/// Writer for the canonical table shape.
pub struct TableWriter {
    inner: BlockWriter,
    slot: usize,
    records_start: usize,
}

impl TableWriter {
    pub fn new(header: &ExtendedHeader) -> Self {
        let mut inner = BlockWriter::new(OffsetPolicy::Relocate);
        header.write(inner.sink());
        inner.sink().pad_to(TABLE_DIRECTORY_POSITION);
        let slot = inner.reserve_pointer();
        inner.sink().pad_to(DEFAULT_BLOCK_OFFSET);
        inner.sink().write_zeros(CANONICAL_PREAMBLE);
        let records_start = inner.position();
        Self {
            inner,
            slot,
            records_start,
        }
    }

    pub fn record<F>(&mut self, label: &str, size: usize, fill: F) -> Result<()>
    where
        F: FnOnce(&mut common::ByteSink),
    {
        Ok(self.inner.write_record(label, size, fill)?)
    }

    /// Backpatches the directory pair and returns the image.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let block = BlockRef {
            offset: DEFAULT_BLOCK_OFFSET,
            size: self.inner.position() - self.records_start,
        };
        self.inner.patch_pointer(self.slot, block)?;
        Ok(self.inner.into_bytes())
    }
}

/// Writes `records` in the canonical shape, each padded to `stride` bytes.
pub fn write_fixed_table<R: Field>(
    header: &ExtendedHeader,
    label: &str,
    stride: usize,
    records: &[R],
) -> Result<Vec<u8>> {
    let mut writer = TableWriter::new(header);
    for record in records {
        writer.record(label, stride, |sink: &mut ByteSink| record.write_field(sink))?;
    }
    writer.finish()
}
