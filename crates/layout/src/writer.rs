use common::ByteSink;
use log::{debug, warn};

use crate::{to_i32, Error, Result};

/// What to do with a block's recorded offset on write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OffsetPolicy {
    /// Append every block at the write cursor.
    #[default]
    Relocate,
    /// Place blocks at their recorded offsets while that stays forward-only.
    Preserve { on_conflict: ConflictPolicy },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    #[default]
    Fail,
    Relocate,
}

/// Final placement of a variable block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockRef {
    pub offset: usize,
    pub size: usize,
}

impl BlockRef {
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Cursor-based output image that places variable blocks and backpatches
/// the `(pointer, size)` slots describing them.
#[derive(Debug)]
pub struct BlockWriter {
    sink: ByteSink,
    policy: OffsetPolicy,
}

impl BlockWriter {
    pub fn new(policy: OffsetPolicy) -> Self {
        Self {
            sink: ByteSink::new(),
            policy,
        }
    }

    pub fn policy(&self) -> OffsetPolicy {
        self.policy
    }

    pub fn sink(&mut self) -> &mut ByteSink {
        &mut self.sink
    }

    pub fn position(&self) -> usize {
        self.sink.position()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.sink.into_inner()
    }

    /// Writes a record of exactly `size` bytes. Short records are zero padded.
    pub fn write_record<F>(&mut self, label: &str, size: usize, fill: F) -> Result<()>
    where
        F: FnOnce(&mut ByteSink),
    {
        let mut record = ByteSink::with_capacity(size);
        fill(&mut record);
        if record.len() > size {
            return Err(Error::RecordOverflow {
                label: label.to_string(),
                written: record.len(),
                limit: size,
            });
        }
        self.sink.write_bytes(record.as_slice());
        self.sink.write_zeros(size - record.len());
        Ok(())
    }

    /// Reserves a zeroed `(pointer, size)` slot and returns its position.
    pub fn reserve_pointer(&mut self) -> usize {
        let slot = self.sink.position();
        self.sink.write_zeros(8);
        slot
    }

    pub fn patch_pointer(&mut self, slot: usize, block: BlockRef) -> Result<()> {
        self.sink.patch_i32_at(slot, to_i32(block.offset)?)?;
        self.sink.patch_i32_at(slot + 4, to_i32(block.size)?)?;
        Ok(())
    }

    pub fn patch_i32(&mut self, at: usize, value: i32) -> Result<()> {
        Ok(self.sink.patch_i32_at(at, value)?)
    }

    /// Places a block at the cursor or, when preserving, at `requested`.
    pub fn place_block(
        &mut self,
        label: &str,
        requested: Option<usize>,
        bytes: &[u8],
    ) -> Result<BlockRef> {
        self.place_block_aligned(label, requested, 1, bytes)
    }

    /// Like [`place_block`](Self::place_block); relocated blocks start on an
    /// `align` boundary.
    pub fn place_block_aligned(
        &mut self,
        label: &str,
        requested: Option<usize>,
        align: usize,
        bytes: &[u8],
    ) -> Result<BlockRef> {
        if bytes.is_empty() {
            return Ok(BlockRef::default());
        }
        self.sink.seek_end();
        let offset = match self.preserved_offset(label, requested)? {
            Some(offset) => offset,
            None => {
                self.sink.align_to(align);
                self.sink.position()
            }
        };
        self.sink.pad_to(offset);
        self.sink.write_bytes(bytes);
        debug!("{label}: {} bytes at {offset:#x}", bytes.len());
        Ok(BlockRef {
            offset,
            size: bytes.len(),
        })
    }

    fn preserved_offset(&self, label: &str, requested: Option<usize>) -> Result<Option<usize>> {
        let OffsetPolicy::Preserve { on_conflict } = self.policy else {
            return Ok(None);
        };
        let Some(requested) = requested.filter(|&offset| offset > 0) else {
            return Ok(None);
        };
        let cursor = self.sink.position();
        if requested >= cursor {
            return Ok(Some(requested));
        }
        match on_conflict {
            ConflictPolicy::Fail => Err(Error::OffsetBehindCursor {
                label: label.to_string(),
                requested,
                cursor,
            }),
            ConflictPolicy::Relocate => {
                warn!("{label}: offset {requested:#x} is behind cursor {cursor:#x}, relocating");
                Ok(None)
            }
        }
    }
}

/// Offset recorded in a document, if it names a real position.
pub fn recorded_offset(offset: i32) -> Option<usize> {
    usize::try_from(offset).ok().filter(|&offset| offset > 0)
}
