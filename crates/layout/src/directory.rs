use common::read_u32_at;
use log::{debug, warn};

use crate::{Error, Result};

/// Position of the `(offset, length)` pair in balance tables.
pub const TABLE_DIRECTORY_POSITION: usize = 0x230;
/// Block offset assumed when the directory pair is unusable.
pub const DEFAULT_BLOCK_OFFSET: usize = 0x238;
pub const MAX_PREAMBLE_SCAN: usize = 32;
/// Preamble emitted by the writers.
pub const CANONICAL_PREAMBLE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectoryPointer {
    pub offset: u32,
    pub length: u32,
}

/// Locates the single variable-length block of a file.
///
/// The pair stored at `position` is accepted when both halves are positive
/// and the block fits in the image. Otherwise the block is assumed to start
/// at [`DEFAULT_BLOCK_OFFSET`] and run to the end of the file.
pub fn locate(image: &[u8], position: usize) -> Result<DirectoryPointer> {
    locate_with_default(image, position, DEFAULT_BLOCK_OFFSET)
}

pub fn locate_with_default(
    image: &[u8],
    position: usize,
    default_offset: usize,
) -> Result<DirectoryPointer> {
    let stored = read_u32_at(image, position)
        .and_then(|offset| Ok((offset, read_u32_at(image, position.saturating_add(4))?)));
    if let Ok((offset, length)) = stored {
        let end = u64::from(offset) + u64::from(length);
        if offset > 0 && length > 0 && end <= image.len() as u64 {
            debug!("directory at {position:#x}: block {offset:#x}+{length}");
            return Ok(DirectoryPointer { offset, length });
        }
    }

    let remaining = image.len() as i64 - default_offset as i64;
    if remaining <= 0 {
        return Err(Error::InvalidDirectory {
            position,
            default_offset,
            remaining,
        });
    }
    warn!("directory at {position:#x} is unusable, assuming block at {default_offset:#x}");
    Ok(DirectoryPointer {
        offset: u32::try_from(default_offset).map_err(|_| Error::IntegerOverflow)?,
        length: u32::try_from(remaining).map_err(|_| Error::IntegerOverflow)?,
    })
}

/// Raw count of zero bytes at the start of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreambleRun(pub usize);

impl PreambleRun {
    /// Some builds pad one extra byte; a run of 17 is the 16-byte preamble.
    pub fn normalized(self) -> usize {
        match self.0 {
            17 => CANONICAL_PREAMBLE,
            n => n,
        }
    }
}

pub fn detect_preamble(image: &[u8], block_start: usize) -> PreambleRun {
    let run = image
        .get(block_start..)
        .map(|tail| {
            tail.iter()
                .take(MAX_PREAMBLE_SCAN)
                .take_while(|&&b| b == 0)
                .count()
        })
        .unwrap_or(0);
    PreambleRun(run)
}

/// Byte range holding the records of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordWindow {
    pub start: usize,
    pub end: usize,
}

impl RecordWindow {
    /// Records begin after the preamble; `length` counts record bytes and the
    /// window is clipped to the image.
    pub fn for_block(image_len: usize, pointer: DirectoryPointer, preamble: usize) -> Self {
        let start = (pointer.offset as usize).saturating_add(preamble).min(image_len);
        let end = start.saturating_add(pointer.length as usize).min(image_len);
        Self { start, end }
    }

    pub fn usable(&self) -> usize {
        self.end - self.start
    }
}
