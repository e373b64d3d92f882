use log::debug;

use crate::directory::RecordWindow;
use crate::name::{is_plausible_name, NAME_FIELD_WIDTH};

/// Infers an embedded blob width from the record that follows.
///
/// Candidates are tried in ascending order. For each one the record stride is
/// `stride_of(candidate)` and the 256-byte name at `record_start + stride`
/// must be plausible. `None` means no candidate fits and the caller's default
/// applies.
pub fn infer_width<F>(
    image: &[u8],
    record_start: usize,
    candidates: &[usize],
    stride_of: F,
) -> Option<usize>
where
    F: Fn(usize) -> usize,
{
    let mut ordered = candidates.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    ordered.into_iter().find(|&candidate| {
        let Some(next) = record_start.checked_add(stride_of(candidate)) else {
            return false;
        };
        let Some(field) = next
            .checked_add(NAME_FIELD_WIDTH)
            .and_then(|end| image.get(next..end))
        else {
            return false;
        };
        let hit = is_plausible_name(field);
        if hit {
            debug!("blob width {candidate} confirmed by name at {next:#x}");
        }
        hit
    })
}

/// First candidate, in preference order, that divides a non-empty window.
pub fn guess_stride_by_divisibility(usable: usize, candidates: &[usize]) -> Option<usize> {
    candidates
        .iter()
        .copied()
        .find(|&stride| stride > 0 && usable >= stride && usable % stride == 0)
}

/// Start offsets of the whole records in `window`; a partial tail is dropped.
pub fn whole_records(window: RecordWindow, stride: usize) -> impl Iterator<Item = usize> {
    let count = window.usable().checked_div(stride).unwrap_or(0);
    (0..count).map(move |index| window.start + index * stride)
}
