use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(code(layout::bytes))]
    Bytes(#[from] common::Error),

    #[error(
        "no data block: directory at {position:#x} is invalid and the default block at {default_offset:#x} leaves {remaining} bytes"
    )]
    #[diagnostic(code(layout::invalid_directory))]
    InvalidDirectory {
        position: usize,
        default_offset: usize,
        remaining: i64,
    },

    #[error("{label} record needs {written} bytes but its fixed size is {limit}")]
    #[diagnostic(code(layout::record_overflow))]
    RecordOverflow {
        label: String,
        written: usize,
        limit: usize,
    },

    #[error("{label} block was requested at {requested:#x} but the write cursor is already at {cursor:#x}")]
    #[diagnostic(
        code(layout::offset_behind_cursor),
        help("allow relocation on conflict or drop the recorded offsets")
    )]
    OffsetBehindCursor {
        label: String,
        requested: usize,
        cursor: usize,
    },

    #[error("no monster trailer candidate is plausible (best score {best_score})")]
    #[diagnostic(code(layout::ambiguous_layout))]
    AmbiguousLayout { best_score: i32 },

    #[error("integer overflow")]
    #[diagnostic(code(layout::integer_overflow))]
    IntegerOverflow,
}
