use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("read of {size} bytes at offset {offset} is out of bounds (image is {len} bytes)")]
    #[diagnostic(code(common::out_of_bounds))]
    OutOfBounds { offset: usize, size: usize, len: usize },

    #[error("seek to {offset} is past the end of a {len}-byte image")]
    #[diagnostic(code(common::seek_out_of_bounds))]
    SeekOutOfBounds { offset: usize, len: usize },

    #[error("integer overflow")]
    #[diagnostic(code(common::integer_overflow))]
    IntegerOverflow,
}
