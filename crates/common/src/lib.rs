//! Little-endian primitives shared by every SNO codec in the workspace.
//!
//! [`ByteCursor`] reads from an immutable image and never panics on short
//! input; [`ByteSink`] builds an output image with absolute seeks, zero fill
//! and in-place backpatching of pointer slots.

pub mod error;

mod cursor;
mod sink;
mod strings;

pub use cursor::{
    f32_at_or_zero, i32_at_or_zero, read_f32_at, read_i32_at, read_u32_at, slice_at, ByteCursor,
};
pub use error::Error;
pub use sink::ByteSink;
pub use strings::{decode_fixed_str, is_printable, item_hash, name_hash, trim_at_nul};

pub type Result<T> = core::result::Result<T, Error>;
