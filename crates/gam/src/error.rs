use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] layout::Error),

    #[error(transparent)]
    #[diagnostic(code(gam::bytes))]
    Bytes(#[from] common::Error),

    #[error("no balance table matches file name {file_name:?}")]
    #[diagnostic(
        code(gam::unknown_table),
        help("the file name must contain the table name, e.g. items, affixlist, monsternames, transmute or experiencetable")
    )]
    UnknownTable { file_name: String },
}
