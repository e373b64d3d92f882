use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] layout::Error),

    #[error("monster image is truncated")]
    #[diagnostic(code(mon::truncated))]
    Truncated(#[from] common::Error),
}
