use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] layout::Error),

    #[error("actor image ends inside its {needed}-byte fixed part")]
    #[diagnostic(code(acr::truncated))]
    Truncated {
        needed: usize,
        #[source]
        source: common::Error,
    },
}
