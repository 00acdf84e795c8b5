//! FILENAME: table-core/src/error.rs

use thiserror::Error;

/// Errors surfaced by the format registry and the sort/filter engine.
/// All of them are recoverable; the rendering layer decides whether to
/// skip the offending field or report the problem to the user.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown format tag: {0}")]
    UnknownFormat(String),

    #[error("field not declared in view scheme: {0}")]
    UnknownField(String),

    #[error("field is not sortable: {0}")]
    NotSortable(String),

    #[error("malformed search pattern: {0}")]
    BadSearchPattern(#[from] regex::Error),

    #[error("cannot parse {value:?} as {expected}")]
    Parse {
        value: String,
        expected: &'static str,
    },
}
