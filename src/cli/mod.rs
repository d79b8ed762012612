//! CLI support for sx-dispatch
//!
//! Provides programmatic access to the `sxq` commands so other tools can
//! embed them.

mod check;
mod source;
mod translate;

pub use check::{CheckOptions, execute_check};
pub use source::source_text;
pub use translate::{TranslateOptions, TranslateReport, execute_translate, parse_formats};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] crate::DispatchError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown transfer format: '{0}' (expected parquet or root)")]
    UnknownFormat(String),

    #[error("Unknown backend: '{0}'\nKnown backends: xaod, cms_run1_aod, uproot (needs --tree)")]
    UnknownBackend(String),

    #[error("Dispatcher returned data during a dry run")]
    NotDryRun,
}
