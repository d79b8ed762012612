//! Print the dataset source node of a backend preset

use crate::{SourceConfig, wire::expr_to_wire};
use super::CliError;

pub fn source_text(backend: &str, tree: Option<&str>) -> Result<String, CliError> {
    let config = SourceConfig::preset(backend, tree)
        .ok_or_else(|| CliError::UnknownBackend(backend.to_string()))?;
    Ok(expr_to_wire(config.source().as_expr()))
}
