//! Dry-run translation of a query for a backend with given capabilities

use serde_json::json;
use tracing::debug;

use crate::{
    Dispatcher, Lexer, OfflineBackend, Parser, ResultKind, SourceConfig, TransferFormat,
    to_wire_pretty,
};
use super::CliError;

/// Options for the translate command
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Wire text of the query
    pub query: String,
    /// Backend preset name, as accepted by [`SourceConfig::preset`]
    pub backend: String,
    /// Tree name for the uproot preset
    pub tree: Option<String>,
    /// Formats the backend is assumed to produce
    pub formats: Vec<TransferFormat>,
    /// Indent the wire text
    pub pretty: bool,
}

/// What a translation produced
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateReport {
    pub backend: String,
    /// Result kind the query asked for
    pub kind: ResultKind,
    /// Result kind in the wire text
    pub sent_kind: ResultKind,
    pub wire: String,
}

impl TranslateReport {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "backend": self.backend,
            "kind": self.kind.name(),
            "sent_kind": self.sent_kind.name(),
            "wire": self.wire,
        })
    }
}

/// Parse a comma separated format list such as `parquet,root`.
pub fn parse_formats(list: &str) -> Result<Vec<TransferFormat>, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            TransferFormat::from_name(name).ok_or_else(|| CliError::UnknownFormat(name.to_string()))
        })
        .collect()
}

/// Run the dispatcher in dry-run mode and report the wire text it would send.
pub async fn execute_translate(options: &TranslateOptions) -> Result<TranslateReport, CliError> {
    let query = Parser::new(Lexer::new(&options.query))?.parse_query()?;

    let config = SourceConfig::preset(&options.backend, options.tree.as_deref())
        .ok_or_else(|| CliError::UnknownBackend(options.backend.clone()))?;
    let backend = OfflineBackend::new(options.backend.clone(), options.formats.clone());

    let mut dispatcher = Dispatcher::new(backend, config);
    dispatcher.set_dry_run(true);

    let wire = dispatcher
        .execute(&query, None)
        .await?
        .into_wire()
        .ok_or(CliError::NotDryRun)?;
    debug!(%wire, "translated");

    // Read our own output back to report what is actually being sent
    let sent = Parser::new(Lexer::new(&wire))?.parse_query()?;
    let wire = if options.pretty {
        to_wire_pretty(&sent)
    } else {
        wire
    };

    Ok(TranslateReport {
        backend: options.backend.clone(),
        kind: query.kind(),
        sent_kind: sent.kind(),
        wire,
    })
}
