//! Query dispatch.
//!
//! A [`Dispatcher`] takes a finished [`QueryExpression`] through the fixed
//! pipeline
//!
//! ```text
//! capability check -> rewrite -> serialize -> (dry run?) -> remote operation
//! ```
//!
//! and hands back either the wire text or whatever the backend returned.
//! Every stage before the remote call is synchronous; the remote call is the
//! only await point. A dispatcher holds no per-request state, so one instance
//! can serve any number of concurrent requests.

use tracing::{debug, instrument};

use crate::{
    ast::{QueryExpression, ResultKind, Stream},
    backend::{self, RemoteOperation, ServiceXBackend},
    capability::check_format_request,
    config::SourceConfig,
    error::DispatchError,
    rewrite::rewrite_for_backend,
    wire::to_wire,
};

const STANDARD_ENTRIES: [(ResultKind, RemoteOperation); 4] = [
    (ResultKind::RootFiles, RemoteOperation::RootFiles),
    (ResultKind::Parquet, RemoteOperation::Parquet),
    (ResultKind::PandasDf, RemoteOperation::PandasDf),
    (ResultKind::AwkwardArray, RemoteOperation::AwkwardArray),
];

/// Maps the result kind a caller asked for to the remote operation that
/// delivers it.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchTable {
    entries: Vec<(ResultKind, RemoteOperation)>,
}

impl DispatchTable {
    pub fn standard() -> Self {
        DispatchTable {
            entries: STANDARD_ENTRIES.to_vec(),
        }
    }

    #[cfg(test)]
    fn from_entries(entries: impl IntoIterator<Item = (ResultKind, RemoteOperation)>) -> Self {
        DispatchTable {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn lookup(&self, kind: ResultKind) -> Option<RemoteOperation> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == kind)
            .map(|(_, operation)| *operation)
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// What a dispatch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutput<D> {
    /// Dry run: the wire text that would have been submitted
    Wire(String),
    /// Data returned by the remote operation, untouched
    Data(D),
}

impl<D> DispatchOutput<D> {
    pub fn into_wire(self) -> Option<String> {
        match self {
            DispatchOutput::Wire(text) => Some(text),
            DispatchOutput::Data(_) => None,
        }
    }

    pub fn into_data(self) -> Option<D> {
        match self {
            DispatchOutput::Wire(_) => None,
            DispatchOutput::Data(data) => Some(data),
        }
    }
}

/// Routes queries to a backend.
///
/// # Examples
///
/// ```
/// use sx_dispatch::ast::{Expr, ResultKind, TransferFormat};
/// use sx_dispatch::backend::OfflineBackend;
/// use sx_dispatch::config::SourceConfig;
/// use sx_dispatch::dispatch::Dispatcher;
///
/// let backend = OfflineBackend::new("xaod", vec![TransferFormat::Parquet]);
/// let dispatcher = Dispatcher::new(backend, SourceConfig::xaod());
///
/// let query = dispatcher
///     .source()
///     .result(ResultKind::AwkwardArray, Expr::list([Expr::string("met")]));
///
/// assert_eq!(
///     dispatcher.generate_wire(&query).unwrap(),
///     "(call ResultParquet (call EventDataset 'bogus.root') (list 'met') 'junk.parquet')"
/// );
/// ```
pub struct Dispatcher<B> {
    backend: B,
    config: SourceConfig,
    table: DispatchTable,
    dry_run: bool,
}

impl<B: ServiceXBackend> Dispatcher<B> {
    pub fn new(backend: B, config: SourceConfig) -> Self {
        Dispatcher {
            backend,
            config,
            table: DispatchTable::standard(),
            dry_run: false,
        }
    }

    #[cfg(test)]
    fn with_dispatch_table(mut self, table: DispatchTable) -> Self {
        self.table = table;
        self
    }

    /// When set, [`Dispatcher::execute`] returns wire text instead of running
    /// the query.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Start a query on this backend's dataset source node.
    pub fn source(&self) -> Stream {
        self.config.source()
    }

    /// Check, rewrite and serialize `query` without contacting the backend's
    /// remote operations.
    pub fn generate_wire(&self, query: &QueryExpression) -> Result<String, DispatchError> {
        check_format_request(query.kind(), &self.backend)?;
        let rewritten = rewrite_for_backend(query, &self.backend)?;
        Ok(to_wire(&rewritten))
    }

    /// Run `query` against the backend.
    ///
    /// The remote operation is chosen from the result kind of `query` as
    /// given, even when the wire text was rewritten to a different kind.
    /// `title` is passed through to the backend.
    #[instrument(
        name = "dispatch",
        skip_all,
        fields(backend = %self.config.backend_name(), kind = %query.kind())
    )]
    pub async fn execute(
        &self,
        query: &QueryExpression,
        title: Option<&str>,
    ) -> Result<DispatchOutput<B::Data>, DispatchError> {
        let wire = self.generate_wire(query)?;
        debug!(%wire, "wire text for backend");

        if self.dry_run {
            return Ok(DispatchOutput::Wire(wire));
        }

        let kind = query.kind();
        let operation = self
            .table
            .lookup(kind)
            .ok_or(DispatchError::InternalDispatch { kind })?;

        debug!(%operation, ?title, "submitting query");
        backend::invoke(&self.backend, operation, &wire, title)
            .await
            .map(DispatchOutput::Data)
            .map_err(|source| DispatchError::Backend { operation, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Expr, TransferFormat},
        backend::OfflineBackend,
    };

    fn parquet_query() -> QueryExpression {
        SourceConfig::xaod()
            .source()
            .result(ResultKind::Parquet, Expr::list([Expr::string("met")]))
    }

    #[test]
    fn test_standard_table_covers_every_kind() {
        let table = DispatchTable::standard();
        for kind in ResultKind::ALL {
            assert!(table.lookup(kind).is_some(), "{kind} missing");
        }
        assert_eq!(
            table.lookup(ResultKind::PandasDf),
            Some(RemoteOperation::PandasDf)
        );
    }

    #[tokio::test]
    async fn test_missing_table_entry_is_internal_error() {
        let backend = OfflineBackend::new("test", vec![TransferFormat::Parquet]);
        let table = DispatchTable::from_entries([(ResultKind::RootFiles, RemoteOperation::RootFiles)]);
        let dispatcher = Dispatcher::new(backend, SourceConfig::xaod()).with_dispatch_table(table);

        let err = dispatcher.execute(&parquet_query(), None).await.unwrap_err();

        assert!(matches!(
            err,
            DispatchError::InternalDispatch {
                kind: ResultKind::Parquet
            }
        ));
    }

    #[tokio::test]
    async fn test_dry_run_skips_table_lookup() {
        let backend = OfflineBackend::new("test", vec![TransferFormat::Parquet]);
        let mut dispatcher = Dispatcher::new(backend, SourceConfig::xaod())
            .with_dispatch_table(DispatchTable::from_entries([]));
        dispatcher.set_dry_run(true);

        let output = dispatcher.execute(&parquet_query(), None).await.unwrap();

        assert_eq!(
            output.into_wire().as_deref(),
            Some("(call ResultParquet (call EventDataset 'bogus.root') (list 'met'))")
        );
    }

    #[tokio::test]
    async fn test_backend_failure_is_propagated() {
        let backend = OfflineBackend::new("test", vec![TransferFormat::Parquet]);
        let dispatcher = Dispatcher::new(backend, SourceConfig::xaod());

        let err = dispatcher.execute(&parquet_query(), Some("t")).await.unwrap_err();

        match err {
            DispatchError::Backend { operation, source } => {
                assert_eq!(operation, RemoteOperation::Parquet);
                assert!(source.to_string().contains("offline"));
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }
}
