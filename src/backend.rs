//! The remote connection seam.
//!
//! A [`ServiceXBackend`] is whatever actually talks to the extraction
//! service: it reports which transfer formats the service can produce and
//! exposes one async operation per [`RemoteOperation`]. Connecting, polling
//! and downloading all live behind this trait.

use std::fmt;

use async_trait::async_trait;

use crate::{ast::TransferFormat, error::BoxError};

/// The remote operations a backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    RootFiles,
    Parquet,
    PandasDf,
    AwkwardArray,
}

impl RemoteOperation {
    pub fn name(self) -> &'static str {
        match self {
            RemoteOperation::RootFiles => "get_data_rootfiles",
            RemoteOperation::Parquet => "get_data_parquet",
            RemoteOperation::PandasDf => "get_data_pandas_df",
            RemoteOperation::AwkwardArray => "get_data_awkward",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
pub trait ServiceXBackend: Send + Sync {
    /// What the remote operations hand back.
    type Data: Send;

    /// Human readable description used in error messages.
    fn describe(&self) -> String;

    /// Transfer formats the service can produce. Asked on every request.
    fn supported_formats(&self) -> Vec<TransferFormat>;

    /// First of `candidates`, in the order given, that the service supports.
    fn first_supported_format(&self, candidates: &[TransferFormat]) -> Option<TransferFormat> {
        let supported = self.supported_formats();
        candidates
            .iter()
            .copied()
            .find(|candidate| supported.contains(candidate))
    }

    async fn get_data_rootfiles(&self, query: &str, title: Option<&str>)
    -> Result<Self::Data, BoxError>;

    async fn get_data_parquet(&self, query: &str, title: Option<&str>)
    -> Result<Self::Data, BoxError>;

    async fn get_data_pandas_df(&self, query: &str, title: Option<&str>)
    -> Result<Self::Data, BoxError>;

    async fn get_data_awkward(&self, query: &str, title: Option<&str>)
    -> Result<Self::Data, BoxError>;
}

/// Run `operation` on `backend`.
pub(crate) async fn invoke<B: ServiceXBackend + ?Sized>(
    backend: &B,
    operation: RemoteOperation,
    query: &str,
    title: Option<&str>,
) -> Result<B::Data, BoxError> {
    match operation {
        RemoteOperation::RootFiles => backend.get_data_rootfiles(query, title).await,
        RemoteOperation::Parquet => backend.get_data_parquet(query, title).await,
        RemoteOperation::PandasDf => backend.get_data_pandas_df(query, title).await,
        RemoteOperation::AwkwardArray => backend.get_data_awkward(query, title).await,
    }
}

/// A backend with known capabilities and no connection.
///
/// Good for translating queries without a service at hand: capability checks
/// and rewrites behave normally, every remote operation fails.
#[derive(Debug, Clone)]
pub struct OfflineBackend {
    name: String,
    formats: Vec<TransferFormat>,
}

#[derive(Debug, thiserror::Error)]
#[error("{backend} is offline, cannot run {operation}")]
pub struct OfflineError {
    backend: String,
    operation: RemoteOperation,
}

impl OfflineBackend {
    pub fn new(name: impl Into<String>, formats: Vec<TransferFormat>) -> Self {
        OfflineBackend {
            name: name.into(),
            formats,
        }
    }

    fn offline(&self, operation: RemoteOperation) -> BoxError {
        Box::new(OfflineError {
            backend: self.describe(),
            operation,
        })
    }
}

#[async_trait]
impl ServiceXBackend for OfflineBackend {
    type Data = ();

    fn describe(&self) -> String {
        format!("offline backend '{}'", self.name)
    }

    fn supported_formats(&self) -> Vec<TransferFormat> {
        self.formats.clone()
    }

    async fn get_data_rootfiles(&self, _query: &str, _title: Option<&str>) -> Result<(), BoxError> {
        Err(self.offline(RemoteOperation::RootFiles))
    }

    async fn get_data_parquet(&self, _query: &str, _title: Option<&str>) -> Result<(), BoxError> {
        Err(self.offline(RemoteOperation::Parquet))
    }

    async fn get_data_pandas_df(&self, _query: &str, _title: Option<&str>) -> Result<(), BoxError> {
        Err(self.offline(RemoteOperation::PandasDf))
    }

    async fn get_data_awkward(&self, _query: &str, _title: Option<&str>) -> Result<(), BoxError> {
        Err(self.offline(RemoteOperation::AwkwardArray))
    }
}
