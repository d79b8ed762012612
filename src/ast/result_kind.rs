use std::fmt;

/// Transfer formats a backend can hand back directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferFormat {
    /// Columnar file
    Parquet,
    /// Row-grouped tabular file (ROOT `TTree`)
    Root,
}

/// Ranking used when the dispatcher is free to pick a transfer format.
/// Earlier entries win.
pub const FORMAT_PREFERENCE: [TransferFormat; 2] = [TransferFormat::Parquet, TransferFormat::Root];

impl TransferFormat {
    pub fn name(self) -> &'static str {
        match self {
            TransferFormat::Parquet => "parquet",
            TransferFormat::Root => "root",
        }
    }

    pub fn from_name(name: &str) -> Option<TransferFormat> {
        FORMAT_PREFERENCE
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
    }

    /// The remote-native result kind that produces files of this format.
    pub fn result_kind(self) -> ResultKind {
        match self {
            TransferFormat::Parquet => ResultKind::Parquet,
            TransferFormat::Root => ResultKind::RootFiles,
        }
    }
}

impl fmt::Display for TransferFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the terminal node of a query.
///
/// `RootFiles` and `Parquet` are produced directly by the backend. `PandasDf`
/// and `AwkwardArray` are built locally from one of those transfers, so the
/// backend never sees them on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// `ResultTTree`
    RootFiles,
    /// `ResultParquet`
    Parquet,
    /// `ResultPandasDF`
    PandasDf,
    /// `ResultAwkwardArray`
    AwkwardArray,
}

impl ResultKind {
    pub const ALL: [ResultKind; 4] = [
        ResultKind::RootFiles,
        ResultKind::Parquet,
        ResultKind::PandasDf,
        ResultKind::AwkwardArray,
    ];

    /// Terminal function name as it appears in wire text.
    pub fn name(self) -> &'static str {
        match self {
            ResultKind::RootFiles => "ResultTTree",
            ResultKind::Parquet => "ResultParquet",
            ResultKind::PandasDf => "ResultPandasDF",
            ResultKind::AwkwardArray => "ResultAwkwardArray",
        }
    }

    pub fn from_name(name: &str) -> Option<ResultKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// True for kinds that have to be materialized on the client.
    pub fn is_local(self) -> bool {
        matches!(self, ResultKind::PandasDf | ResultKind::AwkwardArray)
    }

    /// The transfer format a remote-native kind requires, `None` for
    /// local kinds (they negotiate a format when rewritten).
    pub fn required_format(self) -> Option<TransferFormat> {
        match self {
            ResultKind::RootFiles => Some(TransferFormat::Root),
            ResultKind::Parquet => Some(TransferFormat::Parquet),
            ResultKind::PandasDf | ResultKind::AwkwardArray => None,
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
