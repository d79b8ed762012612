use std::borrow::Cow;

use tracing::{debug, warn};

use crate::{
    ast::{Expr, FORMAT_PREFERENCE, QueryExpression, TransferFormat},
    backend::ServiceXBackend,
    error::DispatchError,
};

/// Tree name handed to a substituted `ResultTTree`. Never seen by the caller.
pub const PLACEHOLDER_TREE_NAME: &str = "treeme";
/// File name handed to a substituted `ResultTTree`.
pub const PLACEHOLDER_ROOT_FILE: &str = "junk.root";
/// File name handed to a substituted `ResultParquet`.
pub const PLACEHOLDER_PARQUET_FILE: &str = "junk.parquet";

/// Produce the query that should actually be serialized for `backend`.
///
/// Remote-native queries come back untouched. Queries for client-side result
/// kinds get a new terminal node requesting the best transfer format the
/// backend supports, keeping the stream and column arguments as they are.
///
/// # Errors
///
/// - [`DispatchError::UnsupportedFormat`] if the backend supports none of
///   the transfer formats
/// - [`DispatchError::Arity`] if the terminal does not have exactly two
///   arguments
pub fn rewrite_for_backend<'q, B>(
    query: &'q QueryExpression,
    backend: &B,
) -> Result<Cow<'q, QueryExpression>, DispatchError>
where
    B: ServiceXBackend + ?Sized,
{
    let kind = query.kind();
    if !kind.is_local() {
        return Ok(Cow::Borrowed(query));
    }

    let Some(format) = backend.first_supported_format(&FORMAT_PREFERENCE) else {
        let backend = backend.describe();
        warn!(%kind, %backend, "backend supports none of the transfer formats");
        return Err(DispatchError::UnsupportedFormat { kind, backend });
    };

    let [stream, columns] = query.args() else {
        return Err(DispatchError::Arity {
            kind,
            found: query.args().len(),
        });
    };

    let mut args = vec![stream.clone(), columns.clone()];
    args.extend(placeholder_args(format));

    let rewritten = QueryExpression::new(format.result_kind(), args);
    debug!(from = %kind, to = %rewritten.kind(), "substituted terminal node");

    Ok(Cow::Owned(rewritten))
}

/// Arguments the remote-native terminal for `format` needs after the stream
/// and column names.
fn placeholder_args(format: TransferFormat) -> Vec<Expr> {
    match format {
        TransferFormat::Root => vec![
            Expr::string(PLACEHOLDER_TREE_NAME),
            Expr::string(PLACEHOLDER_ROOT_FILE),
        ],
        TransferFormat::Parquet => vec![Expr::string(PLACEHOLDER_PARQUET_FILE)],
    }
}
