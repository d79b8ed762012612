use tracing::warn;

use crate::{ast::ResultKind, backend::ServiceXBackend, error::DispatchError};

/// Make sure the backend can produce the file format a remote-native result
/// kind asks for.
///
/// Kinds built on the client are not checked here; their format is picked
/// when the query is rewritten.
pub fn check_format_request<B>(kind: ResultKind, backend: &B) -> Result<(), DispatchError>
where
    B: ServiceXBackend + ?Sized,
{
    let Some(format) = kind.required_format() else {
        return Ok(());
    };

    if backend.first_supported_format(&[format]).is_none() {
        let backend = backend.describe();
        warn!(%kind, %format, %backend, "backend does not produce the requested format");
        return Err(DispatchError::UnsupportedFormat { kind, backend });
    }

    Ok(())
}
