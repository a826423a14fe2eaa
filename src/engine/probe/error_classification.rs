//! Error classification helpers for engine probe failures.
//!
//! This module converts low-level `Bollard` errors into semantic
//! `ProbeError` variants so the discovery ledger names the socket that was
//! missing or unreadable instead of an opaque transport message.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::ProbeError;

/// Extract the filesystem path from a socket URI.
///
/// Strips the scheme prefix (`unix://`, `npipe://`) to get the raw path.
/// For HTTP endpoints, returns `None` as they have no filesystem path.
pub(super) fn extract_socket_path(socket_uri: &str) -> Option<&Path> {
    socket_uri
        .strip_prefix("unix://")
        .or_else(|| socket_uri.strip_prefix("npipe://"))
        .map(Path::new)
}

/// Classify an I/O error kind into a path-carrying `ProbeError`.
///
/// Only permission and not-found errors against a known socket path are
/// specific enough to classify; everything else returns `None`.
fn classify_io_error_kind(kind: ErrorKind, socket_path: Option<&Path>) -> Option<ProbeError> {
    let path = socket_path?.to_path_buf();
    match kind {
        ErrorKind::PermissionDenied => Some(ProbeError::PermissionDenied { path }),
        ErrorKind::NotFound => Some(ProbeError::SocketNotFound { path }),
        _ => None,
    }
}

/// Classify a `Bollard` error into a semantic `ProbeError`.
///
/// Inspects the error type and underlying cause to find a socket-level
/// failure. Returns `None` for errors that do not match known patterns or for
/// endpoints without filesystem paths; callers pick their own fallback.
pub(super) fn classify_connection_error(
    bollard_error: &bollard::errors::Error,
    socket_uri: &str,
) -> Option<ProbeError> {
    let socket_path = extract_socket_path(socket_uri);

    match bollard_error {
        bollard::errors::Error::SocketNotFoundError(_) => {
            if let Some(path) = socket_path {
                return Some(ProbeError::SocketNotFound {
                    path: path.to_path_buf(),
                });
            }
        }
        bollard::errors::Error::IOError { err } => {
            let kind = io_error_kind_in_chain(err).unwrap_or_else(|| err.kind());
            return classify_io_error_kind(kind, socket_path);
        }
        _ => {}
    }

    io_error_kind_in_chain(bollard_error).and_then(|kind| classify_io_error_kind(kind, socket_path))
}

/// Walk the error source chain looking for an `io::Error` kind.
fn io_error_kind_in_chain(error: &dyn std::error::Error) -> Option<ErrorKind> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = error.source();
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            return Some(io_err.kind());
        }
        current = err.source();
    }
    None
}
