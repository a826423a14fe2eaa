//! Certificate material for TLS engine endpoints.
//!
//! Docker keeps client TLS material as `ca.pem`, `cert.pem` and `key.pem` in
//! one directory (`DOCKER_CERT_PATH`). An endpoint speaks TLS when its scheme
//! is `https`, or when it is a network endpoint carrying [`TlsSettings`].
//! Local sockets never use TLS.
//!
//! [`TlsSettings`]: crate::engine::TlsSettings

use std::path::PathBuf;

use camino::Utf8Path;

use crate::engine::{EngineConfiguration, EngineScheme};
use crate::error::ProbeError;

const CA_FILE: &str = "ca.pem";
const CERT_FILE: &str = "cert.pem";
const KEY_FILE: &str = "key.pem";

/// Resolved certificate files for one TLS connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TlsMaterial {
    pub(super) ca: PathBuf,
    pub(super) cert: PathBuf,
    pub(super) key: PathBuf,
}

/// Returns true when the endpoint must be reached over TLS.
pub(super) fn requires_tls(configuration: &EngineConfiguration) -> bool {
    let scheme = configuration.scheme();
    scheme == EngineScheme::Https || (scheme.is_network() && configuration.tls().is_some())
}

/// Locate the certificate files for a TLS endpoint.
///
/// Returns `Ok(None)` for endpoints that do not use TLS.
///
/// # Errors
///
/// Returns [`ProbeError::TlsCertPathUnset`] when TLS is required but no
/// certificate directory is configured, and
/// [`ProbeError::TlsMaterialMissing`] naming the first file that is absent.
pub(super) fn tls_material(
    configuration: &EngineConfiguration,
) -> Result<Option<TlsMaterial>, ProbeError> {
    if !requires_tls(configuration) {
        return Ok(None);
    }

    let dir = configuration
        .tls()
        .and_then(|tls| tls.cert_path.as_deref())
        .ok_or_else(|| ProbeError::TlsCertPathUnset {
            uri: configuration.uri().to_owned(),
        })?;

    Ok(Some(TlsMaterial {
        ca: existing_file(dir, CA_FILE)?,
        cert: existing_file(dir, CERT_FILE)?,
        key: existing_file(dir, KEY_FILE)?,
    }))
}

fn existing_file(dir: &Utf8Path, name: &str) -> Result<PathBuf, ProbeError> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path.into_std_path_buf())
    } else {
        Err(ProbeError::TlsMaterialMissing {
            path: path.into_std_path_buf(),
        })
    }
}
