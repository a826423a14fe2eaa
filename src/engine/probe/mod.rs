//! Engine liveness probe.
//!
//! The probe is the only code that talks to a daemon. Strategies hand it a
//! candidate [`EngineConfiguration`]; it builds a `bollard` client for that
//! endpoint and issues a ping bounded by a timeout. Tests substitute their own
//! [`EngineProbe`] implementation.

mod error_classification;
mod tls;

use std::sync::Arc;
use std::time::Duration;

use bollard::{ClientVersion, Docker};

use crate::engine::{EngineConfiguration, EngineScheme};
use crate::error::ProbeError;
use error_classification::classify_connection_error;
use tls::tls_material;

/// Default ping timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Synchronous liveness check against a candidate configuration.
///
/// Implementations must return within a bounded time: discovery runs probes
/// sequentially and has no cancellation of its own.
#[cfg_attr(test, mockall::automock)]
pub trait EngineProbe: Send + Sync {
    /// Build a client for `configuration` and complete one ping round-trip.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] if the client cannot be built, the engine
    /// cannot be reached, answers with an error, or does not answer in time.
    fn ping(&self, configuration: &EngineConfiguration) -> Result<(), ProbeError>;
}

/// Probe handle shared by every strategy in a discovery run.
pub type SharedProbe = Arc<dyn EngineProbe>;

/// Production probe backed by `bollard`.
///
/// Supports Unix sockets, Windows named pipes, and HTTP-compatible endpoints
/// (`http://`, `https://`, and `tcp://`, which is rewritten to `http://`).
/// Network endpoints carrying TLS settings, and every `https://` endpoint,
/// connect over TLS with the `ca.pem`, `cert.pem` and `key.pem` files from
/// the configured certificate directory.
#[derive(Debug, Clone, Copy)]
pub struct BollardProbe {
    timeout: Duration,
}

impl Default for BollardProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS))
    }
}

impl BollardProbe {
    /// Creates a probe that gives up on each ping after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The per-ping timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build a `bollard` client for the configuration without contacting it.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnsupportedScheme`] for schemes without a
    /// transport and [`ProbeError::InvalidApiVersion`] for a malformed pinned
    /// version. A TLS endpoint without complete certificate material fails
    /// with [`ProbeError::TlsCertPathUnset`] or
    /// [`ProbeError::TlsMaterialMissing`]. A missing socket is reported as
    /// [`ProbeError::SocketNotFound`]; any other rejection by `bollard` is
    /// [`ProbeError::ConnectionFailed`].
    pub fn connect(&self, configuration: &EngineConfiguration) -> Result<Docker, ProbeError> {
        let version = client_version(configuration.api_version())?;
        let timeout_secs = self.timeout.as_secs();
        let uri = configuration.uri();

        if let Some(material) = tls_material(configuration)? {
            return Docker::connect_with_ssl(
                uri,
                &material.key,
                &material.cert,
                &material.ca,
                timeout_secs,
                &version,
            )
            .map_err(|e| connection_failure(&e, uri));
        }

        match configuration.scheme() {
            EngineScheme::Unix | EngineScheme::NamedPipe => {
                Docker::connect_with_socket(uri, timeout_secs, &version)
            }
            EngineScheme::Tcp => {
                // Rewrite tcp:// to http:// for Bollard compatibility
                let http_uri = uri.replacen("tcp://", "http://", 1);
                Docker::connect_with_http(&http_uri, timeout_secs, &version)
            }
            EngineScheme::Http | EngineScheme::Https => {
                Docker::connect_with_http(uri, timeout_secs, &version)
            }
            EngineScheme::Other(scheme) => return Err(ProbeError::UnsupportedScheme { scheme }),
        }
        .map_err(|e| connection_failure(&e, uri))
    }

    /// Ping with timeout, classifying transport failures.
    async fn ping_with_timeout(&self, docker: &Docker, uri: &str) -> Result<(), ProbeError> {
        tokio::time::timeout(self.timeout, docker.ping())
            .await
            .map_err(|_| ProbeError::PingTimeout {
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| {
                classify_connection_error(&e, uri).unwrap_or_else(|| ProbeError::PingFailed {
                    message: e.to_string(),
                })
            })?;
        Ok(())
    }

    /// Create a single-threaded runtime for one synchronous ping.
    fn create_runtime() -> Result<tokio::runtime::Runtime, ProbeError> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ProbeError::RuntimeCreationFailed {
                message: e.to_string(),
            })
    }
}

impl EngineProbe for BollardProbe {
    fn ping(&self, configuration: &EngineConfiguration) -> Result<(), ProbeError> {
        let rt = Self::create_runtime()?;
        rt.block_on(async {
            let docker = self.connect(configuration)?;
            self.ping_with_timeout(&docker, configuration.uri()).await
        })
    }
}

/// Map a client construction failure to a `ProbeError`.
fn connection_failure(error: &bollard::errors::Error, uri: &str) -> ProbeError {
    classify_connection_error(error, uri).unwrap_or_else(|| ProbeError::ConnectionFailed {
        message: error.to_string(),
    })
}

/// Parse a pinned `major.minor` API version, or fall back to bollard's default.
fn client_version(requested: Option<&str>) -> Result<ClientVersion, ProbeError> {
    let Some(version) = requested else {
        return Ok(bollard::API_DEFAULT_VERSION.clone());
    };

    let invalid = || ProbeError::InvalidApiVersion {
        version: version.to_owned(),
    };
    let trimmed = version.trim_start_matches('v');
    let (major, minor) = trimmed.split_once('.').ok_or_else(invalid)?;

    Ok(ClientVersion {
        major_version: major.parse().map_err(|_| invalid())?,
        minor_version: minor.parse().map_err(|_| invalid())?,
    })
}
