//! Semantic error types for dockfinder.
//!
//! This module defines the error hierarchy for dockfinder, following the
//! principle of using semantic error enums (via `thiserror`) for conditions the
//! caller might inspect or report, while reserving opaque errors
//! (`eyre::Report`) for the application boundary.
//!
//! Discovery failures come in two tiers. [`ConfigurationInvalid`] describes a
//! single strategy that could not produce a working engine configuration and
//! is recovered by the discovery loop. [`DiscoveryError`] is raised only once
//! every strategy has failed and carries the full ordered ledger.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::engine::FailureLedger;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found at the expected path.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path where the configuration file was expected.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error during configuration loading.
    ///
    /// This wraps errors from the layered configuration system, including:
    /// - Configuration file parsing errors
    /// - Environment variable parsing errors
    /// - CLI argument parsing errors
    /// - Missing required fields after layer merging
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised by the engine probe while talking to a daemon.
///
/// Messages are captured as strings so the probe boundary does not leak
/// `bollard` types into strategy or test code.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Failed to build a client for the engine endpoint.
    #[error("failed to connect to container engine: {message}")]
    ConnectionFailed {
        /// A description of the connection failure.
        message: String,
    },

    /// The container engine socket was not found.
    #[error("container engine socket not found: {path}")]
    SocketNotFound {
        /// The path where the socket was expected.
        path: PathBuf,
    },

    /// Permission denied when accessing the container engine socket.
    #[error("permission denied accessing container socket: {path}")]
    PermissionDenied {
        /// The path to the socket.
        path: PathBuf,
    },

    /// The engine answered the ping with an error.
    #[error("container engine ping failed: {message}")]
    PingFailed {
        /// A description of the ping failure.
        message: String,
    },

    /// The ping did not complete within the probe timeout.
    #[error("container engine ping timed out after {seconds} seconds")]
    PingTimeout {
        /// The timeout duration in seconds.
        seconds: u64,
    },

    /// The endpoint scheme has no transport the probe can use.
    #[error("unsupported container engine scheme '{scheme}'")]
    UnsupportedScheme {
        /// The scheme found in the endpoint URI.
        scheme: String,
    },

    /// The requested API version is not in `major.minor` form.
    #[error("invalid container engine API version '{version}'")]
    InvalidApiVersion {
        /// The rejected version string.
        version: String,
    },

    /// A TLS endpoint has no certificate directory to load client material from.
    #[error("TLS required for '{uri}' but no certificate directory is configured")]
    TlsCertPathUnset {
        /// The endpoint that requires TLS.
        uri: String,
    },

    /// A certificate file expected in the certificate directory is absent.
    #[error("TLS certificate material not found: {path}")]
    TlsMaterialMissing {
        /// The missing file.
        path: PathBuf,
    },

    /// Failed to create the async runtime that drives the ping.
    #[error("failed to create probe runtime: {message}")]
    RuntimeCreationFailed {
        /// A description of the runtime failure.
        message: String,
    },
}

/// A single strategy failed to produce a validated engine configuration.
///
/// Every failure path of a strategy funnels into this type, and the original
/// cause stays reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum ConfigurationInvalid {
    /// The candidate host could not be parsed as an engine URI.
    #[error("malformed engine host '{host}': {source}")]
    MalformedHost {
        /// The host value as supplied to the strategy.
        host: String,
        /// The parser error.
        #[source]
        source: url::ParseError,
    },

    /// The candidate configuration was built but the live ping failed.
    #[error("ping failed: {source}")]
    ProbeFailed {
        /// The URI that was probed.
        uri: String,
        /// The probe error.
        #[source]
        source: ProbeError,
    },
}

/// Fatal discovery failure.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Every strategy was attempted and none produced a working configuration.
    ///
    /// The message enumerates each attempted strategy and its failure reason
    /// in attempt order.
    #[error("could not find a valid container engine environment; attempted configurations:{ledger}")]
    NoValidConfigurationFound {
        /// Ordered record of every failed attempt.
        ledger: FailureLedger,
    },
}

impl DiscoveryError {
    /// Returns the ledger of failed attempts.
    #[must_use]
    pub const fn ledger(&self) -> &FailureLedger {
        match self {
            Self::NoValidConfigurationFound { ledger } => ledger,
        }
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Top-level error type for dockfinder.
///
/// This enum aggregates all domain-specific errors into a single type that can
/// be used throughout the application. At the application boundary (main.rs),
/// these errors are converted to `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum DockfinderError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Engine discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Telemetry could not be initialised.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// A specialised `Result` type for dockfinder operations.
pub type Result<T> = std::result::Result<T, DockfinderError>;
