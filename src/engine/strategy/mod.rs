//! Configuration strategies.
//!
//! A strategy knows how to produce one candidate [`EngineConfiguration`] from
//! one environment signal and how to prove it works. The only success path is
//! a live ping through the shared [`EngineProbe`](crate::engine::EngineProbe);
//! every failure is reported as [`ConfigurationInvalid`].

mod defaults;
mod environment;
mod socket;

pub use defaults::default_strategies;
pub use environment::{EnvironmentStrategy, default_socket};
pub use socket::SocketStrategy;

use crate::engine::{EngineConfiguration, SharedProbe};
use crate::error::ConfigurationInvalid;

/// One method of locating and validating a container engine connection.
pub trait ConfigurationStrategy {
    /// Build a candidate configuration and validate it with a live ping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationInvalid`] if the candidate cannot be built or
    /// the engine does not answer. The original cause is kept as the error
    /// source.
    fn provide_configuration(&self) -> Result<EngineConfiguration, ConfigurationInvalid>;

    /// Stable human-readable description of the strategy and the values it
    /// resolved. Used only for diagnostics.
    fn description(&self) -> String;

    /// Externally reachable host for a configuration this strategy produced.
    ///
    /// Defaults to the scheme-based dispatch of
    /// [`EngineConfiguration::default_host_address`].
    fn resolve_host_address(&self, configuration: &EngineConfiguration) -> Option<String> {
        configuration.default_host_address()
    }
}

/// Ping `candidate` and hand it back only if the engine answered.
fn validate_candidate(
    probe: &SharedProbe,
    candidate: EngineConfiguration,
) -> Result<EngineConfiguration, ConfigurationInvalid> {
    tracing::debug!(
        target: "dockfinder::strategy",
        uri = %candidate.uri(),
        "probing container engine"
    );
    probe
        .ping(&candidate)
        .map_err(|source| ConfigurationInvalid::ProbeFailed {
            uri: candidate.uri().to_owned(),
            source,
        })?;
    Ok(candidate)
}
