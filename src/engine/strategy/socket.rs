//! Strategy targeting one fixed socket or endpoint.

use super::{ConfigurationStrategy, validate_candidate};
use crate::engine::{EngineConfiguration, SharedProbe};
use crate::error::ConfigurationInvalid;

/// Targets a single known location, optionally pinning the reported host.
///
/// When a host override is set it is returned by
/// [`ConfigurationStrategy::resolve_host_address`] regardless of the
/// configuration's scheme.
pub struct SocketStrategy {
    description: String,
    location: String,
    host_override: Option<String>,
    probe: SharedProbe,
}

impl SocketStrategy {
    /// Creates a strategy for `location` labelled with `description`.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        location: impl Into<String>,
        probe: SharedProbe,
    ) -> Self {
        Self {
            description: description.into(),
            location: location.into(),
            host_override: None,
            probe,
        }
    }

    /// Pin the host address reported for this strategy's configurations.
    #[must_use]
    pub fn with_host_override(mut self, host: impl Into<String>) -> Self {
        self.host_override = Some(host.into());
        self
    }

    /// The socket or endpoint this strategy targets.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The pinned host address, if any.
    #[must_use]
    pub fn host_override(&self) -> Option<&str> {
        self.host_override.as_deref()
    }
}

impl ConfigurationStrategy for SocketStrategy {
    fn provide_configuration(&self) -> Result<EngineConfiguration, ConfigurationInvalid> {
        tracing::info!(
            target: "dockfinder::strategy",
            location = %self.location,
            "accessing {} socket",
            self.description
        );
        let configuration =
            validate_candidate(&self.probe, EngineConfiguration::from_host(&self.location)?)?;
        tracing::info!(
            target: "dockfinder::strategy",
            uri = %configuration.uri(),
            "{} socket answered ping",
            self.description
        );
        Ok(configuration)
    }

    fn description(&self) -> String {
        format!("{} socket ({})", self.description, self.location)
    }

    fn resolve_host_address(&self, configuration: &EngineConfiguration) -> Option<String> {
        self.host_override
            .clone()
            .or_else(|| configuration.default_host_address())
    }
}
