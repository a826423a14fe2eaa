//! Container engine discovery.
//!
//! This module finds a working connection to a Docker or Podman engine on an
//! unknown host. Candidate locations are expressed as
//! [`ConfigurationStrategy`] values and tried in priority order by
//! [`discover`]:
//!
//! 1. CLI argument, config file or `DOCKFINDER_ENGINE_SOCKET` (`engine_socket`)
//! 2. `DOCKER_HOST`, `CONTAINER_HOST` or `PODMAN_HOST`, else the platform default
//! 3. Well-known local sockets (`/var/run/docker.sock`, rootless Docker and
//!    Podman sockets under `$XDG_RUNTIME_DIR`, or the Windows named pipe)
//!
//! Every candidate is validated with a live ping through an [`EngineProbe`].
//! The first one that answers wins; if none does, the returned
//! [`DiscoveryError`](crate::error::DiscoveryError) lists every attempt.

mod configuration;
mod discovery;
mod probe;
mod reporter;
mod strategy;

pub use configuration::{
    EngineConfiguration, EngineScheme, LOOPBACK_HOST, RegistrySettings, TlsSettings,
};
pub use discovery::{
    DiscoveryResult, FailureLedger, FailureRecord, discover, resolve_host_address,
};
#[cfg(test)]
pub(crate) use probe::MockEngineProbe;
pub use probe::{BollardProbe, DEFAULT_PROBE_TIMEOUT_SECS, EngineProbe, SharedProbe};
pub use reporter::{DiscoveryReporter, TracingDiscoveryReporter};
pub use strategy::{
    ConfigurationStrategy, EnvironmentStrategy, SocketStrategy, default_socket,
    default_strategies,
};
