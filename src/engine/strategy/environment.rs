//! Strategy driven by ambient environment variables and built-in defaults.

use camino::{Utf8Path, Utf8PathBuf};

use super::{ConfigurationStrategy, validate_candidate};
use crate::engine::{EngineConfiguration, RegistrySettings, SharedProbe, TlsSettings};
use crate::error::ConfigurationInvalid;

/// Host variables checked in priority order; the first non-empty one wins.
const HOST_ENV_VARS: &[&str] = &["DOCKER_HOST", "CONTAINER_HOST", "PODMAN_HOST"];

const TLS_VERIFY_VAR: &str = "DOCKER_TLS_VERIFY";
const CERT_PATH_VAR: &str = "DOCKER_CERT_PATH";
const API_VERSION_VAR: &str = "DOCKER_API_VERSION";
const REGISTRY_URL_VAR: &str = "DOCKER_REGISTRY_URL";
const REGISTRY_USERNAME_VAR: &str = "DOCKER_REGISTRY_USERNAME";
const REGISTRY_PASSWORD_VAR: &str = "DOCKER_REGISTRY_PASSWORD";
const REGISTRY_EMAIL_VAR: &str = "DOCKER_REGISTRY_EMAIL";

/// Default socket path for Unix platforms.
#[cfg(unix)]
const DEFAULT_SOCKET: &str = "unix:///var/run/docker.sock";

/// Default socket path for Windows platforms.
#[cfg(windows)]
const DEFAULT_SOCKET: &str = "npipe:////./pipe/docker_engine";

/// Returns the platform default engine endpoint.
///
/// On Unix systems, this is `unix:///var/run/docker.sock`.
/// On Windows systems, this is `npipe:////./pipe/docker_engine`.
#[must_use]
pub const fn default_socket() -> &'static str {
    DEFAULT_SOCKET
}

/// Values read from the environment when the strategy is built.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AmbientSettings {
    host: String,
    tls_verify: bool,
    cert_path: Option<Utf8PathBuf>,
    api_version: Option<String>,
    registry: RegistrySettings,
}

impl AmbientSettings {
    fn read<E: mockable::Env>(env: &E) -> Self {
        let host = HOST_ENV_VARS
            .iter()
            .find_map(|var_name| non_empty(env, var_name))
            .unwrap_or_else(|| default_socket().to_owned());

        Self {
            host,
            tls_verify: non_empty(env, TLS_VERIFY_VAR).is_some_and(|value| is_truthy(&value)),
            cert_path: non_empty(env, CERT_PATH_VAR).map(Utf8PathBuf::from),
            api_version: non_empty(env, API_VERSION_VAR),
            registry: RegistrySettings {
                url: non_empty(env, REGISTRY_URL_VAR),
                username: non_empty(env, REGISTRY_USERNAME_VAR),
                password: non_empty(env, REGISTRY_PASSWORD_VAR),
                email: non_empty(env, REGISTRY_EMAIL_VAR),
            },
        }
    }

    fn candidate(&self) -> Result<EngineConfiguration, ConfigurationInvalid> {
        let mut candidate = EngineConfiguration::from_host(&self.host)?
            .with_registry(self.registry.clone());
        if self.tls_verify || self.cert_path.is_some() {
            candidate = candidate.with_tls(TlsSettings {
                verify: self.tls_verify,
                cert_path: self.cert_path.clone(),
            });
        }
        if let Some(version) = &self.api_version {
            candidate = candidate.with_api_version(version.clone());
        }
        Ok(candidate)
    }
}

fn non_empty<E: mockable::Env>(env: &E, key: &str) -> Option<String> {
    env.string(key).filter(|value| !value.is_empty())
}

/// Docker treats any set value other than an explicit "off" as enabling TLS.
fn is_truthy(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no")
}

fn render(value: Option<&str>) -> &str {
    value.unwrap_or("<unset>")
}

/// Builds a configuration purely from environment variables and defaults.
///
/// The engine host is taken from the first non-empty of `DOCKER_HOST`,
/// `CONTAINER_HOST` and `PODMAN_HOST`, falling back to [`default_socket`].
/// TLS, API version and registry settings come from `DOCKER_TLS_VERIFY`,
/// `DOCKER_CERT_PATH`, `DOCKER_API_VERSION` and `DOCKER_REGISTRY_*`.
///
/// The environment is read once, at construction.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
///
/// use dockfinder::engine::{BollardProbe, EnvironmentStrategy};
/// use mockable::DefaultEnv;
///
/// let strategy = EnvironmentStrategy::from_env(&DefaultEnv::new(), Arc::new(BollardProbe::default()));
/// println!("{}", strategy.resolved_host());
/// ```
pub struct EnvironmentStrategy {
    settings: AmbientSettings,
    probe: SharedProbe,
}

impl EnvironmentStrategy {
    /// Read the ambient settings from `env`.
    #[must_use]
    pub fn from_env<E: mockable::Env>(env: &E, probe: SharedProbe) -> Self {
        Self {
            settings: AmbientSettings::read(env),
            probe,
        }
    }

    /// The engine host this strategy will try.
    #[must_use]
    pub fn resolved_host(&self) -> &str {
        &self.settings.host
    }
}

impl ConfigurationStrategy for EnvironmentStrategy {
    fn provide_configuration(&self) -> Result<EngineConfiguration, ConfigurationInvalid> {
        let configuration = validate_candidate(&self.probe, self.settings.candidate()?)?;

        tracing::info!(
            target: "dockfinder::strategy",
            uri = %configuration.uri(),
            "found container engine settings from environment"
        );
        tracing::info!(
            target: "dockfinder::strategy",
            host = %self.resolve_host_address(&configuration).as_deref().unwrap_or("<unresolved>"),
            "container engine host address"
        );
        Ok(configuration)
    }

    fn description(&self) -> String {
        let settings = &self.settings;
        let registry = &settings.registry;
        let password = registry.password.as_ref().map(|_| "<redacted>");
        format!(
            concat!(
                "Environment variables and defaults. Resolved:\n",
                "    uri={}\n",
                "    tls_verify={}\n",
                "    cert_path={}\n",
                "    api_version={}\n",
                "    registry_url={}\n",
                "    username={}\n",
                "    password={}\n",
                "    email={}",
            ),
            settings.host,
            settings.tls_verify,
            render(settings.cert_path.as_deref().map(Utf8Path::as_str)),
            render(settings.api_version.as_deref()),
            render(registry.url.as_deref()),
            render(registry.username.as_deref()),
            render(password),
            render(registry.email.as_deref()),
        )
    }
}
