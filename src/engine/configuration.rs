//! Engine connection configuration value objects.
//!
//! An [`EngineConfiguration`] describes how to reach a daemon: its endpoint
//! URI plus optional TLS, API version, and registry settings. Values are
//! immutable once built; strategies construct a fresh one per attempt.

use std::fmt;

use camino::Utf8PathBuf;
use url::Url;

use crate::error::ConfigurationInvalid;

/// Address returned for endpoints that are only reachable from this machine.
pub const LOOPBACK_HOST: &str = "localhost";

/// Connection scheme of an engine endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineScheme {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
    /// Docker-style `tcp://`, spoken as HTTP.
    Tcp,
    /// Unix domain socket.
    Unix,
    /// Windows named pipe.
    NamedPipe,
    /// Any scheme without a known transport.
    Other(String),
}

impl EngineScheme {
    fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "http" => Self::Http,
            "https" => Self::Https,
            "tcp" => Self::Tcp,
            "unix" => Self::Unix,
            "npipe" => Self::NamedPipe,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns true for schemes addressed by host and port.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http | Self::Https | Self::Tcp)
    }

    /// Returns true for sockets that only exist on the local machine.
    #[must_use]
    pub const fn is_local_socket(&self) -> bool {
        matches!(self, Self::Unix | Self::NamedPipe)
    }
}

impl fmt::Display for EngineScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Https => f.write_str("https"),
            Self::Tcp => f.write_str("tcp"),
            Self::Unix => f.write_str("unix"),
            Self::NamedPipe => f.write_str("npipe"),
            Self::Other(scheme) => f.write_str(scheme),
        }
    }
}

/// TLS material passed through to the engine client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsSettings {
    /// Whether the engine certificate must be verified.
    pub verify: bool,
    /// Directory holding `ca.pem`, `cert.pem` and `key.pem`.
    pub cert_path: Option<Utf8PathBuf>,
}

/// Registry credentials passed through to the engine client.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Registry server address.
    pub url: Option<String>,
    /// Registry user name.
    pub username: Option<String>,
    /// Registry password. Never rendered by `Debug`.
    pub password: Option<String>,
    /// Registry account email.
    pub email: Option<String>,
}

impl RegistrySettings {
    /// Returns true when no registry field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
    }
}

impl fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .finish()
    }
}

/// Immutable description of how to reach a container engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfiguration {
    uri: String,
    host: Url,
    tls: Option<TlsSettings>,
    api_version: Option<String>,
    registry: Option<RegistrySettings>,
}

impl EngineConfiguration {
    /// Build a configuration for the given endpoint.
    ///
    /// Accepts full URIs (`unix:///var/run/docker.sock`, `tcp://host:2375`,
    /// `npipe:////./pipe/docker_engine`) as well as bare paths. Bare paths
    /// starting with `\\` or `//` are treated as Windows named pipes; all
    /// other bare paths are treated as Unix sockets. Detection is
    /// syntax-based, not platform-based.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationInvalid::MalformedHost`] if the endpoint cannot
    /// be parsed as a URI.
    pub fn from_host(host: &str) -> Result<Self, ConfigurationInvalid> {
        let uri = normalise_location(host);
        let parsed = Url::parse(&uri).map_err(|source| ConfigurationInvalid::MalformedHost {
            host: host.to_owned(),
            source,
        })?;

        Ok(Self {
            uri,
            host: parsed,
            tls: None,
            api_version: None,
            registry: None,
        })
    }

    /// Attach TLS settings.
    #[must_use]
    pub fn with_tls(self, tls: TlsSettings) -> Self {
        Self {
            tls: Some(tls),
            ..self
        }
    }

    /// Pin the engine API version (`major.minor`).
    #[must_use]
    pub fn with_api_version(self, version: impl Into<String>) -> Self {
        Self {
            api_version: Some(version.into()),
            ..self
        }
    }

    /// Attach registry settings. Empty settings are dropped.
    #[must_use]
    pub fn with_registry(self, registry: RegistrySettings) -> Self {
        Self {
            registry: (!registry.is_empty()).then_some(registry),
            ..self
        }
    }

    /// The normalised endpoint URI, as handed to the engine client.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The parsed endpoint URI.
    #[must_use]
    pub const fn host(&self) -> &Url {
        &self.host
    }

    /// The connection scheme.
    #[must_use]
    pub fn scheme(&self) -> EngineScheme {
        EngineScheme::from_scheme(self.host.scheme())
    }

    /// TLS settings, if any.
    #[must_use]
    pub const fn tls(&self) -> Option<&TlsSettings> {
        self.tls.as_ref()
    }

    /// Pinned API version, if any.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Registry settings, if any.
    #[must_use]
    pub const fn registry(&self) -> Option<&RegistrySettings> {
        self.registry.as_ref()
    }

    /// Externally reachable host derived from the scheme.
    ///
    /// - `http`, `https`, `tcp`: the URI host component.
    /// - `unix`, `npipe`: [`LOOPBACK_HOST`], as local sockets are only
    ///   reachable from this machine.
    /// - anything else: `None`. An unknown scheme is not an error.
    #[must_use]
    pub fn default_host_address(&self) -> Option<String> {
        let scheme = self.scheme();
        if scheme.is_network() {
            return self
                .host
                .host_str()
                .filter(|host| !host.is_empty())
                .map(str::to_owned);
        }
        if scheme.is_local_socket() {
            return Some(String::from(LOOPBACK_HOST));
        }
        None
    }
}

/// Give bare socket paths an explicit scheme.
fn normalise_location(location: &str) -> String {
    if location.contains("://") {
        return location.to_owned();
    }
    // Named pipes typically start with \\ or // (e.g., \\.\pipe\docker_engine)
    if location.starts_with("\\\\") || location.starts_with("//") {
        return format!("npipe://{}", location.replace('\\', "/"));
    }
    format!("unix://{location}")
}
