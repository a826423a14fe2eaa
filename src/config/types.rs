//! Configuration data types for dockfinder.

use std::time::Duration;

use clap::ValueEnum;
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::error::ConfigError;

/// Output format for log records written to standard error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Compact human-readable lines.
    #[default]
    Compact,
}

impl LogFormat {
    /// The name used in configuration files and environment variables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

/// Engine probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Seconds to wait for each ping before giving up on a candidate.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}

impl ProbeConfig {
    /// The ping timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects a zero timeout, which would fail every probe immediately.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming `probe.timeout_secs`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: String::from("probe.timeout_secs"),
                reason: String::from("must be greater than zero"),
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directives, for example `info` or
    /// `dockfinder::discovery=debug`.
    pub filter: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: String::from("info"),
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    /// Rejects an empty filter expression.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming `logging.filter`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: String::from("logging.filter"),
                reason: String::from("cannot be empty"),
            });
        }
        Ok(())
    }
}

/// Root application configuration.
///
/// This structure is loaded from configuration files, environment variables,
/// and command-line arguments with layered precedence. The precedence order
/// (lowest to highest) is: defaults, configuration file, environment variables,
/// command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `DOCKFINDER_CONFIG_PATH` environment variable
/// 2. `.dockfinder.toml` in the current working directory
/// 3. `.dockfinder.toml` in the home directory
/// 4. `~/.config/dockfinder/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "DOCKFINDER",
    post_merge_hook,
    discovery(
        app_name = "dockfinder",
        env_var = "DOCKFINDER_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".dockfinder.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// An explicit engine socket path or URL, tried before any other source.
    pub engine_socket: Option<String>,

    /// Host address reported for fixed-socket strategies instead of the one
    /// derived from the endpoint scheme.
    pub host_override: Option<String>,

    /// Engine probe configuration.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub probe: ProbeConfig,

    /// Logging configuration.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Treat blank optional strings as unset.
    ///
    /// An empty `DOCKFINDER_ENGINE_SOCKET` or `host_override = ""` means "not
    /// configured", not "connect to the empty string".
    pub fn normalise(&mut self) {
        for value in [&mut self.engine_socket, &mut self.host_override] {
            if value.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *value = None;
            }
        }
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.probe.validate()?;
        self.logging.validate()
    }
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        self.normalise();
        Ok(())
    }
}
