//! Configuration loading with layered precedence.
//!
//! This module provides functions to load configuration with the precedence order
//! (lowest to highest): application defaults, configuration file, environment
//! variables, command-line arguments.
//!
//! # Architecture Note: Why Manual Layer Composition?
//!
//! The `OrthoConfig` derive macro provides `load()` and `compose_layers()` methods
//! that handle discovery, environment variables, and CLI parsing automatically.
//! However, this loader uses `MergeComposer` manually because:
//!
//! 1. **Subcommand separation**: The CLI (`Cli` struct) handles subcommand dispatch
//!    via clap's `#[command(subcommand)]`, while `AppConfig` holds configuration
//!    values. `OrthoConfig`'s `load()` expects to own the entire CLI parsing.
//!
//! 2. **Environment variable validation**: `OrthoConfig`'s environment layer uses
//!    Figment, which silently ignores unparseable values. This loader implements
//!    fail-fast validation that returns errors for invalid typed values.
//!
//! 3. **Custom discovery integration**: The `Cli` struct already accepts `--config`
//!    via clap, so discovery must honour that path before falling back to XDG paths.
//!
//! # Environment Variable Handling
//!
//! String fields (e.g., `DOCKFINDER_ENGINE_SOCKET`) are always accepted. Typed
//! fields such as `DOCKFINDER_PROBE_TIMEOUT_SECS` must hold a valid value or
//! loading fails with `ConfigError::InvalidValue`.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::{DefaultEnv, Env};
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};

use crate::config::{AppConfig, Cli};
use crate::error::{ConfigError, Result};

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Unsigned 64-bit integer. Invalid values return an error.
    U64,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `DOCKFINDER_ENGINE_SOCKET`).
    env_var: &'static str,
    /// The JSON path segments (e.g., `["probe", "timeout_secs"]`).
    path: &'static [&'static str],
    /// The expected value type.
    var_type: EnvVarType,
}

/// Table of all environment variables and their JSON paths.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "DOCKFINDER_ENGINE_SOCKET",
        path: &["engine_socket"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "DOCKFINDER_HOST_OVERRIDE",
        path: &["host_override"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "DOCKFINDER_PROBE_TIMEOUT_SECS",
        path: &["probe", "timeout_secs"],
        var_type: EnvVarType::U64,
    },
    EnvVarSpec {
        env_var: "DOCKFINDER_LOG_FILTER",
        path: &["logging", "filter"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "DOCKFINDER_LOG_FORMAT",
        path: &["logging", "format"],
        var_type: EnvVarType::String,
    },
];

/// Name of the variable that points at an explicit configuration file.
const CONFIG_PATH_ENV_VAR: &str = "DOCKFINDER_CONFIG_PATH";

/// Returns the list of environment variable names recognised by the config loader.
///
/// Tests use this to clear every `DOCKFINDER_*` variable without hard-coding
/// the list.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
///
/// Uses `cap_std::fs_utf8` for capability-oriented filesystem access. The
/// function opens the parent directory of the config file and reads from
/// there.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Pick the configuration file to load, if any.
///
/// An explicit `--config` path must exist. Otherwise the first existing
/// candidate from `DOCKFINDER_CONFIG_PATH`, `.dockfinder.toml` or the XDG
/// config directory is used.
fn resolve_config_path(cli: &Cli) -> Result<Option<Utf8PathBuf>> {
    if let Some(ref explicit) = cli.config {
        if !explicit.exists() {
            return Err(ConfigError::FileNotFound {
                path: explicit.clone().into_std_path_buf(),
            }
            .into());
        }
        return Ok(Some(explicit.clone()));
    }

    let discovery = ConfigDiscovery::builder("dockfinder")
        .env_var(CONFIG_PATH_ENV_VAR)
        .config_file_name("config.toml")
        .dotfile_name(".dockfinder.toml")
        .build();
    Ok(discovery
        .candidates()
        .into_iter()
        .filter(|p| p.exists())
        .find_map(|p| Utf8PathBuf::try_from(p).ok()))
}

/// Load configuration with full layer precedence.
///
/// This function loads configuration from all available sources:
/// 1. Application defaults defined in the struct
/// 2. Configuration file (`--config`, `DOCKFINDER_CONFIG_PATH`, or discovered)
/// 3. Environment variables prefixed with `DOCKFINDER_`
/// 4. Command-line arguments (from the provided `Cli`)
///
/// Later sources override earlier ones.
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - A `--config` path that does not exist
/// - Malformed configuration files
/// - Invalid typed environment variable values (e.g., a non-numeric
///   `DOCKFINDER_PROBE_TIMEOUT_SECS`)
/// - A merged value that fails validation, such as a zero probe timeout
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    load_config_with_env(cli, &DefaultEnv::new())
}

/// Load configuration, reading `DOCKFINDER_*` variables through `env`.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_with_env<E: Env>(cli: &Cli, env: &E) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    if let Some(ref path) = resolve_config_path(cli)? {
        load_config_file(path, &mut composer)?;
    }

    let env_values = collect_env_vars(env)?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let mut config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;
    config.normalise();
    config.validate()?;

    Ok(config)
}

/// Collect environment variables with the `DOCKFINDER_` prefix into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed environment variable has an
/// unparseable value.
fn collect_env_vars<E: Env>(env: &E) -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Some(raw_value) = env.string(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::U64 => match raw_value.trim().parse::<u64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!("expected unsigned integer, got '{raw_value}'"),
                    }
                    .into());
                }
            },
        };

        insert_at_path(&mut root, spec.path, json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Insert a value at a nested path in a JSON map.
///
/// For a path like `["probe", "timeout_secs"]`, this creates the intermediate
/// `probe` object if needed and inserts `timeout_secs` within it.
fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((&field, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for &segment in parents {
        let entry = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(obj) = entry.as_object_mut() else {
            return;
        };
        current = obj;
    }

    current.insert(field.to_owned(), value);
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> Value {
    let mut overrides = Map::new();

    if let Some(ref socket) = cli.engine_socket {
        overrides.insert("engine_socket".to_owned(), Value::String(socket.clone()));
    }

    if let Some(ref host) = cli.host_override {
        overrides.insert("host_override".to_owned(), Value::String(host.clone()));
    }

    if let Some(seconds) = cli.probe_timeout_secs {
        insert_at_path(
            &mut overrides,
            &["probe", "timeout_secs"],
            Value::Number(seconds.into()),
        );
    }

    if let Some(format) = cli.log_format {
        insert_at_path(
            &mut overrides,
            &["logging", "format"],
            Value::String(format.as_str().to_owned()),
        );
    }

    if overrides.is_empty() {
        Value::Null
    } else {
        Value::Object(overrides)
    }
}
