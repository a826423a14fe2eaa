//! Configuration system for dockfinder.
//!
//! This module provides the configuration structures and CLI definitions for
//! the dockfinder application. Configuration loading and precedence merging is
//! handled by the `ortho_config` crate: CLI flags override environment
//! variables, which override configuration files, which override defaults.
//!
//! The configuration file is expected at `~/.config/dockfinder/config.toml` by
//! default.
//!
//! # Example Configuration
//!
//! ```toml
//! engine_socket = "unix:///run/user/1000/podman/podman.sock"
//! host_override = "docker.internal"
//!
//! [probe]
//! timeout_secs = 5
//!
//! [logging]
//! filter = "dockfinder::discovery=debug,info"
//! format = "json"
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands};
pub use loader::{env_var_names, load_config, load_config_with_env};
pub use types::{AppConfig, LogFormat, LoggingConfig, ProbeConfig};
