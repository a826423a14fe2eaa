//! Command-line argument definitions for dockfinder.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use super::LogFormat;

/// Command-line interface for dockfinder.
#[derive(Debug, Parser)]
#[command(name = "dockfinder")]
#[command(
    author,
    version,
    about = "Locate and validate a reachable Docker or Podman engine"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Container engine socket path or URL to try first.
    #[arg(long, global = true)]
    pub engine_socket: Option<String>,

    /// Host address to report instead of the one derived from the socket.
    #[arg(long, global = true)]
    pub host_override: Option<String>,

    /// Seconds to wait for each engine ping.
    #[arg(long, global = true)]
    pub probe_timeout_secs: Option<u64>,

    /// Format of log records written to standard error.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Available subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Find a working engine and print the winning strategy, URI and host.
    Discover,

    /// Find a working engine and print only its host address.
    Host,

    /// List the strategies that would be tried, in order, without probing.
    Strategies,
}
