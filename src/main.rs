//! `dockfinder` application entry point.
//!
//! This binary finds a working Docker or Podman engine on the current host.
//! It uses `eyre` for opaque error handling at the application boundary,
//! converting domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/dockfinder/config.toml` or path from `DOCKFINDER_CONFIG_PATH`)
//! 3. Environment variables (`DOCKFINDER_*`)
//! 4. Command-line arguments
//!
//! Results are printed to standard output; logs go to standard error.

use std::sync::Arc;

use clap::Parser;
use dockfinder::config::{AppConfig, Cli, Commands, load_config};
use dockfinder::engine::{
    BollardProbe, ConfigurationStrategy, SharedProbe, TracingDiscoveryReporter, default_strategies,
    discover,
};
use dockfinder::error::{DockfinderError, Result as DockfinderResult};
use dockfinder::telemetry;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;

/// Application entry point.
///
/// Loads configuration, installs the log subscriber, then dispatches to the
/// requested subcommand.
fn main() -> EyreResult<()> {
    let cli = Cli::parse();

    // Load configuration with layered precedence: defaults < file < env < CLI.
    let config = load_config(&cli).map_err(Report::from)?;

    telemetry::initialise(&config.logging)
        .map_err(DockfinderError::from)
        .map_err(Report::from)?;

    run(&cli, &config).map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
fn run(cli: &Cli, config: &AppConfig) -> DockfinderResult<()> {
    let strategies = build_strategies(config);
    match cli.command {
        Commands::Discover => print_discovery(&strategies),
        Commands::Host => print_host(&strategies),
        Commands::Strategies => {
            print_strategies(&strategies);
            Ok(())
        }
    }
}

/// Build the default strategy list from the loaded configuration.
fn build_strategies(config: &AppConfig) -> Vec<Box<dyn ConfigurationStrategy>> {
    let probe: SharedProbe = Arc::new(BollardProbe::new(config.probe.timeout()));
    default_strategies(
        config.engine_socket.as_deref(),
        config.host_override.as_deref(),
        &DefaultEnv::new(),
        &probe,
    )
}

/// Run discovery and print the winning strategy, URI and host address.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_discovery(strategies: &[Box<dyn ConfigurationStrategy>]) -> DockfinderResult<()> {
    let result = discover(strategies, &TracingDiscoveryReporter::new())?;
    println!("strategy: {}", result.strategy().description());
    println!("uri: {}", result.configuration().uri());
    match result.host_address() {
        Some(host) => println!("host: {host}"),
        None => println!("host: <none>"),
    }
    Ok(())
}

/// Run discovery and print only the host address.
///
/// Prints nothing when the winning scheme has no meaningful host.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_host(strategies: &[Box<dyn ConfigurationStrategy>]) -> DockfinderResult<()> {
    let result = discover(strategies, &TracingDiscoveryReporter::new())?;
    if let Some(host) = result.host_address() {
        println!("{host}");
    }
    Ok(())
}

/// Print the strategies that would be tried, without probing any of them.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_strategies(strategies: &[Box<dyn ConfigurationStrategy>]) {
    for (position, strategy) in strategies.iter().enumerate() {
        println!("{}. {}", position + 1, strategy.description());
    }
}
