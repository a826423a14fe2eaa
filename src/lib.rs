//! Locate and validate a reachable container engine.
//!
//! `dockfinder` answers one question on an unknown host: which Docker or
//! Podman endpoint actually works? It tries an ordered list of strategies
//! (explicit configuration, the `DOCKER_HOST` family of environment
//! variables, well-known local sockets), pings each candidate, and returns
//! the first one that answers. When none does, the error lists every attempt
//! and why it failed.
//!
//! # Modules
//!
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`engine`]: Strategies, the liveness probe, and the discovery orchestrator
//! - [`error`]: Semantic error types for the application
//! - [`telemetry`]: `tracing` subscriber initialisation

pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
