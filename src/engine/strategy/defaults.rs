//! Built-in strategy priority list.

use super::{ConfigurationStrategy, EnvironmentStrategy, SocketStrategy};
use crate::engine::SharedProbe;

/// Runtime directory used to locate rootless sockets.
#[cfg(unix)]
const XDG_RUNTIME_DIR: &str = "XDG_RUNTIME_DIR";

/// Build the default strategy list, most specific first.
///
/// 1. `engine_socket`, when configured, with `host_override` applied.
/// 2. Environment variables and platform defaults.
/// 3. On Unix: the system Docker socket, then rootless Docker and rootless
///    Podman sockets under `$XDG_RUNTIME_DIR` (omitted when it is unset).
/// 4. On Windows: the Docker Engine named pipe.
///
/// Every fixed-socket strategy carries `host_override` when it is set.
#[must_use]
pub fn default_strategies<E: mockable::Env>(
    engine_socket: Option<&str>,
    host_override: Option<&str>,
    env: &E,
    probe: &SharedProbe,
) -> Vec<Box<dyn ConfigurationStrategy>> {
    let socket = |description: &str, location: String| -> Box<dyn ConfigurationStrategy> {
        let strategy = SocketStrategy::new(description, location, SharedProbe::clone(probe));
        match host_override {
            Some(host) => Box::new(strategy.with_host_override(host)),
            None => Box::new(strategy),
        }
    };

    let mut strategies: Vec<Box<dyn ConfigurationStrategy>> = Vec::new();
    if let Some(location) = engine_socket.filter(|s| !s.is_empty()) {
        strategies.push(socket("configured", location.to_owned()));
    }
    strategies.push(Box::new(EnvironmentStrategy::from_env(
        env,
        SharedProbe::clone(probe),
    )));
    strategies.extend(platform_sockets(env).into_iter().map(|(d, l)| socket(d, l)));
    strategies
}

#[cfg(unix)]
fn platform_sockets<E: mockable::Env>(env: &E) -> Vec<(&'static str, String)> {
    let mut sockets = vec![("local Unix", String::from("unix:///var/run/docker.sock"))];
    if let Some(raw_dir) = env.string(XDG_RUNTIME_DIR).filter(|d| !d.is_empty()) {
        let runtime_dir = raw_dir.trim_end_matches('/');
        sockets.push((
            "rootless Docker",
            format!("unix://{runtime_dir}/docker.sock"),
        ));
        sockets.push((
            "rootless Podman",
            format!("unix://{runtime_dir}/podman/podman.sock"),
        ));
    }
    sockets
}

#[cfg(windows)]
fn platform_sockets<E: mockable::Env>(_env: &E) -> Vec<(&'static str, String)> {
    vec![(
        "Windows named pipe",
        String::from("npipe:////./pipe/docker_engine"),
    )]
}

#[cfg(not(any(unix, windows)))]
fn platform_sockets<E: mockable::Env>(_env: &E) -> Vec<(&'static str, String)> {
    Vec::new()
}
