//! Given/when steps for discovery scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use dockfinder::engine::{
    ConfigurationStrategy, SharedProbe, SocketStrategy, TracingDiscoveryReporter,
    default_strategies, discover,
};
use mockable::MockEnv;
use rstest_bdd::Slot;
use rstest_bdd_macros::{given, when};

use super::StepResult;
use super::probe::ScriptedProbe;
use super::state::{DeclaredSocket, DiscoveryOutcome, DiscoveryState};

fn append<T: Clone>(slot: &Slot<Vec<T>>, item: T) {
    let mut items = slot.get().unwrap_or_default();
    items.push(item);
    slot.set(items);
}

fn scripted_probe(discovery_state: &DiscoveryState) -> (SharedProbe, Arc<Mutex<Vec<String>>>) {
    let probed = Arc::new(Mutex::new(Vec::new()));
    let reachable = discovery_state.reachable.get().unwrap_or_default();
    let probe: SharedProbe = Arc::new(ScriptedProbe::new(reachable, Arc::clone(&probed)));
    (probe, probed)
}

fn mock_env(vars: Vec<(String, String)>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string().returning(move |key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    });
    env
}

fn record_outcome(
    discovery_state: &DiscoveryState,
    strategies: &[Box<dyn ConfigurationStrategy>],
    probed: &Mutex<Vec<String>>,
) {
    let outcome = match discover(strategies, &TracingDiscoveryReporter::new()) {
        Ok(result) => DiscoveryOutcome::Found {
            description: result.strategy().description(),
            uri: result.configuration().uri().to_owned(),
            host: result.host_address(),
        },
        Err(error) => DiscoveryOutcome::Failed {
            attempts: error.ledger().len(),
            message: error.to_string(),
        },
    };
    discovery_state.outcome.set(outcome);
    discovery_state
        .probed
        .set(probed.lock().unwrap_or_else(PoisonError::into_inner).clone());
}

#[given("a socket strategy named {name} for {location}")]
fn given_socket_strategy(discovery_state: &DiscoveryState, name: String, location: String) {
    append(
        &discovery_state.sockets,
        DeclaredSocket {
            name,
            location,
            host_override: None,
        },
    );
}

#[given("the {name} strategy pins the host to {host}")]
fn given_host_override(
    discovery_state: &DiscoveryState,
    name: String,
    host: String,
) -> StepResult<()> {
    let mut sockets = discovery_state.sockets.get().unwrap_or_default();
    let socket = sockets
        .iter_mut()
        .find(|s| s.name == name)
        .ok_or_else(|| format!("no socket strategy named {name}"))?;
    socket.host_override = Some(host);
    discovery_state.sockets.set(sockets);
    Ok(())
}

#[given("no strategies are configured")]
fn given_no_strategies(discovery_state: &DiscoveryState) {
    discovery_state.sockets.set(Vec::new());
}

#[given("a container engine listening at {uri}")]
fn given_listening_engine(discovery_state: &DiscoveryState, uri: String) {
    append(&discovery_state.reachable, uri);
}

#[given("the environment variable {key} is {value}")]
fn given_environment_variable(discovery_state: &DiscoveryState, key: String, value: String) {
    append(&discovery_state.env_vars, (key, value));
}

#[given("the configured engine socket is {socket}")]
fn given_configured_socket(discovery_state: &DiscoveryState, socket: String) {
    discovery_state.engine_socket.set(socket);
}

#[when("discovery runs")]
fn when_discovery_runs(discovery_state: &DiscoveryState) {
    let (probe, probed) = scripted_probe(discovery_state);
    let strategies: Vec<Box<dyn ConfigurationStrategy>> = discovery_state
        .sockets
        .get()
        .unwrap_or_default()
        .into_iter()
        .map(|declared| -> Box<dyn ConfigurationStrategy> {
            let strategy =
                SocketStrategy::new(declared.name, declared.location, SharedProbe::clone(&probe));
            match declared.host_override {
                Some(host) => Box::new(strategy.with_host_override(host)),
                None => Box::new(strategy),
            }
        })
        .collect();

    record_outcome(discovery_state, &strategies, &probed);
}

#[when("default discovery runs")]
fn when_default_discovery_runs(discovery_state: &DiscoveryState) {
    let (probe, probed) = scripted_probe(discovery_state);
    let env = mock_env(discovery_state.env_vars.get().unwrap_or_default());
    let engine_socket = discovery_state.engine_socket.get();
    let strategies = default_strategies(engine_socket.as_deref(), None, &env, &probe);

    record_outcome(discovery_state, &strategies, &probed);
}
