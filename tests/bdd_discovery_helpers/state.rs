//! Scenario state for discovery behavioural tests.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// A socket strategy declared by a scenario.
#[derive(Debug, Clone)]
pub(crate) struct DeclaredSocket {
    pub(crate) name: String,
    pub(crate) location: String,
    pub(crate) host_override: Option<String>,
}

/// High-level outcome of a discovery run.
#[derive(Debug, Clone)]
pub(crate) enum DiscoveryOutcome {
    /// A strategy produced a validated configuration.
    Found {
        description: String,
        uri: String,
        host: Option<String>,
    },
    /// Every strategy failed.
    Failed { message: String, attempts: usize },
}

#[derive(Default, ScenarioState)]
pub(crate) struct DiscoveryState {
    pub(crate) sockets: Slot<Vec<DeclaredSocket>>,
    pub(crate) reachable: Slot<Vec<String>>,
    pub(crate) env_vars: Slot<Vec<(String, String)>>,
    pub(crate) engine_socket: Slot<String>,
    pub(crate) probed: Slot<Vec<String>>,
    pub(crate) outcome: Slot<DiscoveryOutcome>,
}

#[fixture]
pub(crate) fn discovery_state() -> DiscoveryState {
    let state = DiscoveryState::default();
    state.sockets.set(Vec::new());
    state.reachable.set(Vec::new());
    state.env_vars.set(Vec::new());
    state
}
