//! Scripted engine probe for discovery scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use dockfinder::engine::{EngineConfiguration, EngineProbe};
use dockfinder::error::ProbeError;

/// Probe that answers only for a fixed set of URIs and records every call.
pub(crate) struct ScriptedProbe {
    reachable: Vec<String>,
    probed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProbe {
    pub(crate) const fn new(reachable: Vec<String>, probed: Arc<Mutex<Vec<String>>>) -> Self {
        Self { reachable, probed }
    }
}

impl EngineProbe for ScriptedProbe {
    fn ping(&self, configuration: &EngineConfiguration) -> Result<(), ProbeError> {
        let uri = configuration.uri().to_owned();
        self.probed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uri.clone());

        if self.reachable.contains(&uri) {
            Ok(())
        } else {
            Err(ProbeError::ConnectionFailed {
                message: format!("nothing listening at {uri}"),
            })
        }
    }
}
