//! Assertion helpers for discovery behavioural tests.

use rstest_bdd_macros::then;

use super::StepResult;
use super::state::{DiscoveryOutcome, DiscoveryState};

fn outcome(discovery_state: &DiscoveryState) -> StepResult<DiscoveryOutcome> {
    discovery_state
        .outcome
        .get()
        .ok_or_else(|| String::from("discovery outcome should be set"))
}

fn found(discovery_state: &DiscoveryState) -> StepResult<(String, String, Option<String>)> {
    match outcome(discovery_state)? {
        DiscoveryOutcome::Found {
            description,
            uri,
            host,
        } => Ok((description, uri, host)),
        DiscoveryOutcome::Failed { message, .. } => {
            Err(format!("expected discovery to succeed, got: {message}"))
        }
    }
}

#[then("the {name} strategy is selected")]
fn strategy_is_selected(discovery_state: &DiscoveryState, name: String) -> StepResult<()> {
    let (description, _, _) = found(discovery_state)?;
    if description.starts_with(&format!("{name} socket")) {
        Ok(())
    } else {
        Err(format!("expected the {name} strategy, got: {description}"))
    }
}

#[then("the selected strategy reads the environment")]
fn selected_strategy_reads_environment(discovery_state: &DiscoveryState) -> StepResult<()> {
    let (description, _, _) = found(discovery_state)?;
    if description.starts_with("Environment variables and defaults.") {
        Ok(())
    } else {
        Err(format!("expected the environment strategy, got: {description}"))
    }
}

#[then("the selected endpoint is {uri}")]
fn selected_endpoint_is(discovery_state: &DiscoveryState, uri: String) -> StepResult<()> {
    let (_, actual, _) = found(discovery_state)?;
    if actual == uri {
        Ok(())
    } else {
        Err(format!("expected endpoint {uri}, got {actual}"))
    }
}

#[then("the reported host is {host}")]
fn reported_host_is(discovery_state: &DiscoveryState, host: String) -> StepResult<()> {
    let (_, _, actual) = found(discovery_state)?;
    if actual.as_deref() == Some(host.as_str()) {
        Ok(())
    } else {
        Err(format!("expected host {host}, got {actual:?}"))
    }
}

#[then("no host address is reported")]
fn no_host_address_reported(discovery_state: &DiscoveryState) -> StepResult<()> {
    let (_, _, actual) = found(discovery_state)?;
    match actual {
        None => Ok(()),
        Some(host) => Err(format!("expected no host, got {host}")),
    }
}

#[then("discovery fails after {count} attempts")]
fn discovery_fails_after(discovery_state: &DiscoveryState, count: usize) -> StepResult<()> {
    match outcome(discovery_state)? {
        DiscoveryOutcome::Failed { attempts, .. } if attempts == count => Ok(()),
        DiscoveryOutcome::Failed { attempts, .. } => {
            Err(format!("expected {count} attempts, got {attempts}"))
        }
        DiscoveryOutcome::Found { description, .. } => {
            Err(format!("expected discovery to fail, but {description} succeeded"))
        }
    }
}

#[then("the failure message mentions {text}")]
fn failure_message_mentions(discovery_state: &DiscoveryState, text: String) -> StepResult<()> {
    match outcome(discovery_state)? {
        DiscoveryOutcome::Failed { message, .. } if message.contains(&text) => Ok(()),
        DiscoveryOutcome::Failed { message, .. } => {
            Err(format!("expected failure message to mention '{text}', got:\n{message}"))
        }
        DiscoveryOutcome::Found { description, .. } => {
            Err(format!("expected discovery to fail, but {description} succeeded"))
        }
    }
}

#[then("the engine at {uri} was never probed")]
fn engine_never_probed(discovery_state: &DiscoveryState, uri: String) -> StepResult<()> {
    let probed = discovery_state.probed.get().unwrap_or_default();
    if probed.contains(&uri) {
        Err(format!("expected {uri} not to be probed, probe log: {probed:?}"))
    } else {
        Ok(())
    }
}
