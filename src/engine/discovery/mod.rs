//! Discovery orchestration.
//!
//! [`discover`] walks an ordered list of strategies and returns the first
//! configuration that answers a ping. Failures are collected in a
//! [`FailureLedger`] and only surface if every strategy fails, as
//! [`DiscoveryError::NoValidConfigurationFound`].
//!
//! Discovery is sequential: a strategy runs only after the previous one has
//! returned, and nothing after the first success is invoked.

use std::fmt;

use crate::engine::{ConfigurationStrategy, DiscoveryReporter, EngineConfiguration};
use crate::error::{ConfigurationInvalid, DiscoveryError};

/// One failed attempt: the strategy's description and why it failed.
#[derive(Debug)]
pub struct FailureRecord {
    description: String,
    error: ConfigurationInvalid,
}

impl FailureRecord {
    /// Description of the strategy that failed, captured at attempt time.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The failure reported by the strategy.
    #[must_use]
    pub const fn error(&self) -> &ConfigurationInvalid {
        &self.error
    }
}

/// Ordered record of failed attempts within one discovery run.
#[derive(Debug, Default)]
pub struct FailureLedger {
    records: Vec<FailureRecord>,
}

impl FailureLedger {
    /// Number of failed attempts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no attempt was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the failures in attempt order.
    pub fn iter(&self) -> std::slice::Iter<'_, FailureRecord> {
        self.records.iter()
    }

    fn push(&mut self, description: String, error: ConfigurationInvalid) {
        self.records.push(FailureRecord { description, error });
    }
}

impl<'a> IntoIterator for &'a FailureLedger {
    type Item = &'a FailureRecord;
    type IntoIter = std::slice::Iter<'a, FailureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for FailureLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return f.write_str(" none");
        }
        for record in &self.records {
            write!(f, "\n    {}: failed with: {}", record.description, record.error)?;
        }
        Ok(())
    }
}

/// The strategy that won and the configuration it validated.
pub struct DiscoveryResult<'a> {
    strategy: &'a dyn ConfigurationStrategy,
    configuration: EngineConfiguration,
}

impl<'a> DiscoveryResult<'a> {
    /// The strategy that produced the configuration.
    #[must_use]
    pub fn strategy(&self) -> &'a dyn ConfigurationStrategy {
        self.strategy
    }

    /// The validated configuration.
    #[must_use]
    pub const fn configuration(&self) -> &EngineConfiguration {
        &self.configuration
    }

    /// Consume the result, keeping only the configuration.
    #[must_use]
    pub fn into_configuration(self) -> EngineConfiguration {
        self.configuration
    }

    /// Externally reachable host address for the validated configuration.
    #[must_use]
    pub fn host_address(&self) -> Option<String> {
        resolve_host_address(self.strategy, &self.configuration)
    }
}

impl fmt::Debug for DiscoveryResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryResult")
            .field("strategy", &self.strategy.description())
            .field("configuration", &self.configuration)
            .finish()
    }
}

/// Find the first strategy whose configuration answers a ping.
///
/// Strategies are tried in slice order. The first success is returned
/// immediately; later strategies are never invoked.
///
/// # Errors
///
/// Returns [`DiscoveryError::NoValidConfigurationFound`] when every strategy
/// fails, or at once for an empty list. The ledger lists each failure in the
/// order it was attempted.
pub fn discover<'a, R>(
    strategies: &'a [Box<dyn ConfigurationStrategy>],
    reporter: &R,
) -> Result<DiscoveryResult<'a>, DiscoveryError>
where
    R: DiscoveryReporter + ?Sized,
{
    let mut ledger = FailureLedger::default();

    for strategy in strategies {
        let description = strategy.description();
        reporter.attempt_starting(&description);

        match strategy.provide_configuration() {
            Ok(configuration) => {
                reporter.discovery_succeeded(&description, &configuration);
                return Ok(DiscoveryResult {
                    strategy: &**strategy,
                    configuration,
                });
            }
            Err(error) => {
                reporter.attempt_failed(&description, &error);
                ledger.push(description, error);
            }
        }
    }

    reporter.discovery_failed(&ledger);
    Err(DiscoveryError::NoValidConfigurationFound { ledger })
}

/// Externally reachable host for `configuration`, as `strategy` sees it.
///
/// Returns `None` when the scheme has no meaningful host; that is not an
/// error.
#[must_use]
pub fn resolve_host_address(
    strategy: &dyn ConfigurationStrategy,
    configuration: &EngineConfiguration,
) -> Option<String> {
    strategy.resolve_host_address(configuration)
}
