//! Structured reporting for discovery events.

use std::error::Error as _;
use std::sync::Arc;

use crate::engine::{EngineConfiguration, FailureLedger};
use crate::error::ConfigurationInvalid;

/// Observer trait used to surface discovery events to telemetry sinks.
pub trait DiscoveryReporter: Send + Sync {
    /// Invoked before a strategy is asked for a configuration.
    fn attempt_starting(&self, description: &str);

    /// Invoked when a strategy fails; discovery continues with the next one.
    fn attempt_failed(&self, description: &str, error: &ConfigurationInvalid);

    /// Invoked once, when a strategy produced a validated configuration.
    fn discovery_succeeded(&self, description: &str, configuration: &EngineConfiguration);

    /// Invoked once, when every strategy has failed.
    fn discovery_failed(&self, ledger: &FailureLedger);
}

impl<T> DiscoveryReporter for Arc<T>
where
    T: DiscoveryReporter,
{
    fn attempt_starting(&self, description: &str) {
        (**self).attempt_starting(description);
    }

    fn attempt_failed(&self, description: &str, error: &ConfigurationInvalid) {
        (**self).attempt_failed(description, error);
    }

    fn discovery_succeeded(&self, description: &str, configuration: &EngineConfiguration) {
        (**self).discovery_succeeded(description, configuration);
    }

    fn discovery_failed(&self, ledger: &FailureLedger) {
        (**self).discovery_failed(ledger);
    }
}

/// Default reporter that records discovery events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiscoveryReporter;

impl TracingDiscoveryReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Render an error and the causes beneath it as `a: b: c`.
///
/// A cause already spelled out at the end of its parent's message is not
/// repeated.
fn error_chain(error: &ConfigurationInvalid) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        let message = cause.to_string();
        if !rendered.ends_with(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        current = cause.source();
    }
    rendered
}

impl DiscoveryReporter for TracingDiscoveryReporter {
    fn attempt_starting(&self, description: &str) {
        tracing::info!(
            target: "dockfinder::discovery",
            event = "attempt_starting",
            strategy = %description,
            "trying container engine configuration"
        );
    }

    fn attempt_failed(&self, description: &str, error: &ConfigurationInvalid) {
        tracing::debug!(
            target: "dockfinder::discovery",
            event = "attempt_failed",
            strategy = %description,
            error = %error_chain(error),
            "container engine configuration rejected"
        );
    }

    fn discovery_succeeded(&self, description: &str, configuration: &EngineConfiguration) {
        tracing::info!(
            target: "dockfinder::discovery",
            event = "discovery_succeeded",
            strategy = %description,
            uri = %configuration.uri(),
            "found valid container engine configuration"
        );
    }

    fn discovery_failed(&self, ledger: &FailureLedger) {
        tracing::error!(
            target: "dockfinder::discovery",
            event = "discovery_failed",
            attempts = ledger.len(),
            "could not find a valid container engine environment; attempted configurations were:"
        );
        for record in ledger.iter() {
            tracing::error!(
                target: "dockfinder::discovery",
                event = "discovery_failed",
                strategy = %record.description(),
                error = %record.error(),
                "configuration failed"
            );
        }
        tracing::error!(
            target: "dockfinder::discovery",
            event = "discovery_failed",
            "as no valid configuration was found, execution cannot continue"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::error::ProbeError;

    /// Log sink shared between the subscriber and the assertions.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().expect("log buffer lock").clone();
            String::from_utf8(bytes)
                .expect("log output should be UTF-8")
                .lines()
                .map(str::to_owned)
                .collect()
        }

        fn line_for(&self, event: &str) -> String {
            let marker = format!("event=\"{event}\"");
            self.lines()
                .into_iter()
                .find(|line| line.contains(&marker))
                .unwrap_or_else(|| panic!("no log line for {event}"))
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(level: tracing::Level, emit: impl FnOnce()) -> CapturedLog {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(level)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        log
    }

    #[rstest]
    fn attempts_are_announced_at_info_and_failures_detailed_at_debug() {
        let reporter = TracingDiscoveryReporter::new();
        let error = ConfigurationInvalid::ProbeFailed {
            uri: String::from("unix:///var/run/docker.sock"),
            source: ProbeError::PingTimeout { seconds: 10 },
        };

        let log = capture(tracing::Level::TRACE, || {
            reporter.attempt_starting("local Unix socket (unix:///var/run/docker.sock)");
            reporter.attempt_failed("local Unix socket (unix:///var/run/docker.sock)", &error);
        });

        let starting = log.line_for("attempt_starting");
        assert!(starting.contains("INFO"), "unexpected level: {starting}");
        assert!(starting.contains("local Unix socket"));
        let failed = log.line_for("attempt_failed");
        assert!(failed.contains("DEBUG"), "unexpected level: {failed}");
        assert!(failed.contains("timed out after 10 seconds"));
    }

    #[rstest]
    fn info_filter_shows_attempts_but_not_failure_detail() {
        let reporter = TracingDiscoveryReporter::new();
        let error = ConfigurationInvalid::MalformedHost {
            host: String::from("http://"),
            source: url::ParseError::EmptyHost,
        };
        let log = capture(tracing::Level::INFO, || {
            reporter.attempt_starting("configured socket (http://)");
            reporter.attempt_failed("configured socket (http://)", &error);
        });

        let lines = log.lines();
        assert!(lines.iter().any(|line| line.contains("attempt_starting")));
        assert!(!lines.iter().any(|line| line.contains("attempt_failed")));
    }

    #[rstest]
    fn error_chain_does_not_repeat_embedded_cause() {
        let error = ConfigurationInvalid::ProbeFailed {
            uri: String::from("tcp://10.0.0.5:2375"),
            source: ProbeError::PingTimeout { seconds: 10 },
        };
        assert_eq!(
            error_chain(&error),
            "ping failed: container engine ping timed out after 10 seconds"
        );
    }

    #[rstest]
    fn tracing_reporter_accepts_events_without_subscriber() {
        let reporter = Arc::new(TracingDiscoveryReporter::new());
        let configuration = EngineConfiguration::from_host("unix:///var/run/docker.sock")
            .expect("host should parse");

        reporter.attempt_starting("local Unix socket");
        reporter.discovery_succeeded("local Unix socket", &configuration);
        reporter.discovery_failed(&FailureLedger::default());
    }
}
