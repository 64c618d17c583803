use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

use crate::quiz::Answers;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("host shell is unavailable: {0}")]
    Unavailable(String),

    #[error("host shell rejected the call: {0}")]
    Rejected(String),
}

/// Optional container hosting the quiz (e.g. a chat mini-app).
pub trait HostShell: Send + Sync {
    fn ready(&self) -> Result<(), ShellError>;

    fn expand(&self) -> Result<(), ShellError>;

    fn send_data(&self, data: &str) -> Result<(), ShellError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResultKind {
    #[serde(rename = "quizResult")]
    QuizResult,
}

/// Payload handed to the host once a session is finished.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizResult {
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
    pub answers: Answers,
}

/// Best-effort bridge to the host shell. Every call is swallowed on failure.
#[derive(Clone, Default)]
pub struct Reporter {
    shell: Option<Arc<dyn HostShell>>,
}

impl Reporter {
    pub fn new(shell: Option<Arc<dyn HostShell>>) -> Self {
        Self { shell }
    }

    pub fn detached() -> Self {
        Self { shell: None }
    }

    pub fn has_shell(&self) -> bool {
        self.shell.is_some()
    }

    pub fn announce_start(&self) {
        let Some(shell) = &self.shell else {
            return;
        };
        if let Err(err) = shell.ready().and_then(|_| shell.expand()) {
            warn!("Host shell failed to start: {}", err);
        }
    }

    pub fn report(&self, result: &QuizResult) {
        let Some(shell) = &self.shell else {
            debug!("No host shell, dropping quiz result");
            return;
        };

        let payload = match serde_json::to_string(result) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Failed to serialize quiz result: {}", err);
                return;
            }
        };

        if let Err(err) = shell.send_data(&payload) {
            warn!("Failed to report quiz result: {}", err);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingShell {
        pub calls: Mutex<Vec<String>>,
        pub payloads: Mutex<Vec<String>>,
    }

    impl HostShell for RecordingShell {
        fn ready(&self) -> Result<(), ShellError> {
            self.calls.lock().unwrap().push("ready".to_string());
            Ok(())
        }

        fn expand(&self) -> Result<(), ShellError> {
            self.calls.lock().unwrap().push("expand".to_string());
            Ok(())
        }

        fn send_data(&self, data: &str) -> Result<(), ShellError> {
            self.payloads.lock().unwrap().push(data.to_string());
            Ok(())
        }
    }

    pub struct FailingShell;

    impl HostShell for FailingShell {
        fn ready(&self) -> Result<(), ShellError> {
            Err(ShellError::Unavailable("gone".to_string()))
        }

        fn expand(&self) -> Result<(), ShellError> {
            Err(ShellError::Unavailable("gone".to_string()))
        }

        fn send_data(&self, _data: &str) -> Result<(), ShellError> {
            Err(ShellError::Rejected("no".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{FailingShell, RecordingShell};
    use super::*;

    fn result() -> QuizResult {
        let mut answers = Answers::new();
        answers.insert(1, "1a".to_string());
        answers.insert(12, "12c".to_string());
        QuizResult {
            kind: ResultKind::QuizResult,
            correct: 1,
            total: 2,
            passed: false,
            answers,
        }
    }

    #[test]
    fn payload_matches_wire_format() {
        let value: serde_json::Value = serde_json::to_value(result()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "quizResult",
                "correct": 1,
                "total": 2,
                "passed": false,
                "answers": { "1": "1a", "12": "12c" }
            })
        );
    }

    #[test]
    fn report_sends_serialized_result() {
        let shell = Arc::new(RecordingShell::default());
        let reporter = Reporter::new(Some(shell.clone()));
        reporter.report(&result());

        let payloads = shell.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        let parsed: QuizResult = serde_json::from_str(&payloads[0]).unwrap();
        assert_eq!(parsed, result());
    }

    #[test]
    fn announce_start_calls_ready_then_expand() {
        let shell = Arc::new(RecordingShell::default());
        Reporter::new(Some(shell.clone())).announce_start();
        assert_eq!(*shell.calls.lock().unwrap(), vec!["ready", "expand"]);
    }

    #[test]
    fn missing_or_failing_shell_is_silent() {
        Reporter::detached().announce_start();
        Reporter::detached().report(&result());

        let failing = Reporter::new(Some(Arc::new(FailingShell)));
        assert!(failing.has_shell());
        failing.announce_start();
        failing.report(&result());
    }
}
