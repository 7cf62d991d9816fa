//! Canonical job outcome.

use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::payload::JobPayload;

/// Completion percentage reported by the service, clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const DONE: Progress = Progress(100);

    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    /// Clamp a raw numeric status into a percentage.
    pub fn from_raw(value: f64) -> Self {
        if value.is_nan() {
            return Self(0);
        }
        Self(value.clamp(0.0, 100.0).floor() as u8)
    }

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for Progress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Classification of a job derived from one status response (or from the
/// poll loop giving up).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    /// Still running.
    Pending { progress: Option<Progress> },
    /// Terminal success.
    Completed { payload: JobPayload },
    /// Terminal failure reported by the service.
    Failed { reason: String },
    /// The deadline passed without a terminal signal. The job may still
    /// finish on the service side.
    TimedOut { last_progress: Option<Progress> },
    /// A status query failed at the transport level and retries were
    /// aborted or exhausted.
    TransientError { cause: TransportError },
}

impl Outcome {
    pub fn pending() -> Self {
        Outcome::Pending { progress: None }
    }

    /// `Completed`, `Failed` and `TimedOut` end polling for good.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Outcome::Completed { .. } | Outcome::Failed { .. } | Outcome::TimedOut { .. }
        )
    }

    pub fn progress(&self) -> Option<Progress> {
        match self {
            Outcome::Pending { progress } => *progress,
            Outcome::TimedOut { last_progress } => *last_progress,
            Outcome::Completed { .. } => Some(Progress::DONE),
            Outcome::Failed { .. } | Outcome::TransientError { .. } => None,
        }
    }
}

// Diagnostics only: a transport error serializes as its display text.
impl Serialize for TransportError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ContentResult;

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Progress::from_raw(-4.0).percent(), 0);
        assert_eq!(Progress::from_raw(42.7).percent(), 42);
        assert_eq!(Progress::from_raw(250.0), Progress::DONE);
        assert_eq!(Progress::new(180).percent(), 100);
    }

    #[test]
    fn only_completed_failed_and_timed_out_are_terminal() {
        let completed = Outcome::Completed {
            payload: JobPayload::Content(ContentResult::text("done")),
        };
        assert!(completed.is_terminal());
        assert!(Outcome::Failed { reason: "x".into() }.is_terminal());
        assert!(Outcome::TimedOut { last_progress: None }.is_terminal());

        assert!(!Outcome::pending().is_terminal());
        assert!(
            !Outcome::TransientError {
                cause: TransportError::Timeout
            }
            .is_terminal()
        );
    }

    #[test]
    fn outcomes_serialize_with_a_state_tag() {
        let json = serde_json::to_value(Outcome::TimedOut {
            last_progress: Some(Progress::new(40)),
        })
        .unwrap();
        assert_eq!(json["state"], "timed_out");
        assert_eq!(json["last_progress"], 40);
    }
}
