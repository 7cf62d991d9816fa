//! The unit of asynchronous work and the record of one status query.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::JobId;
use crate::kind::JobKind;

/// A submitted job tracked by its service-assigned identifier.
///
/// `submitted_at` and `deadline` are fixed at construction; the deadline is
/// never extended, whatever progress the service reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    kind: JobKind,
    submitted_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
}

impl Job {
    /// Create a job submitted now.
    pub fn new(id: JobId, kind: JobKind, timeout: Duration) -> Self {
        Self::from_submission(id, kind, Utc::now(), timeout)
    }

    /// Create a job with an explicit submission time (e.g. restored from
    /// storage by a caller).
    pub fn from_submission(
        id: JobId,
        kind: JobKind,
        submitted_at: DateTime<Utc>,
        timeout: Duration,
    ) -> Self {
        let timeout = chrono::Duration::from_std(timeout).unwrap_or(chrono::Duration::MAX);
        let deadline = submitted_at
            .checked_add_signed(timeout)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            id,
            kind,
            submitted_at,
            deadline,
        }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Span between submission and deadline.
    pub fn timeout(&self) -> Duration {
        (self.deadline - self.submitted_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Time left until the deadline as seen at `now` (zero once overdue).
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }
}

/// One status query against a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollAttempt {
    /// Starts at 0 and increases by one per query; never reset for a job.
    pub attempt: u32,
    /// Decoded service payload; its shape varies by job kind.
    pub raw: serde_json::Value,
    pub observed_at: DateTime<Utc>,
}

impl PollAttempt {
    pub fn new(attempt: u32, raw: serde_json::Value) -> Self {
        Self {
            attempt,
            raw,
            observed_at: Utc::now(),
        }
    }
}
