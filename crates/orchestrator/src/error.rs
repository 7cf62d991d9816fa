//! Caller-facing failures.

use thiserror::Error;

use autocontent_client::ConfigError;
use autocontent_core::{
    CatalogDecodeError, JobId, JobKind, Progress, TransportError, ValidationError,
};

/// Failure to create a job. Never retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// No usable response arrived.
    #[error("{kind} submission failed: {source}")]
    Transport {
        kind: JobKind,
        #[source]
        source: TransportError,
    },

    /// The service answered with an error.
    #[error("{kind} submission rejected (HTTP {status}): {message}")]
    Rejected {
        kind: JobKind,
        status: u16,
        message: String,
    },

    /// The service accepted the job but returned nothing to track it by.
    #[error("{kind} submission response carried no request id")]
    MissingRequestId { kind: JobKind },
}

/// Result of a job that did not complete.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("invalid request: {0}")]
    Validation(ValidationError),

    #[error(transparent)]
    Submission(SubmissionError),

    /// The service reported the job as failed.
    #[error("job {id} failed: {reason}")]
    Failed { id: JobId, reason: String },

    /// Gave up waiting; the job may still finish on the service side.
    #[error("job {id} is still processing; stopped waiting at its deadline")]
    TimedOut {
        id: JobId,
        last_progress: Option<Progress>,
    },

    /// Status queries kept failing at the transport level.
    #[error("status polling for job {id} gave up after {attempts} attempts: {cause}")]
    PollFailed {
        id: JobId,
        attempts: u32,
        #[source]
        cause: TransportError,
    },

    #[error("job {0} is already being polled")]
    AlreadyPolling(JobId),

    #[error("polling for job {0} was cancelled")]
    Cancelled(JobId),

    /// The token was already cancelled; nothing was sent.
    #[error("{kind} job was cancelled before submission")]
    CancelledBeforeSubmission { kind: JobKind },

    /// A cancelled job's id was used again.
    #[error("job {0} was cancelled and can no longer be polled")]
    Inert(JobId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<SubmissionError> for JobError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Invalid(e) => JobError::Validation(e),
            other => JobError::Submission(other),
        }
    }
}

impl From<ValidationError> for JobError {
    fn from(err: ValidationError) -> Self {
        JobError::Validation(err)
    }
}

impl JobError {
    /// The job may still complete in the background.
    pub fn is_still_processing(&self) -> bool {
        matches!(self, JobError::TimedOut { .. })
    }

    /// Resubmitting the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            JobError::Failed { .. } | JobError::PollFailed { .. } => true,
            JobError::Submission(SubmissionError::Transport { .. }) => true,
            JobError::Submission(SubmissionError::Rejected { status, .. }) => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status of the service answer behind this error, if there was one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            JobError::Submission(SubmissionError::Rejected { status, .. }) => Some(*status),
            JobError::Submission(SubmissionError::Transport { source, .. }) => source.status(),
            JobError::PollFailed { cause, .. } => cause.status(),
            _ => None,
        }
    }

    /// The job this error concerns, once one exists.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            JobError::Failed { id, .. }
            | JobError::TimedOut { id, .. }
            | JobError::PollFailed { id, .. }
            | JobError::AlreadyPolling(id)
            | JobError::Cancelled(id)
            | JobError::Inert(id) => Some(id),
            _ => None,
        }
    }
}

/// Failure to read a catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable in offline mode")]
    Offline,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] CatalogDecodeError),
}
