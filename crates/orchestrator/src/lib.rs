//! `autocontent-orchestrator`: submits content-generation jobs and follows
//! them to an outcome.
//!
//! [`Orchestrator`] is the entry point: one awaitable operation per job kind,
//! built from a [`JobSubmitter`] and a [`StatusPoller`], with cancellation
//! tracked per job id in [`ActiveJobs`]. [`CatalogClient`] serves the voice
//! and avatar catalogs.

pub mod catalog;
pub mod error;
pub mod orchestrator;
pub mod poller;
pub mod registry;
pub mod submitter;

pub use catalog::{CatalogClient, VoiceFallback};
pub use error::{CatalogError, JobError, SubmissionError};
pub use orchestrator::{Completion, Orchestrator, OrchestratorSettings};
pub use poller::{Cancelled, PollReport, StatusPoller};
pub use registry::{ActiveJobs, DEFAULT_RETIRED_CAPACITY, PollGuard};
pub use submitter::{JobSubmitter, extract_request_id};
