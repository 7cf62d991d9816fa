//! `autocontent-core`: building blocks for remote content-generation jobs.
//!
//! This crate contains **pure** types and functions (no I/O, no async runtime):
//! job identity and kinds, request parameters and their validation, the
//! canonical [`Outcome`] a status response normalizes to, and the
//! [`BackoffPolicy`] that governs retries between failed attempts.

pub mod backoff;
pub mod catalog;
pub mod error;
pub mod id;
pub mod job;
pub mod kind;
pub mod normalize;
pub mod outcome;
pub mod payload;
pub mod request;
pub mod status;

pub use backoff::{BackoffMode, BackoffPolicy, RetryDecision};
pub use catalog::{
    Avatar, CatalogDecodeError, Voice, VoiceGender, decode_avatars, decode_voices, default_voices,
};
pub use error::{ErrorClass, TransportError, ValidationError};
pub use id::JobId;
pub use job::{Job, PollAttempt};
pub use kind::{JobKind, PollSchedule, SubmitEndpoint};
pub use normalize::normalize;
pub use outcome::{Outcome, Progress};
pub use payload::{ClonedVoice, ContentResult, JobPayload, SeparationResult, VideoResult};
pub use request::{
    AudioSample, AvatarGender, ContentRequest, JobRequest, OutputType, PodcastCustomVoicesRequest,
    PodcastScriptRequest, Resource, ResourceType, ShortVideoRequest, SpeakerSeparationRequest,
    VoiceCloneRequest,
};
pub use status::{RawStatus, StatusField, service_message};
