//! Job kinds and their polling schedules.

use core::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Class of remote job. Selects the submission and status endpoints and the
/// shape of the expected status payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    ContentCreation,
    VoiceClone,
    ShortVideo,
    SpeakerSeparation,
}

impl JobKind {
    pub const ALL: [JobKind; 4] = [
        JobKind::ContentCreation,
        JobKind::VoiceClone,
        JobKind::ShortVideo,
        JobKind::SpeakerSeparation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::ContentCreation => "content-creation",
            JobKind::VoiceClone => "voice-clone",
            JobKind::ShortVideo => "short-video",
            JobKind::SpeakerSeparation => "speaker-separation",
        }
    }

    /// Numeric status value that signals completion on percentage-style
    /// status endpoints.
    pub fn completion_sentinel(&self) -> u8 {
        100
    }

    /// Default fixed poll interval and deadline for this kind.
    pub fn default_schedule(&self) -> PollSchedule {
        match self {
            JobKind::ContentCreation => {
                PollSchedule::new(Duration::from_secs(2), Duration::from_secs(5 * 60))
            }
            JobKind::VoiceClone => {
                PollSchedule::new(Duration::from_secs(10), Duration::from_secs(5 * 60))
            }
            JobKind::ShortVideo => {
                PollSchedule::new(Duration::from_secs(10), Duration::from_secs(10 * 60))
            }
            JobKind::SpeakerSeparation => {
                PollSchedule::new(Duration::from_secs(5), Duration::from_secs(3 * 60))
            }
        }
    }
}

impl core::fmt::Display for JobKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::invalid("kind", format!("unknown job kind `{s}`")))
    }
}

/// Creation endpoint a submission is posted to.
///
/// Several endpoints can start jobs of the same [`JobKind`]; the job is then
/// polled and decoded the way its kind is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitEndpoint {
    CreateContent,
    PodcastCustomVoices,
    PodcastCustomScript,
    CloneVoice,
    CreateShort,
    SeparateSpeakers,
}

impl SubmitEndpoint {
    pub const ALL: [SubmitEndpoint; 6] = [
        SubmitEndpoint::CreateContent,
        SubmitEndpoint::PodcastCustomVoices,
        SubmitEndpoint::PodcastCustomScript,
        SubmitEndpoint::CloneVoice,
        SubmitEndpoint::CreateShort,
        SubmitEndpoint::SeparateSpeakers,
    ];

    /// Kind of the job this endpoint creates.
    pub fn kind(&self) -> JobKind {
        match self {
            SubmitEndpoint::CreateContent
            | SubmitEndpoint::PodcastCustomVoices
            | SubmitEndpoint::PodcastCustomScript => JobKind::ContentCreation,
            SubmitEndpoint::CloneVoice => JobKind::VoiceClone,
            SubmitEndpoint::CreateShort => JobKind::ShortVideo,
            SubmitEndpoint::SeparateSpeakers => JobKind::SpeakerSeparation,
        }
    }
}

/// How often a kind is polled and how long it may run before the poller
/// gives up waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSchedule {
    /// Fixed delay between status queries while the job is pending.
    pub interval: Duration,
    /// Measured from submission; never extended.
    pub timeout: Duration,
}

impl PollSchedule {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}
