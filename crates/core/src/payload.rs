//! Kind-specific result payloads carried by a completed job.

use serde::{Deserialize, Serialize};

use crate::kind::JobKind;

/// Generated study material or podcast.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentResult {
    /// Generated text; empty when the service delivered only audio.
    pub content: String,
    pub audio_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl ContentResult {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

/// A voice produced by cloning an uploaded sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClonedVoice {
    pub voice_id: Option<String>,
    pub name: Option<String>,
    pub language: String,
    pub gender: String,
    pub accent: String,
    pub preview_url: Option<String>,
    pub source_audio: Option<String>,
}

impl Default for ClonedVoice {
    fn default() -> Self {
        Self {
            voice_id: None,
            name: None,
            language: "en-US".to_string(),
            gender: "unknown".to_string(),
            accent: "neutral".to_string(),
            preview_url: None,
            source_audio: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeparationResult {
    pub audio_url: Option<String>,
    /// Per-speaker track URLs, when the service lists them.
    pub tracks: Vec<String>,
}

/// Result of a completed job, tagged by the kind that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum JobPayload {
    #[serde(rename = "content-creation")]
    Content(ContentResult),
    #[serde(rename = "voice-clone")]
    Voice(ClonedVoice),
    #[serde(rename = "short-video")]
    Video(VideoResult),
    #[serde(rename = "speaker-separation")]
    SeparatedAudio(SeparationResult),
}

impl JobPayload {
    pub fn kind(&self) -> JobKind {
        match self {
            JobPayload::Content(_) => JobKind::ContentCreation,
            JobPayload::Voice(_) => JobKind::VoiceClone,
            JobPayload::Video(_) => JobKind::ShortVideo,
            JobPayload::SeparatedAudio(_) => JobKind::SpeakerSeparation,
        }
    }

    /// The headline value: generated text, or the produced media URL.
    pub fn primary(&self) -> Option<&str> {
        match self {
            JobPayload::Content(c) if !c.content.is_empty() => Some(&c.content),
            JobPayload::Content(c) => c.audio_url.as_deref(),
            JobPayload::Voice(v) => v.voice_id.as_deref(),
            JobPayload::Video(v) => v.video_url.as_deref(),
            JobPayload::SeparatedAudio(s) => s.audio_url.as_deref(),
        }
    }
}
