//! Kind-specific decoders for status responses.
//!
//! Each job kind has its own declared response schema. Every field is
//! optional and decoded leniently: a field with an unexpected JSON type is
//! treated as absent instead of failing the whole response. Only a response
//! that is not a JSON object at all fails to decode.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::kind::JobKind;
use crate::payload::{ClonedVoice, ContentResult, JobPayload, SeparationResult, VideoResult};

/// The `status` field, which the service reports either as a percentage or
/// as a label.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusField {
    Percent(f64),
    Label(String),
}

impl StatusField {
    pub fn percent(&self) -> Option<f64> {
        match self {
            StatusField::Percent(p) => Some(*p),
            StatusField::Label(_) => None,
        }
    }

    pub fn is_label(&self, label: &str) -> bool {
        matches!(self, StatusField::Label(l) if l.trim().eq_ignore_ascii_case(label))
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<StatusField>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().map(StatusField::Percent),
        Some(Value::String(s)) => Some(StatusField::Label(s)),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Error fields shared by every status schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_message: Option<String>,
}

impl ErrorFields {
    pub fn message(&self) -> Option<&str> {
        [self.error.as_deref(), self.error_message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|m| !m.is_empty())
    }
}

/// Uniform view over a kind-specific status response.
pub trait StatusShape {
    fn status(&self) -> Option<&StatusField>;

    /// Whether the kind's result field is present and non-empty.
    fn has_result(&self) -> bool;

    fn error_message(&self) -> Option<&str>;

    fn into_payload(self) -> JobPayload;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentStatus {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<StatusField>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub errors: ErrorFields,
}

impl StatusShape for ContentStatus {
    fn status(&self) -> Option<&StatusField> {
        self.status.as_ref()
    }

    fn has_result(&self) -> bool {
        non_empty(&self.content) || non_empty(&self.audio_url)
    }

    fn error_message(&self) -> Option<&str> {
        self.errors.message()
    }

    fn into_payload(self) -> JobPayload {
        JobPayload::Content(ContentResult {
            content: self.content.unwrap_or_default(),
            audio_url: self.audio_url.filter(|u| !u.trim().is_empty()),
            metadata: self.metadata.filter(|m| !m.is_null()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VoiceCloneStatus {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<StatusField>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub voice_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub accent: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_audio: Option<String>,
    #[serde(flatten)]
    pub errors: ErrorFields,
}

impl StatusShape for VoiceCloneStatus {
    fn status(&self) -> Option<&StatusField> {
        self.status.as_ref()
    }

    fn has_result(&self) -> bool {
        non_empty(&self.voice_id)
    }

    fn error_message(&self) -> Option<&str> {
        self.errors.message()
    }

    fn into_payload(self) -> JobPayload {
        let defaults = ClonedVoice::default();
        JobPayload::Voice(ClonedVoice {
            voice_id: self.voice_id,
            name: self.name,
            language: self.language.unwrap_or(defaults.language),
            gender: self.gender.unwrap_or(defaults.gender),
            accent: self.accent.unwrap_or(defaults.accent),
            preview_url: self.preview_url,
            source_audio: self.source_audio,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShortVideoStatus {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<StatusField>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub video_url: Option<String>,
    #[serde(flatten)]
    pub errors: ErrorFields,
}

impl StatusShape for ShortVideoStatus {
    fn status(&self) -> Option<&StatusField> {
        self.status.as_ref()
    }

    fn has_result(&self) -> bool {
        non_empty(&self.video_url)
    }

    fn error_message(&self) -> Option<&str> {
        self.errors.message()
    }

    fn into_payload(self) -> JobPayload {
        JobPayload::Video(VideoResult {
            video_url: self.video_url.filter(|u| !u.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeparationStatus {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<StatusField>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub audio_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tracks: Vec<String>,
    #[serde(flatten)]
    pub errors: ErrorFields,
}

impl StatusShape for SeparationStatus {
    fn status(&self) -> Option<&StatusField> {
        self.status.as_ref()
    }

    fn has_result(&self) -> bool {
        non_empty(&self.audio_url)
    }

    fn error_message(&self) -> Option<&str> {
        self.errors.message()
    }

    fn into_payload(self) -> JobPayload {
        JobPayload::SeparatedAudio(SeparationResult {
            audio_url: self.audio_url.filter(|u| !u.trim().is_empty()),
            tracks: self.tracks,
        })
    }
}

/// A status response decoded against its kind's schema.
#[derive(Debug, Clone, PartialEq)]
pub enum RawStatus {
    Content(ContentStatus),
    VoiceClone(VoiceCloneStatus),
    ShortVideo(ShortVideoStatus),
    SpeakerSeparation(SeparationStatus),
}

impl RawStatus {
    /// Decode `raw` with the schema `kind` declares.
    pub fn decode(kind: JobKind, raw: &Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            JobKind::ContentCreation => RawStatus::Content(ContentStatus::deserialize(raw)?),
            JobKind::VoiceClone => RawStatus::VoiceClone(VoiceCloneStatus::deserialize(raw)?),
            JobKind::ShortVideo => RawStatus::ShortVideo(ShortVideoStatus::deserialize(raw)?),
            JobKind::SpeakerSeparation => {
                RawStatus::SpeakerSeparation(SeparationStatus::deserialize(raw)?)
            }
        })
    }
}

/// Extract a service-supplied error message from a response body, if any.
///
/// Looks for `error`, then `error_message`, then `message` in a JSON object
/// body.
pub fn service_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "error_message", "message"]
        .into_iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}
