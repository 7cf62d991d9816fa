//! Kind-specific submission parameters and their validation.
//!
//! Validation happens before anything is sent. Each request knows how to
//! render the JSON body its submission endpoint expects.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ValidationError;
use crate::kind::{JobKind, SubmitEndpoint};

/// Largest accepted voice sample (50 MiB).
pub const MAX_AUDIO_BYTES: u64 = 50 * 1024 * 1024;

const SEPARATION_EXTENSIONS: [&str; 2] = [".mp3", ".wav"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Website,
    Text,
    Youtube,
    Pdf,
}

/// One source document for content generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
}

impl Resource {
    pub fn website(url: impl Into<String>) -> Self {
        Self {
            content: url.into(),
            kind: ResourceType::Website,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            kind: ResourceType::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    StudyGuide,
    BriefingDoc,
    Faq,
    Timeline,
    Outline,
    DeepDive,
    Flashcards,
    #[default]
    Text,
    Audio,
}

impl OutputType {
    pub const ALL: [OutputType; 9] = [
        OutputType::StudyGuide,
        OutputType::BriefingDoc,
        OutputType::Faq,
        OutputType::Timeline,
        OutputType::Outline,
        OutputType::DeepDive,
        OutputType::Flashcards,
        OutputType::Text,
        OutputType::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::StudyGuide => "study_guide",
            OutputType::BriefingDoc => "briefing_doc",
            OutputType::Faq => "faq",
            OutputType::Timeline => "timeline",
            OutputType::Outline => "outline",
            OutputType::DeepDive => "deep_dive",
            OutputType::Flashcards => "flashcards",
            OutputType::Text => "text",
            OutputType::Audio => "audio",
        }
    }
}

impl FromStr for OutputType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        OutputType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                ValidationError::invalid("output_type", format!("unknown output type `{s}`"))
            })
    }
}

/// Study material or podcast generation from a set of sources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub output_type: OutputType,
    #[serde(default)]
    pub include_citations: bool,
    #[serde(default)]
    pub customization: Option<Value>,
}

impl ContentRequest {
    pub fn new(output_type: OutputType) -> Self {
        Self {
            output_type,
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let has_resources = self
            .resources
            .iter()
            .any(|r| !r.content.trim().is_empty());
        if self.text.trim().is_empty() && !has_resources {
            return Err(ValidationError::Missing("text or resources"));
        }
        match &self.customization {
            Some(customization) if !customization.is_object() => Err(ValidationError::invalid(
                "customization",
                "must be a JSON object",
            )),
            _ => Ok(()),
        }
    }

    fn body(&self) -> Value {
        let resources: Vec<&Resource> = self
            .resources
            .iter()
            .filter(|r| !r.content.trim().is_empty())
            .collect();
        let mut body = json!({
            "resources": resources,
            "text": self.text,
            "outputType": self.output_type.as_str(),
            "includeCitations": self.include_citations,
        });
        if let (Some(customization), Some(map)) = (&self.customization, body.as_object_mut()) {
            map.insert("customization".to_string(), customization.clone());
        }
        body
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

/// Two-host podcast generated from sources, narrated by chosen voices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodcastCustomVoicesRequest {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub text: String,
    pub voice1: String,
    pub voice2: String,
}

impl PodcastCustomVoicesRequest {
    pub fn new(voice1: impl Into<String>, voice2: impl Into<String>) -> Self {
        Self {
            voice1: voice1.into(),
            voice2: voice2.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.voice1, "voice1")?;
        require(&self.voice2, "voice2")?;
        let has_resources = self.resources.iter().any(|r| !r.content.trim().is_empty());
        if self.text.trim().is_empty() && !has_resources {
            return Err(ValidationError::Missing("text or resources"));
        }
        Ok(())
    }

    fn body(&self) -> Value {
        let resources: Vec<&Resource> = self
            .resources
            .iter()
            .filter(|r| !r.content.trim().is_empty())
            .collect();
        json!({
            "resources": resources,
            "text": self.text,
            "voice1": self.voice1.trim(),
            "voice2": self.voice2.trim(),
        })
    }
}

/// Podcast read from a finished script by two voices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastScriptRequest {
    pub script: String,
    pub voice1: String,
    pub voice2: String,
}

impl PodcastScriptRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.script, "script")?;
        require(&self.voice1, "voice1")?;
        require(&self.voice2, "voice2")
    }

    fn body(&self) -> Value {
        json!({
            "script": self.script,
            "voice1": self.voice1.trim(),
            "voice2": self.voice2.trim(),
        })
    }
}

/// An audio sample already uploaded to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSample {
    pub url: String,
    pub file_name: String,
    /// MIME type, e.g. `audio/mpeg`.
    pub media_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCloneRequest {
    pub name: String,
    pub sample: AudioSample,
}

impl VoiceCloneRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        if self.sample.url.trim().is_empty() {
            return Err(ValidationError::Missing("audio_url"));
        }
        let media_type = self.sample.media_type.trim();
        if !media_type.to_ascii_lowercase().starts_with("audio/") {
            return Err(ValidationError::UnsupportedMediaType(media_type.to_string()));
        }
        if self.sample.size_bytes == 0 {
            return Err(ValidationError::invalid("audio_file", "file is empty"));
        }
        if self.sample.size_bytes > MAX_AUDIO_BYTES {
            return Err(ValidationError::FileTooLarge {
                size: self.sample.size_bytes,
                max: MAX_AUDIO_BYTES,
            });
        }
        Ok(())
    }

    fn body(&self) -> Value {
        json!({
            "audioUrl": self.sample.url.trim(),
            "name": self.name.trim(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarGender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl AvatarGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvatarGender::Male => "M",
            AvatarGender::Female => "F",
        }
    }
}

impl FromStr for AvatarGender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(AvatarGender::Male),
            "f" | "female" => Ok(AvatarGender::Female),
            _ => Err(ValidationError::invalid(
                "avatar",
                format!("expected M or F, got `{s}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortVideoRequest {
    pub audio_url: String,
    #[serde(default)]
    pub prompt: String,
    pub avatar1: AvatarGender,
    pub avatar2: AvatarGender,
    #[serde(default)]
    pub callback_data: Option<String>,
}

impl ShortVideoRequest {
    /// Two-presenter short with the default male/female pairing.
    pub fn new(audio_url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            prompt: prompt.into(),
            avatar1: AvatarGender::Male,
            avatar2: AvatarGender::Female,
            callback_data: None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.audio_url.trim().is_empty() {
            return Err(ValidationError::Missing("audio_url"));
        }
        Ok(())
    }

    fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("audioUrl".into(), Value::from(self.audio_url.trim()));
        body.insert("prompt".into(), Value::from(self.prompt.as_str()));
        body.insert("avatar1".into(), Value::from(self.avatar1.as_str()));
        body.insert("avatar2".into(), Value::from(self.avatar2.as_str()));
        if let Some(callback) = &self.callback_data {
            body.insert("callbackData".into(), Value::from(callback.as_str()));
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerSeparationRequest {
    pub audio_url: String,
    #[serde(default)]
    pub callback_data: Option<String>,
}

impl SpeakerSeparationRequest {
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            callback_data: None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let url = self.audio_url.trim();
        if url.is_empty() {
            return Err(ValidationError::Missing("audio_url"));
        }
        let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
        if !SEPARATION_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            return Err(ValidationError::invalid(
                "audio_url",
                "must point to an .mp3 or .wav file",
            ));
        }
        Ok(())
    }

    fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("audio_url".into(), Value::from(self.audio_url.trim()));
        if let Some(callback) = &self.callback_data {
            body.insert("callback_data".into(), Value::from(callback.as_str()));
        }
        Value::Object(body)
    }
}

/// Parameters for one submission, tagged by job kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum JobRequest {
    ContentCreation(ContentRequest),
    PodcastCustomVoices(PodcastCustomVoicesRequest),
    PodcastScript(PodcastScriptRequest),
    VoiceClone(VoiceCloneRequest),
    ShortVideo(ShortVideoRequest),
    SpeakerSeparation(SpeakerSeparationRequest),
}

impl JobRequest {
    /// Podcasts are content jobs: same schedule, status route and decoder.
    pub fn kind(&self) -> JobKind {
        self.endpoint().kind()
    }

    pub fn endpoint(&self) -> SubmitEndpoint {
        match self {
            JobRequest::ContentCreation(_) => SubmitEndpoint::CreateContent,
            JobRequest::PodcastCustomVoices(_) => SubmitEndpoint::PodcastCustomVoices,
            JobRequest::PodcastScript(_) => SubmitEndpoint::PodcastCustomScript,
            JobRequest::VoiceClone(_) => SubmitEndpoint::CloneVoice,
            JobRequest::ShortVideo(_) => SubmitEndpoint::CreateShort,
            JobRequest::SpeakerSeparation(_) => SubmitEndpoint::SeparateSpeakers,
        }
    }

    /// Check the kind's required parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            JobRequest::ContentCreation(r) => r.validate(),
            JobRequest::PodcastCustomVoices(r) => r.validate(),
            JobRequest::PodcastScript(r) => r.validate(),
            JobRequest::VoiceClone(r) => r.validate(),
            JobRequest::ShortVideo(r) => r.validate(),
            JobRequest::SpeakerSeparation(r) => r.validate(),
        }
    }

    /// JSON body for [`JobRequest::endpoint`].
    pub fn body(&self) -> Value {
        match self {
            JobRequest::ContentCreation(r) => r.body(),
            JobRequest::PodcastCustomVoices(r) => r.body(),
            JobRequest::PodcastScript(r) => r.body(),
            JobRequest::VoiceClone(r) => r.body(),
            JobRequest::ShortVideo(r) => r.body(),
            JobRequest::SpeakerSeparation(r) => r.body(),
        }
    }
}

impl From<ContentRequest> for JobRequest {
    fn from(r: ContentRequest) -> Self {
        JobRequest::ContentCreation(r)
    }
}

impl From<PodcastCustomVoicesRequest> for JobRequest {
    fn from(r: PodcastCustomVoicesRequest) -> Self {
        JobRequest::PodcastCustomVoices(r)
    }
}

impl From<PodcastScriptRequest> for JobRequest {
    fn from(r: PodcastScriptRequest) -> Self {
        JobRequest::PodcastScript(r)
    }
}

impl From<VoiceCloneRequest> for JobRequest {
    fn from(r: VoiceCloneRequest) -> Self {
        JobRequest::VoiceClone(r)
    }
}

impl From<ShortVideoRequest> for JobRequest {
    fn from(r: ShortVideoRequest) -> Self {
        JobRequest::ShortVideo(r)
    }
}

impl From<SpeakerSeparationRequest> for JobRequest {
    fn from(r: SpeakerSeparationRequest) -> Self {
        JobRequest::SpeakerSeparation(r)
    }
}
