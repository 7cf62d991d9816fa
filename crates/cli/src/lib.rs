//! Command-line arguments for the `autocontent` binary.

use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::Value;

use autocontent_core::{
    AudioSample, AvatarGender, ContentRequest, Job, JobId, JobKind, JobRequest, OutputType,
    PodcastCustomVoicesRequest, PodcastScriptRequest, Resource, ShortVideoRequest,
    SpeakerSeparationRequest, VoiceCloneRequest,
};
use autocontent_observability::LogFormat;

/// Top-level CLI entry point.
#[derive(Debug, Parser)]
#[command(
    name = "autocontent",
    version,
    about = "Submit content-generation jobs and wait for their results"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Log output format (json or pretty). Logs go to stderr.
    #[arg(global = true, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate study material or a podcast from text and web sources.
    Content(ContentArgs),
    /// Generate a two-host podcast from sources with chosen voices.
    Podcast(PodcastArgs),
    /// Record a podcast from a finished script.
    PodcastScript(PodcastScriptArgs),
    /// Clone a voice from an already-uploaded audio sample.
    CloneVoice(CloneVoiceArgs),
    /// Render a two-presenter short video from an audio track.
    Short(ShortArgs),
    /// Split a recording into per-speaker audio.
    Separate(SeparateArgs),
    /// Resume polling a job submitted earlier.
    Track(TrackArgs),
    /// List narration voices.
    Voices(VoicesArgs),
    /// List short-video presenter avatars.
    Avatars,
}

impl Commands {
    /// The job this command submits, if it submits one.
    pub fn job_request(&self) -> Option<JobRequest> {
        match self {
            Commands::Content(args) => Some(args.to_request().into()),
            Commands::Podcast(args) => Some(args.to_request().into()),
            Commands::PodcastScript(args) => Some(args.to_request().into()),
            Commands::CloneVoice(args) => Some(args.to_request().into()),
            Commands::Short(args) => Some(args.to_request().into()),
            Commands::Separate(args) => Some(args.to_request().into()),
            Commands::Track(_) | Commands::Voices(_) | Commands::Avatars => None,
        }
    }
}

#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Inline source text.
    #[arg(long, default_value = "")]
    pub text: String,
    /// Web page to use as a source. Repeatable.
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,
    /// Kind of material to generate.
    #[arg(long, default_value = "text")]
    pub output_type: OutputType,
    #[arg(long, action = ArgAction::SetTrue)]
    pub citations: bool,
    /// Extra generation options as a JSON object.
    #[arg(long, value_parser = parse_json)]
    pub customization: Option<Value>,
}

impl ContentArgs {
    pub fn to_request(&self) -> ContentRequest {
        let mut request = ContentRequest::new(self.output_type).with_text(self.text.as_str());
        for url in &self.urls {
            request = request.with_resource(Resource::website(url.as_str()));
        }
        request.include_citations = self.citations;
        request.customization = self.customization.clone();
        request
    }
}

#[derive(Debug, Args)]
pub struct PodcastArgs {
    #[arg(long, default_value = "")]
    pub text: String,
    /// Web page to use as a source. Repeatable.
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,
    /// Voice id of the first host.
    #[arg(long)]
    pub voice1: String,
    /// Voice id of the second host.
    #[arg(long)]
    pub voice2: String,
}

impl PodcastArgs {
    pub fn to_request(&self) -> PodcastCustomVoicesRequest {
        let mut request = PodcastCustomVoicesRequest::new(self.voice1.as_str(), self.voice2.as_str())
            .with_text(self.text.as_str());
        for url in &self.urls {
            request = request.with_resource(Resource::website(url.as_str()));
        }
        request
    }
}

#[derive(Debug, Args)]
pub struct PodcastScriptArgs {
    /// Full dialogue to be read.
    #[arg(long)]
    pub script: String,
    #[arg(long)]
    pub voice1: String,
    #[arg(long)]
    pub voice2: String,
}

impl PodcastScriptArgs {
    pub fn to_request(&self) -> PodcastScriptRequest {
        PodcastScriptRequest {
            script: self.script.clone(),
            voice1: self.voice1.clone(),
            voice2: self.voice2.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct CloneVoiceArgs {
    /// Name for the cloned voice.
    #[arg(long)]
    pub name: String,
    /// Where the sample is stored.
    #[arg(long)]
    pub audio_url: String,
    #[arg(long, default_value = "sample.mp3")]
    pub file_name: String,
    #[arg(long, default_value = "audio/mpeg")]
    pub media_type: String,
    /// Sample size in bytes.
    #[arg(long)]
    pub size_bytes: u64,
}

impl CloneVoiceArgs {
    pub fn to_request(&self) -> VoiceCloneRequest {
        VoiceCloneRequest {
            name: self.name.clone(),
            sample: AudioSample {
                url: self.audio_url.clone(),
                file_name: self.file_name.clone(),
                media_type: self.media_type.clone(),
                size_bytes: self.size_bytes,
            },
        }
    }
}

#[derive(Debug, Args)]
pub struct ShortArgs {
    #[arg(long)]
    pub audio_url: String,
    #[arg(long, default_value = "")]
    pub prompt: String,
    /// First presenter (m or f).
    #[arg(long, default_value = "m")]
    pub avatar1: AvatarGender,
    /// Second presenter (m or f).
    #[arg(long, default_value = "f")]
    pub avatar2: AvatarGender,
    #[arg(long)]
    pub callback_data: Option<String>,
}

impl ShortArgs {
    pub fn to_request(&self) -> ShortVideoRequest {
        ShortVideoRequest {
            avatar1: self.avatar1,
            avatar2: self.avatar2,
            callback_data: self.callback_data.clone(),
            ..ShortVideoRequest::new(self.audio_url.as_str(), self.prompt.as_str())
        }
    }
}

#[derive(Debug, Args)]
pub struct SeparateArgs {
    /// `.mp3` or `.wav` recording.
    #[arg(long)]
    pub audio_url: String,
    #[arg(long)]
    pub callback_data: Option<String>,
}

impl SeparateArgs {
    pub fn to_request(&self) -> SpeakerSeparationRequest {
        SpeakerSeparationRequest {
            callback_data: self.callback_data.clone(),
            ..SpeakerSeparationRequest::new(self.audio_url.as_str())
        }
    }
}

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Request id returned at submission.
    #[arg(long)]
    pub id: JobId,
    /// Job kind the id belongs to.
    #[arg(long)]
    pub kind: JobKind,
    /// When the job was submitted (RFC 3339). The deadline is measured from
    /// here; defaults to now.
    #[arg(long, value_name = "TIMESTAMP")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl TrackArgs {
    /// The job to resume, with its deadline `timeout` after submission.
    pub fn job(&self, timeout: Duration) -> Job {
        let submitted_at = self.submitted_at.unwrap_or_else(Utc::now);
        Job::from_submission(self.id.clone(), self.kind, submitted_at, timeout)
    }
}

#[derive(Debug, Args)]
pub struct VoicesArgs {
    /// Serve the built-in voice set without contacting the service.
    #[arg(long, action = ArgAction::SetTrue)]
    pub offline: bool,
    /// Fall back to the built-in voice set if the catalog is unavailable.
    #[arg(long, action = ArgAction::SetTrue)]
    pub fallback: bool,
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}
