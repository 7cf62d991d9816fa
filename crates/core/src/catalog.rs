//! Voice and avatar catalog records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
    Unknown,
}

impl VoiceGender {
    /// The catalog reports `f` for female voices and anything else for male.
    fn from_catalog(code: Option<&str>) -> Self {
        match code {
            Some(code) if code.trim().eq_ignore_ascii_case("f") => VoiceGender::Female,
            _ => VoiceGender::Male,
        }
    }
}

/// A voice usable for narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
    pub gender: VoiceGender,
    pub accent: String,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub is_cloned: bool,
}

impl Voice {
    fn stock(id: &str, name: &str, language: &str, gender: VoiceGender, accent: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            language: language.to_string(),
            gender,
            accent: accent.to_string(),
            preview_url: None,
            is_cloned: false,
        }
    }
}

/// Voices served when the catalog is unavailable and fallback is enabled.
pub fn default_voices() -> Vec<Voice> {
    use VoiceGender::{Female, Male};
    vec![
        Voice::stock("en_us_001", "Matthew", "en-US", Male, "american"),
        Voice::stock("en_us_002", "Joanna", "en-US", Female, "american"),
        Voice::stock("en_us_003", "Ivy", "en-US", Female, "american"),
        Voice::stock("en_us_004", "Justin", "en-US", Male, "american"),
        Voice::stock("en_uk_001", "Emma", "en-GB", Female, "british"),
        Voice::stock("en_uk_002", "Brian", "en-GB", Male, "british"),
        Voice::stock("en_au_001", "Nicole", "en-AU", Female, "australian"),
        Voice::stock("en_au_002", "Russell", "en-AU", Male, "australian"),
    ]
}

/// A presenter avatar for short videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "videoUrl", default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "createdOn", default)]
    pub created_on: Option<String>,
    #[serde(rename = "voiceId", default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogDecodeError {
    #[error("invalid catalog response: {0}")]
    Format(String),

    #[error("catalog response contained no usable voices")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    accent: Option<String>,
    #[serde(rename = "sampleUrl", default)]
    sample_url: Option<String>,
}

impl CatalogEntry {
    fn into_voice(self) -> Option<Voice> {
        let id = match self.id? {
            Value::String(s) if !s.trim().is_empty() => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let name = self.name.filter(|n| !n.trim().is_empty())?;

        Some(Voice {
            id,
            name,
            language: self.language.unwrap_or_else(|| "en-US".to_string()),
            gender: VoiceGender::from_catalog(self.gender.as_deref()),
            accent: self.accent.unwrap_or_else(|| "neutral".to_string()),
            preview_url: self.sample_url.filter(|u| !u.trim().is_empty()),
            is_cloned: false,
        })
    }
}

/// Decode a voice catalog response.
///
/// Accepts a bare array or an object with a `data` array. Entries without an
/// id or a name are skipped.
pub fn decode_voices(raw: &Value) -> Result<Vec<Voice>, CatalogDecodeError> {
    let entries = match raw {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CatalogDecodeError::Format(
                    "expected an array of voices".to_string(),
                ));
            }
        },
        other => {
            return Err(CatalogDecodeError::Format(format!(
                "expected an array of voices, got {other}"
            )));
        }
    };

    let voices: Vec<Voice> = entries
        .iter()
        .filter_map(|entry| CatalogEntry::deserialize(entry).ok())
        .filter_map(CatalogEntry::into_voice)
        .collect();

    if voices.is_empty() {
        return Err(CatalogDecodeError::Empty);
    }
    Ok(voices)
}

/// Decode an avatar catalog response: a bare array or `{data: [...]}`.
pub fn decode_avatars(raw: &Value) -> Result<Vec<Avatar>, CatalogDecodeError> {
    let entries = match raw {
        Value::Object(map) => map.get("data").unwrap_or(raw),
        _ => raw,
    };
    Vec::<Avatar>::deserialize(entries).map_err(|e| CatalogDecodeError::Format(e.to_string()))
}
