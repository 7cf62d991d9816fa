//! The remote content service as seen by the orchestration layer.

use async_trait::async_trait;
use serde_json::Value;

use autocontent_core::{JobId, JobKind, SubmitEndpoint, TransportError};

/// Path segments plus optional query pair for one service call.
///
/// Segments are kept unencoded; the transport encodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub segments: Vec<String>,
    pub query: Option<(&'static str, String)>,
}

impl Route {
    fn path(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: None,
        }
    }

    /// `/`-joined path, for logs.
    pub fn display_path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn submit(endpoint: SubmitEndpoint) -> Self {
        Self::path(match endpoint {
            SubmitEndpoint::CreateContent => "/content/create",
            SubmitEndpoint::PodcastCustomVoices => "/content/createpodcastcustomvoices",
            SubmitEndpoint::PodcastCustomScript => "/content/createpodcastcustomscript",
            SubmitEndpoint::CloneVoice => "/content/clonevoice",
            SubmitEndpoint::CreateShort => "/video/CreateShorts",
            SubmitEndpoint::SeparateSpeakers => "/content/separatespeakersaudio",
        })
    }

    pub fn voices() -> Self {
        Self::path("/content/getvoices")
    }

    pub fn avatars() -> Self {
        Self::path("/video/GetAvatars")
    }

    /// Status endpoint for job `id` of `kind`.
    pub fn status(kind: JobKind, id: &JobId) -> Self {
        match kind {
            JobKind::VoiceClone => Self {
                query: Some(("request_id", id.as_str().to_string())),
                ..Self::path("/content/clonevoice/status")
            },
            _ => {
                let mut route = Self::path("/content/status");
                route.segments.push(id.as_str().to_string());
                route
            }
        }
    }
}

/// Calls against the content service.
///
/// Implementations return the decoded JSON body of a successful response and
/// map every other result into a [`TransportError`]. They never retry.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// POST a submission body to a creation endpoint.
    async fn submit(&self, endpoint: SubmitEndpoint, body: &Value)
    -> Result<Value, TransportError>;

    /// GET the current status of job `id`.
    async fn status(&self, kind: JobKind, id: &JobId) -> Result<Value, TransportError>;

    /// GET the raw voice catalog.
    async fn voices(&self) -> Result<Value, TransportError>;

    /// GET the raw avatar catalog.
    async fn avatars(&self) -> Result<Value, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_clone_status_uses_query_parameter() {
        let id = JobId::new("abc").unwrap();
        let route = Route::status(JobKind::VoiceClone, &id);
        assert_eq!(route.display_path(), "/content/clonevoice/status");
        assert_eq!(route.query, Some(("request_id", "abc".to_string())));

        let route = Route::status(JobKind::SpeakerSeparation, &id);
        assert_eq!(route.display_path(), "/content/status/abc");
        assert_eq!(route.query, None);
    }

    #[test]
    fn ids_stay_a_single_segment() {
        let id = JobId::new("a/b").unwrap();
        let route = Route::status(JobKind::ContentCreation, &id);
        assert_eq!(route.segments, vec!["content", "status", "a/b"]);
    }

    #[test]
    fn every_endpoint_has_a_distinct_submit_route() {
        let paths: std::collections::HashSet<String> = SubmitEndpoint::ALL
            .into_iter()
            .map(|endpoint| Route::submit(endpoint).display_path())
            .collect();
        assert_eq!(paths.len(), SubmitEndpoint::ALL.len());
        assert_eq!(
            Route::submit(SubmitEndpoint::PodcastCustomScript).display_path(),
            "/content/createpodcastcustomscript"
        );
    }
}
