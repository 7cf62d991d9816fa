//! Voice and avatar catalog lookups.

use std::sync::Arc;

use tracing::{info, warn};

use autocontent_client::{ContentService, HttpContentService, ServiceMode};
use autocontent_core::{
    Avatar, BackoffPolicy, RetryDecision, Voice, decode_avatars, decode_voices, default_voices,
};

use crate::error::{CatalogError, JobError};

/// What `list_voices` does when the catalog cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceFallback {
    /// Surface the error.
    #[default]
    Disabled,
    /// Serve the built-in default voices.
    DefaultVoices,
}

#[derive(Clone)]
pub struct CatalogClient {
    /// `None` in offline mode.
    service: Option<Arc<dyn ContentService>>,
    backoff: BackoffPolicy,
    fallback: VoiceFallback,
}

impl CatalogClient {
    pub fn new(service: Arc<dyn ContentService>, backoff: BackoffPolicy) -> Self {
        Self {
            service: Some(service),
            backoff,
            fallback: VoiceFallback::Disabled,
        }
    }

    /// A client with no service behind it. Voices come from the default set.
    pub fn offline() -> Self {
        Self {
            service: None,
            backoff: BackoffPolicy::default(),
            fallback: VoiceFallback::DefaultVoices,
        }
    }

    pub fn connect(mode: &ServiceMode, backoff: BackoffPolicy) -> Result<Self, JobError> {
        match mode {
            ServiceMode::OfflineFallback => Ok(Self::offline()),
            ServiceMode::Online(config) => {
                let service = HttpContentService::new(config.clone())?;
                Ok(Self::new(Arc::new(service), backoff))
            }
        }
    }

    pub fn with_fallback(mut self, fallback: VoiceFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Voices available for narration.
    ///
    /// Transient failures are retried under the catalog backoff.
    pub async fn list_voices(&self) -> Result<Vec<Voice>, CatalogError> {
        let Some(service) = &self.service else {
            info!("offline mode; serving default voices");
            return Ok(default_voices());
        };

        let mut attempt: u32 = 0;
        let result = loop {
            let fetched = match service.voices().await {
                Ok(raw) => decode_voices(&raw).map_err(CatalogError::from),
                Err(err) => Err(CatalogError::from(err)),
            };

            match fetched {
                Ok(voices) => {
                    info!(count = voices.len(), attempt, "voice catalog loaded");
                    break Ok(voices);
                }
                Err(CatalogError::Transport(err)) => match self.backoff.decide(attempt, err.class()) {
                    RetryDecision::Retry { delay } => {
                        warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "voice catalog request failed; retrying"
                        );
                        attempt += 1;
                        tokio::time::sleep(delay).await;
                    }
                    RetryDecision::Abort => break Err(CatalogError::Transport(err)),
                },
                Err(other) => break Err(other),
            }
        };

        match (result, self.fallback) {
            (Err(err), VoiceFallback::DefaultVoices) => {
                warn!(error = %err, "voice catalog unavailable; serving default voices");
                Ok(default_voices())
            }
            (result, _) => result,
        }
    }

    /// Presenter avatars for short videos. Not retried.
    pub async fn list_avatars(&self) -> Result<Vec<Avatar>, CatalogError> {
        let service = self.service.as_ref().ok_or(CatalogError::Offline)?;
        let raw = service.avatars().await?;
        Ok(decode_avatars(&raw)?)
    }
}
