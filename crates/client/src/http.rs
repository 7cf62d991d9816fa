//! [`ContentService`] over HTTP.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;

use autocontent_core::{JobId, JobKind, SubmitEndpoint, TransportError};

use crate::config::{ConfigError, ServiceConfig};
use crate::service::{ContentService, Route};

/// Largest error body kept in a [`TransportError::Status`].
const MAX_ERROR_BODY: usize = 2048;

/// `reqwest`-backed client for the content service.
///
/// Every request carries the bearer credential, `Accept: application/json`
/// and the configured user agent, and is bounded by the per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpContentService {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl HttpContentService {
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        tracing::debug!(
            base_url = %config.base_url(),
            user_agent = %config.user_agent,
            "content service client ready"
        );
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn send(
        &self,
        method: reqwest::Method,
        route: Route,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let mut url = self.config.endpoint(&route.segments);
        if let Some((key, value)) = &route.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(method = %method, path = %route.display_path(), "calling content service");

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(self.config.api_key())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);
            tracing::warn!(
                status = status.as_u16(),
                path = %route.display_path(),
                "content service returned an error status"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ContentService for HttpContentService {
    async fn submit(
        &self,
        endpoint: SubmitEndpoint,
        body: &Value,
    ) -> Result<Value, TransportError> {
        self.send(reqwest::Method::POST, Route::submit(endpoint), Some(body))
            .await
    }

    async fn status(&self, kind: JobKind, id: &JobId) -> Result<Value, TransportError> {
        self.send(reqwest::Method::GET, Route::status(kind, id), None)
            .await
    }

    async fn voices(&self) -> Result<Value, TransportError> {
        self.send(reqwest::Method::GET, Route::voices(), None).await
    }

    async fn avatars(&self) -> Result<Value, TransportError> {
        self.send(reqwest::Method::GET, Route::avatars(), None).await
    }
}

/// Classify a `reqwest` failure into the transport taxonomy.
fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Unreachable(err.to_string())
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else if err.is_decode() {
        TransportError::Malformed(err.to_string())
    } else {
        // Request, body and redirect failures all mean the exchange broke
        // mid-flight.
        TransportError::ConnectionDropped(err.to_string())
    }
}

fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
