//! Job creation: validate, submit once, extract the tracking id.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use autocontent_client::ContentService;
use autocontent_core::{Job, JobId, JobKind, JobRequest, TransportError, service_message};

use crate::error::SubmissionError;

/// Response fields the service uses for the new job's id, in lookup order.
const ID_FIELDS: [&str; 2] = ["request_id", "requestId"];

#[derive(Clone)]
pub struct JobSubmitter {
    service: Arc<dyn ContentService>,
}

impl JobSubmitter {
    pub fn new(service: Arc<dyn ContentService>) -> Self {
        Self { service }
    }

    /// Submit `request` and return the job to track, with its deadline set
    /// `timeout` after submission.
    pub async fn submit(
        &self,
        request: &JobRequest,
        timeout: Duration,
    ) -> Result<Job, SubmissionError> {
        let kind = request.kind();
        request.validate()?;

        let response = self
            .service
            .submit(request.endpoint(), &request.body())
            .await
            .map_err(|err| rejection(kind, err))?;

        let id = extract_request_id(&response).ok_or_else(|| {
            warn!(kind = %kind, "submission response carried no request id");
            SubmissionError::MissingRequestId { kind }
        })?;

        info!(kind = %kind, endpoint = ?request.endpoint(), job_id = %id, "job submitted");
        Ok(Job::new(id, kind, timeout))
    }
}

fn rejection(kind: JobKind, err: TransportError) -> SubmissionError {
    match err {
        TransportError::Status { status, body } => {
            let message = service_message(&body)
                .unwrap_or_else(|| format!("{kind} submission failed"));
            warn!(kind = %kind, status, %message, "submission rejected");
            SubmissionError::Rejected {
                kind,
                status,
                message,
            }
        }
        source => {
            warn!(kind = %kind, error = %source, "submission failed");
            SubmissionError::Transport { kind, source }
        }
    }
}

/// Job id from a submission response: `request_id` or `requestId`, as a
/// string or a number.
pub fn extract_request_id(response: &Value) -> Option<JobId> {
    ID_FIELDS.iter().find_map(|field| match response.get(field)? {
        Value::String(s) => JobId::new(s.as_str()).ok(),
        Value::Number(n) => JobId::new(n.to_string()).ok(),
        _ => None,
    })
}
