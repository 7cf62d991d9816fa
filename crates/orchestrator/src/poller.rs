//! Status polling for one submitted job.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use autocontent_client::ContentService;
use autocontent_core::{
    BackoffPolicy, JobId, JobKind, Outcome, PollAttempt, Progress, RetryDecision, normalize,
};

/// The poll loop observed cancellation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("polling cancelled")]
pub struct Cancelled;

/// How a poll loop ended.
#[derive(Debug, Clone, PartialEq)]
pub struct PollReport {
    /// Never `Pending`.
    pub outcome: Outcome,
    /// Status queries issued.
    pub attempts: u32,
    /// Last successfully decoded status response.
    pub last_response: Option<PollAttempt>,
}

/// Queries a job's status until it completes, fails, runs out of time, or
/// the transport backoff gives up.
#[derive(Clone)]
pub struct StatusPoller {
    service: Arc<dyn ContentService>,
    transport_backoff: BackoffPolicy,
}

impl StatusPoller {
    pub fn new(service: Arc<dyn ContentService>, transport_backoff: BackoffPolicy) -> Self {
        Self {
            service,
            transport_backoff,
        }
    }

    /// Poll job `id` every `interval` until a terminal outcome or `deadline`.
    ///
    /// Queries are strictly sequential. A pending response at or after the
    /// deadline yields `TimedOut`; delays are clamped so the last query lands
    /// on the deadline. Transport failures are retried under the transport
    /// backoff and yield `TransientError` once it aborts. Cancellation is
    /// checked before each query and interrupts a pending delay; an in-flight
    /// query is always allowed to finish.
    pub async fn poll(
        &self,
        id: &JobId,
        kind: JobKind,
        interval: Duration,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<PollReport, Cancelled> {
        let mut attempts: u32 = 0;
        let mut consecutive_failures: u32 = 0;
        let mut last_progress: Option<Progress> = None;
        let mut last_response: Option<PollAttempt> = None;

        loop {
            if cancel.is_cancelled() {
                info!(job_id = %id, kind = %kind, attempts, "polling cancelled");
                return Err(Cancelled);
            }

            let attempt = attempts;
            attempts += 1;
            let response = self.service.status(kind, id).await;

            let delay = match response {
                Ok(raw) => {
                    consecutive_failures = 0;
                    let observed = last_response.insert(PollAttempt::new(attempt, raw));
                    match normalize(&observed.raw, kind) {
                        Outcome::Pending { progress } => {
                            last_progress = progress.or(last_progress);
                            debug!(
                                job_id = %id,
                                kind = %kind,
                                attempt,
                                progress = progress.map(|p| p.percent()),
                                "job pending"
                            );
                            if Instant::now() >= deadline {
                                return Ok(timed_out(id, kind, attempts, last_progress, last_response));
                            }
                            interval
                        }
                        outcome => {
                            info!(job_id = %id, kind = %kind, attempts, "job reached a terminal state");
                            return Ok(PollReport {
                                outcome,
                                attempts,
                                last_response,
                            });
                        }
                    }
                }
                Err(cause) => match self.transport_backoff.decide(consecutive_failures, cause.class()) {
                    RetryDecision::Retry { delay } => {
                        consecutive_failures += 1;
                        warn!(
                            job_id = %id,
                            kind = %kind,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %cause,
                            "status query failed; retrying"
                        );
                        if Instant::now() >= deadline {
                            return Ok(timed_out(id, kind, attempts, last_progress, last_response));
                        }
                        delay
                    }
                    RetryDecision::Abort => {
                        warn!(
                            job_id = %id,
                            kind = %kind,
                            attempts,
                            error = %cause,
                            "status query failed; giving up"
                        );
                        return Ok(PollReport {
                            outcome: Outcome::TransientError { cause },
                            attempts,
                            last_response,
                        });
                    }
                },
            };

            let wake = Instant::now().checked_add(delay).unwrap_or(deadline).min(deadline);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(job_id = %id, kind = %kind, attempts, "polling cancelled during delay");
                    return Err(Cancelled);
                }
                _ = tokio::time::sleep_until(wake) => {}
            }
        }
    }
}

fn timed_out(
    id: &JobId,
    kind: JobKind,
    attempts: u32,
    last_progress: Option<Progress>,
    last_response: Option<PollAttempt>,
) -> PollReport {
    warn!(
        job_id = %id,
        kind = %kind,
        attempts,
        last_progress = last_progress.map(|p| p.percent()),
        "deadline reached without a terminal status"
    );
    PollReport {
        outcome: Outcome::TimedOut { last_progress },
        attempts,
        last_response,
    }
}
