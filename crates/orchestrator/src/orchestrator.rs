//! One awaitable operation per job kind: submit, poll, surface the outcome.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, field, info_span};

use autocontent_client::{ContentService, HttpContentService, ServiceMode};
use autocontent_core::{
    BackoffPolicy, ContentRequest, Job, JobId, JobKind, JobPayload, JobRequest, Outcome,
    PodcastCustomVoicesRequest, PodcastScriptRequest, PollSchedule, ShortVideoRequest,
    SpeakerSeparationRequest, VoiceCloneRequest,
};

use crate::error::JobError;
use crate::poller::{Cancelled, StatusPoller};
use crate::registry::ActiveJobs;
use crate::submitter::JobSubmitter;

/// Timing knobs for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorSettings {
    schedules: HashMap<JobKind, PollSchedule>,
    /// Retry policy for failed status queries.
    pub poll_backoff: BackoffPolicy,
    /// Retry policy for catalog lookups.
    pub catalog_backoff: BackoffPolicy,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            schedules: JobKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.default_schedule()))
                .collect(),
            poll_backoff: BackoffPolicy::exponential(Duration::from_secs(1), 3),
            catalog_backoff: BackoffPolicy::exponential(Duration::from_secs(1), 3),
        }
    }
}

impl OrchestratorSettings {
    pub fn with_schedule(mut self, kind: JobKind, schedule: PollSchedule) -> Self {
        self.schedules.insert(kind, schedule);
        self
    }

    pub fn with_poll_backoff(mut self, policy: BackoffPolicy) -> Self {
        self.poll_backoff = policy;
        self
    }

    pub fn schedule(&self, kind: JobKind) -> PollSchedule {
        self.schedules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_schedule())
    }
}

/// A finished job and its result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    pub job: Job,
    pub payload: JobPayload,
    /// Status queries it took.
    pub attempts: u32,
}

/// Composes submission and polling into one operation per job kind.
///
/// Cheap to clone; clones share the active-poll registry.
#[derive(Clone)]
pub struct Orchestrator {
    submitter: JobSubmitter,
    poller: StatusPoller,
    settings: OrchestratorSettings,
    active: ActiveJobs,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn ContentService>, settings: OrchestratorSettings) -> Self {
        Self {
            submitter: JobSubmitter::new(service.clone()),
            poller: StatusPoller::new(service, settings.poll_backoff),
            settings,
            active: ActiveJobs::new(),
        }
    }

    /// Build an orchestrator over HTTP. Offline mode cannot submit jobs and
    /// is refused.
    pub fn connect(mode: &ServiceMode, settings: OrchestratorSettings) -> Result<Self, JobError> {
        let config = mode.require_online()?;
        let service = HttpContentService::new(config.clone())?;
        Ok(Self::new(Arc::new(service), settings))
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Submit `request` and wait for its outcome.
    ///
    /// A token cancelled before the call returns without contacting the
    /// service. Cancelling `cancel` later stops polling at the next iteration
    /// boundary and retires the job id.
    pub async fn run(
        &self,
        request: JobRequest,
        cancel: CancellationToken,
    ) -> Result<Completion, JobError> {
        let kind = request.kind();
        let span = info_span!("job", kind = %kind, job_id = field::Empty);
        async move {
            if cancel.is_cancelled() {
                tracing::info!("cancelled before submission");
                return Err(JobError::CancelledBeforeSubmission { kind });
            }
            let job = self.submit(&request).await?;
            let deadline = Instant::now() + job.timeout();
            tracing::Span::current().record("job_id", field::display(job.id()));
            self.follow(job, deadline, &cancel).await
        }
        .instrument(span)
        .await
    }

    pub async fn run_content_creation(
        &self,
        request: ContentRequest,
    ) -> Result<Completion, JobError> {
        self.run(request.into(), CancellationToken::new()).await
    }

    /// Podcast from sources with two chosen voices. Followed as a content
    /// job.
    pub async fn run_podcast_custom_voices(
        &self,
        request: PodcastCustomVoicesRequest,
    ) -> Result<Completion, JobError> {
        self.run(request.into(), CancellationToken::new()).await
    }

    pub async fn run_podcast_script(
        &self,
        request: PodcastScriptRequest,
    ) -> Result<Completion, JobError> {
        self.run(request.into(), CancellationToken::new()).await
    }

    pub async fn run_voice_clone(
        &self,
        request: VoiceCloneRequest,
    ) -> Result<Completion, JobError> {
        self.run(request.into(), CancellationToken::new()).await
    }

    pub async fn run_short_video(
        &self,
        request: ShortVideoRequest,
    ) -> Result<Completion, JobError> {
        self.run(request.into(), CancellationToken::new()).await
    }

    pub async fn run_speaker_separation(
        &self,
        request: SpeakerSeparationRequest,
    ) -> Result<Completion, JobError> {
        self.run(request.into(), CancellationToken::new()).await
    }

    /// Submit without polling. The returned job can be persisted and handed
    /// to [`Orchestrator::track`] later.
    pub async fn submit(&self, request: &JobRequest) -> Result<Job, JobError> {
        let timeout = self.settings.schedule(request.kind()).timeout;
        Ok(self.submitter.submit(request, timeout).await?)
    }

    /// Poll an already-submitted job until its outcome.
    pub async fn track(&self, job: Job, cancel: CancellationToken) -> Result<Completion, JobError> {
        let span = info_span!("job", kind = %job.kind(), job_id = %job.id());
        let deadline = Instant::now() + job.remaining_at(Utc::now());
        self.follow(job, deadline, &cancel).instrument(span).await
    }

    /// Stop polling job `id`. Returns whether a poll loop was running.
    pub fn cancel(&self, id: &JobId) -> bool {
        self.active.cancel(id)
    }

    pub fn is_polling(&self, id: &JobId) -> bool {
        self.active.is_active(id)
    }

    async fn follow(
        &self,
        job: Job,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<Completion, JobError> {
        let guard = self.active.begin(job.id(), cancel)?;
        let schedule = self.settings.schedule(job.kind());

        let polled = self
            .poller
            .poll(job.id(), job.kind(), schedule.interval, deadline, guard.token())
            .await;

        let report = match polled {
            Ok(report) => report,
            Err(Cancelled) => {
                self.active.retire(job.id());
                return Err(JobError::Cancelled(job.id().clone()));
            }
        };
        drop(guard);

        let completed = matches!(report.outcome, Outcome::Completed { .. });
        if let (Some(last), false) = (&report.last_response, completed) {
            tracing::debug!(
                attempt = last.attempt,
                observed_at = %last.observed_at,
                raw = %last.raw,
                "last status response"
            );
        }

        let id = job.id().clone();
        match report.outcome {
            Outcome::Completed { payload } => Ok(Completion {
                job,
                payload,
                attempts: report.attempts,
            }),
            Outcome::Failed { reason } => Err(JobError::Failed { id, reason }),
            Outcome::TimedOut { last_progress } => Err(JobError::TimedOut { id, last_progress }),
            Outcome::TransientError { cause } => Err(JobError::PollFailed {
                id,
                attempts: report.attempts,
                cause,
            }),
            Outcome::Pending { progress } => Err(JobError::TimedOut {
                id,
                last_progress: progress,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use autocontent_core::{
        ContentResult, OutputType, Progress, SubmitEndpoint, TransportError, ValidationError,
    };

    use crate::error::SubmissionError;

    /// In-memory service replaying scripted responses.
    #[derive(Default)]
    struct ScriptedService {
        submit: Mutex<VecDeque<Result<Value, TransportError>>>,
        statuses: Mutex<VecDeque<Result<Value, TransportError>>>,
        /// Served once the script is exhausted.
        fallback_status: Option<Value>,
        status_calls: Mutex<Vec<Instant>>,
        submissions: Mutex<u32>,
        endpoints: Mutex<Vec<SubmitEndpoint>>,
    }

    impl ScriptedService {
        fn accepting(id: &str) -> Self {
            let service = Self::default();
            service
                .submit
                .lock()
                .unwrap()
                .push_back(Ok(json!({"request_id": id})));
            service
        }

        fn then_status(self, response: Result<Value, TransportError>) -> Self {
            self.statuses.lock().unwrap().push_back(response);
            self
        }

        fn forever(mut self, response: Value) -> Self {
            self.fallback_status = Some(response);
            self
        }

        fn status_call_times(&self) -> Vec<Instant> {
            self.status_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentService for ScriptedService {
        async fn submit(
            &self,
            endpoint: SubmitEndpoint,
            _body: &Value,
        ) -> Result<Value, TransportError> {
            *self.submissions.lock().unwrap() += 1;
            self.endpoints.lock().unwrap().push(endpoint);
            self.submit
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({"request_id": "default"})))
        }

        async fn status(&self, _kind: JobKind, _id: &JobId) -> Result<Value, TransportError> {
            self.status_calls.lock().unwrap().push(Instant::now());
            let next = self.statuses.lock().unwrap().pop_front();
            match (next, &self.fallback_status) {
                (Some(response), _) => response,
                (None, Some(fallback)) => Ok(fallback.clone()),
                (None, None) => panic!("status queried after the script ended"),
            }
        }

        async fn voices(&self) -> Result<Value, TransportError> {
            Ok(json!([]))
        }

        async fn avatars(&self) -> Result<Value, TransportError> {
            Ok(json!([]))
        }
    }

    fn orchestrator(service: &Arc<ScriptedService>) -> Orchestrator {
        Orchestrator::new(service.clone(), OrchestratorSettings::default())
    }

    fn content_request() -> ContentRequest {
        ContentRequest::new(OutputType::Text).with_text("notes")
    }

    fn gaps(times: &[Instant]) -> Vec<Duration> {
        times.windows(2).map(|w| w[1] - w[0]).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn pending_then_completed_stops_polling() {
        let service = Arc::new(
            ScriptedService::accepting("req1")
                .then_status(Ok(json!({"status": "processing"})))
                .then_status(Ok(json!({"status": 40})))
                .then_status(Ok(json!({"status": "completed", "content": "Test response"}))),
        );

        let completion = orchestrator(&service)
            .run_content_creation(content_request())
            .await
            .unwrap();

        assert_eq!(
            completion.payload,
            JobPayload::Content(ContentResult::text("Test response"))
        );
        assert_eq!(completion.job.id().as_str(), "req1");
        assert_eq!(completion.attempts, 3);

        let calls = service.status_call_times();
        assert_eq!(calls.len(), 3);
        assert!(gaps(&calls).iter().all(|gap| *gap == Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn script_podcast_posts_to_its_endpoint_and_polls_as_content() {
        let service = Arc::new(
            ScriptedService::accepting("pod-1")
                .then_status(Ok(json!({"status": "processing"})))
                .then_status(Ok(json!({"status": "completed", "audio_url": "https://cdn/pod.mp3"}))),
        );

        let completion = orchestrator(&service)
            .run_podcast_script(PodcastScriptRequest {
                script: "Host A: welcome".into(),
                voice1: "v-1".into(),
                voice2: "v-2".into(),
            })
            .await
            .unwrap();

        assert_eq!(completion.job.kind(), JobKind::ContentCreation);
        assert_eq!(
            *service.endpoints.lock().unwrap(),
            vec![SubmitEndpoint::PodcastCustomScript]
        );
        let JobPayload::Content(result) = completion.payload else {
            panic!("expected a content result");
        };
        assert_eq!(result.audio_url.as_deref(), Some("https://cdn/pod.mp3"));
        assert_eq!(gaps(&service.status_call_times()), vec![Duration::from_secs(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_voice_podcast_without_voices_is_not_submitted() {
        let service = Arc::new(ScriptedService::default());

        let err = orchestrator(&service)
            .run_podcast_custom_voices(
                PodcastCustomVoicesRequest::new("v-1", "").with_text("notes"),
            )
            .await
            .unwrap_err();

        assert_eq!(err, JobError::Validation(ValidationError::Missing("voice2")));
        assert!(service.endpoints.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn service_failure_is_surfaced_with_its_message() {
        let service = Arc::new(
            ScriptedService::accepting("v1")
                .then_status(Ok(json!({"status": "failed", "error": "sample too noisy"}))),
        );

        let err = orchestrator(&service)
            .run_speaker_separation(SpeakerSeparationRequest::new("https://cdn/a.mp3"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            JobError::Failed {
                id: JobId::new("v1").unwrap(),
                reason: "sample too noisy".into()
            }
        );
        assert!(!err.is_still_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn speaker_separation_times_out_at_three_minutes() {
        let service = Arc::new(
            ScriptedService::accepting("sep-1").forever(json!({"status": 30})),
        );

        let started = Instant::now();
        let err = orchestrator(&service)
            .run_speaker_separation(SpeakerSeparationRequest::new("https://cdn/a.wav"))
            .await
            .unwrap_err();
        let waited = Instant::now() - started;

        assert_eq!(
            err,
            JobError::TimedOut {
                id: JobId::new("sep-1").unwrap(),
                last_progress: Some(Progress::new(30)),
            }
        );
        assert!(err.is_still_processing());
        assert_eq!(waited, Duration::from_millis(180_000));

        let calls = service.status_call_times();
        assert_eq!(calls.len(), 37);
        assert!(gaps(&calls).iter().all(|gap| *gap == Duration::from_millis(5_000)));
    }

    #[tokio::test(start_paused = true)]
    async fn last_delay_is_clamped_to_the_deadline() {
        let service = Arc::new(
            ScriptedService::accepting("c1").forever(json!({"status": "processing"})),
        );
        let settings = OrchestratorSettings::default().with_schedule(
            JobKind::ContentCreation,
            PollSchedule::new(Duration::from_secs(4), Duration::from_secs(10)),
        );

        let started = Instant::now();
        let err = Orchestrator::new(service.clone(), settings)
            .run_content_creation(content_request())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::TimedOut { last_progress: None, .. }));
        assert_eq!(Instant::now() - started, Duration::from_secs(10));
        let offsets: Vec<Duration> = service
            .status_call_times()
            .iter()
            .map(|t| *t - started)
            .collect();
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(10)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transport_errors_back_off_exponentially_then_abort() {
        let service = Arc::new(
            ScriptedService::accepting("req1")
                .then_status(Err(TransportError::Timeout))
                .then_status(Err(TransportError::Unreachable("dns".into())))
                .then_status(Err(TransportError::ConnectionDropped("reset".into()))),
        );

        let err = orchestrator(&service)
            .run_content_creation(content_request())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            JobError::PollFailed {
                id: JobId::new("req1").unwrap(),
                attempts: 3,
                cause: TransportError::ConnectionDropped("reset".into()),
            }
        );
        assert!(!matches!(err, JobError::Failed { .. }));
        assert_eq!(
            gaps(&service.status_call_times()),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn successful_query_resets_the_failure_streak() {
        let service = Arc::new(
            ScriptedService::accepting("req1")
                .then_status(Err(TransportError::Timeout))
                .then_status(Err(TransportError::Timeout))
                .then_status(Ok(json!({"status": "processing"})))
                .then_status(Err(TransportError::Timeout))
                .then_status(Ok(json!({"status": 100}))),
        );

        let completion = orchestrator(&service)
            .run_speaker_separation(SpeakerSeparationRequest::new("https://cdn/a.mp3"))
            .await
            .unwrap();

        assert_eq!(completion.attempts, 5);
        assert_eq!(
            gaps(&service.status_call_times()),
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(5),
                Duration::from_secs(1),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_poll_errors_abort_immediately() {
        let service = Arc::new(ScriptedService::accepting("req1").then_status(Err(
            TransportError::Status {
                status: 404,
                body: "not found".into(),
            },
        )));

        let err = orchestrator(&service)
            .run_content_creation(content_request())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::PollFailed { attempts: 1, .. }));
        assert_eq!(service.status_call_times().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn submission_network_error_issues_no_status_queries() {
        let service = Arc::new(ScriptedService::default());
        service
            .submit
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Unreachable("connection refused".into())));

        let err = orchestrator(&service)
            .run_content_creation(content_request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            JobError::Submission(SubmissionError::Transport {
                kind: JobKind::ContentCreation,
                ..
            })
        ));
        assert!(service.status_call_times().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_request_id_is_a_distinct_submission_error() {
        let service = Arc::new(ScriptedService::default());
        service
            .submit
            .lock()
            .unwrap()
            .push_back(Ok(json!({"status": "queued"})));

        let err = orchestrator(&service)
            .run_short_video(ShortVideoRequest::new("https://cdn/a.mp3", "clip"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            JobError::Submission(SubmissionError::MissingRequestId {
                kind: JobKind::ShortVideo
            })
        );
        assert!(service.status_call_times().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_requests_never_reach_the_service() {
        let service = Arc::new(ScriptedService::default());

        let err = orchestrator(&service)
            .run_speaker_separation(SpeakerSeparationRequest::new("https://cdn/a.ogg"))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Validation(ValidationError::Invalid { .. })));
        assert_eq!(*service.submissions.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_stops_run_before_submitting() {
        let service = Arc::new(ScriptedService::accepting("pc1").forever(json!({"status": "processing"})));
        let token = CancellationToken::new();
        token.cancel();

        let err = orchestrator(&service)
            .run(content_request().into(), token)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            JobError::CancelledBeforeSubmission {
                kind: JobKind::ContentCreation
            }
        );
        assert_eq!(*service.submissions.lock().unwrap(), 0);
        assert!(service.status_call_times().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn second_poll_for_same_job_is_rejected() {
        let service = Arc::new(ScriptedService::default().forever(json!({"status": "processing"})));
        let orchestrator = orchestrator(&service);
        let job = Job::new(JobId::new("dup").unwrap(), JobKind::ContentCreation, Duration::from_secs(60));

        let first = tokio::spawn({
            let orchestrator = orchestrator.clone();
            let job = job.clone();
            async move { orchestrator.track(job, CancellationToken::new()).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(orchestrator.is_polling(job.id()));

        let err = orchestrator
            .track(job.clone(), CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, JobError::AlreadyPolling(job.id().clone()));

        assert!(orchestrator.cancel(job.id()));
        assert_eq!(
            first.await.unwrap().unwrap_err(),
            JobError::Cancelled(job.id().clone())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_the_delay_and_retires_the_id() {
        let service = Arc::new(ScriptedService::default().forever(json!({"status": "processing"})));
        let orchestrator = orchestrator(&service);
        let job = Job::new(JobId::new("c1").unwrap(), JobKind::VoiceClone, Duration::from_secs(300));
        let token = CancellationToken::new();

        let handle = tokio::spawn({
            let orchestrator = orchestrator.clone();
            let job = job.clone();
            let token = token.clone();
            async move { orchestrator.track(job, token).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;

        let before = Instant::now();
        token.cancel();
        let err = handle.await.unwrap().unwrap_err();

        assert_eq!(err, JobError::Cancelled(job.id().clone()));
        assert_eq!(Instant::now(), before);
        assert_eq!(service.status_call_times().len(), 1);
        assert!(!orchestrator.is_polling(job.id()));
        assert_eq!(
            orchestrator.track(job.clone(), CancellationToken::new()).await.unwrap_err(),
            JobError::Inert(job.id().clone())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_one_job_leaves_others_running() {
        let service = Arc::new(
            ScriptedService::default()
                .then_status(Ok(json!({"status": "processing"})))
                .then_status(Ok(json!({"status": "processing"})))
                .forever(json!({"status": "completed", "content": "done"})),
        );
        let orchestrator = orchestrator(&service);
        let a = Job::new(JobId::new("a").unwrap(), JobKind::ContentCreation, Duration::from_secs(60));
        let b = Job::new(JobId::new("b").unwrap(), JobKind::ContentCreation, Duration::from_secs(60));

        let run_a = tokio::spawn({
            let orchestrator = orchestrator.clone();
            let a = a.clone();
            async move { orchestrator.track(a, CancellationToken::new()).await }
        });
        let run_b = tokio::spawn({
            let orchestrator = orchestrator.clone();
            let b = b.clone();
            async move { orchestrator.track(b, CancellationToken::new()).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(orchestrator.cancel(a.id()));
        assert_eq!(run_a.await.unwrap().unwrap_err(), JobError::Cancelled(a.id().clone()));
        assert!(run_b.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_future_releases_the_job() {
        let service = Arc::new(ScriptedService::default().forever(json!({"status": "processing"})));
        let orchestrator = orchestrator(&service);
        let job = Job::new(JobId::new("d1").unwrap(), JobKind::ShortVideo, Duration::from_secs(600));

        let attempt = tokio::time::timeout(
            Duration::from_secs(15),
            orchestrator.track(job.clone(), CancellationToken::new()),
        )
        .await;

        assert!(attempt.is_err());
        assert!(!orchestrator.is_polling(job.id()));
        assert!(orchestrator.track(job, CancellationToken::new()).await.is_err());
    }

    #[test]
    fn offline_mode_cannot_submit() {
        let err = Orchestrator::connect(&ServiceMode::OfflineFallback, OrchestratorSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, JobError::Config(_)));
    }

    #[test]
    fn schedules_can_be_overridden_per_kind() {
        let custom = PollSchedule::new(Duration::from_secs(1), Duration::from_secs(30));
        let settings = OrchestratorSettings::default().with_schedule(JobKind::ShortVideo, custom);

        assert_eq!(settings.schedule(JobKind::ShortVideo), custom);
        assert_eq!(
            settings.schedule(JobKind::SpeakerSeparation),
            JobKind::SpeakerSeparation.default_schedule()
        );
    }
}
