//! Active poll loops, keyed by job id.
//!
//! A job has at most one poll loop at a time. Entries are added when a loop
//! starts and removed when its [`PollGuard`] drops. Cancelled ids are
//! retired and refused from then on. The retired set is bounded: past
//! [`DEFAULT_RETIRED_CAPACITY`] ids, the oldest retirement is forgotten.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use autocontent_core::JobId;

use crate::error::JobError;

pub const DEFAULT_RETIRED_CAPACITY: usize = 4096;

/// Retired ids in retirement order.
#[derive(Debug)]
struct Retired {
    ids: HashSet<JobId>,
    order: VecDeque<JobId>,
    capacity: usize,
}

impl Retired {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn contains(&self, id: &JobId) -> bool {
        self.ids.contains(id)
    }

    fn insert(&mut self, id: JobId) {
        if !self.ids.insert(id.clone()) {
            return;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
                debug!(job_id = %oldest, "retired id forgotten");
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

#[derive(Debug)]
struct Registry {
    active: HashMap<JobId, CancellationToken>,
    retired: Retired,
}

#[derive(Debug, Clone)]
pub struct ActiveJobs {
    inner: Arc<Mutex<Registry>>,
}

impl Default for ActiveJobs {
    fn default() -> Self {
        Self::with_retired_capacity(DEFAULT_RETIRED_CAPACITY)
    }
}

impl ActiveJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry remembering at most `capacity` retired ids (at least one).
    pub fn with_retired_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                active: HashMap::new(),
                retired: Retired::with_capacity(capacity),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a poll loop for `id`.
    ///
    /// The returned guard's token is a child of `parent`: cancelling the
    /// parent stops this loop, and [`ActiveJobs::cancel`] stops this loop
    /// only.
    pub fn begin(&self, id: &JobId, parent: &CancellationToken) -> Result<PollGuard, JobError> {
        let mut registry = self.lock();
        if registry.retired.contains(id) {
            return Err(JobError::Inert(id.clone()));
        }
        if registry.active.contains_key(id) {
            return Err(JobError::AlreadyPolling(id.clone()));
        }

        let token = parent.child_token();
        registry.active.insert(id.clone(), token.clone());
        debug!(job_id = %id, active = registry.active.len(), "poll loop registered");

        Ok(PollGuard {
            id: id.clone(),
            token,
            jobs: self.clone(),
        })
    }

    /// Cancel the poll loop for `id`, if one is running, and retire the id.
    pub fn cancel(&self, id: &JobId) -> bool {
        let mut registry = self.lock();
        let Some(token) = registry.active.get(id).cloned() else {
            return false;
        };
        token.cancel();
        registry.retired.insert(id.clone());
        info!(job_id = %id, "poll loop cancelled");
        true
    }

    /// Refuse `id` from now on.
    pub fn retire(&self, id: &JobId) {
        self.lock().retired.insert(id.clone());
    }

    pub fn is_active(&self, id: &JobId) -> bool {
        self.lock().active.contains_key(id)
    }

    pub fn is_retired(&self, id: &JobId) -> bool {
        self.lock().retired.contains(id)
    }

    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    pub fn retired_count(&self) -> usize {
        self.lock().retired.len()
    }
}

/// Registration of one running poll loop. Dropping it frees the id.
#[derive(Debug)]
pub struct PollGuard {
    id: JobId,
    token: CancellationToken,
    jobs: ActiveJobs,
}

impl PollGuard {
    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for PollGuard {
    fn drop(&mut self) {
        self.jobs.lock().active.remove(&self.id);
        debug!(job_id = %self.id, "poll loop released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> JobId {
        JobId::new(s).unwrap()
    }

    #[test]
    fn second_loop_for_same_id_is_rejected() {
        let jobs = ActiveJobs::new();
        let root = CancellationToken::new();

        let _guard = jobs.begin(&id("a"), &root).unwrap();
        assert_eq!(
            jobs.begin(&id("a"), &root).unwrap_err(),
            JobError::AlreadyPolling(id("a"))
        );
        assert!(jobs.begin(&id("b"), &root).is_ok());
    }

    #[test]
    fn dropping_the_guard_frees_the_id() {
        let jobs = ActiveJobs::new();
        let root = CancellationToken::new();

        let guard = jobs.begin(&id("a"), &root).unwrap();
        assert!(jobs.is_active(&id("a")));
        drop(guard);
        assert!(!jobs.is_active(&id("a")));
        assert!(jobs.begin(&id("a"), &root).is_ok());
    }

    #[test]
    fn cancel_stops_one_loop_and_retires_its_id() {
        let jobs = ActiveJobs::new();
        let root = CancellationToken::new();

        let a = jobs.begin(&id("a"), &root).unwrap();
        let b = jobs.begin(&id("b"), &root).unwrap();

        assert!(jobs.cancel(&id("a")));
        assert!(a.token().is_cancelled());
        assert!(!b.token().is_cancelled());
        assert!(!root.is_cancelled());

        drop(a);
        assert_eq!(
            jobs.begin(&id("a"), &root).unwrap_err(),
            JobError::Inert(id("a"))
        );
    }

    #[test]
    fn cancelling_an_unknown_id_is_a_no_op() {
        let jobs = ActiveJobs::new();
        assert!(!jobs.cancel(&id("ghost")));
        assert!(!jobs.is_retired(&id("ghost")));
    }

    #[test]
    fn retired_ids_are_bounded_oldest_first() {
        let jobs = ActiveJobs::with_retired_capacity(2);
        for name in ["a", "b", "b", "c"] {
            jobs.retire(&id(name));
        }

        assert_eq!(jobs.retired_count(), 2);
        assert!(!jobs.is_retired(&id("a")));
        assert!(jobs.is_retired(&id("b")));
        assert!(jobs.is_retired(&id("c")));
        assert!(jobs.begin(&id("a"), &CancellationToken::new()).is_ok());
    }

    #[test]
    fn default_registry_keeps_many_retirements() {
        let jobs = ActiveJobs::new();
        for n in 0..DEFAULT_RETIRED_CAPACITY + 10 {
            jobs.retire(&id(&format!("job-{n}")));
        }
        assert_eq!(jobs.retired_count(), DEFAULT_RETIRED_CAPACITY);
        assert!(!jobs.is_retired(&id("job-0")));
        assert!(jobs.is_retired(&id(&format!("job-{}", DEFAULT_RETIRED_CAPACITY + 9))));
    }

    #[test]
    fn parent_cancellation_reaches_every_loop() {
        let jobs = ActiveJobs::new();
        let root = CancellationToken::new();
        let a = jobs.begin(&id("a"), &root).unwrap();
        let b = jobs.begin(&id("b"), &root).unwrap();

        root.cancel();
        assert!(a.token().is_cancelled());
        assert!(b.token().is_cancelled());
        assert_eq!(jobs.active_count(), 2);
    }
}
