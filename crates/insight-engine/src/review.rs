//! Review queue
//!
//! Owns `HumanReviewJob` records, keyed to briefs. At most one job exists
//! per brief; jobs list in creation order. The start transition validates
//! inside the job's entry guard, so two analysts racing for the same
//! pending job resolve to exactly one assignment.

use crate::error::EngineError;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use insight_model::{AnalystId, BriefId, HumanReviewJob, JobId, JobStatus};
use parking_lot::Mutex;

/// One analyst-authored section body, as submitted for review
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SectionDraft {
    /// Canonical key the body belongs to
    pub key: insight_model::SectionKey,
    /// Analyst-authored body
    pub content: String,
}

impl SectionDraft {
    /// Create a draft body for a key
    #[inline]
    #[must_use]
    pub fn new(key: insight_model::SectionKey, content: impl Into<String>) -> Self {
        Self {
            key,
            content: content.into(),
        }
    }
}

/// Owns `HumanReviewJob` aggregates
#[derive(Debug, Default)]
pub struct ReviewQueue {
    jobs: DashMap<JobId, HumanReviewJob>,
    by_brief: DashMap<BriefId, JobId>,
    /// Creation order for listing
    order: Mutex<Vec<JobId>>,
}

impl ReviewQueue {
    /// Create an empty queue
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: DashMap::new(),
            by_brief: DashMap::new(),
            order: Mutex::new(Vec::new()),
        }
    }

    /// Enqueue a job, enforcing at most one per brief
    ///
    /// Returns `false` and drops the job if its brief already has one.
    pub fn enqueue(&self, job: HumanReviewJob) -> bool {
        match self.by_brief.entry(job.brief_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(job.id);
                self.order.lock().push(job.id);
                self.jobs.insert(job.id, job);
                true
            }
        }
    }

    /// Fetch a job by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: JobId) -> Option<HumanReviewJob> {
        self.jobs.get(&id).map(|entry| entry.clone())
    }

    /// Fetch the job attached to a brief
    #[must_use]
    pub fn get_by_brief(&self, brief_id: BriefId) -> Option<HumanReviewJob> {
        let id = self.by_brief.get(&brief_id).map(|entry| *entry)?;
        self.get(id)
    }

    /// Jobs in creation order, optionally filtered by status
    #[must_use]
    pub fn list(&self, status: Option<JobStatus>) -> Vec<HumanReviewJob> {
        let order = self.order.lock().clone();
        order
            .into_iter()
            .filter_map(|id| self.get(id))
            .filter(|job| status.map_or(true, |s| job.status == s))
            .collect()
    }

    /// Claim a pending job for an analyst
    ///
    /// # Errors
    /// `NotFound` for an unknown job; `InvalidState` for any status other
    /// than pending — there is no silent reassignment, even to the same
    /// analyst.
    pub fn start(&self, id: JobId, analyst: &AnalystId) -> Result<HumanReviewJob, EngineError> {
        let mut entry = self.jobs.get_mut(&id).ok_or(EngineError::NotFound("job"))?;
        if entry.status != JobStatus::Pending {
            return Err(EngineError::invalid_state("job", entry.status.as_str()));
        }
        entry.status = JobStatus::InProgress;
        entry.assigned_to = Some(analyst.clone());
        entry.updated_at = Utc::now();
        tracing::info!(job = %entry.id, brief = %entry.brief_id, %analyst, "review started");
        Ok(entry.clone())
    }

    /// Mark a job completed
    ///
    /// # Errors
    /// `NotFound` for an unknown job; `InvalidState` if already completed.
    pub fn complete(&self, id: JobId) -> Result<HumanReviewJob, EngineError> {
        let mut entry = self.jobs.get_mut(&id).ok_or(EngineError::NotFound("job"))?;
        if entry.status == JobStatus::Completed {
            return Err(EngineError::invalid_state("job", entry.status.as_str()));
        }
        entry.status = JobStatus::Completed;
        entry.updated_at = Utc::now();
        tracing::info!(job = %entry.id, brief = %entry.brief_id, "review completed");
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enqueued(queue: &ReviewQueue, title: &str) -> HumanReviewJob {
        let job = HumanReviewJob::pending(BriefId::new(), title);
        assert!(queue.enqueue(job.clone()));
        job
    }

    #[test]
    fn at_most_one_job_per_brief() {
        let queue = ReviewQueue::new();
        let brief_id = BriefId::new();

        assert!(queue.enqueue(HumanReviewJob::pending(brief_id, "one")));
        assert!(!queue.enqueue(HumanReviewJob::pending(brief_id, "two")));
        assert_eq!(queue.list(None).len(), 1);
    }

    #[test]
    fn list_preserves_creation_order_and_filters() {
        let queue = ReviewQueue::new();
        let first = enqueued(&queue, "first");
        let second = enqueued(&queue, "second");

        let all = queue.list(None);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);

        queue.start(first.id, &AnalystId::from("analyst-1")).unwrap();
        let pending = queue.list(Some(JobStatus::Pending));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);
    }

    #[test]
    fn start_assigns_analyst() {
        let queue = ReviewQueue::new();
        let job = enqueued(&queue, "t");

        let started = queue.start(job.id, &AnalystId::from("analyst-1")).unwrap();
        assert_eq!(started.status, JobStatus::InProgress);
        assert_eq!(started.assigned_to, Some(AnalystId::from("analyst-1")));
    }

    #[test]
    fn start_rejects_non_pending_jobs() {
        let queue = ReviewQueue::new();
        let job = enqueued(&queue, "t");
        queue.start(job.id, &AnalystId::from("analyst-1")).unwrap();

        // no reassignment, not even to a different analyst
        let err = queue
            .start(job.id, &AnalystId::from("analyst-2"))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidState {
                entity: "job",
                current: "in-progress",
            }
        ));

        let job = queue.get(job.id).unwrap();
        assert_eq!(job.assigned_to, Some(AnalystId::from("analyst-1")));
    }

    #[test]
    fn start_unknown_job_is_not_found() {
        let queue = ReviewQueue::new();
        assert!(matches!(
            queue.start(JobId::new(), &AnalystId::from("a")),
            Err(EngineError::NotFound("job"))
        ));
    }

    #[test]
    fn complete_is_terminal() {
        let queue = ReviewQueue::new();
        let job = enqueued(&queue, "t");
        queue.start(job.id, &AnalystId::from("analyst-1")).unwrap();

        let completed = queue.complete(job.id).unwrap();
        assert_eq!(completed.status, JobStatus::Completed);
        assert!(queue.complete(job.id).is_err());
    }
}
