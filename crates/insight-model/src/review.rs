//! Human review jobs
//!
//! One job per AiPlusHuman brief, created the instant the brief reaches
//! needs-review. The brief title is denormalized for display and is not
//! authoritative.

use crate::ids::{AnalystId, BriefId, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    /// Awaiting an analyst
    Pending,
    /// Claimed by an analyst
    InProgress,
    /// Insight submitted
    Completed,
}

impl JobStatus {
    /// Stable string form of the status
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit of work tracking an analyst's enrichment of one brief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanReviewJob {
    /// Job identifier
    pub id: JobId,
    /// The brief under review (exactly one job per brief)
    pub brief_id: BriefId,
    /// Denormalized brief title for queue display
    pub brief_title: String,
    /// Lifecycle status
    pub status: JobStatus,
    /// Claiming analyst, set on start
    pub assigned_to: Option<AnalystId>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

impl HumanReviewJob {
    /// Create a pending job for a brief
    #[must_use]
    pub fn pending(brief_id: BriefId, brief_title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            brief_id,
            brief_title: brief_title.into(),
            status: JobStatus::Pending,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_is_pending_and_unassigned() {
        let job = HumanReviewJob::pending(BriefId::new(), "Q3 Expansion");
        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.assigned_to.is_none());
        assert_eq!(job.brief_title, "Q3 Expansion");
    }

    #[test]
    fn status_serde_is_kebab_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
