//! Research requests and their output-shape parameters
//!
//! A request is created on submission, mutated only by the coordinator, and
//! never deleted. Its parameter enums are closed: malformed values cannot be
//! represented past the engine boundary.

use crate::ids::{AccountId, RequestId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Requested insight mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightMode {
    /// AI-generated brief only
    AiOnly,
    /// AI-generated brief enriched by a human analyst
    AiPlusHuman,
}

impl InsightMode {
    /// Whether this mode routes the brief through human review
    #[inline]
    #[must_use]
    pub fn requires_review(self) -> bool {
        matches!(self, InsightMode::AiPlusHuman)
    }
}

/// Output format of the brief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputType {
    /// Structured strategy brief
    StrategyBrief,
    /// Market analysis report
    MarketAnalysis,
    /// Competitive landscape scan
    CompetitiveScan,
    /// Trend outlook
    TrendOutlook,
}

/// Intended audience for the brief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetAudience {
    /// Executive leadership
    Executives,
    /// Board and investors
    Investors,
    /// Product teams
    ProductTeam,
    /// General internal audience
    Internal,
}

/// Research depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Depth {
    /// High-level summary
    Summary,
    /// Standard depth
    Standard,
    /// Deep dive
    Deep,
}

/// Time horizon the research should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeHorizon {
    /// Next quarter
    Quarter,
    /// Next year
    OneYear,
    /// Next three years
    ThreeYears,
    /// Five years and beyond
    FiveYearsPlus,
}

/// Research request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    /// Accepted, generation not yet started
    Pending,
    /// Generation in flight
    Generating,
    /// Brief produced
    Completed,
    /// Generation failed; terminal, resubmit to retry
    Failed,
}

impl RequestStatus {
    /// Stable string form of the status
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Generating => "generating",
            RequestStatus::Completed => "completed",
            RequestStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload submitted to create a research request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestPayload {
    /// Short title for the request
    pub title: String,
    /// The core research question
    pub core_question: String,
    /// Optional free-text context
    pub context: Option<String>,
    /// Output format
    pub output_type: OutputType,
    /// Intended audience
    pub target_audience: TargetAudience,
    /// Research depth
    pub depth: Depth,
    /// Time horizon
    pub time_horizon: TimeHorizon,
    /// Ordered sub-questions
    pub subquestions: Vec<String>,
    /// Requested insight mode
    pub insight_mode: InsightMode,
}

impl RequestPayload {
    /// Create a payload with default shape parameters
    #[must_use]
    pub fn new(title: impl Into<String>, core_question: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            core_question: core_question.into(),
            context: None,
            output_type: OutputType::StrategyBrief,
            target_audience: TargetAudience::Executives,
            depth: Depth::Standard,
            time_horizon: TimeHorizon::OneYear,
            subquestions: Vec::new(),
            insight_mode: InsightMode::AiOnly,
        }
    }

    /// With free-text context
    #[inline]
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// With insight mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: InsightMode) -> Self {
        self.insight_mode = mode;
        self
    }

    /// With research depth
    #[inline]
    #[must_use]
    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// With an additional sub-question
    #[inline]
    #[must_use]
    pub fn with_subquestion(mut self, question: impl Into<String>) -> Self {
        self.subquestions.push(question.into());
        self
    }
}

/// A submitted research request (append-only aggregate)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// Request identifier
    pub id: RequestId,
    /// Owning account
    pub account_id: AccountId,
    /// Short title
    pub title: String,
    /// The core research question
    pub core_question: String,
    /// Optional free-text context
    pub context: Option<String>,
    /// Output format
    pub output_type: OutputType,
    /// Intended audience
    pub target_audience: TargetAudience,
    /// Research depth
    pub depth: Depth,
    /// Time horizon
    pub time_horizon: TimeHorizon,
    /// Ordered sub-questions
    pub subquestions: Vec<String>,
    /// Requested insight mode
    pub insight_mode: InsightMode,
    /// Lifecycle status
    pub status: RequestStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

impl ResearchRequest {
    /// Create a pending request from a validated payload
    #[must_use]
    pub fn from_payload(account_id: AccountId, payload: RequestPayload) -> Self {
        let now = Utc::now();
        Self {
            id: RequestId::new(),
            account_id,
            title: payload.title,
            core_question: payload.core_question,
            context: payload.context,
            output_type: payload.output_type,
            target_audience: payload.target_audience,
            depth: payload.depth,
            time_horizon: payload.time_horizon,
            subquestions: payload.subquestions,
            insight_mode: payload.insight_mode,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
