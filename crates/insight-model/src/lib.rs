//! Insight Model - aggregate types for the brief lifecycle engine
//!
//! Defines the four aggregates and their supporting types:
//! - Research requests and their output-shape parameters
//! - Insight briefs with their canonical section set
//! - Human review jobs
//! - Credit accounts and plans
//!
//! Every status is a closed enum; transitions are validated by the
//! coordinator in `insight-engine`, not here.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod brief;
pub mod credit;
pub mod ids;
pub mod request;
pub mod review;
pub mod section;

// Re-exports for convenience
pub use brief::{BriefSection, BriefStatus, InsightBrief, ShareSlug};
pub use credit::{CreditAccount, CreditCurrency, Plan};
pub use ids::{AccountId, AnalystId, BriefId, JobId, RequestId};
pub use request::{
    Depth, InsightMode, OutputType, RequestPayload, RequestStatus, ResearchRequest,
    TargetAudience, TimeHorizon,
};
pub use review::{HumanReviewJob, JobStatus};
pub use section::{SectionKey, UnknownSectionKey};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
