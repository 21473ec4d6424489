//! Insight Engine - brief lifecycle & review coordination
//!
//! The coordinator ties four owned components together:
//! - `CreditLedger` meters submissions against per-account balances
//! - `RequestStore` / `BriefStore` own the request and brief aggregates
//! - `ReviewQueue` owns the human review jobs
//! - `BriefGenerationClient` is the external boundary producing prose
//!
//! # Example
//!
//! ```rust,ignore
//! use insight_engine::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), insight_engine::EngineError> {
//! let engine = LifecycleCoordinator::new(
//!     EngineConfig::new(),
//!     Arc::new(CannedGenerationClient::new()),
//! );
//!
//! let account = AccountId::new();
//! engine.open_account(account, &Plan::PRO);
//! let session = Session::authenticated(account);
//!
//! let payload = RequestPayload::new("Q3 Expansion", "Should we enter the DACH market?");
//! let request = engine.submit_request(&session, payload).await?;
//! let brief = engine.get_brief_by_request(&session, request.id)?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod briefs;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod generation;
pub mod intake;
pub mod ledger;
pub mod requests;
pub mod review;
pub mod session;

// Re-exports for convenience
pub use briefs::BriefStore;
pub use config::EngineConfig;
pub use coordinator::LifecycleCoordinator;
pub use error::{EngineError, GenerationError, LedgerError};
pub use generation::{
    BriefGenerationClient, CannedGenerationClient, GeneratedSections, GenerationRequest,
};
pub use intake::RequestIntake;
pub use ledger::CreditLedger;
pub use requests::RequestStore;
pub use review::{ReviewQueue, SectionDraft};
pub use session::{AnalystSession, Session};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the lifecycle engine
    pub use crate::{
        AnalystSession, CannedGenerationClient, EngineConfig, EngineError, LifecycleCoordinator,
        SectionDraft, Session,
    };
    pub use insight_model::{
        AccountId, BriefId, BriefStatus, InsightMode, JobStatus, Plan, RequestPayload,
        RequestStatus, SectionKey,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
