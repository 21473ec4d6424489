//! Request intake
//!
//! Validates a submission payload and reserves its credits before any
//! aggregate exists. Reservation is all-or-nothing: for the human-enriched
//! mode the AI credit is reserved first and rolled back if the
//! human-insight reservation fails, so a rejected submission leaves the
//! ledger exactly as it found it.

use crate::error::EngineError;
use crate::ledger::CreditLedger;
use crate::requests::RequestStore;
use insight_model::{AccountId, CreditCurrency, RequestPayload, ResearchRequest};
use std::sync::Arc;

/// Validates and persists new research requests
#[derive(Debug)]
pub struct RequestIntake {
    ledger: Arc<CreditLedger>,
    requests: Arc<RequestStore>,
}

impl RequestIntake {
    /// Create an intake over the shared ledger and request store
    #[inline]
    #[must_use]
    pub fn new(ledger: Arc<CreditLedger>, requests: Arc<RequestStore>) -> Self {
        Self { ledger, requests }
    }

    /// Validate a payload without side effects
    ///
    /// # Errors
    /// `Validation` naming the first offending field. The shape enums are
    /// closed types, so only the free-text fields need checking.
    pub fn validate(payload: &RequestPayload) -> Result<(), EngineError> {
        if payload.title.trim().is_empty() {
            return Err(EngineError::validation("title must not be empty"));
        }
        if payload.core_question.trim().is_empty() {
            return Err(EngineError::validation("core question must not be empty"));
        }
        if payload.subquestions.iter().any(|q| q.trim().is_empty()) {
            return Err(EngineError::validation("sub-questions must not be empty"));
        }
        Ok(())
    }

    /// Validate, reserve credits, and persist a pending request
    ///
    /// # Errors
    /// `Validation` for a malformed payload, `Credits` when the account
    /// cannot cover the submission. On any error no request exists and no
    /// credit stays reserved.
    pub fn submit(
        &self,
        account: AccountId,
        payload: RequestPayload,
    ) -> Result<ResearchRequest, EngineError> {
        Self::validate(&payload)?;

        self.ledger.reserve(account, CreditCurrency::Ai, 1)?;
        if payload.insight_mode.requires_review() {
            if let Err(e) = self.ledger.reserve(account, CreditCurrency::HumanInsight, 1) {
                self.ledger.refund(account, CreditCurrency::Ai, 1);
                return Err(e.into());
            }
        }

        let request = ResearchRequest::from_payload(account, payload);
        self.requests.insert(request.clone());
        tracing::info!(
            request = %request.id,
            %account,
            mode = ?request.insight_mode,
            "request accepted"
        );
        Ok(request)
    }
}
