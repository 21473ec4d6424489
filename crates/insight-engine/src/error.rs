//! Error types for the lifecycle engine
//!
//! Provides the caller-facing taxonomy:
//! - Input validation failures
//! - Missing authentication
//! - Not-found lookups (never leaking another account's data)
//! - Credit shortfalls with required vs. available amounts
//! - Illegal state transitions, carrying the current status
//! - External generation failures

use insight_model::{CreditCurrency, SectionKey};

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed or missing input, surfaced verbatim
    #[error("validation failed: {0}")]
    Validation(String),

    /// No authenticated identity on the session
    #[error("not authenticated")]
    NotAuthenticated,

    /// Id does not resolve to an aggregate the caller may see
    ///
    /// Deliberately generic: a brief owned by another account reports the
    /// same way as one that never existed.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Credit reservation rejected
    #[error("credit error: {0}")]
    Credits(#[from] LedgerError),

    /// Operation illegal for the aggregate's current status
    #[error("invalid state: {entity} is {current}")]
    InvalidState {
        /// Aggregate kind
        entity: &'static str,
        /// Status at the time of the call
        current: &'static str,
    },

    /// The external generation call failed; the request is terminal
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl EngineError {
    /// Shorthand for a validation failure
    #[inline]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for an invalid-state failure
    #[inline]
    #[must_use]
    pub fn invalid_state(entity: &'static str, current: &'static str) -> Self {
        Self::InvalidState { entity, current }
    }

    /// Whether a fresh submission could succeed where this call failed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

/// Credit ledger errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Balance below the required amount; no mutation performed
    #[error("insufficient {currency} credits: required {required}, available {available}")]
    InsufficientCredits {
        /// Currency that fell short
        currency: CreditCurrency,
        /// Amount the operation needed
        required: u32,
        /// Balance at the time of the check
        available: u32,
    },
}

/// Errors from the external generation boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// The backend reported a failure
    #[error("backend failure: {0}")]
    Backend(String),

    /// The call exceeded the configured timeout
    #[error("generation timed out after {timeout_secs}s")]
    TimedOut {
        /// Configured timeout that elapsed
        timeout_secs: u64,
    },

    /// The backend returned fewer than the eight canonical sections
    #[error("incomplete generation output: missing {missing:?}")]
    Incomplete {
        /// Canonical keys absent from the output
        missing: Vec<SectionKey>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_credits_display() {
        let err = LedgerError::InsufficientCredits {
            currency: CreditCurrency::HumanInsight,
            required: 1,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "insufficient human-insight credits: required 1, available 0"
        );
    }

    #[test]
    fn invalid_state_display() {
        let err = EngineError::invalid_state("brief", "generating");
        assert_eq!(err.to_string(), "invalid state: brief is generating");
    }

    #[test]
    fn not_found_is_generic() {
        let err = EngineError::NotFound("brief");
        assert_eq!(err.to_string(), "brief not found");
    }

    #[test]
    fn only_generation_failures_are_retryable() {
        assert!(EngineError::Generation(GenerationError::Backend("down".into())).is_retryable());
        assert!(!EngineError::NotAuthenticated.is_retryable());
        assert!(!EngineError::validation("empty title").is_retryable());
    }
}
