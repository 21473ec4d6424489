//! Session context threaded through every coordinator call
//!
//! Authentication itself is an external collaborator; the engine only
//! consumes the identity it produced. A session without an identity fails
//! every operation with `NotAuthenticated` before any state change.

use crate::error::EngineError;
use insight_model::{AccountId, AnalystId};

/// Owner-side session context
#[derive(Debug, Clone)]
pub struct Session {
    account: Option<AccountId>,
}

impl Session {
    /// Session for an authenticated account
    #[inline]
    #[must_use]
    pub fn authenticated(account: AccountId) -> Self {
        Self {
            account: Some(account),
        }
    }

    /// Session with no identity
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self { account: None }
    }

    /// The authenticated account, or `NotAuthenticated`
    #[inline]
    pub fn account(&self) -> Result<AccountId, EngineError> {
        self.account.ok_or(EngineError::NotAuthenticated)
    }
}

/// Analyst-side session context
#[derive(Debug, Clone)]
pub struct AnalystSession {
    analyst: Option<AnalystId>,
}

impl AnalystSession {
    /// Session for an authenticated analyst
    #[inline]
    #[must_use]
    pub fn authenticated(analyst: impl Into<AnalystId>) -> Self {
        Self {
            analyst: Some(analyst.into()),
        }
    }

    /// Session with no identity
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self { analyst: None }
    }

    /// The authenticated analyst, or `NotAuthenticated`
    #[inline]
    pub fn analyst(&self) -> Result<&AnalystId, EngineError> {
        self.analyst.as_ref().ok_or(EngineError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_session_yields_account() {
        let account = AccountId::new();
        let session = Session::authenticated(account);
        assert_eq!(session.account().unwrap(), account);
    }

    #[test]
    fn anonymous_session_is_rejected() {
        assert!(matches!(
            Session::anonymous().account(),
            Err(EngineError::NotAuthenticated)
        ));
        assert!(matches!(
            AnalystSession::anonymous().analyst(),
            Err(EngineError::NotAuthenticated)
        ));
    }
}
