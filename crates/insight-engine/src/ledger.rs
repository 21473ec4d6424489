//! Credit ledger
//!
//! Per-account balances for the two metered currencies. `reserve` is the
//! only debit path: check and decrement happen inside the map's exclusive
//! entry guard, so two concurrent reservations against one account cannot
//! both observe a sufficient balance. Accounts with no ledger entry behave
//! as empty balances rather than as a distinct error.

use crate::error::LedgerError;
use dashmap::DashMap;
use insight_model::{AccountId, CreditAccount, CreditCurrency, Plan};

/// Tracks per-account credit balances with atomic debits
#[derive(Debug, Default)]
pub struct CreditLedger {
    accounts: DashMap<AccountId, CreditAccount>,
}

impl CreditLedger {
    /// Create an empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Provision an account with a plan's credit grants
    ///
    /// Opening an already-open account is a no-op; existing balances are
    /// never clobbered.
    pub fn open(&self, account: AccountId, plan: &Plan) {
        self.accounts.entry(account).or_insert_with(|| plan.grants());
        tracing::debug!(%account, plan = plan.id, "ledger account opened");
    }

    /// Add credits to an account, creating it if absent
    pub fn grant(&self, account: AccountId, currency: CreditCurrency, amount: u32) {
        let mut entry = self.accounts.entry(account).or_default();
        let balance = entry.balance_mut(currency);
        *balance = balance.saturating_add(amount);
    }

    /// Snapshot of an account's balances
    #[inline]
    #[must_use]
    pub fn balance(&self, account: AccountId) -> CreditAccount {
        self.accounts
            .get(&account)
            .map(|entry| *entry)
            .unwrap_or_default()
    }

    /// Atomically reserve `amount` credits of `currency`
    ///
    /// # Errors
    /// `InsufficientCredits` with the current balance if the account cannot
    /// cover the amount; the balance is left untouched.
    pub fn reserve(
        &self,
        account: AccountId,
        currency: CreditCurrency,
        amount: u32,
    ) -> Result<(), LedgerError> {
        let mut entry = self.accounts.entry(account).or_default();
        let balance = entry.balance_mut(currency);
        if *balance < amount {
            return Err(LedgerError::InsufficientCredits {
                currency,
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        tracing::debug!(%account, %currency, amount, remaining = *balance, "credits reserved");
        Ok(())
    }

    /// Return previously reserved credits
    ///
    /// Used to unwind a partially-reserved submission; not a user-facing
    /// top-up path.
    pub fn refund(&self, account: AccountId, currency: CreditCurrency, amount: u32) {
        self.grant(account, currency, amount);
        tracing::debug!(%account, %currency, amount, "credits refunded");
    }
}
