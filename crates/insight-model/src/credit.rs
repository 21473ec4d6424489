//! Credit accounts and plans
//!
//! Two currencies are metered independently: AI credits (one per brief
//! generation) and human-insight credits (one per review enrichment).
//! Balances are unsigned, so a negative balance is unrepresentable.

use serde::{Deserialize, Serialize};

/// The two metered currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditCurrency {
    /// Debited once per brief generation
    Ai,
    /// Debited additionally for AiPlusHuman submissions
    HumanInsight,
}

impl std::fmt::Display for CreditCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditCurrency::Ai => f.write_str("ai"),
            CreditCurrency::HumanInsight => f.write_str("human-insight"),
        }
    }
}

/// Per-account credit balances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAccount {
    /// AI credit balance
    pub ai_credits: u32,
    /// Human-insight credit balance
    pub human_insight_credits: u32,
}

impl CreditAccount {
    /// Create an account with the given balances
    #[inline]
    #[must_use]
    pub fn new(ai_credits: u32, human_insight_credits: u32) -> Self {
        Self {
            ai_credits,
            human_insight_credits,
        }
    }

    /// Balance for one currency
    #[inline]
    #[must_use]
    pub fn balance(&self, currency: CreditCurrency) -> u32 {
        match currency {
            CreditCurrency::Ai => self.ai_credits,
            CreditCurrency::HumanInsight => self.human_insight_credits,
        }
    }

    /// Mutable balance for one currency
    #[inline]
    pub fn balance_mut(&mut self, currency: CreditCurrency) -> &mut u32 {
        match currency {
            CreditCurrency::Ai => &mut self.ai_credits,
            CreditCurrency::HumanInsight => &mut self.human_insight_credits,
        }
    }
}

/// A subscription plan and its credit grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Stable plan identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// AI credits granted on open
    pub ai_credits: u32,
    /// Human-insight credits granted on open
    pub human_insight_credits: u32,
    /// Monthly price in whole dollars
    pub price: u32,
}

impl Plan {
    /// Free tier: AI-only research
    pub const FREE: Plan = Plan {
        id: "free",
        name: "Free",
        ai_credits: 5,
        human_insight_credits: 0,
        price: 0,
    };

    /// Pro tier
    pub const PRO: Plan = Plan {
        id: "pro",
        name: "Pro",
        ai_credits: 50,
        human_insight_credits: 10,
        price: 99,
    };

    /// Enterprise tier
    pub const ENTERPRISE: Plan = Plan {
        id: "enterprise",
        name: "Enterprise",
        ai_credits: 500,
        human_insight_credits: 100,
        price: 999,
    };

    /// The stock plan catalog
    pub const CATALOG: [Plan; 3] = [Plan::FREE, Plan::PRO, Plan::ENTERPRISE];

    /// Look up a plan by id
    #[must_use]
    pub fn by_id(id: &str) -> Option<&'static Plan> {
        Self::CATALOG.iter().find(|p| p.id == id)
    }

    /// Initial balances granted by this plan
    #[inline]
    #[must_use]
    pub fn grants(&self) -> CreditAccount {
        CreditAccount::new(self.ai_credits, self.human_insight_credits)
    }
}
