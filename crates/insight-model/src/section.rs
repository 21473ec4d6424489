//! Canonical section keys
//!
//! Every brief carries exactly one section per canonical key, in canonical
//! order. The same key set joins a brief's AI sections to its human-insight
//! overlay.

use serde::{Deserialize, Serialize};

/// The eight canonical section keys, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKey {
    /// Executive summary
    ExecSummary,
    /// Background and context
    Context,
    /// Key drivers
    Drivers,
    /// Competitive landscape
    Competitive,
    /// Opportunities
    Opportunities,
    /// Risks
    Risks,
    /// Recommendations
    Recommendations,
    /// Notes
    Notes,
}

impl SectionKey {
    /// All canonical keys, in canonical order
    pub const CANONICAL: [SectionKey; 8] = [
        SectionKey::ExecSummary,
        SectionKey::Context,
        SectionKey::Drivers,
        SectionKey::Competitive,
        SectionKey::Opportunities,
        SectionKey::Risks,
        SectionKey::Recommendations,
        SectionKey::Notes,
    ];

    /// Stable wire/string form of the key
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::ExecSummary => "exec-summary",
            SectionKey::Context => "context",
            SectionKey::Drivers => "drivers",
            SectionKey::Competitive => "competitive",
            SectionKey::Opportunities => "opportunities",
            SectionKey::Risks => "risks",
            SectionKey::Recommendations => "recommendations",
            SectionKey::Notes => "notes",
        }
    }

    /// Human-readable section title
    #[inline]
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            SectionKey::ExecSummary => "Executive Summary",
            SectionKey::Context => "Context",
            SectionKey::Drivers => "Key Drivers",
            SectionKey::Competitive => "Competitive Landscape",
            SectionKey::Opportunities => "Opportunities",
            SectionKey::Risks => "Risks",
            SectionKey::Recommendations => "Recommendations",
            SectionKey::Notes => "Notes",
        }
    }

    /// Position of the key in canonical order
    #[inline]
    #[must_use]
    pub fn position(self) -> usize {
        Self::CANONICAL
            .iter()
            .position(|k| *k == self)
            .unwrap_or(Self::CANONICAL.len())
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a section key from its string form
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown section key: {0}")]
pub struct UnknownSectionKey(pub String);

impl std::str::FromStr for SectionKey {
    type Err = UnknownSectionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CANONICAL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSectionKey(s.to_string()))
    }
}
