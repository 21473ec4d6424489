//! Insight briefs and their sections
//!
//! A brief is created together with exactly one research request and carries
//! the ordered canonical section set. For the human-enriched mode a second,
//! analyst-authored section set is overlaid after review completes.

use crate::ids::{AccountId, BriefId, RequestId};
use crate::request::InsightMode;
use crate::section::SectionKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insight brief status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BriefStatus {
    /// Created, no content yet
    Draft,
    /// Sections being generated
    Generating,
    /// Awaiting human-insight overlay (AiPlusHuman only)
    NeedsReview,
    /// Ready for the owner
    Completed,
}

impl BriefStatus {
    /// Whether the brief has all its AI sections installed
    #[inline]
    #[must_use]
    pub fn has_content(self) -> bool {
        matches!(self, BriefStatus::NeedsReview | BriefStatus::Completed)
    }

    /// Stable string form of the status
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BriefStatus::Draft => "draft",
            BriefStatus::Generating => "generating",
            BriefStatus::NeedsReview => "needs-review",
            BriefStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for BriefStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One titled, keyed section of a brief
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefSection {
    /// Canonical key; joins AI sections to the overlay
    pub key: SectionKey,
    /// Display title
    pub title: String,
    /// Section body
    pub content: String,
}

impl BriefSection {
    /// Create a section with the key's canonical title
    #[inline]
    #[must_use]
    pub fn new(key: SectionKey, content: impl Into<String>) -> Self {
        Self {
            key,
            title: key.title().to_string(),
            content: content.into(),
        }
    }
}

/// Stable public identifier for a shared brief
///
/// Assigned at most once per brief and never revoked; un-sharing and
/// re-sharing reuses the same slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareSlug(pub String);

impl ShareSlug {
    /// Wrap a slug string
    #[inline]
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Slug as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The structured research artifact produced for a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightBrief {
    /// Brief identifier
    pub id: BriefId,
    /// The request this brief answers (1:1)
    pub request_id: RequestId,
    /// Owning account
    pub account_id: AccountId,
    /// Title copied from the request
    pub title: String,
    /// Insight mode copied from the request; immutable thereafter
    pub mode: InsightMode,
    /// Lifecycle status
    pub status: BriefStatus,
    /// AI sections in canonical order; empty until generation lands
    pub sections: Vec<BriefSection>,
    /// Analyst-authored overlay; present iff mode is AiPlusHuman and a
    /// review job has completed
    pub human_insight_sections: Option<Vec<BriefSection>>,
    /// Whether the brief is currently reachable via its share slug
    pub is_shareable: bool,
    /// Stable public identifier, assigned on first share
    pub share_slug: Option<ShareSlug>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last mutation time
    pub updated_at: DateTime<Utc>,
}

impl InsightBrief {
    /// Create a draft brief for a request
    #[must_use]
    pub fn draft(
        request_id: RequestId,
        account_id: AccountId,
        title: impl Into<String>,
        mode: InsightMode,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BriefId::new(),
            request_id,
            account_id,
            title: title.into(),
            mode,
            status: BriefStatus::Draft,
            sections: Vec::new(),
            human_insight_sections: None,
            is_shareable: false,
            share_slug: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Find an AI section by key
    #[inline]
    #[must_use]
    pub fn section(&self, key: SectionKey) -> Option<&BriefSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Find a mutable AI section by key
    #[inline]
    pub fn section_mut(&mut self, key: SectionKey) -> Option<&mut BriefSection> {
        self.sections.iter_mut().find(|s| s.key == key)
    }
}
