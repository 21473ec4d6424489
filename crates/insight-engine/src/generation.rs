//! External generation boundary
//!
//! The engine never produces prose itself; it hands a request's parameters
//! to a [`BriefGenerationClient`] and expects back a body for every
//! canonical section key. Partial output is treated as failure, never
//! surfaced as a completed brief.

use crate::error::GenerationError;
use async_trait::async_trait;
use insight_model::{BriefSection, ResearchRequest, SectionKey};
use insight_model::{Depth, OutputType, TargetAudience, TimeHorizon};

/// Parameters handed to the generation backend
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Request title
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
}

impl From<&ResearchRequest> for GenerationRequest {
    fn from(request: &ResearchRequest) -> Self {
        Self {
            title: request.title.clone(),
            core_question: request.core_question.clone(),
            context: request.context.clone(),
            output_type: request.output_type,
            target_audience: request.target_audience,
            depth: request.depth,
            time_horizon: request.time_horizon,
            subquestions: request.subquestions.clone(),
        }
    }
}

/// A complete set of generated section bodies
///
/// Construction enforces full canonical coverage; the inner sections are
/// always in canonical order with no duplicates.
#[derive(Debug, Clone)]
pub struct GeneratedSections(Vec<BriefSection>);

impl GeneratedSections {
    /// Build from per-key bodies, validating coverage
    ///
    /// # Errors
    /// `GenerationError::Incomplete` listing the canonical keys that have
    /// no body. Duplicate keys keep the first body.
    pub fn from_bodies(
        bodies: impl IntoIterator<Item = (SectionKey, String)>,
    ) -> Result<Self, GenerationError> {
        let mut by_key: [Option<String>; 8] = Default::default();
        for (key, body) in bodies {
            let slot = &mut by_key[key.position()];
            if slot.is_none() {
                *slot = Some(body);
            }
        }

        let missing: Vec<SectionKey> = SectionKey::CANONICAL
            .iter()
            .copied()
            .filter(|k| by_key[k.position()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(GenerationError::Incomplete { missing });
        }

        let sections = SectionKey::CANONICAL
            .iter()
            .map(|&key| {
                let body = by_key[key.position()].take().unwrap_or_default();
                BriefSection::new(key, body)
            })
            .collect();
        Ok(Self(sections))
    }

    /// Consume into the ordered section vector
    #[inline]
    #[must_use]
    pub fn into_sections(self) -> Vec<BriefSection> {
        self.0
    }

    /// Borrow the ordered sections
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[BriefSection] {
        &self.0
    }
}

/// The external AI call that produces section prose
///
/// Implementations may be slow and may fail; callers must not hold any
/// aggregate guard across these calls.
#[async_trait]
pub trait BriefGenerationClient: Send + Sync {
    /// Generate a body for every canonical section key
    async fn generate_brief(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedSections, GenerationError>;

    /// Generate a replacement body for one section
    async fn regenerate_section(
        &self,
        request: &GenerationRequest,
        key: SectionKey,
        extra_instructions: Option<&str>,
    ) -> Result<String, GenerationError>;
}

/// Deterministic backend that derives prose from the request parameters
///
/// Stands in for the real model call in the demo binary and in tests that
/// only care about lifecycle behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedGenerationClient;

impl CannedGenerationClient {
    /// Create a canned client
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn body_for(request: &GenerationRequest, key: SectionKey) -> String {
        format!(
            "{} for \"{}\": {} (depth: {:?}, horizon: {:?})",
            key.title(),
            request.title,
            request.core_question,
            request.depth,
            request.time_horizon,
        )
    }
}

#[async_trait]
impl BriefGenerationClient for CannedGenerationClient {
    async fn generate_brief(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedSections, GenerationError> {
        GeneratedSections::from_bodies(
            SectionKey::CANONICAL
                .iter()
                .map(|&key| (key, Self::body_for(request, key))),
        )
    }

    async fn regenerate_section(
        &self,
        request: &GenerationRequest,
        key: SectionKey,
        extra_instructions: Option<&str>,
    ) -> Result<String, GenerationError> {
        let mut body = Self::body_for(request, key);
        if let Some(instructions) = extra_instructions {
            body.push_str(" [");
            body.push_str(instructions);
            body.push(']');
        }
        Ok(format!("Regenerated {body}"))
    }
}
