//! Lifecycle coordinator
//!
//! The single entry point tying the ledger, the three aggregate stores, and
//! the generation boundary together. Every exposed operation:
//! - resolves the session identity first (no identity, no state change)
//! - validates transitions against the aggregate's current status
//! - either fully applies or leaves every aggregate exactly as before
//!
//! The generation call is the only operation with external latency; the
//! brief is parked in `Generating` and its guard released before the call,
//! so share toggles and reads on the same brief are never blocked on the
//! backend.

use crate::config::EngineConfig;
use crate::error::{EngineError, GenerationError};
use crate::generation::{BriefGenerationClient, GeneratedSections, GenerationRequest};
use crate::intake::RequestIntake;
use crate::ledger::CreditLedger;
use crate::briefs::BriefStore;
use crate::requests::RequestStore;
use crate::review::{ReviewQueue, SectionDraft};
use crate::session::{AnalystSession, Session};
use insight_model::{
    AccountId, BriefId, BriefSection, BriefStatus, HumanReviewJob, InsightBrief, JobId, JobStatus,
    Plan, RequestId, RequestPayload, RequestStatus, ResearchRequest, SectionKey, ShareSlug,
};
use rand::distr::{Alphanumeric, SampleString};
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates the request → brief → review lifecycle
pub struct LifecycleCoordinator {
    config: EngineConfig,
    ledger: Arc<CreditLedger>,
    requests: Arc<RequestStore>,
    briefs: Arc<BriefStore>,
    reviews: Arc<ReviewQueue>,
    generator: Arc<dyn BriefGenerationClient>,
    intake: RequestIntake,
}

impl std::fmt::Debug for LifecycleCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleCoordinator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LifecycleCoordinator {
    /// Create a coordinator with fresh stores over the given backend
    #[must_use]
    pub fn new(config: EngineConfig, generator: Arc<dyn BriefGenerationClient>) -> Self {
        let ledger = Arc::new(CreditLedger::new());
        let requests = Arc::new(RequestStore::new());
        let intake = RequestIntake::new(Arc::clone(&ledger), Arc::clone(&requests));
        Self {
            config,
            ledger,
            requests,
            briefs: Arc::new(BriefStore::new()),
            reviews: Arc::new(ReviewQueue::new()),
            generator,
            intake,
        }
    }

    /// The shared credit ledger (account provisioning, balance reads)
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &CreditLedger {
        &self.ledger
    }

    /// Provision an account against a plan
    pub fn open_account(&self, account: AccountId, plan: &Plan) {
        self.ledger.open(account, plan);
    }

    // ------------------------------------------------------------------
    // Submission and generation
    // ------------------------------------------------------------------

    /// Submit a research request and drive it through generation
    ///
    /// Debits credits, creates the request and its brief, invokes the
    /// generation backend, and (for the human-enriched mode) enqueues the
    /// review job. Returns the request in its terminal-successful state.
    ///
    /// # Errors
    /// `Validation`, `Credits` (nothing created), or `Generation` (request
    /// recorded as failed, brief never exposed as ready).
    pub async fn submit_request(
        &self,
        session: &Session,
        payload: RequestPayload,
    ) -> Result<ResearchRequest, EngineError> {
        let account = session.account()?;
        let request = self.intake.submit(account, payload)?;

        // request enters generating; its brief materializes as a draft
        let request = self
            .requests
            .update(request.id, |r| r.status = RequestStatus::Generating)
            .ok_or(EngineError::NotFound("request"))?;
        let brief = InsightBrief::draft(
            request.id,
            account,
            request.title.clone(),
            request.insight_mode,
        );
        let brief_id = brief.id;
        self.briefs.insert(brief);
        self.briefs
            .update(brief_id, |b| b.status = BriefStatus::Generating);
        tracing::info!(request = %request.id, brief = %brief_id, "generation dispatched");

        // no aggregate guard is held across this await
        let params = GenerationRequest::from(&request);
        match self.generate_full(&params).await {
            Ok(sections) => self.apply_generated(&request, brief_id, sections),
            Err(e) => {
                self.requests
                    .update(request.id, |r| r.status = RequestStatus::Failed);
                tracing::warn!(request = %request.id, error = %e, "generation failed");
                Err(e.into())
            }
        }
    }

    fn apply_generated(
        &self,
        request: &ResearchRequest,
        brief_id: BriefId,
        sections: GeneratedSections,
    ) -> Result<ResearchRequest, EngineError> {
        let next = if request.insight_mode.requires_review() {
            BriefStatus::NeedsReview
        } else {
            BriefStatus::Completed
        };
        let brief = self
            .briefs
            .update(brief_id, |b| {
                b.sections = sections.into_sections();
                b.status = next;
            })
            .ok_or(EngineError::NotFound("brief"))?;

        if request.insight_mode.requires_review() {
            let job = HumanReviewJob::pending(brief.id, brief.title.clone());
            if self.reviews.enqueue(job) {
                tracing::info!(brief = %brief.id, "review job enqueued");
            }
        }

        let request = self
            .requests
            .update(request.id, |r| r.status = RequestStatus::Completed)
            .ok_or(EngineError::NotFound("request"))?;
        tracing::info!(request = %request.id, brief = %brief.id, status = %brief.status, "brief ready");
        Ok(request)
    }

    async fn generate_full(
        &self,
        params: &GenerationRequest,
    ) -> Result<GeneratedSections, GenerationError> {
        let timeout_secs = self.config.generation_timeout_secs;
        match tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.generator.generate_brief(params),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GenerationError::TimedOut { timeout_secs }),
        }
    }

    // ------------------------------------------------------------------
    // Owner-scoped reads
    // ------------------------------------------------------------------

    /// Fetch a request the session owns
    pub fn get_request(
        &self,
        session: &Session,
        id: RequestId,
    ) -> Result<ResearchRequest, EngineError> {
        let account = session.account()?;
        self.requests
            .get(id)
            .filter(|r| r.account_id == account)
            .ok_or(EngineError::NotFound("request"))
    }

    /// All requests the session owns, in creation order
    pub fn list_requests(&self, session: &Session) -> Result<Vec<ResearchRequest>, EngineError> {
        Ok(self.requests.list_for(session.account()?))
    }

    /// Fetch a brief the session owns
    pub fn get_brief(&self, session: &Session, id: BriefId) -> Result<InsightBrief, EngineError> {
        let account = session.account()?;
        self.briefs
            .get(id)
            .filter(|b| b.account_id == account)
            .ok_or(EngineError::NotFound("brief"))
    }

    /// All briefs the session owns, in creation order
    pub fn list_briefs(&self, session: &Session) -> Result<Vec<InsightBrief>, EngineError> {
        Ok(self.briefs.list_for(session.account()?))
    }

    /// Fetch the brief created for a request the session owns
    pub fn get_brief_by_request(
        &self,
        session: &Session,
        request_id: RequestId,
    ) -> Result<InsightBrief, EngineError> {
        let account = session.account()?;
        self.briefs
            .get_by_request(request_id)
            .filter(|b| b.account_id == account)
            .ok_or(EngineError::NotFound("brief"))
    }

    // ------------------------------------------------------------------
    // Section regeneration
    // ------------------------------------------------------------------

    /// Replace one section's content with a freshly generated body
    ///
    /// Leaves every other section, the human-insight overlay, and the brief
    /// status untouched. Regeneration is unmetered.
    ///
    /// # Errors
    /// `NotFound` for an unknown or foreign brief, `InvalidState` while the
    /// brief is still draft/generating, `Generation` if the backend fails.
    pub async fn regenerate_section(
        &self,
        session: &Session,
        brief_id: BriefId,
        key: SectionKey,
        extra_instructions: Option<&str>,
    ) -> Result<InsightBrief, EngineError> {
        let brief = self.get_brief(session, brief_id)?;
        if !brief.status.has_content() {
            return Err(EngineError::invalid_state("brief", brief.status.as_str()));
        }
        if brief.section(key).is_none() {
            return Err(EngineError::NotFound("section"));
        }
        let request = self
            .requests
            .get(brief.request_id)
            .ok_or(EngineError::NotFound("request"))?;

        let params = GenerationRequest::from(&request);
        let timeout_secs = self.config.regeneration_timeout_secs;
        let body = match tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            self.generator
                .regenerate_section(&params, key, extra_instructions),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => return Err(GenerationError::TimedOut { timeout_secs }.into()),
        };

        // revalidate under the entry guard; the brief may have moved while
        // the backend call was in flight
        let updated = self
            .briefs
            .try_update(brief_id, |b| {
                if !b.status.has_content() {
                    return Err(EngineError::invalid_state("brief", b.status.as_str()));
                }
                match b.section_mut(key) {
                    Some(section) => {
                        section.content = body;
                        Ok(())
                    }
                    None => Err(EngineError::NotFound("section")),
                }
            })
            .ok_or(EngineError::NotFound("brief"))??;
        tracing::info!(brief = %brief_id, %key, "section regenerated");
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Sharing
    // ------------------------------------------------------------------

    /// Set a brief's shareability, minting its slug on first share
    ///
    /// The slug is assigned at most once and reused across re-shares;
    /// toggling to the current value still bumps `updated_at`.
    pub fn toggle_share(
        &self,
        session: &Session,
        brief_id: BriefId,
        shareable: bool,
    ) -> Result<InsightBrief, EngineError> {
        let brief = self.get_brief(session, brief_id)?;

        let minted = if shareable && brief.share_slug.is_none() {
            Some(self.mint_slug(brief_id))
        } else {
            None
        };

        let assigned = minted.clone();
        let updated = self
            .briefs
            .update(brief_id, |b| {
                b.is_shareable = shareable;
                if b.share_slug.is_none() {
                    if let Some(slug) = assigned {
                        b.share_slug = Some(slug);
                    }
                }
            })
            .ok_or(EngineError::NotFound("brief"))?;

        // a concurrent first share may have won; drop the unused claim
        if let Some(slug) = minted {
            if updated.share_slug.as_ref() != Some(&slug) {
                self.briefs.release_slug(&slug);
            } else {
                tracing::info!(brief = %brief_id, %slug, "share slug assigned");
            }
        }
        Ok(updated)
    }

    /// Resolve a shared brief by its public slug
    ///
    /// Unauthenticated by design; only currently shareable briefs resolve.
    pub fn get_public_brief_by_slug(&self, slug: &str) -> Result<InsightBrief, EngineError> {
        self.briefs
            .get_by_slug(slug)
            .filter(|b| b.is_shareable)
            .ok_or(EngineError::NotFound("brief"))
    }

    fn mint_slug(&self, brief_id: BriefId) -> ShareSlug {
        loop {
            let entropy = Alphanumeric
                .sample_string(&mut rand::rng(), self.config.slug_entropy_len)
                .to_lowercase();
            let slug = ShareSlug::new(format!("brief-{entropy}"));
            if self.briefs.try_claim_slug(&slug, brief_id) {
                return slug;
            }
        }
    }

    // ------------------------------------------------------------------
    // Review operations (analyst-side)
    // ------------------------------------------------------------------

    /// Review jobs in creation order, optionally filtered by status
    pub fn list_review_jobs(
        &self,
        session: &AnalystSession,
        status: Option<JobStatus>,
    ) -> Result<Vec<HumanReviewJob>, EngineError> {
        session.analyst()?;
        Ok(self.reviews.list(status))
    }

    /// Claim a pending review job for the session's analyst
    pub fn start_review(
        &self,
        session: &AnalystSession,
        job_id: JobId,
    ) -> Result<HumanReviewJob, EngineError> {
        let analyst = session.analyst()?;
        self.reviews.start(job_id, analyst)
    }

    /// Attach the human-insight overlay and complete the review
    ///
    /// The submitted set must cover every canonical key exactly once. The
    /// brief transition is validated and applied under its entry guard, so
    /// two racing submissions resolve to one success; the job completion
    /// follows immediately and cannot be observed to half-apply, because
    /// only this operation moves a brief out of needs-review.
    ///
    /// # Errors
    /// `Validation` for an incomplete or duplicated section set (brief and
    /// job untouched), `NotFound`, or `InvalidState` when the brief is not
    /// awaiting review.
    pub fn submit_insight(
        &self,
        session: &AnalystSession,
        brief_id: BriefId,
        sections: Vec<SectionDraft>,
    ) -> Result<InsightBrief, EngineError> {
        session.analyst()?;
        let overlay = build_overlay(sections)?;

        let job = self
            .reviews
            .get_by_brief(brief_id)
            .ok_or(EngineError::NotFound("job"))?;
        if job.status == JobStatus::Completed {
            return Err(EngineError::invalid_state("job", job.status.as_str()));
        }

        let updated = self
            .briefs
            .try_update(brief_id, |b| {
                if b.status != BriefStatus::NeedsReview {
                    return Err(EngineError::invalid_state("brief", b.status.as_str()));
                }
                b.human_insight_sections = Some(overlay);
                b.status = BriefStatus::Completed;
                Ok(())
            })
            .ok_or(EngineError::NotFound("brief"))??;

        self.reviews.complete(job.id)?;
        tracing::info!(brief = %brief_id, job = %job.id, "insight submitted");
        Ok(updated)
    }
}

/// Assemble the overlay in canonical order, enforcing exact coverage
fn build_overlay(sections: Vec<SectionDraft>) -> Result<Vec<BriefSection>, EngineError> {
    let mut by_key: [Option<String>; 8] = Default::default();
    for draft in sections {
        let slot = &mut by_key[draft.key.position()];
        if slot.is_some() {
            return Err(EngineError::validation(format!(
                "duplicate section key: {}",
                draft.key
            )));
        }
        *slot = Some(draft.content);
    }

    let missing: Vec<&str> = SectionKey::CANONICAL
        .iter()
        .filter(|k| by_key[k.position()].is_none())
        .map(|k| k.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::validation(format!(
            "missing section keys: {}",
            missing.join(", ")
        )));
    }

    Ok(SectionKey::CANONICAL
        .iter()
        .map(|&key| BriefSection::new(key, by_key[key.position()].take().unwrap_or_default()))
        .collect())
}
