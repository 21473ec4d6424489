//! Functional tests for the human review pipeline.
//!
//! Covers queueing on brief generation, single-claim job assignment,
//! overlay submission with exact-coverage validation, and the atomic
//! job/brief completion that closes the loop.

use insight_engine::prelude::*;
use insight_model::{AnalystId, CreditCurrency, InsightBrief};
use insight_test_utils::{engine_with_account, payload};
use pretty_assertions::assert_eq;

/// Drive a human-mode submission through generation and return its brief.
async fn reviewed_brief(
    engine: &insight_engine::LifecycleCoordinator,
    session: &Session,
) -> InsightBrief {
    let request = engine
        .submit_request(session, payload(InsightMode::AiPlusHuman))
        .await
        .unwrap();
    engine.get_brief_by_request(session, request.id).unwrap()
}

fn full_overlay() -> Vec<SectionDraft> {
    SectionKey::CANONICAL
        .iter()
        .map(|&key| SectionDraft::new(key, format!("analyst take on {key}")))
        .collect()
}

/// A funded human-mode submission debits both currencies,
/// parks the brief in needs-review, and enqueues exactly one pending job.
#[tokio::test]
async fn human_mode_submission_enqueues_one_review_job() {
    let (engine, account, session) = engine_with_account(&Plan::PRO);

    let brief = reviewed_brief(&engine, &session).await;
    assert_eq!(brief.status, BriefStatus::NeedsReview);
    assert_eq!(brief.sections.len(), 8);

    let balance = engine.ledger().balance(account);
    assert_eq!(balance.balance(CreditCurrency::Ai), 49);
    assert_eq!(balance.balance(CreditCurrency::HumanInsight), 9);

    let analyst = AnalystSession::authenticated("analyst-1");
    let jobs = engine.list_review_jobs(&analyst, None).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, JobStatus::Pending);
    assert_eq!(jobs[0].brief_id, brief.id);
    assert_eq!(jobs[0].brief_title, brief.title);
    assert!(jobs[0].assigned_to.is_none());
}

/// An ai-only submission never reaches the queue.
#[tokio::test]
async fn ai_only_submission_skips_the_queue() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let request = engine
        .submit_request(&session, payload(InsightMode::AiOnly))
        .await
        .unwrap();
    let brief = engine.get_brief_by_request(&session, request.id).unwrap();
    assert_eq!(brief.status, BriefStatus::Completed);

    let analyst = AnalystSession::authenticated("analyst-1");
    assert!(engine.list_review_jobs(&analyst, None).unwrap().is_empty());
}

/// The first analyst to start a job claims it; a second
/// start attempt is an InvalidState and the assignment is untouched.
#[tokio::test]
async fn review_jobs_are_claimed_exactly_once() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let brief = reviewed_brief(&engine, &session).await;

    let first = AnalystSession::authenticated("analyst-1");
    let second = AnalystSession::authenticated("analyst-2");
    let job_id = engine.list_review_jobs(&first, None).unwrap()[0].id;

    let claimed = engine.start_review(&first, job_id).unwrap();
    assert_eq!(claimed.status, JobStatus::InProgress);
    assert_eq!(
        claimed.assigned_to.as_ref().map(AnalystId::as_str),
        Some("analyst-1")
    );
    assert_eq!(claimed.brief_id, brief.id);

    let err = engine.start_review(&second, job_id).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidState {
            entity: "job",
            current: "in-progress",
        }
    ));

    let jobs = engine
        .list_review_jobs(&first, Some(JobStatus::InProgress))
        .unwrap();
    assert_eq!(
        jobs[0].assigned_to.as_ref().map(AnalystId::as_str),
        Some("analyst-1")
    );
}

/// Re-starting a job you already hold is the same InvalidState.
#[tokio::test]
async fn restarting_a_held_job_is_rejected() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let _brief = reviewed_brief(&engine, &session).await;

    let analyst = AnalystSession::authenticated("analyst-1");
    let job_id = engine.list_review_jobs(&analyst, None).unwrap()[0].id;
    engine.start_review(&analyst, job_id).unwrap();

    let err = engine.start_review(&analyst, job_id).unwrap_err();
    assert!(matches!(err, EngineError::InvalidState { .. }));
}

/// A full overlay completes the brief and the job in one observable
/// step, with the overlay stored in canonical order.
#[tokio::test]
async fn full_overlay_completes_brief_and_job() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let brief = reviewed_brief(&engine, &session).await;

    let analyst = AnalystSession::authenticated("analyst-1");
    let job_id = engine.list_review_jobs(&analyst, None).unwrap()[0].id;
    engine.start_review(&analyst, job_id).unwrap();

    let completed = engine
        .submit_insight(&analyst, brief.id, full_overlay())
        .unwrap();
    assert_eq!(completed.status, BriefStatus::Completed);

    let overlay = completed.human_insight_sections.as_ref().unwrap();
    assert_eq!(overlay.len(), 8);
    for (section, &key) in overlay.iter().zip(SectionKey::CANONICAL.iter()) {
        assert_eq!(section.key, key);
        assert_eq!(section.title, key.title());
        assert!(section.content.contains(key.as_str()));
    }
    // AI sections untouched underneath the overlay
    assert_eq!(completed.sections, brief.sections);

    let jobs = engine
        .list_review_jobs(&analyst, Some(JobStatus::Completed))
        .unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, job_id);
}

/// A partial overlay is rejected and leaves brief and job untouched.
#[tokio::test]
async fn partial_overlay_is_rejected_without_side_effects() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let brief = reviewed_brief(&engine, &session).await;

    let analyst = AnalystSession::authenticated("analyst-1");
    let job_id = engine.list_review_jobs(&analyst, None).unwrap()[0].id;
    engine.start_review(&analyst, job_id).unwrap();

    let mut drafts = full_overlay();
    drafts.retain(|d| d.key != SectionKey::Risks);
    let err = engine.submit_insight(&analyst, brief.id, drafts).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(err.to_string().contains("risks"));

    let unchanged = engine.get_brief(&session, brief.id).unwrap();
    assert_eq!(unchanged.status, BriefStatus::NeedsReview);
    assert!(unchanged.human_insight_sections.is_none());

    let jobs = engine.list_review_jobs(&analyst, None).unwrap();
    assert_eq!(jobs[0].status, JobStatus::InProgress);
}

/// Duplicate keys in the overlay are a validation error.
#[tokio::test]
async fn duplicate_overlay_keys_are_rejected() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let brief = reviewed_brief(&engine, &session).await;

    let analyst = AnalystSession::authenticated("analyst-1");
    let job_id = engine.list_review_jobs(&analyst, None).unwrap()[0].id;
    engine.start_review(&analyst, job_id).unwrap();

    let mut drafts = full_overlay();
    drafts.push(SectionDraft::new(SectionKey::Notes, "again"));
    let err = engine.submit_insight(&analyst, brief.id, drafts).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(err.to_string().contains("duplicate"));
}

/// Submitting insight against a brief with no queued job is NotFound.
#[tokio::test]
async fn insight_against_ai_only_brief_is_not_found() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let request = engine
        .submit_request(&session, payload(InsightMode::AiOnly))
        .await
        .unwrap();
    let brief = engine.get_brief_by_request(&session, request.id).unwrap();

    let analyst = AnalystSession::authenticated("analyst-1");
    let err = engine
        .submit_insight(&analyst, brief.id, full_overlay())
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound("job")));
}

/// A second insight submission finds the job already completed.
#[tokio::test]
async fn double_insight_submission_is_rejected() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let brief = reviewed_brief(&engine, &session).await;

    let analyst = AnalystSession::authenticated("analyst-1");
    let job_id = engine.list_review_jobs(&analyst, None).unwrap()[0].id;
    engine.start_review(&analyst, job_id).unwrap();
    engine
        .submit_insight(&analyst, brief.id, full_overlay())
        .unwrap();

    let err = engine
        .submit_insight(&analyst, brief.id, full_overlay())
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidState {
            entity: "job",
            current: "completed",
        }
    ));
}

/// Jobs list in creation order and honor the status filter.
#[tokio::test]
async fn jobs_list_in_creation_order_with_filter() {
    let (engine, _account, session) = engine_with_account(&Plan::ENTERPRISE);
    let first = reviewed_brief(&engine, &session).await;
    let second = reviewed_brief(&engine, &session).await;

    let analyst = AnalystSession::authenticated("analyst-1");
    let jobs = engine.list_review_jobs(&analyst, None).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].brief_id, first.id);
    assert_eq!(jobs[1].brief_id, second.id);

    engine.start_review(&analyst, jobs[0].id).unwrap();
    let pending = engine
        .list_review_jobs(&analyst, Some(JobStatus::Pending))
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].brief_id, second.id);
}

/// Analyst endpoints demand an analyst identity.
#[tokio::test]
async fn anonymous_analysts_are_rejected() {
    let (engine, _account, session) = engine_with_account(&Plan::PRO);
    let brief = reviewed_brief(&engine, &session).await;

    let anonymous = AnalystSession::anonymous();
    assert!(matches!(
        engine.list_review_jobs(&anonymous, None),
        Err(EngineError::NotAuthenticated)
    ));
    assert!(matches!(
        engine.submit_insight(&anonymous, brief.id, full_overlay()),
        Err(EngineError::NotAuthenticated)
    ));
}
