//! Testing utilities for the insightlayer workspace
//!
//! Shared fixtures and scripted generation backends.

#![allow(missing_docs)]

use async_trait::async_trait;
use insight_engine::{
    BriefGenerationClient, CannedGenerationClient, EngineConfig, GeneratedSections,
    GenerationError, GenerationRequest, LifecycleCoordinator, Session,
};
use insight_model::{AccountId, InsightMode, Plan, RequestPayload, SectionKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A well-formed submission payload
pub fn payload(mode: InsightMode) -> RequestPayload {
    RequestPayload::new("Q3 Expansion", "Should we enter the DACH market?")
        .with_context("Series B SaaS, currently US-only")
        .with_subquestion("What is the regulatory burden?")
        .with_mode(mode)
}

/// Engine over the canned backend, with one account provisioned on `plan`
pub fn engine_with_account(plan: &Plan) -> (LifecycleCoordinator, AccountId, Session) {
    engine_with_backend(plan, Arc::new(CannedGenerationClient::new()))
}

/// Engine over an arbitrary backend, with one account provisioned on `plan`
pub fn engine_with_backend(
    plan: &Plan,
    backend: Arc<dyn BriefGenerationClient>,
) -> (LifecycleCoordinator, AccountId, Session) {
    let engine = LifecycleCoordinator::new(EngineConfig::new(), backend);
    let account = AccountId::new();
    engine.open_account(account, plan);
    let session = Session::authenticated(account);
    (engine, account, session)
}

/// Backend whose every call fails
#[derive(Debug, Default)]
pub struct FailingGenerationClient;

#[async_trait]
impl BriefGenerationClient for FailingGenerationClient {
    async fn generate_brief(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GeneratedSections, GenerationError> {
        Err(GenerationError::Backend("model unavailable".to_string()))
    }

    async fn regenerate_section(
        &self,
        _request: &GenerationRequest,
        _key: SectionKey,
        _extra_instructions: Option<&str>,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Backend("model unavailable".to_string()))
    }
}

/// Backend that omits one canonical section from full generations
#[derive(Debug)]
pub struct PartialGenerationClient {
    pub omit: SectionKey,
}

#[async_trait]
impl BriefGenerationClient for PartialGenerationClient {
    async fn generate_brief(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GeneratedSections, GenerationError> {
        GeneratedSections::from_bodies(
            SectionKey::CANONICAL
                .iter()
                .filter(|&&k| k != self.omit)
                .map(|&k| (k, format!("{k} body"))),
        )
    }

    async fn regenerate_section(
        &self,
        _request: &GenerationRequest,
        key: SectionKey,
        _extra_instructions: Option<&str>,
    ) -> Result<String, GenerationError> {
        Ok(format!("{key} body"))
    }
}

/// Backend that sleeps before delegating to the canned client
#[derive(Debug)]
pub struct SlowGenerationClient {
    pub delay: Duration,
    inner: CannedGenerationClient,
}

impl SlowGenerationClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: CannedGenerationClient::new(),
        }
    }
}

#[async_trait]
impl BriefGenerationClient for SlowGenerationClient {
    async fn generate_brief(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedSections, GenerationError> {
        tokio::time::sleep(self.delay).await;
        self.inner.generate_brief(request).await
    }

    async fn regenerate_section(
        &self,
        request: &GenerationRequest,
        key: SectionKey,
        extra_instructions: Option<&str>,
    ) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delay).await;
        self.inner
            .regenerate_section(request, key, extra_instructions)
            .await
    }
}

/// Backend counting calls, for asserting how often the boundary is hit
#[derive(Debug, Default)]
pub struct CountingGenerationClient {
    inner: CannedGenerationClient,
    generations: AtomicUsize,
    regenerations: AtomicUsize,
}

impl CountingGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generations(&self) -> usize {
        self.generations.load(Ordering::SeqCst)
    }

    pub fn regenerations(&self) -> usize {
        self.regenerations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BriefGenerationClient for CountingGenerationClient {
    async fn generate_brief(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedSections, GenerationError> {
        self.generations.fetch_add(1, Ordering::SeqCst);
        self.inner.generate_brief(request).await
    }

    async fn regenerate_section(
        &self,
        request: &GenerationRequest,
        key: SectionKey,
        extra_instructions: Option<&str>,
    ) -> Result<String, GenerationError> {
        self.regenerations.fetch_add(1, Ordering::SeqCst);
        self.inner
            .regenerate_section(request, key, extra_instructions)
            .await
    }
}
