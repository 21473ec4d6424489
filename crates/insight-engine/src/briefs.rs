//! Insight brief store
//!
//! Owns the brief aggregates plus two secondary indexes: request id → brief
//! (the 1:1 back-reference) and share slug → brief (public lookup). Mutation
//! goes through closure-based updates that run inside the map's exclusive
//! entry guard; a fallible variant lets callers validate preconditions under
//! the same guard so check and write cannot interleave.
//!
//! Lock discipline: index guards are never held while touching the primary
//! map. Slug claims go through [`BriefStore::try_claim_slug`] before the
//! brief itself is updated.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use insight_model::{AccountId, BriefId, InsightBrief, RequestId, ShareSlug};

/// Owns `InsightBrief` aggregates and their lookup indexes
#[derive(Debug, Default)]
pub struct BriefStore {
    briefs: DashMap<BriefId, InsightBrief>,
    by_request: DashMap<RequestId, BriefId>,
    by_slug: DashMap<String, BriefId>,
}

impl BriefStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            briefs: DashMap::new(),
            by_request: DashMap::new(),
            by_slug: DashMap::new(),
        }
    }

    /// Insert a freshly drafted brief and index its request back-reference
    pub fn insert(&self, brief: InsightBrief) {
        self.by_request.insert(brief.request_id, brief.id);
        self.briefs.insert(brief.id, brief);
    }

    /// Fetch a brief by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: BriefId) -> Option<InsightBrief> {
        self.briefs.get(&id).map(|entry| entry.clone())
    }

    /// Fetch the brief created for a request
    #[must_use]
    pub fn get_by_request(&self, request_id: RequestId) -> Option<InsightBrief> {
        let id = self.by_request.get(&request_id).map(|entry| *entry)?;
        self.get(id)
    }

    /// Fetch a brief by its share slug, regardless of shareability
    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<InsightBrief> {
        let id = self.by_slug.get(slug).map(|entry| *entry)?;
        self.get(id)
    }

    /// All briefs owned by an account, in creation order
    #[must_use]
    pub fn list_for(&self, account: AccountId) -> Vec<InsightBrief> {
        let mut briefs: Vec<InsightBrief> = self
            .briefs
            .iter()
            .filter(|entry| entry.account_id == account)
            .map(|entry| entry.clone())
            .collect();
        briefs.sort_by_key(|b| (b.created_at, b.id));
        briefs
    }

    /// Mutate a brief in place and bump `updated_at`
    ///
    /// Returns the post-mutation snapshot, or `None` for an unknown id.
    pub fn update<F>(&self, id: BriefId, f: F) -> Option<InsightBrief>
    where
        F: FnOnce(&mut InsightBrief),
    {
        let mut entry = self.briefs.get_mut(&id)?;
        f(&mut entry);
        entry.updated_at = Utc::now();
        Some(entry.clone())
    }

    /// Fallible mutation: the closure validates and writes under one guard
    ///
    /// On `Err` the brief is left exactly as it was, including `updated_at`.
    ///
    /// # Errors
    /// `None` wraps an unknown id; otherwise whatever the closure returns.
    pub fn try_update<F, E>(&self, id: BriefId, f: F) -> Option<Result<InsightBrief, E>>
    where
        F: FnOnce(&mut InsightBrief) -> Result<(), E>,
    {
        let mut entry = self.briefs.get_mut(&id)?;
        let snapshot = entry.clone();
        match f(&mut entry) {
            Ok(()) => {
                entry.updated_at = Utc::now();
                Some(Ok(entry.clone()))
            }
            Err(e) => {
                *entry = snapshot;
                Some(Err(e))
            }
        }
    }

    /// Reserve a slug for a brief if no other brief holds it
    ///
    /// Returns `false` when the slug is already taken.
    #[must_use]
    pub fn try_claim_slug(&self, slug: &ShareSlug, id: BriefId) -> bool {
        match self.by_slug.entry(slug.as_str().to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(id);
                true
            }
        }
    }

    /// Drop a slug claim that ended up unused (lost a first-share race)
    pub fn release_slug(&self, slug: &ShareSlug) {
        self.by_slug.remove(slug.as_str());
    }
}
