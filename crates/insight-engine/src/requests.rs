//! Research request store
//!
//! Append-only: requests are inserted once and mutated in place through
//! [`RequestStore::update`]; nothing ever deletes one. The update closure
//! runs inside the map's exclusive entry guard, so transitions for one
//! request id are serialized.

use chrono::Utc;
use dashmap::DashMap;
use insight_model::{AccountId, RequestId, ResearchRequest};

/// Owns `ResearchRequest` aggregates
#[derive(Debug, Default)]
pub struct RequestStore {
    requests: DashMap<RequestId, ResearchRequest>,
}

impl RequestStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
        }
    }

    /// Insert a freshly created request
    pub fn insert(&self, request: ResearchRequest) {
        self.requests.insert(request.id, request);
    }

    /// Fetch a request by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: RequestId) -> Option<ResearchRequest> {
        self.requests.get(&id).map(|entry| entry.clone())
    }

    /// All requests owned by an account, in creation order
    #[must_use]
    pub fn list_for(&self, account: AccountId) -> Vec<ResearchRequest> {
        let mut requests: Vec<ResearchRequest> = self
            .requests
            .iter()
            .filter(|entry| entry.account_id == account)
            .map(|entry| entry.clone())
            .collect();
        requests.sort_by_key(|r| (r.created_at, r.id));
        requests
    }

    /// Mutate a request in place and bump `updated_at`
    ///
    /// Returns the post-mutation snapshot, or `None` for an unknown id.
    pub fn update<F>(&self, id: RequestId, f: F) -> Option<ResearchRequest>
    where
        F: FnOnce(&mut ResearchRequest),
    {
        let mut entry = self.requests.get_mut(&id)?;
        f(&mut entry);
        entry.updated_at = Utc::now();
        Some(entry.clone())
    }
}
