//! Engine configuration

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout for a full brief generation call, in seconds
    pub generation_timeout_secs: u64,
    /// Timeout for a single-section regeneration call, in seconds
    pub regeneration_timeout_secs: u64,
    /// Random characters after the share-slug prefix
    pub slug_entropy_len: usize,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With generation timeout
    #[inline]
    #[must_use]
    pub fn with_generation_timeout_secs(mut self, secs: u64) -> Self {
        self.generation_timeout_secs = secs;
        self
    }

    /// With regeneration timeout
    #[inline]
    #[must_use]
    pub fn with_regeneration_timeout_secs(mut self, secs: u64) -> Self {
        self.regeneration_timeout_secs = secs;
        self
    }

    /// With slug entropy length
    #[inline]
    #[must_use]
    pub fn with_slug_entropy_len(mut self, len: usize) -> Self {
        self.slug_entropy_len = len;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation_timeout_secs: 60,
            regeneration_timeout_secs: 30,
            slug_entropy_len: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = EngineConfig::new()
            .with_generation_timeout_secs(5)
            .with_slug_entropy_len(8);

        assert_eq!(config.generation_timeout_secs, 5);
        assert_eq!(config.slug_entropy_len, 8);
        assert_eq!(config.regeneration_timeout_secs, 30);
    }
}
