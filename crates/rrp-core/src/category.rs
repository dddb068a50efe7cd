//! Capabilities used by category resolution: a cache keyed by
//! (product name, retailer) and an external classifier.

use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;

use thiserror::Error;

/// Category reported when a retailer offers no candidates at all.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: String,
    pub retailer: String,
}

impl CacheKey {
    #[must_use]
    pub fn new(name: impl Into<String>, retailer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            retailer: retailer.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("category cache error: {0}")]
    Cache(String),

    #[error("category classifier error: {0}")]
    Classifier(String),
}

/// Persistent (name, retailer) → category mapping. Writes are upserts.
pub trait CategoryCache: Send + Sync {
    fn get(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = Result<Option<String>, CategoryError>> + Send;

    fn put(
        &self,
        key: &CacheKey,
        category: &str,
    ) -> impl Future<Output = Result<(), CategoryError>> + Send;
}

/// Picks one category for a product name from a candidate list.
///
/// Implementations may return text that is not one of the candidates; the
/// resolver validates the answer.
pub trait CategoryClassifier: Send + Sync {
    fn classify(
        &self,
        name: &str,
        candidates: &[String],
    ) -> impl Future<Output = Result<String, CategoryError>> + Send;

    /// `false` makes the resolver skip classification entirely.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Classifier used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClassifier;

impl CategoryClassifier for NoClassifier {
    async fn classify(&self, _name: &str, _candidates: &[String]) -> Result<String, CategoryError> {
        Err(CategoryError::Classifier(
            "no classifier configured".to_string(),
        ))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Process-local cache for database-free runs.
#[derive(Debug, Default)]
pub struct MemoryCategoryCache {
    entries: RwLock<HashMap<CacheKey, String>>,
}

impl MemoryCategoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CategoryCache for MemoryCategoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CategoryError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CategoryError::Cache(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &CacheKey, category: &str) -> Result<(), CategoryError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CategoryError::Cache(e.to_string()))?;
        entries.insert(key.clone(), category.to_string());
        Ok(())
    }
}
