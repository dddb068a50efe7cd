//! Cache-aside category resolution.
//!
//! Failures anywhere in here degrade to the first candidate; resolution never
//! returns an error.

use rrp_core::{CacheKey, CategoryCache, CategoryClassifier, UNKNOWN_CATEGORY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Cached,
    Classified,
    Fallback,
    /// Retailer-imposed category (e.g. a promo period); classification skipped.
    Fixed,
}

impl CategorySource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategorySource::Cached => "cached",
            CategorySource::Classified => "classified",
            CategorySource::Fallback => "fallback",
            CategorySource::Fixed => "fixed",
        }
    }
}

impl std::fmt::Display for CategorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub category: String,
    pub source: CategorySource,
}

impl Resolution {
    fn fallback(candidates: &[String]) -> Self {
        Self {
            category: candidates
                .first()
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            source: CategorySource::Fallback,
        }
    }
}

/// Resolve the category for `name` at `retailer`.
///
/// A cached answer wins without re-validation. On a miss the classifier is
/// asked to pick from `candidates`; only answers that exactly match a
/// candidate are accepted and cached. Fallback answers are not cached, so a
/// later run can retry classification.
pub async fn resolve_category<C, K>(
    cache: &C,
    classifier: &K,
    name: &str,
    candidates: &[String],
    retailer: &str,
) -> Resolution
where
    C: CategoryCache,
    K: CategoryClassifier,
{
    let key = CacheKey::new(name, retailer);

    match cache.get(&key).await {
        Ok(Some(category)) => {
            return Resolution {
                category,
                source: CategorySource::Cached,
            };
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(product = %name, retailer, error = %e, "category cache read failed; treating as miss");
        }
    }

    if !classifier.is_configured() || candidates.is_empty() {
        return Resolution::fallback(candidates);
    }

    let reply = match classifier.classify(name, candidates).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(product = %name, retailer, error = %e, "category classification failed; using first candidate");
            return Resolution::fallback(candidates);
        }
    };

    let answer = reply.trim();
    let Some(category) = candidates.iter().find(|c| c.as_str() == answer) else {
        tracing::warn!(product = %name, retailer, reply = %answer, "classifier answer is not a candidate; using first candidate");
        return Resolution::fallback(candidates);
    };

    if let Err(e) = cache.put(&key, category).await {
        tracing::warn!(product = %name, retailer, error = %e, "category cache write failed");
    }

    tracing::debug!(product = %name, retailer, category = %category, "category classified");

    Resolution {
        category: category.clone(),
        source: CategorySource::Classified,
    }
}
