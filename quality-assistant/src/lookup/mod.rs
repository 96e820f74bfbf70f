// Standards lookups: the pluggable async capability behind each result slot.
//
// A `LookupSet` holds one `StandardLookup` per category. `fetch_all` runs
// the three concurrently and only returns once every one has resolved; the
// first failure abandons the whole set.

pub mod template;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::panel::{Category, ResultSet};

pub use template::TemplateLookup;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{category} lookup failed: {reason}")]
    Failed { category: Category, reason: String },
}

// ---------------------------------------------------------------------------
// StandardLookup
// ---------------------------------------------------------------------------

/// Answers a question against one category of standard.
#[async_trait]
pub trait StandardLookup: Send + Sync {
    async fn lookup(&self, category: Category, question: &str) -> Result<String, LookupError>;
}

// ---------------------------------------------------------------------------
// LookupSet
// ---------------------------------------------------------------------------

/// One lookup implementation per category.
#[derive(Clone)]
pub struct LookupSet {
    enterprise: Arc<dyn StandardLookup>,
    industry: Arc<dyn StandardLookup>,
    international: Arc<dyn StandardLookup>,
}

impl LookupSet {
    pub fn new(
        enterprise: Arc<dyn StandardLookup>,
        industry: Arc<dyn StandardLookup>,
        international: Arc<dyn StandardLookup>,
    ) -> Self {
        Self {
            enterprise,
            industry,
            international,
        }
    }

    /// Use the same implementation for every category.
    pub fn uniform(lookup: Arc<dyn StandardLookup>) -> Self {
        Self::new(Arc::clone(&lookup), Arc::clone(&lookup), lookup)
    }

    /// Template lookups configured from `[lookup]`.
    pub fn from_config(config: &Config) -> Self {
        Self::uniform(Arc::new(TemplateLookup::from_config(config)))
    }

    pub fn for_category(&self, category: Category) -> Arc<dyn StandardLookup> {
        match category {
            Category::Enterprise => Arc::clone(&self.enterprise),
            Category::Industry => Arc::clone(&self.industry),
            Category::International => Arc::clone(&self.international),
        }
    }

    /// Look up `question` in all three categories concurrently.
    ///
    /// Returns a fully populated `ResultSet`, or the first error.
    pub async fn fetch_all(&self, question: &str) -> Result<ResultSet, LookupError> {
        let (enterprise, industry, international) = tokio::try_join!(
            self.enterprise.lookup(Category::Enterprise, question),
            self.industry.lookup(Category::Industry, question),
            self.international.lookup(Category::International, question),
        )?;
        debug!("all three lookups resolved");
        Ok(ResultSet {
            enterprise: Some(enterprise),
            industry: Some(industry),
            international: Some(international),
        })
    }
}

impl std::fmt::Debug for LookupSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupSet").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
