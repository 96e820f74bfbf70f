// Template lookup: waits a fixed delay, then renders the question into a
// string template. Stands in for a real standards backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{LookupError, StandardLookup};
use crate::config::Config;
use crate::panel::Category;

/// Placeholder replaced by the question text.
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// Delay-then-template lookup.
#[derive(Debug, Clone)]
pub struct TemplateLookup {
    delay: Duration,
    template: String,
}

impl TemplateLookup {
    pub fn new(delay: Duration, template: impl Into<String>) -> Self {
        Self {
            delay,
            template: template.into(),
        }
    }

    /// Build from the `[lookup]` config section.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Duration::from_millis(config.lookup.delay_ms),
            config.lookup.template.clone(),
        )
    }
}

#[async_trait]
impl StandardLookup for TemplateLookup {
    async fn lookup(&self, category: Category, question: &str) -> Result<String, LookupError> {
        tokio::time::sleep(self.delay).await;
        debug!(%category, "template lookup resolved");
        Ok(render_template(&self.template, question))
    }
}

/// Substitute every `{question}` placeholder in `template`.
pub fn render_template(template: &str, question: &str) -> String {
    template.replace(QUESTION_PLACEHOLDER, question)
}
