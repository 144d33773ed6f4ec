//! Diagnostic filter: logs what the host hands over, changes nothing.

use crate::config::DebugConfig;
use crate::envelope::{Envelope, UserContext};
use crate::error::Result;
use crate::filter::Filter;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct DebugFilter {
    config: DebugConfig,
}

impl DebugFilter {
    #[must_use]
    pub fn new(config: DebugConfig) -> Self {
        Self { config }
    }

    fn record(&self, stage: &'static str, body: &Envelope, user: Option<&UserContext>) {
        tracing::info!(
            filter = "debug",
            stage,
            user_id = ?user.and_then(|u| u.id.as_deref()),
            user_role = ?user.and_then(|u| u.role.as_deref()),
            keys = ?body.keys(),
            messages = body.messages.len(),
            model = ?body.model,
            "filter called"
        );

        if self.config.log_bodies {
            match serde_json::to_string(body) {
                Ok(json) => tracing::info!(filter = "debug", stage, body = %json, "envelope"),
                Err(e) => tracing::warn!(filter = "debug", stage, error = %e, "envelope not serializable"),
            }
        }
    }
}

#[async_trait]
impl Filter for DebugFilter {
    fn name(&self) -> &str {
        "debug"
    }

    async fn inlet(&self, body: Envelope, user: Option<&UserContext>) -> Result<Envelope> {
        self.record("inlet", &body, user);
        Ok(body)
    }

    async fn outlet(&self, body: Envelope, user: Option<&UserContext>) -> Envelope {
        self.record("outlet", &body, user);
        body
    }
}
