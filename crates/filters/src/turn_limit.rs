//! Conversation turn limit.

use crate::config::TurnLimitConfig;
use crate::envelope::{Envelope, UserContext};
use crate::error::{FilterError, Result};
use crate::filter::Filter;
use async_trait::async_trait;

/// Rejects requests whose history is longer than the user's effective turn limit.
///
/// The effective limit is the smaller of the user's personal `max_turns` and the global one.
/// Only users with role `user` or `admin` are limited; a context without a role counts as
/// `admin`. Requests without a user context pass.
#[derive(Debug, Clone)]
pub struct TurnLimitFilter {
    config: TurnLimitConfig,
}

impl TurnLimitFilter {
    #[must_use]
    pub fn new(config: TurnLimitConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn effective_max_turns(&self, user: &UserContext) -> u32 {
        user.valves
            .max_turns
            .unwrap_or(self.config.default_user_max_turns)
            .min(self.config.max_turns)
    }
}

fn is_limited(user: &UserContext) -> bool {
    matches!(user.role.as_deref().unwrap_or("admin"), "user" | "admin")
}

#[async_trait]
impl Filter for TurnLimitFilter {
    fn name(&self) -> &str {
        "turn_limit"
    }

    async fn inlet(&self, body: Envelope, user: Option<&UserContext>) -> Result<Envelope> {
        tracing::debug!(
            filter = self.name(),
            user = ?user.and_then(|u| u.id.as_deref()),
            messages = body.messages.len(),
            "inlet"
        );

        let Some(user) = user.filter(|u| is_limited(u)) else {
            return Ok(body);
        };

        let max_turns = self.effective_max_turns(user);
        if body.messages.len() > max_turns as usize {
            tracing::warn!(
                filter = self.name(),
                user = ?user.id,
                messages = body.messages.len(),
                max_turns,
                "turn limit exceeded"
            );
            return Err(FilterError::rejected(
                self.name(),
                format!("對話輪數超過限制。最大輪數：{max_turns}"),
            ));
        }

        Ok(body)
    }

    async fn outlet(&self, body: Envelope, user: Option<&UserContext>) -> Envelope {
        tracing::debug!(
            filter = self.name(),
            user = ?user.and_then(|u| u.id.as_deref()),
            messages = body.messages.len(),
            "outlet"
        );
        body
    }
}
