//! Outlet footer: appends a fixed organisation block to assistant replies.

use crate::config::FooterConfig;
use crate::envelope::{Envelope, Role, UserContext};
use crate::filter::Filter;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct FooterFilter {
    footer: Option<String>,
}

impl FooterFilter {
    #[must_use]
    pub fn new(config: &FooterConfig) -> Self {
        Self {
            footer: config.render(),
        }
    }
}

#[async_trait]
impl Filter for FooterFilter {
    fn name(&self) -> &str {
        "footer"
    }

    async fn outlet(&self, mut body: Envelope, _user: Option<&UserContext>) -> Envelope {
        let Some(footer) = &self.footer else {
            return body;
        };

        let reply = body
            .last_message_mut()
            .filter(|m| m.role == Role::Assistant)
            .and_then(|m| m.content.text_mut());
        match reply {
            Some(text) => text.push_str(footer),
            None => tracing::debug!(filter = self.name(), "no assistant text reply to decorate"),
        }
        body
    }
}
