//! A deployment-selected chain of filters.

use crate::config::FiltersConfig;
use crate::debug::DebugFilter;
use crate::envelope::{Envelope, UserContext};
use crate::error::Result;
use crate::filter::Filter;
use crate::footer::FooterFilter;
use crate::translate::TranslateFilter;
use crate::turn_limit::TurnLimitFilter;

/// Runs filters in order. A rejection on inlet stops the chain; outlet always completes.
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Build the pipeline a config file describes.
    ///
    /// Filters are ordered by `priority` (lower first); equal priorities keep the order
    /// debug, turn limit, translation, footer.
    pub fn from_config(config: &FiltersConfig) -> Result<Self> {
        let mut ranked: Vec<(i32, Box<dyn Filter>)> = Vec::new();

        if let Some(c) = &config.debug {
            ranked.push((c.priority, Box::new(DebugFilter::new(c.clone()))));
        }
        if let Some(c) = &config.turn_limit {
            ranked.push((c.priority, Box::new(TurnLimitFilter::new(c.clone()))));
        }
        if let Some(c) = &config.translation {
            ranked.push((c.priority, Box::new(TranslateFilter::new(c.clone())?)));
        }
        if let Some(c) = &config.footer {
            ranked.push((c.priority, Box::new(FooterFilter::new(c))));
        }

        ranked.sort_by_key(|(priority, _)| *priority);
        Ok(Self {
            filters: ranked.into_iter().map(|(_, f)| f).collect(),
        })
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub async fn inlet(&self, mut body: Envelope, user: Option<&UserContext>) -> Result<Envelope> {
        for filter in &self.filters {
            body = filter.inlet(body, user).await?;
        }
        Ok(body)
    }

    pub async fn outlet(&self, mut body: Envelope, user: Option<&UserContext>) -> Envelope {
        for filter in &self.filters {
            body = filter.outlet(body, user).await;
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DebugConfig, FooterConfig, TranslationConfig, TurnLimitConfig};
    use crate::envelope::Message;
    use async_trait::async_trait;

    struct Tag(&'static str);

    #[async_trait]
    impl Filter for Tag {
        fn name(&self) -> &str {
            self.0
        }

        async fn inlet(&self, mut body: Envelope, _user: Option<&UserContext>) -> Result<Envelope> {
            if let Some(text) = body.last_message_mut().and_then(|m| m.content.text_mut()) {
                text.push_str(self.0);
            }
            Ok(body)
        }
    }

    #[test]
    fn equal_priorities_keep_the_builtin_order() {
        let cfg = FiltersConfig {
            translation: Some(TranslationConfig::default()),
            turn_limit: Some(TurnLimitConfig::default()),
            footer: Some(FooterConfig::default()),
            debug: Some(DebugConfig::default()),
        };
        let p = FilterPipeline::from_config(&cfg).expect("build");
        assert_eq!(p.names(), vec!["debug", "turn_limit", "translate", "footer"]);
    }

    #[test]
    fn priority_reorders_filters() {
        let cfg = FiltersConfig {
            footer: Some(FooterConfig {
                priority: -1,
                ..FooterConfig::default()
            }),
            turn_limit: Some(TurnLimitConfig::default()),
            ..FiltersConfig::default()
        };
        let p = FilterPipeline::from_config(&cfg).expect("build");
        assert_eq!(p.names(), vec!["footer", "turn_limit"]);
    }

    #[tokio::test]
    async fn inlet_runs_filters_in_order() {
        let p = FilterPipeline::new().with_filter(Tag("a")).with_filter(Tag("b"));
        let out = p
            .inlet(Envelope::new(vec![Message::user("x")]), None)
            .await
            .expect("inlet");
        assert_eq!(out.messages[0].content, "xab");
    }

    #[tokio::test]
    async fn rejection_short_circuits_the_chain() {
        let p = FilterPipeline::new()
            .with_filter(TurnLimitFilter::new(TurnLimitConfig::default()))
            .with_filter(Tag("never"));
        let user = UserContext::with_role("user");
        let body = Envelope::new((0..6).map(|i| Message::user(i.to_string())).collect());

        let err = p.inlet(body, Some(&user)).await.expect_err("rejected");
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn empty_pipeline_is_identity() {
        let p = FilterPipeline::new();
        assert!(p.is_empty());
        let body = Envelope::new(vec![Message::system("s"), Message::user("u")]);
        assert_eq!(p.inlet(body.clone(), None).await.expect("inlet"), body);
        assert_eq!(p.outlet(body.clone(), None).await, body);
    }
}
