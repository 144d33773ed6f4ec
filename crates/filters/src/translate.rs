//! Inlet translator: rewrites the last message into English through an Ollama-style
//! `/api/generate` endpoint.
//!
//! Translation is cosmetic. Any failure (unreachable endpoint, timeout, 404, bad status, bad JSON,
//! empty answer) leaves the message exactly as the user wrote it.

use crate::config::TranslationConfig;
use crate::envelope::{Envelope, UserContext};
use crate::error::{FilterError, Result, TranslateError};
use crate::fallback::attempt;
use crate::filter::Filter;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

fn translation_prompt(text: &str) -> String {
    format!(
        "Translate the following Chinese text to English. Output ONLY the English translation, no explanation.\nText: {text}\nEnglish:"
    )
}

/// Trim the model output and drop quote characters it likes to wrap answers in.
fn clean_translation(raw: &str) -> Option<String> {
    let cleaned = raw.trim().replace('"', "");
    (!cleaned.is_empty()).then_some(cleaned)
}

pub struct TranslateFilter {
    config: TranslationConfig,
    http: reqwest::Client,
}

impl TranslateFilter {
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FilterError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Ask the endpoint for an English rendering of `text`.
    ///
    /// Returns `Ok(text)` unchanged when the model answers with nothing usable.
    pub async fn translate(&self, text: &str) -> std::result::Result<String, TranslateError> {
        let payload = GenerateRequest {
            model: &self.config.model,
            prompt: translation_prompt(text),
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        };

        let resp = self
            .http
            .post(&self.config.endpoint)
            .json(&payload)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::error!(
                endpoint = %self.config.endpoint,
                "translation endpoint not found; check the Ollama version"
            );
            return Err(TranslateError::NotFound {
                url: self.config.endpoint.clone(),
            });
        }

        let body: GenerateResponse = resp.error_for_status()?.json().await?;
        Ok(clean_translation(&body.response).unwrap_or_else(|| text.to_string()))
    }
}

#[async_trait]
impl Filter for TranslateFilter {
    fn name(&self) -> &str {
        "translate"
    }

    async fn inlet(&self, mut body: Envelope, _user: Option<&UserContext>) -> Result<Envelope> {
        if !self.config.enabled {
            return Ok(body);
        }

        // Multimodal parts and tool-call turns are left as they are.
        let original = match body.last_message().and_then(|m| m.content.as_text()) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => return Ok(body),
        };

        let translated = attempt("translate", self.translate(&original), original.clone()).await;
        tracing::info!(
            filter = self.name(),
            original = %original,
            translated = %translated,
            "translated last message"
        );

        if let Some(text) = body.last_message_mut().and_then(|m| m.content.text_mut()) {
            *text = translated;
        }
        Ok(body)
    }
}
