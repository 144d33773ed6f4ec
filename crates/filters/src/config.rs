//! Filter configuration ("valves").
//!
//! Every filter is configured once, at construction, from one of these structs. A deployment picks
//! its filters by listing sections in a YAML or JSON file:
//!
//! ```yaml
//! translation:
//!   enabled: true
//!   model: gpt-oss:20b-cloud
//! turnLimit:
//!   maxTurns: 8
//! footer:
//!   organization: Example Org
//! debug: {}
//! ```
//!
//! A missing section disables that filter. Missing fields take the defaults documented below;
//! unknown keys are an error.

use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "http://127.0.0.1:11434/api/generate";
pub const DEFAULT_TRANSLATE_MODEL: &str = "gpt-oss:20b-cloud";
pub const DEFAULT_TRANSLATE_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_GLOBAL_MAX_TURNS: u32 = 8;
pub const DEFAULT_USER_MAX_TURNS: u32 = 4;

/// Which filters run, and how they are configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FiltersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_limit: Option<TurnLimitConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugConfig>,
}

impl FiltersConfig {
    /// Configuration used when no file is given: diagnostics plus the default turn limit.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            translation: None,
            turn_limit: Some(TurnLimitConfig::default()),
            footer: None,
            debug: Some(DebugConfig::default()),
        }
    }
}

/// Settings for the inlet translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TranslationConfig {
    /// Ordering among filters; lower runs first.
    pub priority: i32,
    /// Master switch. Default: `true`.
    pub enabled: bool,
    /// Ollama-compatible `/api/generate` URL. Default: local Ollama.
    pub endpoint: String,
    /// Model asked to translate. This is fixed rather than taken from the request, because the
    /// chat model may not be served by the translation endpoint.
    pub model: String,
    /// Request timeout in seconds. Default: 20.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            priority: 0,
            enabled: true,
            endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            model: DEFAULT_TRANSLATE_MODEL.to_string(),
            timeout_secs: DEFAULT_TRANSLATE_TIMEOUT_SECS,
        }
    }
}

impl TranslationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the turn-limit filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TurnLimitConfig {
    pub priority: i32,
    /// Global ceiling. Default: 8.
    pub max_turns: u32,
    /// Used when the user context carries no personal `max_turns`. Default: 4.
    pub default_user_max_turns: u32,
}

impl Default for TurnLimitConfig {
    fn default() -> Self {
        Self {
            priority: 0,
            max_turns: DEFAULT_GLOBAL_MAX_TURNS,
            default_user_max_turns: DEFAULT_USER_MAX_TURNS,
        }
    }
}

/// Footer appended to assistant replies. Empty fields are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FooterConfig {
    pub priority: i32,
    pub organization: String,
    pub address: String,
    pub contact: String,
}

impl FooterConfig {
    /// The footer block, or `None` when every field is blank.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        let lines: Vec<&str> = [&self.organization, &self.address, &self.contact]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if lines.is_empty() {
            return None;
        }
        Some(format!("\n\n---\n{}", lines.join("\n")))
    }
}

/// Settings for the diagnostic filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DebugConfig {
    pub priority: i32,
    /// Also log the full envelope. Off by default since bodies carry user content.
    pub log_bodies: bool,
}

/// Load a filters config file. `.json` is parsed as JSON, anything else as YAML.
pub fn load_config(path: &Path) -> Result<FiltersConfig> {
    let bytes = std::fs::read(path).map_err(|e| {
        FilterError::Config(format!("failed to read config {}: {e}", path.display()))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let cfg: FiltersConfig = if is_json {
        serde_json::from_slice(&bytes)?
    } else {
        serde_yaml::from_slice(&bytes)?
    };

    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &FiltersConfig) -> Result<()> {
    if let Some(t) = &cfg.translation {
        if t.endpoint.trim().is_empty() {
            return Err(FilterError::Config(
                "translation.endpoint must not be empty".to_string(),
            ));
        }
        if t.timeout_secs == 0 {
            return Err(FilterError::Config(
                "translation.timeoutSecs must be greater than zero".to_string(),
            ));
        }
    }
    if let Some(l) = &cfg.turn_limit
        && l.max_turns == 0
    {
        return Err(FilterError::Config(
            "turnLimit.maxTurns must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
