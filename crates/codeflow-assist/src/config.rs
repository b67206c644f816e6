//! Chat provider configuration.

use serde::{Deserialize, Serialize};

/// Provider settings for the AI collaborators.
///
/// Read from `CODEFLOW_LLM_PROVIDER`, `CODEFLOW_LLM_MODEL`,
/// `CODEFLOW_LLM_API_BASE_URL`, `CODEFLOW_LLM_API_KEY` and
/// `CODEFLOW_LLM_SYSTEM_PROMPT`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// `openrouter` (default) or `openai_compatible`.
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub system_prompt: Option<String>,
}

impl LlmConfig {
    /// Default provider when none is configured.
    pub const DEFAULT_PROVIDER: &'static str = "openrouter";

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        LlmConfig {
            provider: lookup("CODEFLOW_LLM_PROVIDER"),
            model: lookup("CODEFLOW_LLM_MODEL"),
            api_base_url: lookup("CODEFLOW_LLM_API_BASE_URL"),
            api_key: lookup("CODEFLOW_LLM_API_KEY"),
            system_prompt: lookup("CODEFLOW_LLM_SYSTEM_PROMPT"),
        }
        .normalize()
    }

    /// Trims every field, turns blanks into `None` and lowercases the
    /// provider name.
    pub fn normalize(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        LlmConfig {
            provider: clean(self.provider).map(|p| p.to_ascii_lowercase()),
            model: clean(self.model),
            api_base_url: clean(self.api_base_url),
            api_key: clean(self.api_key),
            system_prompt: clean(self.system_prompt),
        }
    }

    /// The configured provider, or [`Self::DEFAULT_PROVIDER`].
    pub fn provider_name(&self) -> &str {
        self.provider.as_deref().unwrap_or(Self::DEFAULT_PROVIDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn normalize_drops_blanks() {
        let cfg = LlmConfig {
            provider: Some("  OpenRouter ".into()),
            model: Some("   ".into()),
            api_base_url: None,
            api_key: Some(" key ".into()),
            system_prompt: Some(String::new()),
        }
        .normalize();
        assert_eq!(cfg.provider.as_deref(), Some("openrouter"));
        assert_eq!(cfg.model, None);
        assert_eq!(cfg.api_key.as_deref(), Some("key"));
        assert_eq!(cfg.system_prompt, None);
    }

    #[test]
    fn reads_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("CODEFLOW_LLM_PROVIDER", "openai_compatible"),
            ("CODEFLOW_LLM_MODEL", "gpt-4o-mini"),
            ("CODEFLOW_LLM_API_BASE_URL", "http://localhost:8080/v1"),
        ]
        .into_iter()
        .collect();
        let cfg = LlmConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.provider_name(), "openai_compatible");
        assert_eq!(cfg.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn api_key_is_never_serialized() {
        let cfg = LlmConfig {
            api_key: Some("secret".into()),
            ..LlmConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("secret"));
    }
}
