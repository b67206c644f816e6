//! Server configuration from environment variables.
//!
//! - `CODEFLOW_DB_PATH`: SQLite database file path (default: "codeflow.db")
//! - `CODEFLOW_PORT`: listen port (default: 3000)
//! - `CODEFLOW_TICK_MS`: simulator tick in milliseconds (default: 200)
//! - `CODEFLOW_LLM_*`: assistant provider, see [`LlmConfig`]

use std::time::Duration;

use codeflow_assist::LlmConfig;
use codeflow_sim::config::DEFAULT_TICK;

/// An environment variable held an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("{var} '{value}' is invalid: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db_path: String,
    pub port: u16,
    pub tick: Duration,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let db_path = lookup("CODEFLOW_DB_PATH").unwrap_or_else(|| "codeflow.db".to_string());

        let port = match lookup("CODEFLOW_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError {
                var: "CODEFLOW_PORT",
                value: raw.clone(),
                reason: "expected a port number",
            })?,
            None => 3000,
        };

        let tick = match lookup("CODEFLOW_TICK_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError {
                    var: "CODEFLOW_TICK_MS",
                    value: raw.clone(),
                    reason: "expected milliseconds",
                })?,
            None => DEFAULT_TICK,
        };

        Ok(ServerConfig {
            db_path,
            port,
            tick,
            llm: LlmConfig::from_lookup(&lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.db_path, "codeflow.db");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.tick, DEFAULT_TICK);
        assert_eq!(cfg.llm.provider_name(), "openrouter");
    }

    #[test]
    fn overrides() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("CODEFLOW_DB_PATH", "/tmp/x.db"),
            ("CODEFLOW_PORT", "8081"),
            ("CODEFLOW_TICK_MS", "5"),
            ("CODEFLOW_LLM_MODEL", "m"),
        ]))
        .unwrap();
        assert_eq!(cfg.db_path, "/tmp/x.db");
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.tick, Duration::from_millis(5));
        assert_eq!(cfg.llm.model.as_deref(), Some("m"));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(ServerConfig::from_lookup(lookup(&[("CODEFLOW_PORT", "http")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("CODEFLOW_TICK_MS", "-1")])).is_err());
    }
}
