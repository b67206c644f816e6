//! AI collaborators for codeflow: script generation and code explanation.
//!
//! Each collaborator is a single request/single response flow: a prompt
//! template is rendered, sent to an OpenAI-compatible chat provider, and the
//! reply is parsed into a typed result. Failures surface as one
//! [`AssistError`]; there is no retry.

pub mod config;
pub mod error;
pub mod flows;
pub mod prompt;
pub mod provider;

use std::future::Future;

pub use config::LlmConfig;
pub use error::AssistError;
pub use flows::{Explanation, GeneratedScript};
pub use prompt::PromptTemplate;

/// The two AI operations exposed to editors.
pub trait Assistant: Send + Sync + 'static {
    /// Generates a Python script from a natural-language description.
    fn generate_script(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<GeneratedScript, AssistError>> + Send;

    /// Explains a code snippet or terminal error.
    fn explain_snippet(
        &self,
        code_snippet: &str,
    ) -> impl Future<Output = Result<Explanation, AssistError>> + Send;
}

/// [`Assistant`] backed by a chat-completions provider.
#[derive(Debug, Clone)]
pub struct LlmAssistant {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmAssistant {
    pub fn new(config: LlmConfig) -> Self {
        LlmAssistant {
            config: config.normalize(),
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

impl Assistant for LlmAssistant {
    async fn generate_script(&self, prompt: &str) -> Result<GeneratedScript, AssistError> {
        let message = flows::generate_script_prompt(prompt)?;
        let reply = provider::chat_json(&self.client, &self.config, &message).await?;
        flows::parse_generated_script(&reply)
    }

    async fn explain_snippet(&self, code_snippet: &str) -> Result<Explanation, AssistError> {
        let message = flows::explain_snippet_prompt(code_snippet)?;
        let reply = provider::chat_json(&self.client, &self.config, &message).await?;
        flows::parse_explanation(&reply)
    }
}
