//! Question-answering settings shared by the pdfqa front ends.

use std::time::Duration;

use pdfqa_core::{HistoryWindow, Prompt, llm::Parameters};

use crate::{DEFAULT_REQUEST_TIMEOUT, OpenAI, Provider};

/// Provider, prompt and sampling choices gathered from flags and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Service that answers questions.
    pub provider: Provider,
    /// Model override; the provider preset is used when `None`.
    pub model: Option<String>,
    /// Endpoint override for OpenAI-compatible servers.
    pub base_url: Option<String>,
    /// Text placed before the document in the system message.
    pub system_prefix: Option<String>,
    /// Resend only the last N question/answer pairs.
    pub history_window: Option<usize>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            base_url: None,
            system_prefix: None,
            history_window: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            temperature: None,
        }
    }
}

impl ChatConfig {
    /// System prompt with the configured prefix and history window.
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        let mut prompt = Prompt::default();
        if let Some(prefix) = &self.system_prefix {
            prompt = prompt.with_prefix(prefix.clone());
        }
        if let Some(pairs) = self.history_window {
            prompt = prompt.with_window(HistoryWindow::LastPairs(pairs));
        }
        prompt
    }

    /// Sampling parameters sent with each question.
    #[must_use]
    pub fn parameters(&self) -> Parameters {
        self.temperature
            .map_or_else(Parameters::default, |t| Parameters::default().temperature(t))
    }

    /// Client for `api_key` with the preset and every override applied.
    #[must_use]
    pub fn client(&self, api_key: impl Into<String>) -> OpenAI {
        let mut builder = self.provider.builder(api_key).timeout(self.timeout);
        if let Some(model) = &self.model {
            builder = builder.model(model.clone());
        }
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.clone());
        }
        builder.build()
    }

    /// Client built from the provider's environment credential.
    ///
    /// # Errors
    /// Returns a printable cause when the credential is missing. Front ends
    /// keep it to explain why questions are disabled.
    pub fn connect(&self) -> Result<OpenAI, String> {
        match self.provider.api_key_from_env() {
            Ok(key) => Ok(self.client(key)),
            Err(err) => {
                tracing::warn!(provider = %self.provider, error = %err, "no credential, questions are disabled");
                Err(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEEPSEEK_BASE_URL, DEEPSEEK_CHAT, GROQ_BASE_URL, LLAMA3_8B_8192};
    use pdfqa_core::LanguageModel;

    #[test]
    fn defaults_keep_the_stock_prompt() {
        let config = ChatConfig::default();
        assert_eq!(config.prompt(), Prompt::default());
        assert_eq!(config.parameters(), Parameters::default());

        let client = config.client("key");
        assert_eq!(client.base_url(), GROQ_BASE_URL);
        assert_eq!(client.model(), LLAMA3_8B_8192);
        assert_eq!(client.timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn overrides_reach_prompt_and_parameters() {
        let config = ChatConfig {
            system_prefix: Some("Context:\n".into()),
            history_window: Some(2),
            temperature: Some(0.1),
            ..ChatConfig::default()
        };
        let prompt = config.prompt();
        assert_eq!(prompt.prefix(), "Context:\n");
        assert_eq!(prompt.suffix(), Prompt::default().suffix());
        assert_eq!(prompt.window(), HistoryWindow::LastPairs(2));
        assert_eq!(config.parameters().temperature, Some(0.1));
    }

    #[test]
    fn client_applies_preset_then_overrides() {
        let preset = ChatConfig {
            provider: Provider::DeepSeek,
            timeout: Duration::from_secs(7),
            ..ChatConfig::default()
        };
        let client = preset.client("key");
        assert_eq!(client.base_url(), DEEPSEEK_BASE_URL);
        assert_eq!(client.model(), DEEPSEEK_CHAT);
        assert_eq!(client.timeout(), Duration::from_secs(7));

        let custom = ChatConfig {
            model: Some("local-model".into()),
            base_url: Some("http://localhost:8080/v1".into()),
            ..preset
        }
        .client("key");
        assert_eq!(custom.base_url(), "http://localhost:8080/v1");
        assert_eq!(custom.model(), "local-model");
    }
}
