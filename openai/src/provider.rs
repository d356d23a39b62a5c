//! Presets for the OpenAI-compatible services pdfqa knows about.

use crate::{
    DEEPSEEK_BASE_URL, DEEPSEEK_CHAT, GPT4O_MINI, GROQ_BASE_URL, LLAMA3_8B_8192, OPENAI_BASE_URL,
    OPENROUTER_BASE_URL, OPENROUTER_GPT4O_MINI,
    client::{Builder, OpenAI},
    error::OpenAIError,
};

/// Supported chat completion services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// Groq's hosted open models.
    #[default]
    Groq,
    /// `OpenAI` GPT models.
    OpenAI,
    /// `OpenRouter` model router.
    OpenRouter,
    /// `DeepSeek` chat models.
    DeepSeek,
}

impl Provider {
    /// Every preset, in detection order.
    pub const ALL: [Self; 4] = [Self::Groq, Self::OpenAI, Self::OpenRouter, Self::DeepSeek];

    /// Parse provider from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "openai" | "gpt" => Some(Self::OpenAI),
            "openrouter" => Some(Self::OpenRouter),
            "deepseek" => Some(Self::DeepSeek),
            _ => None,
        }
    }

    /// Get environment variable name for API key.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    /// Get default model for this provider.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Groq => LLAMA3_8B_8192,
            Self::OpenAI => GPT4O_MINI,
            Self::OpenRouter => OPENROUTER_GPT4O_MINI,
            Self::DeepSeek => DEEPSEEK_CHAT,
        }
    }

    /// Get the REST base URL of this provider.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Groq => GROQ_BASE_URL,
            Self::OpenAI => OPENAI_BASE_URL,
            Self::OpenRouter => OPENROUTER_BASE_URL,
            Self::DeepSeek => DEEPSEEK_BASE_URL,
        }
    }

    /// Reads this provider's credential from the environment.
    ///
    /// # Errors
    /// Returns [`OpenAIError::MissingApiKey`] when the variable is unset or blank.
    pub fn api_key_from_env(self) -> Result<String, OpenAIError> {
        match std::env::var(self.env_var()) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(OpenAIError::MissingApiKey {
                var: self.env_var(),
            }),
        }
    }

    /// Starts a client builder preconfigured with this provider's URL and model.
    #[must_use]
    pub fn builder(self, api_key: impl Into<String>) -> Builder {
        OpenAI::builder(api_key)
            .base_url(self.base_url())
            .model(self.default_model())
    }

    /// Builds a client from the environment credential.
    ///
    /// `model` and `base_url` override the preset values when given.
    ///
    /// # Errors
    /// Returns [`OpenAIError::MissingApiKey`] when the credential is absent.
    pub fn from_env(self, model: Option<&str>, base_url: Option<&str>) -> Result<Builder, OpenAIError> {
        let mut builder = self.builder(self.api_key_from_env()?);
        if let Some(model) = model {
            builder = builder.model(model);
        }
        if let Some(url) = base_url {
            builder = builder.base_url(url);
        }
        Ok(builder)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Groq => write!(f, "Groq"),
            Self::OpenAI => write!(f, "OpenAI"),
            Self::OpenRouter => write!(f, "OpenRouter"),
            Self::DeepSeek => write!(f, "DeepSeek"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown provider: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfqa_core::LanguageModel;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("GROQ".parse::<Provider>(), Ok(Provider::Groq));
        assert_eq!(Provider::parse(" OpenRouter "), Some(Provider::OpenRouter));
        assert_eq!(Provider::parse("gpt"), Some(Provider::OpenAI));
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn groq_is_the_default_preset() {
        let provider = Provider::default();
        assert_eq!(provider.env_var(), "GROQ_API_KEY");
        assert_eq!(provider.base_url(), "https://api.groq.com/openai/v1");
        assert_eq!(provider.default_model(), "llama3-8b-8192");
    }

    #[test]
    fn preset_builder_applies_url_and_model() {
        let client = Provider::DeepSeek.builder("key").build();
        assert_eq!(client.base_url(), DEEPSEEK_BASE_URL);
        assert_eq!(client.model(), DEEPSEEK_CHAT);
    }

    #[test]
    fn every_preset_has_a_distinct_credential() {
        let mut vars: Vec<_> = Provider::ALL.iter().map(|p| p.env_var()).collect();
        vars.sort_unstable();
        vars.dedup();
        assert_eq!(vars.len(), Provider::ALL.len());
    }
}
