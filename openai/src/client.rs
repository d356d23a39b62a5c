use crate::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, Provider,
    error::OpenAIError,
    request::ChatCompletionRequest,
    response::{ChatCompletionResponse, api_error_message},
};
use pdfqa_core::{LanguageModel, llm::LLMRequest};
use reqwest::{Client, header};
use std::{fmt, future::Future, sync::Arc, time::Duration};

const REDACTED: &str = "<redacted>";

/// Chat model reached through an OpenAI-compatible `chat/completions` endpoint.
///
/// Each call is a single non-streaming request; failures are returned as-is.
#[derive(Clone)]
pub struct OpenAI {
    inner: Arc<Config>,
    http: Client,
}

impl fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAI")
            .field("config", &self.inner)
            .finish_non_exhaustive()
    }
}

impl OpenAI {
    /// Create a new client using the provided API key, Groq's endpoint and the
    /// default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).build()
    }

    /// Create a client for the official `OpenAI` endpoint and its preset model.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Provider::OpenAI.builder(api_key).build()
    }

    /// Create a client for [`Deepseek`](https://api-docs.deepseek.com)'s endpoint and its preset model.
    pub fn deepseek(api_key: impl Into<String>) -> Self {
        Provider::DeepSeek.builder(api_key).build()
    }

    /// Create a client for [`OpenRouter`](https://openrouter.ai)'s endpoint and its preset model.
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Provider::OpenRouter.builder(api_key).build()
    }

    /// Start building an [`OpenAI`] client with custom configuration.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> Builder {
        Builder::new(api_key)
    }

    /// Override the chat model in-place.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).chat_model = sanitize_model(model);
        self
    }

    /// Override the REST base URL (useful for OpenAI-compatible endpoints).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        Arc::make_mut(&mut self.inner).request_timeout = timeout;
        self
    }

    /// The configured REST base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The configured request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.request_timeout
    }
}

impl LanguageModel for OpenAI {
    type Error = OpenAIError;

    fn respond(
        &self,
        request: LLMRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        let cfg = self.inner.clone();
        let http = self.http.clone();
        async move { chat_completion(&http, &cfg, request).await }
    }

    fn model(&self) -> &str {
        &self.inner.chat_model
    }
}

async fn chat_completion(
    http: &Client,
    cfg: &Config,
    request: LLMRequest,
) -> Result<String, OpenAIError> {
    let (messages, parameters) = request.into_parts();
    let body = ChatCompletionRequest::new(&cfg.chat_model, &messages, &parameters);
    let endpoint = cfg.request_url("/chat/completions");

    tracing::debug!(
        model = %cfg.chat_model,
        messages = messages.len(),
        chars = messages.iter().map(|m| m.content().len()).sum::<usize>(),
        "sending chat completion"
    );

    let mut builder = http
        .post(endpoint)
        .header(header::AUTHORIZATION, cfg.request_auth())
        .header(header::USER_AGENT, "pdfqa-openai/0.1")
        .timeout(cfg.request_timeout)
        .json(&body);

    if let Some(org) = &cfg.organization {
        builder = builder.header("OpenAI-Organization", org);
    }

    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = api_error_message(&bytes);
        tracing::debug!(status = status.as_u16(), %message, "chat completion rejected");
        return Err(OpenAIError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let completion: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
    completion.into_text().ok_or(OpenAIError::EmptyResponse)
}

/// Builder for [`OpenAI`] clients.
pub struct Builder {
    api_key: String,
    base_url: String,
    chat_model: String,
    organization: Option<String>,
    request_timeout: Duration,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("organization", &self.organization)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Default request timeout (5 minutes - generous for long documents).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

impl Builder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_MODEL.to_string(),
            organization: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set a custom API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Select a model identifier (e.g., `llama3-8b-8192`, `gpt-4o-mini`).
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = sanitize_model(model);
        self
    }

    /// Attach an `OpenAI` organization header.
    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 5 minutes. The timeout covers the whole request, from
    /// connecting to reading the response body.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Consume the builder and create an [`OpenAI`] client.
    #[must_use]
    pub fn build(self) -> OpenAI {
        OpenAI {
            inner: Arc::new(Config {
                api_key: self.api_key,
                base_url: self.base_url,
                chat_model: self.chat_model,
                organization: self.organization,
                request_timeout: self.request_timeout,
            }),
            http: Client::new(),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) chat_model: String,
    pub(crate) organization: Option<String>,
    pub(crate) request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("organization", &self.organization)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub(crate) fn request_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn request_auth(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

fn sanitize_model(model: impl Into<String>) -> String {
    model.into().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DEEPSEEK_BASE_URL, DEEPSEEK_CHAT, GPT4O_MINI, GROQ_BASE_URL, LLAMA3_8B_8192,
        OPENAI_BASE_URL, OPENROUTER_BASE_URL, OPENROUTER_GPT4O_MINI,
    };

    #[test]
    fn defaults_target_groq() {
        let client = OpenAI::new("key");
        assert_eq!(client.base_url(), GROQ_BASE_URL);
        assert_eq!(client.model(), LLAMA3_8B_8192);
        assert_eq!(client.timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn request_url_joins_without_double_slash() {
        let client = OpenAI::builder("key")
            .base_url("http://localhost:8080/v1/")
            .model("  custom  ")
            .build();
        assert_eq!(
            client.inner.request_url("/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(client.model(), "custom");
        assert_eq!(client.inner.request_auth(), "Bearer key");
    }

    #[test]
    fn with_methods_do_not_touch_clones() {
        let original = OpenAI::new("key");
        let changed = original
            .clone()
            .with_model("gpt-4o-mini")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(original.model(), LLAMA3_8B_8192);
        assert_eq!(changed.model(), "gpt-4o-mini");
        assert_eq!(changed.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn named_constructors_pair_url_with_preset_model() {
        let openai = OpenAI::openai("key");
        assert_eq!(openai.base_url(), OPENAI_BASE_URL);
        assert_eq!(openai.model(), GPT4O_MINI);

        let deepseek = OpenAI::deepseek("key");
        assert_eq!(deepseek.base_url(), DEEPSEEK_BASE_URL);
        assert_eq!(deepseek.model(), DEEPSEEK_CHAT);

        let openrouter = OpenAI::openrouter("key");
        assert_eq!(openrouter.base_url(), OPENROUTER_BASE_URL);
        assert_eq!(openrouter.model(), OPENROUTER_GPT4O_MINI);
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let builder = OpenAI::builder("sk-secret-value").organization("org-1");
        assert!(!format!("{builder:?}").contains("sk-secret-value"));

        let client = builder.build();
        let printed = format!("{client:?}");
        assert!(!printed.contains("sk-secret-value"));
        assert!(printed.contains(REDACTED));
        assert!(printed.contains(LLAMA3_8B_8192));
    }
}
