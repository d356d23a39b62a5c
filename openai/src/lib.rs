//! OpenAI-compatible chat completion gateway for pdfqa, built on `reqwest`
//! and the shared `pdfqa-core` abstractions.
//!
//! The client speaks the non-streaming `chat/completions` endpoint, which
//! Groq, `OpenAI`, `OpenRouter` and `DeepSeek` all serve. Groq is the default.
//!
//! ```no_run
//! use pdfqa_core::{LanguageModel, llm::{LLMRequest, Message}};
//! use pdfqa_openai::Provider;
//!
//! # async fn demo() -> Result<(), pdfqa_openai::OpenAIError> {
//! let model = Provider::Groq.from_env(None, None)?.build();
//!
//! let request = LLMRequest::new([
//!     Message::system("The following is the content of a PDF file: ..."),
//!     Message::user("Summarize page 1."),
//! ]);
//! let reply = model.respond(request).await?;
//! println!("{reply}");
//! # Ok(()) }
//! ```

mod client;
mod config;
mod error;
mod provider;
mod request;
mod response;

pub use client::{Builder, DEFAULT_REQUEST_TIMEOUT, OpenAI};
pub use config::ChatConfig;
pub use error::OpenAIError;
pub use provider::Provider;

mod constant;
pub use constant::*;

pub(crate) const DEFAULT_MODEL: &str = LLAMA3_8B_8192;
pub(crate) const DEFAULT_BASE_URL: &str = GROQ_BASE_URL;
