//! Model & endpoint constants
//!
//! Base URLs of OpenAI-compatible chat completion services plus the default
//! model of each preset. Any other model name can be passed as a string.

/// [`Groq`](https://console.groq.com/docs)'s OpenAI-compatible base URL.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default `OpenAI` API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// [`Deepseek`](https://api-docs.deepseek.com)'s OpenAI-compatible base URL.
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
/// [`OpenRouter`](https://openrouter.ai)'s OpenAI-compatible base URL.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

// ============================================================
// Groq
// ============================================================

/// Llama 3 8B with an 8k context, served by Groq.
pub const LLAMA3_8B_8192: &str = "llama3-8b-8192";

// ============================================================
// OpenAI
// ============================================================

/// Cheapest small multimodal model, great for apps.
pub const GPT4O_MINI: &str = "gpt-4o-mini";

// ============================================================
// OpenRouter / DeepSeek
// ============================================================

/// `OpenRouter` route to `OpenAI`'s small model.
pub const OPENROUTER_GPT4O_MINI: &str = "openai/gpt-4o-mini";

/// `DeepSeek`'s general chat model.
pub const DEEPSEEK_CHAT: &str = "deepseek-chat";
