//! Provider, prompt and extraction flags shared by the `pdfqa` binaries.

use std::ops::RangeInclusive;
use std::time::Duration;

use clap::Args;
use pdfqa_openai::{ChatConfig, Provider};
use pdfqa_pdf_process::{PdfExtractor, PdfProcessOptions, parse_page_range};

/// Flags that choose the answering service and how documents are read.
///
/// Flatten into a binary's arguments with `#[command(flatten)]`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ChatArgs {
    /// Only read these pages, e.g. `3` or `2-5`.
    #[arg(long, value_parser = parse_page_range)]
    pub pages: Option<RangeInclusive<usize>>,

    /// Keep extracted text as-is instead of trimming lines.
    #[arg(long)]
    pub raw_text: bool,

    /// Chat completion provider (groq, openai, openrouter, deepseek).
    #[arg(short, long, env = "PDFQA_PROVIDER", default_value_t = Provider::Groq)]
    pub provider: Provider,

    /// Model identifier. Defaults to the provider's preset.
    #[arg(short, long, env = "PDFQA_MODEL")]
    pub model: Option<String>,

    /// Custom API base URL (for OpenAI-compatible endpoints).
    #[arg(short, long, env = "PDFQA_BASE_URL")]
    pub base_url: Option<String>,

    /// Text placed before the document in the system message.
    #[arg(long)]
    pub system_prefix: Option<String>,

    /// Only resend the last N question/answer pairs with each question.
    #[arg(long)]
    pub history_window: Option<usize>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,

    /// Sampling temperature.
    #[arg(long)]
    pub temperature: Option<f32>,
}

impl ChatArgs {
    /// Gateway, prompt and sampling settings.
    #[must_use]
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            provider: self.provider,
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            system_prefix: self.system_prefix.clone(),
            history_window: self.history_window,
            timeout: Duration::from_secs(self.timeout_secs),
            temperature: self.temperature,
        }
    }

    /// Extraction options for the page range and whitespace flags.
    #[must_use]
    pub fn extract_options(&self) -> PdfProcessOptions {
        PdfProcessOptions {
            page_range: self.pages.clone(),
            normalize_whitespace: !self.raw_text,
        }
    }

    /// PDF extractor configured from the flags.
    #[must_use]
    pub fn extractor(&self) -> PdfExtractor {
        PdfExtractor::new().with_options(self.extract_options())
    }
}
