//! # pdfqa-core
//!
//! **Ask questions about a PDF with any chat-completion provider.**
//!
//! `pdfqa-core` hosts the `no_std` pieces shared by every pdfqa front end:
//! assembling page texts into one grounding document, keeping the
//! conversation history for that document, and the question loop that ties
//! an extractor and a language model together.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │  Front ends     │───▶│   pdfqa-core     │◀───│  Capabilities   │
//! │                 │    │  (this crate)    │    │                 │
//! │ - CLI loop      │    │ - DocumentChat   │    │ - lopdf pages   │
//! │ - Web form      │    │ - Session        │    │ - Groq / OpenAI │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! | Capability | Trait | Implemented by |
//! |------------|-------|----------------|
//! | **Page extraction** | [`PageExtractor`] | `pdfqa-pdf-process` |
//! | **Answering** | [`LanguageModel`] | `pdfqa-openai` |
//!
//! ## Example
//!
//! ```rust
//! use pdfqa_core::{Prompt, Session, DocumentId, PageText, assemble};
//!
//! let document = assemble(&[PageText::new(1, "Alpha"), PageText::new(2, "Beta")]);
//! assert_eq!(document.as_str(), "\n--- Page 1 ---\nAlpha\n--- Page 2 ---\nBeta");
//!
//! let mut session = Session::new(DocumentId::new("demo"), document);
//! let messages = session.build_request(&Prompt::default(), "What is on page 1?");
//! assert_eq!(messages.len(), 2);
//!
//! session.commit("What is on page 1?", "Alpha is on page 1.");
//! assert_eq!(session.turns().len(), 2);
//! ```

#![no_std]
extern crate alloc;

pub mod chat;
pub mod document;
mod error;
pub mod extract;
pub mod llm;
pub mod session;

#[doc(inline)]
pub use chat::{ChatState, DocumentChat, LoadOutcome};
#[doc(inline)]
pub use document::{Document, PageText, assemble};
pub use error::ChatError;
#[doc(inline)]
pub use extract::{DocumentId, Extracted, PageExtractor};
#[doc(inline)]
pub use llm::{LLMRequest, LanguageModel, Message, Role};
#[doc(inline)]
pub use session::{HistoryWindow, Prompt, Session, Turn};
