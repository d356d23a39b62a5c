//! Interactive CLI for asking questions about a PDF.
//!
//! # Usage
//!
//! ```bash
//! # Interactive loop, prompts for the PDF path
//! GROQ_API_KEY=xxx cargo run -p pdfqa-cli
//!
//! # Headless mode (single question, useful for scripting)
//! cargo run -p pdfqa-cli -- --pdf report.pdf --question "What is the total?" --quiet
//!
//! # Another provider
//! OPENAI_API_KEY=xxx cargo run -p pdfqa-cli -- --provider openai --model gpt-4o-mini
//! ```

pub mod command;
pub mod options;
pub mod render;
