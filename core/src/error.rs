//! Errors surfaced by the question loop.

use alloc::string::String;
use core::fmt;

/// Failures of a load or a question, already reduced to a readable cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The source could not be opened or parsed. The previous session is kept.
    Extraction(String),

    /// The remote answering call failed. History is unchanged.
    Gateway(String),

    /// Question answering is not configured (for example a missing API key).
    Configuration(String),

    /// A question was asked before any document was loaded.
    NoDocument,

    /// The question was blank after trimming.
    EmptyQuestion,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction(cause) => write!(f, "failed to read PDF: {cause}"),
            Self::Gateway(cause) => write!(f, "error during chat completion: {cause}"),
            Self::Configuration(cause) => write!(f, "question answering unavailable: {cause}"),
            Self::NoDocument => f.write_str("no document loaded"),
            Self::EmptyQuestion => f.write_str("question is empty"),
        }
    }
}

impl core::error::Error for ChatError {}
