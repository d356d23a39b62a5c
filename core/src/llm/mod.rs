//! # Language models
//!
//! Provider-agnostic request type and the [`LanguageModel`] trait that the
//! answering gateway implements.
//!
//! ```rust
//! use pdfqa_core::llm::{LLMRequest, Message};
//!
//! let request = LLMRequest::new([
//!     Message::system("The following is the content of a PDF file: ..."),
//!     Message::user("What is on page 1?"),
//! ]);
//! assert_eq!(request.messages().len(), 2);
//! ```

/// Message types and conversation roles.
pub mod message;
/// Sampling parameters.
pub mod model;

use alloc::{boxed::Box, string::String, sync::Arc, vec::Vec};
use core::future::Future;

pub use message::{Message, Role};
pub use model::Parameters;

/// Request passed into [`LanguageModel::respond`].
///
/// Wraps the full outbound message list plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LLMRequest {
    messages: Vec<Message>,
    parameters: Parameters,
}

impl LLMRequest {
    /// Creates a request from the provided messages using default parameters.
    pub fn new(messages: impl Into<Vec<Message>>) -> Self {
        Self {
            messages: messages.into(),
            parameters: Parameters::default(),
        }
    }

    /// Overrides the sampling parameters used for this call.
    #[must_use]
    pub const fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the conversation messages.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the parameter snapshot.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Breaks the request into owned components.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Message>, Parameters) {
        (self.messages, self.parameters)
    }
}

/// A remote or local chat model that turns a message list into one reply.
///
/// Implementations make a single attempt per call; no retry is performed.
pub trait LanguageModel: Send + Sync {
    /// The error type returned by this language model.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Sends the conversation and resolves to the complete assistant reply.
    fn respond(
        &self,
        request: LLMRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Returns the configured model identifier.
    fn model(&self) -> &str;
}

macro_rules! impl_language_model {
    ($($name:ident),*) => {
        $(
            impl<T: LanguageModel> LanguageModel for $name<T> {
                type Error = T::Error;

                fn respond(
                    &self,
                    request: LLMRequest,
                ) -> impl Future<Output = Result<String, Self::Error>> + Send {
                    T::respond(self, request)
                }

                fn model(&self) -> &str {
                    T::model(self)
                }
            }
        )*
    };
}

impl<T: LanguageModel> LanguageModel for &T {
    type Error = T::Error;

    fn respond(
        &self,
        request: LLMRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        T::respond(self, request)
    }

    fn model(&self) -> &str {
        T::model(self)
    }
}

impl_language_model!(Arc, Box);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[derive(Debug)]
    struct Echo;

    #[derive(Debug)]
    struct Never;

    impl core::fmt::Display for Never {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("never")
        }
    }

    impl core::error::Error for Never {}

    impl LanguageModel for Echo {
        type Error = Never;

        async fn respond(&self, request: LLMRequest) -> Result<String, Self::Error> {
            Ok(request
                .messages()
                .last()
                .map(|m| m.content().to_string())
                .unwrap_or_default())
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn wrappers_delegate() {
        let request = LLMRequest::new(vec![Message::user("ping")]);
        assert_eq!(Arc::new(Echo).respond(request.clone()).await.unwrap(), "ping");
        assert_eq!(Box::new(Echo).respond(request.clone()).await.unwrap(), "ping");
        assert_eq!((&Echo).respond(request).await.unwrap(), "ping");
        assert_eq!(Arc::new(Echo).model(), "echo");
    }

    #[test]
    fn request_parts() {
        let request = LLMRequest::new(vec![Message::user("q")])
            .with_parameters(Parameters::default().temperature(0.2));
        assert_eq!(request.parameters().temperature, Some(0.2));
        let (messages, parameters) = request.into_parts();
        assert_eq!(messages, vec![Message::user("q")]);
        assert_eq!(parameters.temperature, Some(0.2));
    }
}
