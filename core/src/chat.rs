//! The question loop shared by every front end.
//!
//! [`DocumentChat`] drives the extractor, the assembler, the session and the
//! gateway:
//!
//! ```text
//! NoDocument ──load──▶ Loaded ──ask──▶ (answering) ──▶ Loaded
//!                        ▲                                │
//!                        └────────────── load ────────────┘
//! ```
//!
//! A failed load keeps the previous session. A failed question leaves the
//! history exactly as it was.

use alloc::string::{String, ToString};

use crate::{
    document::{Document, assemble},
    error::ChatError,
    extract::{DocumentId, Extracted, PageExtractor},
    llm::{LLMRequest, LanguageModel, Parameters},
    session::{Prompt, Session, Turn},
};

/// Where the loop currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// Nothing has been loaded yet.
    NoDocument,
    /// A document with no extractable text is loaded.
    EmptyDocument,
    /// A document is loaded and questions can be asked.
    Ready,
}

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document was loaded and the history reset.
    Loaded {
        /// Number of pages read.
        pages: usize,
    },
    /// The document was loaded but no page had any text.
    Empty {
        /// Number of pages read.
        pages: usize,
    },
    /// The source matches the active document; nothing was reloaded.
    Unchanged,
}

impl LoadOutcome {
    /// Returns `true` when the loaded document has nothing to ground answers on.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// One conversation about one document at a time.
///
/// Questions take `&mut self`, so a single chat never has two gateway calls in
/// flight. Share it behind an async mutex when several tasks can reach it.
#[derive(Debug)]
pub struct DocumentChat<X, M> {
    extractor: X,
    model: Result<M, String>,
    prompt: Prompt,
    parameters: Parameters,
    session: Option<Session>,
    title: Option<String>,
}

impl<X: PageExtractor, M: LanguageModel> DocumentChat<X, M> {
    /// Creates a chat that can answer questions with `model`.
    pub fn new(extractor: X, model: M) -> Self {
        Self::with_model_result(extractor, Ok(model))
    }

    /// Creates a chat that can load documents but not answer questions.
    ///
    /// Every question fails with [`ChatError::Configuration`] carrying `cause`.
    pub fn without_model(extractor: X, cause: impl Into<String>) -> Self {
        Self::with_model_result(extractor, Err(cause.into()))
    }

    /// Creates a chat from a possibly missing model.
    pub fn with_model_result(extractor: X, model: Result<M, String>) -> Self {
        Self {
            extractor,
            model,
            prompt: Prompt::default(),
            parameters: Parameters::default(),
            session: None,
            title: None,
        }
    }

    /// Sets the system prompt wrapped around the document.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Prompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Sets the sampling parameters sent with each question.
    #[must_use]
    pub const fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ChatState {
        match &self.session {
            None => ChatState::NoDocument,
            Some(session) if !session.document().has_text() => ChatState::EmptyDocument,
            Some(_) => ChatState::Ready,
        }
    }

    /// Returns `true` if questions can reach a model.
    #[must_use]
    pub const fn can_answer(&self) -> bool {
        self.model.is_ok()
    }

    /// Returns the active session, if a document is loaded.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns the active document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.session.as_ref().map(Session::document)
    }

    /// Returns the metadata title of the active document, if it has one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the committed turns of the active session.
    #[must_use]
    pub fn history(&self) -> &[Turn] {
        match &self.session {
            Some(session) => session.turns(),
            None => &[],
        }
    }

    /// Returns the prompt used to build system messages.
    #[must_use]
    pub const fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Extracts `source` and starts a fresh session for it.
    ///
    /// # Errors
    /// Returns [`ChatError::Extraction`] when the source cannot be read; the
    /// previous session, if any, is left untouched.
    pub async fn load(&mut self, source: &X::Source) -> Result<LoadOutcome, ChatError> {
        let extracted = self.extractor.extract(source).await.map_err(|err| {
            tracing::warn!(error = %err, "document extraction failed");
            ChatError::Extraction(err.to_string())
        })?;
        Ok(self.install(extracted))
    }

    /// Loads `source` only if its identity differs from the active document.
    ///
    /// # Errors
    /// Returns [`ChatError::Extraction`] when the source cannot be identified
    /// or read.
    pub async fn load_if_changed(&mut self, source: &X::Source) -> Result<LoadOutcome, ChatError> {
        let id = self
            .extractor
            .identify(source)
            .await
            .map_err(|err| ChatError::Extraction(err.to_string()))?;
        if self.session.as_ref().is_some_and(|session| session.id() == &id) {
            tracing::debug!(id = %id, "document unchanged, keeping session");
            return Ok(LoadOutcome::Unchanged);
        }
        self.load(source).await
    }

    /// Installs pages that were extracted elsewhere.
    pub fn install(&mut self, extracted: Extracted) -> LoadOutcome {
        let Extracted { id, pages, title } = extracted;
        let document = assemble(&pages);
        let outcome = if document.has_text() {
            LoadOutcome::Loaded { pages: pages.len() }
        } else {
            tracing::warn!(id = %id, pages = pages.len(), "no text could be extracted");
            LoadOutcome::Empty { pages: pages.len() }
        };
        tracing::info!(id = %id, pages = pages.len(), chars = document.len(), "document loaded");
        self.replace(id, document);
        self.title = title;
        outcome
    }

    /// Clears the history while keeping the current document.
    ///
    /// Returns `false` when no document is loaded.
    pub fn reset(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let (id, document) = (session.id().clone(), session.document().clone());
        self.replace(id, document);
        true
    }

    /// Asks a question about the loaded document.
    ///
    /// On success the question and reply are appended to the history and the
    /// reply is returned. On failure the history is unchanged.
    ///
    /// # Errors
    /// - [`ChatError::EmptyQuestion`] if `question` is blank.
    /// - [`ChatError::NoDocument`] if nothing was loaded.
    /// - [`ChatError::Configuration`] if no model is configured.
    /// - [`ChatError::Gateway`] if the model call fails.
    pub async fn ask(&mut self, question: &str) -> Result<String, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        let session = self.session.as_mut().ok_or(ChatError::NoDocument)?;
        let model = self
            .model
            .as_ref()
            .map_err(|cause| ChatError::Configuration(cause.clone()))?;

        if !session.document().has_text() {
            tracing::warn!("answering against a document with no extracted text");
        }

        let messages = session.build_request(&self.prompt, question);
        tracing::debug!(
            model = model.model(),
            messages = messages.len(),
            "sending question"
        );
        let request = LLMRequest::new(messages).with_parameters(self.parameters);
        let answer = model.respond(request).await.map_err(|err| {
            tracing::warn!(error = %err, "chat completion failed");
            ChatError::Gateway(err.to_string())
        })?;

        session.commit(question, answer.clone());
        Ok(answer)
    }

    fn replace(&mut self, id: DocumentId, document: Document) {
        match &mut self.session {
            Some(session) => session.reset(id, document),
            None => self.session = Some(Session::new(id, document)),
        }
    }
}
