//! Conversation state for one loaded document.
//!
//! A [`Session`] owns the grounding [`Document`] and the append-only list of
//! [`Turn`]s asked against it. The only mutation points are
//! [`Session::reset`] and [`Session::commit`]; building a request never
//! changes the session.

use alloc::{string::String, vec::Vec};

use crate::{
    document::Document,
    extract::DocumentId,
    llm::{Message, Role},
};

/// Default text placed before the document in the system message.
pub const DEFAULT_SYSTEM_PREFIX: &str = "The following is the content of a PDF file:\n";
/// Default instruction placed after the document in the system message.
pub const DEFAULT_SYSTEM_SUFFIX: &str = "\nPlease answer questions based on this document.";

/// One user question or assistant reply.
///
/// Turns can only be created with the user or assistant role.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Returns the speaker role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the turn text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Converts the turn into an outbound message.
    #[must_use]
    pub fn to_message(&self) -> Message {
        Message::with_role(self.role, self.content.clone())
    }
}

/// How much of the history is resent with each question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Resend every turn (the default).
    #[default]
    Unbounded,
    /// Resend only the most recent `n` question/answer pairs.
    LastPairs(usize),
}

/// Text wrapped around the document to form the system message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    prefix: String,
    suffix: String,
    window: HistoryWindow,
}

impl Default for Prompt {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_SYSTEM_PREFIX.into(),
            suffix: DEFAULT_SYSTEM_SUFFIX.into(),
            window: HistoryWindow::Unbounded,
        }
    }
}

impl Prompt {
    /// Creates the default prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the system prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Overrides the instruction suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the history window.
    #[must_use]
    pub const fn with_window(mut self, window: HistoryWindow) -> Self {
        self.window = window;
        self
    }

    /// Returns the system prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the instruction suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the history window.
    #[must_use]
    pub const fn window(&self) -> HistoryWindow {
        self.window
    }

    /// Builds the system message content for a document.
    #[must_use]
    pub fn system_content(&self, document: &Document) -> String {
        let mut content =
            String::with_capacity(self.prefix.len() + document.len() + self.suffix.len());
        content.push_str(&self.prefix);
        content.push_str(document.as_str());
        content.push_str(&self.suffix);
        content
    }
}

/// Document plus the turns asked against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: DocumentId,
    document: Document,
    turns: Vec<Turn>,
}

impl Session {
    /// Starts a session for a freshly loaded document.
    #[must_use]
    pub const fn new(id: DocumentId, document: Document) -> Self {
        Self {
            id,
            document,
            turns: Vec::new(),
        }
    }

    /// Replaces the document and clears the history.
    pub fn reset(&mut self, id: DocumentId, document: Document) {
        self.id = id;
        self.document = document;
        self.turns.clear();
    }

    /// Identity of the loaded source.
    #[must_use]
    pub const fn id(&self) -> &DocumentId {
        &self.id
    }

    /// The grounding document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// All committed turns, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Builds the outbound message list for a new question.
    ///
    /// The result is one system message, then the history (or its most recent
    /// window) in original order, then one user message holding `question`.
    #[must_use]
    pub fn build_request(&self, prompt: &Prompt, question: &str) -> Vec<Message> {
        let history = match prompt.window() {
            HistoryWindow::Unbounded => self.turns.as_slice(),
            HistoryWindow::LastPairs(pairs) => {
                let keep = pairs.saturating_mul(2).min(self.turns.len());
                &self.turns[self.turns.len() - keep..]
            }
        };

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(prompt.system_content(&self.document)));
        messages.extend(history.iter().map(Turn::to_message));
        messages.push(Message::user(question));
        messages
    }

    /// Records a successful question/answer exchange.
    pub fn commit(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Turn::user(question));
        self.turns.push(Turn::assistant(answer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PageText, assemble};
    use alloc::vec;

    fn session() -> Session {
        let document = assemble(&[PageText::new(1, "Alpha"), PageText::new(2, "Beta")]);
        Session::new(DocumentId::new("doc-1"), document)
    }

    #[test]
    fn new_session_is_empty() {
        let session = session();
        assert!(session.turns().is_empty());
        assert_eq!(session.id().as_str(), "doc-1");
        assert_eq!(
            session.document().as_str(),
            "\n--- Page 1 ---\nAlpha\n--- Page 2 ---\nBeta"
        );
    }

    #[test]
    fn first_question_has_system_and_user() {
        let session = session();
        let messages = session.build_request(&Prompt::default(), "What is on page 1?");
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0],
            Message::system(
                "The following is the content of a PDF file:\n\
                 \n--- Page 1 ---\nAlpha\n--- Page 2 ---\nBeta\
                 \nPlease answer questions based on this document."
            )
        );
        assert_eq!(messages[1], Message::user("What is on page 1?"));
    }

    #[test]
    fn commit_appends_pair_in_order() {
        let mut session = session();
        session.commit("What is on page 1?", "Alpha is on page 1.");
        assert_eq!(
            session.turns(),
            &[
                Turn::user("What is on page 1?"),
                Turn::assistant("Alpha is on page 1.")
            ]
        );

        session.commit("And page 2?", "Beta.");
        assert_eq!(session.turns().len(), 4);
        assert_eq!(session.turns()[0], Turn::user("What is on page 1?"));
        assert_eq!(session.turns()[3], Turn::assistant("Beta."));
    }

    #[test]
    fn second_question_resends_history() {
        let mut session = session();
        session.commit("q1", "a1");
        let before = session.clone();

        let messages = session.build_request(&Prompt::default(), "q2");
        assert_eq!(
            messages.iter().map(Message::role).collect::<Vec<_>>(),
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(messages[1].content(), "q1");
        assert_eq!(messages[2].content(), "a1");
        assert_eq!(messages[3].content(), "q2");
        assert_eq!(session, before);
    }

    #[test]
    fn reset_discards_history() {
        let mut session = session();
        session.commit("q1", "a1");
        let replacement = assemble(&[PageText::new(1, "Gamma")]);
        session.reset(DocumentId::new("doc-2"), replacement.clone());
        assert!(session.turns().is_empty());
        assert_eq!(session.document(), &replacement);
        assert_eq!(session.id().as_str(), "doc-2");
    }

    #[test]
    fn custom_prompt_wraps_document() {
        let session = session();
        let prompt = Prompt::new().with_prefix("DOC:").with_suffix(":END");
        let messages = session.build_request(&prompt, "q");
        assert!(messages[0].content().starts_with("DOC:\n--- Page 1 ---"));
        assert!(messages[0].content().ends_with("Beta:END"));
    }

    #[test]
    fn window_keeps_most_recent_pairs() {
        let mut session = session();
        session.commit("q1", "a1");
        session.commit("q2", "a2");
        session.commit("q3", "a3");

        let prompt = Prompt::new().with_window(HistoryWindow::LastPairs(1));
        let messages = session.build_request(&prompt, "q4");
        let contents: Vec<&str> = messages[1..].iter().map(Message::content).collect();
        assert_eq!(contents, vec!["q3", "a3", "q4"]);
        assert_eq!(session.turns().len(), 6);

        let prompt = Prompt::new().with_window(HistoryWindow::LastPairs(10));
        assert_eq!(session.build_request(&prompt, "q4").len(), 8);

        let prompt = Prompt::new().with_window(HistoryWindow::LastPairs(0));
        assert_eq!(session.build_request(&prompt, "q4").len(), 2);
    }
}
