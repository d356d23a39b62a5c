use askama::Template;
use pdfqa_core::{DocumentChat, LanguageModel, PageExtractor, Role};
use uuid::Uuid;

use crate::Settings;

/// Message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    level: &'static str,
    text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: "info",
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: "warning",
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: "error",
            text: text.into(),
        }
    }
}

struct DocumentView {
    name: String,
    title: Option<String>,
    pages: usize,
    chars: usize,
    has_text: bool,
}

struct TurnView {
    speaker: &'static str,
    content: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct View {
    session: String,
    notice: Option<Notice>,
    can_answer: bool,
    max_upload_mb: usize,
    document: Option<DocumentView>,
    turns: Vec<TurnView>,
}

impl View {
    /// Page for a visitor that has not uploaded anything yet.
    pub fn empty(session: Uuid, can_answer: bool, settings: &Settings) -> Self {
        Self {
            session: session.to_string(),
            notice: None,
            can_answer,
            max_upload_mb: settings.max_upload_bytes / (1024 * 1024),
            document: None,
            turns: Vec::new(),
        }
    }

    /// Page reflecting a session's document and history.
    pub fn of<X: PageExtractor, M: LanguageModel>(
        session: Uuid,
        chat: &DocumentChat<X, M>,
        file_name: Option<&str>,
        settings: &Settings,
    ) -> Self {
        let mut view = Self::empty(session, chat.can_answer(), settings);
        view.document = chat.document().map(|document| DocumentView {
            name: file_name.unwrap_or("document.pdf").to_string(),
            title: chat.title().map(str::to_string),
            pages: document.page_count(),
            chars: document.as_str().chars().count(),
            has_text: document.has_text(),
        });
        view.turns = chat
            .history()
            .iter()
            .map(|turn| TurnView {
                speaker: match turn.role() {
                    Role::User => "You",
                    Role::Assistant => "Answer",
                    Role::System => "System",
                },
                content: turn.content().to_string(),
            })
            .collect();
        view
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
