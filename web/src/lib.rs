//! Web form for asking questions about an uploaded PDF.
//!
//! Every browser session gets its own [`DocumentChat`], keyed by a UUID that
//! travels in a hidden form field. The chat sits behind an async mutex, so a
//! session handles one upload or question at a time while other sessions
//! proceed independently.
//!
//! A session is stored only once an upload succeeds. Questions for unknown
//! sessions are answered against a throwaway chat. At most
//! [`Settings::max_sessions`] are kept; the least recently used one is
//! evicted first.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | Upload and question form |
//! | `POST /upload` | Multipart `session` + `file`; reloads only when the file changed |
//! | `POST /ask` | Form `session` + `question` |
//! | `GET /health` | Liveness probe, returns `ok` |

mod page;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use askama::Template;
use axum::Router;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Form, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use pdfqa_core::llm::Parameters;
use pdfqa_core::{ChatState, DocumentChat, LanguageModel, LoadOutcome, Prompt};
use pdfqa_pdf_process::{PdfExtractor, PdfSource};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::page::Notice;

type Chat<M> = DocumentChat<PdfExtractor, M>;

/// Server-wide settings shared by every session.
#[derive(Debug, Clone)]
pub struct Settings {
    /// System prompt wrapped around each document.
    pub prompt: Prompt,
    /// Sampling parameters sent with each question.
    pub parameters: Parameters,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    /// Most sessions held in memory at once.
    pub max_sessions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: Prompt::default(),
            parameters: Parameters::default(),
            max_upload_bytes: 20 * 1024 * 1024,
            max_sessions: 256,
        }
    }
}

/// One browser session.
struct Visitor<M> {
    chat: Chat<M>,
    file_name: Option<String>,
}

type SharedVisitor<M> = Arc<Mutex<Visitor<M>>>;

struct Entry<T> {
    value: T,
    last_used: u64,
}

/// Stored sessions with a use counter for least-recently-used eviction.
struct Sessions<T> {
    entries: HashMap<Uuid, Entry<T>>,
    clock: u64,
}

impl<T: Clone> Sessions<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn get(&mut self, id: Uuid) -> Option<T> {
        let now = self.tick();
        self.entries.get_mut(&id).map(|entry| {
            entry.last_used = now;
            entry.value.clone()
        })
    }

    fn insert(&mut self, id: Uuid, value: T, max: usize) {
        let now = self.tick();
        while !self.entries.contains_key(&id) && self.entries.len() >= max.max(1) {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| *id)
            else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!(session = %oldest, "evicted least recently used session");
        }
        self.entries.insert(
            id,
            Entry {
                value,
                last_used: now,
            },
        );
    }
}

struct Shared<M> {
    model: Result<M, String>,
    extractor: PdfExtractor,
    settings: Settings,
    sessions: Mutex<Sessions<SharedVisitor<M>>>,
}

/// Application state handed to every request.
pub struct AppState<M> {
    inner: Arc<Shared<M>>,
}

impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> fmt::Debug for AppState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("settings", &self.inner.settings)
            .field("can_answer", &self.inner.model.is_ok())
            .finish_non_exhaustive()
    }
}

impl<M: LanguageModel + Clone + 'static> AppState<M> {
    /// Creates the state; `model` is the gateway or the reason none is available.
    pub fn new(model: Result<M, String>, extractor: PdfExtractor, settings: Settings) -> Self {
        Self {
            inner: Arc::new(Shared {
                model,
                extractor,
                settings,
                sessions: Mutex::new(Sessions::new()),
            }),
        }
    }

    /// Number of sessions currently held in memory.
    pub async fn session_count(&self) -> usize {
        self.inner.sessions.lock().await.entries.len()
    }

    async fn stored(&self, id: Uuid) -> Option<SharedVisitor<M>> {
        self.inner.sessions.lock().await.get(id)
    }

    async fn store(&self, id: Uuid, visitor: Visitor<M>) {
        tracing::debug!(session = %id, "new session");
        self.inner.sessions.lock().await.insert(
            id,
            Arc::new(Mutex::new(visitor)),
            self.inner.settings.max_sessions,
        );
    }

    fn fresh_visitor(&self) -> Visitor<M> {
        Visitor {
            chat: Chat::with_model_result(self.inner.extractor.clone(), self.inner.model.clone())
                .with_prompt(self.inner.settings.prompt.clone())
                .with_parameters(self.inner.settings.parameters),
            file_name: None,
        }
    }
}

/// Builds the router with tracing and the upload size limit applied.
pub fn router<M: LanguageModel + Clone + 'static>(state: AppState<M>) -> Router {
    let limit = state.inner.settings.max_upload_bytes;
    Router::new()
        .route("/", get(index::<M>))
        .route("/upload", post(upload::<M>))
        .route("/ask", post(ask::<M>))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Failures that abort a request instead of being shown on the page.
#[derive(Debug)]
pub enum AppError {
    /// The multipart body could not be read.
    Multipart(MultipartError),
    /// The page template failed to render.
    Render(askama::Error),
}

impl From<MultipartError> for AppError {
    fn from(value: MultipartError) -> Self {
        Self::Multipart(value)
    }
}

impl From<askama::Error> for AppError {
    fn from(value: askama::Error) -> Self {
        Self::Render(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Multipart(err) => err.into_response(),
            Self::Render(err) => {
                tracing::error!(error = %err, "failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
            }
        }
    }
}

async fn index<M: LanguageModel + Clone + 'static>(
    State(state): State<AppState<M>>,
) -> Result<Html<String>, AppError> {
    let view = page::View::empty(Uuid::new_v4(), state.inner.model.is_ok(), &state.inner.settings);
    Ok(Html(view.render()?))
}

async fn upload<M: LanguageModel + Clone + 'static>(
    State(state): State<AppState<M>>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let mut session = String::new();
    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "session" => session = field.text().await?,
            "file" => {
                let file_name = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .unwrap_or("upload.pdf")
                    .to_string();
                let bytes = field.bytes().await?;
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let id = session_id(&session);
    let html = if let Some(stored) = state.stored(id).await {
        let mut visitor = stored.lock().await;
        let notice = load_upload(&mut visitor, file).await;
        render(id, &visitor, &state.inner.settings, Some(notice))?
    } else {
        let mut visitor = state.fresh_visitor();
        let notice = load_upload(&mut visitor, file).await;
        let html = render(id, &visitor, &state.inner.settings, Some(notice))?;
        if visitor.chat.document().is_some() {
            state.store(id, visitor).await;
        }
        html
    };
    Ok(Html(html))
}

async fn load_upload<M: LanguageModel>(
    visitor: &mut Visitor<M>,
    file: Option<(String, Bytes)>,
) -> Notice {
    match file {
        Some((file_name, bytes)) if !bytes.is_empty() => {
            let source = PdfSource::bytes(file_name.clone(), bytes.to_vec());
            match visitor.chat.load_if_changed(&source).await {
                Ok(LoadOutcome::Unchanged) => Notice::info("This PDF is already loaded."),
                Ok(LoadOutcome::Empty { .. }) => {
                    visitor.file_name = Some(file_name);
                    Notice::warning(
                        "No text could be extracted from the PDF. Answers will not be grounded in it.",
                    )
                }
                Ok(LoadOutcome::Loaded { pages }) => {
                    let text = format!("Text extraction successful: {file_name}, {pages} pages.");
                    visitor.file_name = Some(file_name);
                    Notice::info(text)
                }
                Err(err) => Notice::error(err.to_string()),
            }
        }
        _ => Notice::error("Choose a PDF file to upload."),
    }
}

fn render<M: LanguageModel>(
    id: Uuid,
    visitor: &Visitor<M>,
    settings: &Settings,
    notice: Option<Notice>,
) -> Result<String, AppError> {
    let mut view = page::View::of(id, &visitor.chat, visitor.file_name.as_deref(), settings);
    if let Some(notice) = notice {
        view = view.with_notice(notice);
    }
    Ok(view.render()?)
}

/// Fields of the question form.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    session: String,
    #[serde(default)]
    question: String,
}

async fn ask<M: LanguageModel + Clone + 'static>(
    State(state): State<AppState<M>>,
    Form(form): Form<AskForm>,
) -> Result<Html<String>, AppError> {
    let id = session_id(&form.session);
    let html = if let Some(stored) = state.stored(id).await {
        let mut visitor = stored.lock().await;
        let notice = ask_question(&mut visitor, &form.question).await;
        render(id, &visitor, &state.inner.settings, notice)?
    } else {
        let mut visitor = state.fresh_visitor();
        let notice = ask_question(&mut visitor, &form.question).await;
        render(id, &visitor, &state.inner.settings, notice)?
    };
    Ok(Html(html))
}

async fn ask_question<M: LanguageModel>(visitor: &mut Visitor<M>, question: &str) -> Option<Notice> {
    let ungrounded = visitor.chat.state() == ChatState::EmptyDocument;
    match visitor.chat.ask(question).await {
        Ok(_) if ungrounded => Some(Notice::warning(
            "The document has no extracted text; this answer is not grounded in it.",
        )),
        Ok(_) => None,
        Err(err) => Some(Notice::error(err.to_string())),
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Reads the session id from a form field, minting a new one when absent or invalid.
fn session_id(raw: &str) -> Uuid {
    Uuid::parse_str(raw.trim()).unwrap_or_else(|_| Uuid::new_v4())
}
