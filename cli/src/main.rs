//! Interactive CLI for asking questions about a PDF.
//!
//! Loads one PDF, prints a snippet of its text, then answers questions about
//! it through an OpenAI-compatible chat completion API (Groq by default).
//!
//! # Usage
//!
//! ```bash
//! # Prompt for the PDF path, then ask questions
//! GROQ_API_KEY=xxx cargo run -p pdfqa-cli
//!
//! # Load a file directly
//! cargo run -p pdfqa-cli -- --pdf report.pdf
//!
//! # Headless mode (single question, exits non-zero on failure)
//! cargo run -p pdfqa-cli -- --pdf report.pdf --question "Who signed it?" --quiet
//! ```

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use pdfqa_cli::command::{self, Command};
use pdfqa_cli::options::ChatArgs;
use pdfqa_cli::render;
use pdfqa_core::{ChatState, DocumentChat, LanguageModel};
use pdfqa_openai::OpenAI;
use pdfqa_pdf_process::{PdfExtractor, PdfSource};
use tracing_subscriber::EnvFilter;

type Chat = DocumentChat<PdfExtractor, OpenAI>;

/// Ask questions about a PDF with a hosted chat model.
#[derive(Parser, Debug)]
#[command(name = "pdfqa", version, about)]
struct Args {
    /// PDF to load. Prompted for when omitted.
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Ask a single question and exit (requires --pdf).
    #[arg(long)]
    question: Option<String>,

    /// Suppress banners; only answers and errors are printed.
    #[arg(short, long)]
    quiet: bool,

    /// Characters of extracted text to preview after loading (0 disables).
    #[arg(long, default_value_t = 500)]
    snippet_chars: usize,

    #[command(flatten)]
    chat: ChatArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = args.chat.chat_config();
    let model = config.connect();
    let model_name = model
        .as_ref()
        .map(|m| m.model().to_string())
        .map_err(Clone::clone);
    let mut chat = Chat::with_model_result(args.chat.extractor(), model)
        .with_prompt(config.prompt())
        .with_parameters(config.parameters());

    if !args.quiet {
        println!("PDF Q&A");
        println!("Provider: {}", args.chat.provider);
        match &model_name {
            Ok(name) => println!("Model: {name}"),
            Err(cause) => println!("Warning: {cause}; questions will fail until it is set."),
        }
        println!();
    }

    if let Some(ref question) = args.question {
        return run_headless(&mut chat, &args, question).await;
    }

    run_repl(&mut chat, &args).await
}

async fn run_headless(chat: &mut Chat, args: &Args, question: &str) -> Result<()> {
    let Some(ref path) = args.pdf else {
        bail!("--question requires --pdf");
    };

    let outcome = chat
        .load(&PdfSource::path(path))
        .await
        .with_context(|| format!("loading {}", path.display()))?;
    if outcome.is_empty() {
        eprintln!("{}", render::load_outcome(outcome, chat.title()));
    }

    let answer = chat.ask(question).await?;
    println!("{answer}");
    Ok(())
}

async fn run_repl(chat: &mut Chat, args: &Args) -> Result<()> {
    let mut input = LineReader::new();

    let path = match &args.pdf {
        Some(path) => path.clone(),
        None => match input.read_line("Enter the path to your PDF file: ")? {
            Some(line) => PathBuf::from(command::unquote(&line)),
            None => return Ok(()),
        },
    };
    load_document(chat, &path, args).await;

    if !args.quiet
        && let Some(banner) = render::ready_banner(chat.state())
    {
        println!("{banner}");
    }

    loop {
        let Some(line) = input.read_line("Your question: ")? else {
            break;
        };

        match command::parse(&line) {
            Command::Empty => {}
            Command::Exit => break,
            Command::Help => println!("{}", render::HELP),
            Command::History => println!("{}", render::history(chat.history())),
            Command::Reset => {
                if chat.reset() {
                    println!("History cleared.");
                } else {
                    println!("No document loaded.");
                }
            }
            Command::Load(path) => load_document(chat, Path::new(path), args).await,
            Command::LoadUsage => println!("Usage: /load <path>"),
            Command::Unknown(cmd) => {
                println!("Unknown command: {cmd}");
                println!("Type /help for the list of commands.");
            }
            Command::Question(question) => {
                if chat.state() == ChatState::EmptyDocument {
                    println!("\x1b[33mWarning: the document has no extracted text.\x1b[0m");
                }
                match chat.ask(question).await {
                    Ok(answer) => println!("\nAnswer: {answer}\n"),
                    Err(e) => println!("\x1b[31m{e}\x1b[0m\n"),
                }
            }
        }
    }

    println!("Exiting the Q&A session.");
    Ok(())
}

async fn load_document(chat: &mut Chat, path: &Path, args: &Args) {
    tracing::debug!(path = %path.display(), pages = ?args.chat.pages, "loading document");
    if !args.quiet {
        println!("\nExtracting text from PDF...");
    }
    match chat.load(&PdfSource::path(path)).await {
        Ok(outcome) => {
            println!("{}", render::load_outcome(outcome, chat.title()));
            if !args.quiet
                && let Some(document) = chat.document()
                && let Some(snippet) = render::snippet(document, args.snippet_chars)
            {
                println!("{snippet}");
            }
        }
        Err(e) => println!("\x1b[31m{e}\x1b[0m"),
    }
}

/// Reads lines in raw mode on a terminal, or buffered from piped stdin.
enum LineReader {
    Terminal,
    Piped(io::StdinLock<'static>),
}

impl LineReader {
    fn new() -> Self {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            Self::Terminal
        } else {
            Self::Piped(stdin.lock())
        }
    }

    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self {
            Self::Terminal => read_line_raw(prompt),
            Self::Piped(stdin) => {
                print!("{prompt}");
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.read_line(&mut line)? == 0 {
                    println!();
                    return Ok(None);
                }
                Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
            }
        }
    }
}

fn read_line_raw(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    enable_raw_mode()?;
    let _guard = RawModeGuard;

    let mut buffer = String::new();
    loop {
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        print!("\r\n");
                        io::stdout().flush().ok();
                        return Ok(None);
                    }
                    KeyCode::Esc => {
                        print!("\r\n");
                        io::stdout().flush().ok();
                        return Ok(None);
                    }
                    KeyCode::Enter => {
                        print!("\r\n");
                        io::stdout().flush().ok();
                        return Ok(Some(buffer));
                    }
                    KeyCode::Backspace => {
                        if buffer.pop().is_some() {
                            print!("\u{8} \u{8}");
                            io::stdout().flush().ok();
                        }
                    }
                    KeyCode::Char(c) => {
                        buffer.push(c);
                        print!("{c}");
                        io::stdout().flush().ok();
                    }
                    _ => {}
                },
                Event::Paste(text) => {
                    buffer.push_str(&text);
                    print!("{text}");
                    io::stdout().flush().ok();
                }
                _ => {}
            }
        }
    }
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
