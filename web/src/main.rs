//! Web front end for asking questions about an uploaded PDF.
//!
//! ```bash
//! GROQ_API_KEY=xxx cargo run -p pdfqa-web -- --bind 127.0.0.1:3000
//! ```

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use pdfqa_cli::options::ChatArgs;
use pdfqa_web::{AppState, Settings, router};
use tracing_subscriber::EnvFilter;

/// Serve the PDF question form.
#[derive(Parser, Debug)]
#[command(name = "pdfqa-web", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "PDFQA_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Largest accepted upload, in megabytes.
    #[arg(long, default_value_t = 20)]
    max_upload_mb: usize,

    /// Most browser sessions kept in memory; the least recently used is dropped first.
    #[arg(long, default_value_t = 256)]
    max_sessions: usize,

    #[command(flatten)]
    chat: ChatArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.chat.chat_config();
    let settings = Settings {
        prompt: config.prompt(),
        parameters: config.parameters(),
        max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
        max_sessions: args.max_sessions,
    };
    let state = AppState::new(config.connect(), args.chat.extractor(), settings);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    tracing::info!(addr = %args.bind, provider = %args.chat.provider, "listening");

    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}
