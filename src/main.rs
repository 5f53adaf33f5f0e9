use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notebot::{api, chat, config::Config, context::AppContext, models::OwnerId};

#[derive(Parser)]
#[command(name = "notebot")]
#[command(about = "Conversational note-taking bot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP message endpoint
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Chat with the bot on stdin/stdout as a single owner
    Chat {
        /// Owner identity to chat as
        #[arg(short, long, default_value = "local")]
        owner: String,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

/// Initialize tracing with output to stderr (for chat mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "notebot=info,tower_http=info".into()),
    );

    if use_stderr {
        // Chat mode: stdout is the conversation
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    tracing::info!("Starting notebot server on {}", addr);

    let ctx = AppContext::open(config)?;
    let app = api::create_router(&ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("notebot listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let pending = ctx.conversations().pending_count().await;
    tracing::warn!(pending, "Shutting down, dropping pending conversation steps");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(cli.command, Some(Commands::Chat { .. }));
    init_tracing(use_stderr);

    let mut config = Config::from_env();

    match cli.command {
        Some(Commands::Serve { host, port, db }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if db.is_some() {
                config.database_path = db;
            }
            serve(config).await?;
        }
        Some(Commands::Chat { owner, db }) => {
            if db.is_some() {
                config.database_path = db;
            }
            let ctx = AppContext::open(config)?;
            chat::run_stdio_chat(ctx, OwnerId::new(owner)).await?;
        }
        None => serve(config).await?,
    }

    Ok(())
}
