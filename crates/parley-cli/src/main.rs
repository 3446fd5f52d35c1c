use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parley_cli::{commands::App, config::Config};
use parley_client::{ApiClient, StaticToken};
use parley_session::{ChatService, Orchestrator};
use parley_store::ConversationStore;
use parley_types::ConversationId;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List conversations
    Conversations,
    /// List the model catalog
    Models,
    /// Print a conversation's history
    History {
        id: ConversationId,
    },
    /// Create a conversation
    New {
        title: String,
    },
    /// Delete a conversation
    Delete {
        id: ConversationId,
    },
    /// Send a message and stream the reply (Ctrl-C cancels)
    Send {
        id: ConversationId,
        message: String,
        /// Model id; defaults to the conversation's last model or the catalog default
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);
    tracing::debug!(base_url = %config.api.base_url, "Config loaded");

    let client = Arc::new(
        ApiClient::builder()
            .base_url(&config.api.base_url)
            .token_provider(Arc::new(StaticToken::new(config.token.clone())))
            .connect_timeout(config.api.connect_timeout())
            .read_timeout(config.api.read_timeout())
            .build()
            .context("Failed to create API client")?,
    );
    let store = Arc::new(ConversationStore::new());

    let app = App {
        service: ChatService::new(client.clone(), store.clone()),
        orchestrator: Orchestrator::new(store, client),
        default_model: config.chat.default_model.clone(),
    };

    match cli.command {
        Commands::Conversations => app.conversations().await,
        Commands::Models => app.models().await,
        Commands::History { id } => app.history(id).await,
        Commands::New { title } => app.create(&title).await,
        Commands::Delete { id } => app.delete(id).await,
        Commands::Send { id, message, model } => app.send(id, &message, model).await,
    }
}

/// Logs go to stderr so stdout only carries chat output
fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
