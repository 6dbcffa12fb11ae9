use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tipline_core::Config;
use tipline_http::{create_router, AppState};
use tipline_notify::NotificationDispatcher;
use tipline_storage::{seed_tips, PgTipStore, TipStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tipline")]
#[command(about = "Conversational webhook backend for the tips action", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook HTTP server.
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(short = 'H', long)]
        host: Option<String>,
    },
    /// Destructive reset: clear the tips collection and reseed it.
    Restore,
    /// Print the distinct tip categories.
    Categories,
    /// Authorize and fan out a push notification to every registered target.
    SendNotifications,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let store = Arc::new(PgTipStore::connect(&config.database_url).await?);

    match cli.command {
        Commands::Serve { port, host } => {
            let dispatcher = Arc::new(NotificationDispatcher::new(&config)?);
            let state = Arc::new(AppState { store, dispatcher });
            let router = create_router(state);
            let addr = format!(
                "{}:{}",
                host.unwrap_or_else(|| config.host.clone()),
                port.unwrap_or(config.port)
            );
            tracing::info!("Starting HTTP server on {}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        },
        Commands::Restore => {
            let seed = seed_tips()?;
            let count = store.restore(&seed).await?;
            println!("Restored {count} tips from the seed set.");
        },
        Commands::Categories => {
            let categories = store.categories().await?;
            println!("{}", categories.join(", "));
        },
        Commands::SendNotifications => {
            let dispatcher = NotificationDispatcher::new(&config)?;
            let report = dispatcher.authorize_and_send(store.as_ref()).await?;
            println!("Attempted {}, delivered {}.", report.attempted, report.delivered);
        },
    }

    Ok(())
}
