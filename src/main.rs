use std::path::PathBuf;

use clap::Parser;
use taskd_store::Database;

/// Task management HTTP API backed by SQLite.
#[derive(Parser)]
#[command(name = "taskd", version)]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "TASKD_PORT", default_value_t = 8081)]
    port: u16,

    /// Path to the SQLite database file. Defaults to ~/.taskd/tasks.db.
    #[arg(long, env = "TASKD_DB")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting taskd server");

    let db_path = cli
        .db
        .unwrap_or_else(|| dirs_home().join(".taskd").join("tasks.db"));

    let db = Database::open(&db_path).expect("Failed to open database");
    tracing::info!(path = %db.path().display(), "Database opened");

    let config = taskd_server::ServerConfig { port: cli.port };
    let handle = taskd_server::start(config, db)
        .await
        .expect("Failed to start server");

    tracing::info!(port = handle.port, "taskd ready");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");

    tracing::info!("Shutting down");
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}
