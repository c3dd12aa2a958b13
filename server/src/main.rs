use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use server::board::WordBank;
use server::network::{self, AppState};
use server::session::SessionStore;

/// Parses command-line arguments, builds the word bank and shared state,
/// then serves the coordinator until interrupted.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Server IP address to bind to
        #[clap(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Server port to listen on
        #[clap(short, long, default_value = "5001")]
        port: u16,
        /// Word list file, one word per line (defaults to the built-in bank)
        #[clap(short, long)]
        words: Option<PathBuf>,
    }

    env_logger::init();
    let args = Args::parse();

    let bank = match &args.words {
        Some(path) => WordBank::from_file(path)?,
        None => WordBank::built_in(),
    };
    info!("Loaded {} words", bank.len());

    let state = AppState::new(SessionStore::new(bank));
    let app = network::router(Arc::clone(&state));

    let address = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server listening on {}", address);
    info!("Games are created automatically on first visit to /player/<id> or /spymaster/<id>");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received Ctrl+C, shutting down gracefully...");
        })
        .await?;

    Ok(())
}
