//! pocket-guru: spiritual guidance backend
//!
//! Usage:
//!   pocket-guru           - Start the HTTP API
//!   pocket-guru --help    - Show help
//!   pocket-guru --version - Show version

use std::sync::Arc;

use guru_api::{AppState, start_server};
use guru_core::{Config, OpenAiClient, PracticeCatalog};
use guru_voice::ElevenLabsClient;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    Server,
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args(std::env::args().skip(1)) {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("pocket-guru {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Before tracing init, so RUST_LOG may come from .env
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .init();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting pocket-guru...");
    tracing::info!(
        "Models: chat={}, script={}, realtime={}, speech={}",
        config.openai.chat_model,
        config.openai.script_model,
        config.openai.realtime_model,
        config.elevenlabs.model_id
    );

    let openai = OpenAiClient::new(&config.openai)
        .map_err(|e| anyhow::anyhow!("Failed to create OpenAI client: {}", e))?;
    let speech = ElevenLabsClient::new(&config.elevenlabs)
        .map_err(|e| anyhow::anyhow!("Failed to create speech client: {}", e))?;

    let catalog = PracticeCatalog::standard();
    tracing::info!("Loaded {} meditation practices", catalog.iter().count());

    let state = AppState::new(config, Arc::new(openai), Arc::new(speech), catalog);

    tracing::info!("Press Ctrl+C to exit");
    start_server(state, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// `RUST_LOG` when set and valid, otherwise `info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}

/// Parse command line arguments
fn parse_args(args: impl IntoIterator<Item = String>) -> RunMode {
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

fn print_help() {
    println!("pocket-guru - spiritual guidance backend");
    println!();
    println!("Usage:");
    println!("  pocket-guru           Start the HTTP API");
    println!("  pocket-guru --help    Show this help message");
    println!("  pocket-guru --version Show version");
    println!();
    println!("Configuration is read from ./pocket-guru.toml when present,");
    println!("otherwise from the environment (.env is loaded first).");
    println!();
    println!("Environment Variables:");
    println!("  OPENAI_API_KEY        OpenAI API key (required)");
    println!("  ELEVENLABS_API_KEY    ElevenLabs API key (required)");
    println!("  OPENAI_BASE_URL       OpenAI endpoint (default: https://api.openai.com/v1)");
    println!("  OPENAI_CHAT_MODEL     Chat model (default: gpt-4o)");
    println!("  OPENAI_SCRIPT_MODEL   Meditation script model (default: gpt-5)");
    println!("  OPENAI_REALTIME_MODEL Realtime voice model (default: gpt-realtime)");
    println!("  OPENAI_IMAGE_MODEL    Artwork model (default: gpt-image-1)");
    println!("  ELEVENLABS_BASE_URL   ElevenLabs endpoint (default: https://api.elevenlabs.io/v1)");
    println!("  ELEVENLABS_MODEL_ID   Speech model (default: eleven_v3)");
    println!("  API_PORT              HTTP API port (default: 3000)");
    println!("  API_ALLOWED_ORIGINS   Comma-separated CORS origins (default: any)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])), RunMode::Server);
        assert_eq!(parse_args(args(&["--help"])), RunMode::Help);
        assert_eq!(parse_args(args(&["-v"])), RunMode::Version);
        assert_eq!(parse_args(args(&["--verbose"])), RunMode::Server);
    }

    #[test]
    fn test_env_filter_respects_rust_log() {
        // SAFETY: no other test in this binary touches RUST_LOG
        unsafe { std::env::set_var("RUST_LOG", "debug") };
        assert_eq!(env_filter().max_level_hint(), Some(tracing::level_filters::LevelFilter::DEBUG));

        unsafe { std::env::remove_var("RUST_LOG") };
        assert_eq!(env_filter().max_level_hint(), Some(tracing::level_filters::LevelFilter::INFO));
    }
}
