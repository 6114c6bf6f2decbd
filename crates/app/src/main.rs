mod cli;
mod config;
mod extract;
mod http;
mod save;
mod state;
mod wiring;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::ConfigError;
use crate::http::HttpError;
use crate::save::SaveError;
use crate::wiring::WiringError;
use threadstash_core::error::CoreError;
use threadstash_core::types::thread_url::ThreadUrl;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    InvalidUrl(#[from] CoreError),
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
    #[error("http error: {0}")]
    Http(#[from] HttpError),
    #[error("save error: {0}")]
    Save(#[from] SaveError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    config::load_dotenv()?;
    let config = config::AppConfig::from_env()?;
    let state = wiring::build_state(config)?;

    if let Some(url) = cli.save_url {
        let thread = ThreadUrl::try_from(url.as_str())?;
        let record = save::save_thread(&state, &thread).await?;
        info!(id = %record.id, title = %record.title, "saved for offline viewing");
        return Ok(());
    }

    let addr = state.config.http_addr;
    let server = tokio::spawn(async move {
        info!(%addr, "http server starting");
        http::serve(addr, state).await
    });

    tokio::select! {
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
        res = server => {
            res??;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install ctrl-c handler");
    }
}
