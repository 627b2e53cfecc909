mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use trendly_ai::{OpenAiClient, TextGenerator};
use trendly_instagram::InstagramProvider;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(trendly_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let instagram = Arc::new(InstagramProvider::from_config(&config)?);
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiClient::from_config(&config)?);

    if !config.instagram_configured() {
        tracing::warn!("RAPIDAPI_KEY not set; instagram lookups will return no data");
    }
    if !config.ai_configured() {
        tracing::warn!("OPENAI_API_KEY not set; AI endpoints will serve fallback payloads");
    }

    let app = build_app(AppState {
        config: Arc::clone(&config),
        instagram,
        generator,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "trendly-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
