use std::net::SocketAddr;
use std::sync::Arc;

use docintake_genai::config::ModelConfig;
use docintake_genai::flow::FlowRunner;
use docintake_genai::gemini::GeminiModel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docintake_api::config::ServerConfig;
use docintake_api::router::build_app_router;
use docintake_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "docintake_api=debug,docintake_genai=debug,docintake_jira=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let model_config = ModelConfig::from_env();
    if model_config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; AI flows will fail until it is configured");
    }
    tracing::info!(model = %model_config.model, "Loaded model configuration");

    // --- Storage ---
    tokio::fs::create_dir_all(&config.storage_dir)
        .await
        .expect("Failed to create storage directory");
    tracing::info!(dir = %config.storage_dir.display(), "Storage directory ready");

    // --- Outbound clients ---
    let http = reqwest::Client::new();
    let model = GeminiModel::new(&model_config).expect("Failed to build model HTTP client");
    let flows = FlowRunner::new(Arc::new(model));

    // --- App state ---
    let state = AppState::new(config.clone(), flows, http);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
