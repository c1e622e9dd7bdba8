use std::path::Path;
use crate::cli::commands::ServeArgs;
use crate::config;
use crate::errors::AnalyzerError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), AnalyzerError> {
    let mut config = config::load_config(args.config.as_deref().map(Path::new)).await?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = api::create_app_state(&config);
    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.llm.model,
        api_key_configured = state.analyzer.has_provider(),
        demo_fallback = config.analysis.demo_fallback,
        "Starting API server"
    );
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AnalyzerError::Internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
