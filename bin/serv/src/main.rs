use axum::{Router, routing::get};
use bp_api::{
    config::ApiConfig,
    metrics::{init_metrics, metrics_handler},
    router,
    state::ApiState,
    tracing::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from .env and BLOGPIPE_* variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    init_tracing(&config.env);

    let metrics_handle = init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let state = ApiState::new(&config)?;

    let metrics_app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let app = router::with_middleware(
        router::router().merge(metrics_app).with_state(state),
        &config.parsed_allowed_origins(),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        environment = ?config.env,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}
