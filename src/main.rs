use dotenvy::dotenv;
use parent_portal::logging::init_tracing;
use parent_portal::metrics::{init_metrics, metrics_app};
use parent_portal::router::init_router;
use parent_portal::state::init_app_state;
use parent_portal_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let metrics_handle = init_metrics()?;
    let server_config = ServerConfig::from_env();

    let state = init_app_state().await?;
    let mut app = init_router(state);

    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server running on http://{}", addr);
    info!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
