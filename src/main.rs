mod debug;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meshgraph_core::app_state::build_app_state;
use meshgraph_core::core::client::namespaces::KubeNamespaceGateway;
use meshgraph_core::core::config::AppConfig;
use meshgraph_core::routes;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config);

    if config.debug_mode {
        debug::run_debug(&config).await;
        return Ok(());
    }

    let gateway = KubeNamespaceGateway::infer().await?;
    let state = build_app_state(Arc::new(gateway));
    let app = routes::app_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("🚀 meshgraph listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true));

    match &config.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "meshgraph.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
