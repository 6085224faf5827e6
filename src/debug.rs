use tracing::info;

use meshgraph_core::core::client::namespaces::KubeNamespaceGateway;
use meshgraph_core::core::config::AppConfig;

/// Runs only when MESHGRAPH_DEBUG_MODE is set
pub async fn run_debug(config: &AppConfig) {
    info!("🔧 Debug mode: running debug tasks...");

    info!("Effective configuration: {:?}", config);
    match KubeNamespaceGateway::infer().await {
        Ok(_) => info!("Kubernetes connection settings resolved"),
        Err(err) => info!("Kubernetes connection settings unavailable: {:#}", err),
    }

    info!("Debug tasks completed. Exiting...");
}
