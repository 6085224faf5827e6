//! Graph routes (e.g., /api/v1/graph/*)

use axum::{routing::get, Router};

use crate::api::controller::graph::GraphController;
use crate::app_state::AppState;

/// Build the router for graph endpoints under /api/v1/graph
pub fn graph_routes() -> Router<AppState> {
    Router::new()
        .route("/namespaces", get(GraphController::get_graph_namespaces))
        .route("/namespaces/{namespace}/applications/{app}", get(GraphController::get_graph_node))
        .route("/namespaces/{namespace}/applications/{app}/versions/{version}", get(GraphController::get_graph_node))
        .route("/namespaces/{namespace}/workloads/{workload}", get(GraphController::get_graph_node))
        .route("/namespaces/{namespace}/services/{service}", get(GraphController::get_graph_node))
}
