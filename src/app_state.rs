use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dto::graph_dto::GraphPathParams;
use crate::core::client::namespace_gateway_trait::NamespaceGateway;
use crate::domain::graph::error::GraphOptionsError;
use crate::domain::graph::model::graph_options::GraphOptions;

#[derive(Clone)]
pub struct AppState {
    pub graph_service: Arc<GraphService>,
}

pub fn build_app_state(gateway: Arc<dyn NamespaceGateway>) -> AppState {
    AppState {
        graph_service: Arc::new(GraphService::new(gateway)),
    }
}

#[derive(Clone)]
pub struct GraphService {
    gateway: Arc<dyn NamespaceGateway>,
}

impl GraphService {
    pub fn new(gateway: Arc<dyn NamespaceGateway>) -> Self {
        Self { gateway }
    }

    pub async fn build_graph_options(
        &self,
        token: Option<&str>,
        path: GraphPathParams,
        query: &HashMap<String, String>,
    ) -> Result<GraphOptions, GraphOptionsError> {
        crate::domain::graph::service::build_graph_options(self.gateway.as_ref(), token, path, query).await
    }
}
