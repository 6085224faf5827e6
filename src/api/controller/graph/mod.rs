use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::api::dto::{graph_dto::GraphPathParams, ApiResponse};
use crate::api::middleware::caller_token::MaybeCallerToken;
use crate::api::util::json::to_json;
use crate::api::util::query::first_values;
use crate::app_state::AppState;
use crate::domain::graph::model::graph_options::GraphOptions;
use crate::errors::AppError;

pub struct GraphController;

impl GraphController {
    /// Namespace-wide graph over the `namespaces` query list
    pub async fn get_graph_namespaces(
        State(state): State<AppState>,
        MaybeCallerToken(token): MaybeCallerToken,
        Query(query): Query<Vec<(String, String)>>,
    ) -> Result<Json<ApiResponse<GraphOptions>>, AppError> {
        Self::resolve(state, token, GraphPathParams::default(), first_values(query)).await
    }

    /// Node-detail graph for an app, app version, workload or service
    pub async fn get_graph_node(
        State(state): State<AppState>,
        MaybeCallerToken(token): MaybeCallerToken,
        Path(path): Path<GraphPathParams>,
        Query(query): Query<Vec<(String, String)>>,
    ) -> Result<Json<ApiResponse<GraphOptions>>, AppError> {
        Self::resolve(state, token, path, first_values(query)).await
    }

    async fn resolve(
        state: AppState,
        token: Option<String>,
        path: GraphPathParams,
        query: HashMap<String, String>,
    ) -> Result<Json<ApiResponse<GraphOptions>>, AppError> {
        let request_id = Uuid::new_v4();
        to_json(
            state
                .graph_service
                .build_graph_options(token.as_deref(), path, &query)
                .instrument(info_span!("graph_options", %request_id))
                .await,
        )
    }
}
