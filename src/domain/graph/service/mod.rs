//! Graph request resolution: parameters → namespaces → appenders → options

pub mod appender_assembler;
pub mod namespace_resolver;
pub mod parameter_resolver;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::api::dto::graph_dto::GraphPathParams;
use crate::core::client::namespace_gateway_trait::NamespaceGateway;
use crate::domain::graph::error::GraphOptionsError;
use crate::domain::graph::model::graph_options::{GraphOptions, GraphOptionsParts};

use appender_assembler::{assemble_appenders, AppenderContext};
use namespace_resolver::resolve_target_namespaces;
use parameter_resolver::resolve_parameters;

pub async fn build_graph_options<G>(
    gateway: &G,
    token: Option<&str>,
    path: GraphPathParams,
    query: &HashMap<String, String>,
) -> Result<GraphOptions, GraphOptionsError>
where
    G: NamespaceGateway + ?Sized,
{
    build_graph_options_at(gateway, token, path, query, Utc::now()).await
}

/// [`build_graph_options`] with an explicit current time.
pub async fn build_graph_options_at<G>(
    gateway: &G,
    token: Option<&str>,
    path: GraphPathParams,
    query: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<GraphOptions, GraphOptionsError>
where
    G: NamespaceGateway + ?Sized,
{
    let params = resolve_parameters(path, query, now)?;

    let (accessible_namespaces, namespaces) = resolve_target_namespaces(
        gateway,
        token,
        &params.namespaces,
        params.vendor_options.duration,
        params.vendor_options.query_time,
        now,
    )
    .await?;

    let appenders = assemble_appenders(
        params.appenders.as_deref(),
        params.response_time_quantile.as_deref(),
        &AppenderContext {
            accessible_namespaces: &accessible_namespaces,
            namespaces: &namespaces,
            node: &params.node,
            graph_type: params.vendor_options.graph_type,
            include_istio: params.include_istio,
            inject_service_nodes: params.inject_service_nodes,
            query_time: params.vendor_options.query_time,
        },
    )?;

    let options = GraphOptions::new(GraphOptionsParts {
        accessible_namespaces,
        namespaces,
        node: params.node,
        vendor_options: params.vendor_options,
        vendor: params.vendor,
        include_istio: params.include_istio,
        inject_service_nodes: params.inject_service_nodes,
        appenders,
    })?;

    debug!("Resolved graph options: {}", options.summary());
    Ok(options)
}
