use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::core::client::namespace_gateway_trait::AccessibleNamespaces;
use crate::domain::graph::appender::{
    Appender, AppenderName, AppenderPipeline, ResponseTimeConfig, SecurityPolicyConfig,
    ServiceEntryConfig, UnusedNodeConfig, DEFAULT_QUANTILE,
};
use crate::domain::graph::error::GraphOptionsError;
use crate::domain::graph::model::graph_enums::GraphType;
use crate::domain::graph::model::graph_options::{NodeOptions, TargetNamespaces};

/// Resolved request fields the stages take their configuration from.
#[derive(Debug, Clone, Copy)]
pub struct AppenderContext<'a> {
    pub accessible_namespaces: &'a AccessibleNamespaces,
    pub namespaces: &'a TargetNamespaces,
    pub node: &'a NodeOptions,
    pub graph_type: GraphType,
    pub include_istio: bool,
    pub inject_service_nodes: bool,
    pub query_time: i64,
}

/// Build the pipeline for the requested stages.
///
/// `requested` is the raw `appenders` parameter: `None` selects every stage,
/// otherwise exactly the named ones. The request never changes the order.
pub fn assemble_appenders(
    requested: Option<&str>,
    response_time_quantile: Option<&str>,
    ctx: &AppenderContext<'_>,
) -> Result<AppenderPipeline, GraphOptionsError> {
    let selected = parse_requested_appenders(requested)?;

    let appenders = AppenderName::ORDERED
        .into_iter()
        .filter(|name| selected.contains(name))
        .map(|name| configure(name, response_time_quantile, ctx))
        .collect();

    let pipeline = AppenderPipeline::from_ordered(appenders);
    debug!(
        "Assembled {} appender(s): {}",
        pipeline.len(),
        pipeline.names().join(",")
    );
    Ok(pipeline)
}

/// The set of stages named in `requested`; all of them when `None`.
pub fn parse_requested_appenders(
    requested: Option<&str>,
) -> Result<BTreeSet<AppenderName>, GraphOptionsError> {
    let Some(requested) = requested else {
        return Ok(AppenderName::ORDERED.into_iter().collect());
    };

    requested
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<AppenderName>()
                .map_err(|_| GraphOptionsError::bad_request(format!("Invalid appender [{name}]")))
        })
        .collect()
}

/// `responseTimeQuantile` when it parses as a number, else the default.
/// A bad value is not an error.
pub fn resolve_quantile(raw: Option<&str>) -> f64 {
    match raw {
        Some(raw) => raw.parse::<f64>().unwrap_or_else(|_| {
            warn!("Ignoring invalid responseTimeQuantile [{}], using {}", raw, DEFAULT_QUANTILE);
            DEFAULT_QUANTILE
        }),
        None => DEFAULT_QUANTILE,
    }
}

fn configure(name: AppenderName, quantile: Option<&str>, ctx: &AppenderContext<'_>) -> Appender {
    match name {
        AppenderName::ServiceEntry => Appender::ServiceEntry(ServiceEntryConfig {
            accessible_namespaces: ctx.accessible_namespaces.clone(),
        }),
        AppenderName::DeadNode => Appender::DeadNode,
        AppenderName::ResponseTime => Appender::ResponseTime(ResponseTimeConfig {
            quantile: resolve_quantile(quantile),
            graph_type: ctx.graph_type,
            inject_service_nodes: ctx.inject_service_nodes,
            include_istio: ctx.include_istio,
            namespaces: ctx.namespaces.clone(),
            query_time: ctx.query_time,
        }),
        AppenderName::SecurityPolicy => Appender::SecurityPolicy(SecurityPolicyConfig {
            graph_type: ctx.graph_type,
            include_istio: ctx.include_istio,
            inject_service_nodes: ctx.inject_service_nodes,
            namespaces: ctx.namespaces.clone(),
            query_time: ctx.query_time,
        }),
        AppenderName::UnusedNode => Appender::UnusedNode(UnusedNodeConfig {
            graph_type: ctx.graph_type,
            // a version alone always comes with its app
            is_node_graph: ctx.node.app.is_some()
                || ctx.node.workload.is_some()
                || ctx.node.service.is_some(),
        }),
        AppenderName::Istio => Appender::Istio,
        AppenderName::SidecarsCheck => Appender::SidecarsCheck,
    }
}
