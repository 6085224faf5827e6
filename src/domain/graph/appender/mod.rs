//! Graph enrichment stages ("appenders") and the ordered pipeline they run in.
//!
//! The enrichment algorithms themselves belong to the graph builder; this
//! module decides which stages run, with what configuration, in which order.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use serde::Serialize;
use tracing::debug;

use crate::core::client::namespace_gateway_trait::AccessibleNamespaces;
use crate::domain::graph::model::graph_enums::{GraphType, UnknownVariant};
use crate::domain::graph::model::graph_options::TargetNamespaces;

pub const DEFAULT_QUANTILE: f64 = 0.95;

/// Stage identifiers, declared in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AppenderName {
    ServiceEntry,
    DeadNode,
    ResponseTime,
    SecurityPolicy,
    UnusedNode,
    Istio,
    SidecarsCheck,
}

impl AppenderName {
    /// Execution order. Service entries pre-process service nodes for every
    /// later stage; dead nodes are pruned before the per-edge stages; unused
    /// nodes are added only after the stages that assume traffic, and before
    /// the stages that must see every node.
    pub const ORDERED: [AppenderName; 7] = [
        AppenderName::ServiceEntry,
        AppenderName::DeadNode,
        AppenderName::ResponseTime,
        AppenderName::SecurityPolicy,
        AppenderName::UnusedNode,
        AppenderName::Istio,
        AppenderName::SidecarsCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppenderName::ServiceEntry => "serviceEntry",
            AppenderName::DeadNode => "deadNode",
            AppenderName::ResponseTime => "responseTime",
            AppenderName::SecurityPolicy => "securityPolicy",
            AppenderName::UnusedNode => "unusedNode",
            AppenderName::Istio => "istio",
            AppenderName::SidecarsCheck => "sidecarsCheck",
        }
    }
}

impl FromStr for AppenderName {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppenderName::ORDERED
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for AppenderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntryConfig {
    pub accessible_namespaces: AccessibleNamespaces,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTimeConfig {
    pub quantile: f64,
    pub graph_type: GraphType,
    pub inject_service_nodes: bool,
    pub include_istio: bool,
    pub namespaces: TargetNamespaces,
    pub query_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPolicyConfig {
    pub graph_type: GraphType,
    pub include_istio: bool,
    pub inject_service_nodes: bool,
    pub namespaces: TargetNamespaces,
    pub query_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedNodeConfig {
    pub graph_type: GraphType,
    pub is_node_graph: bool,
}

/// A configured stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", content = "config", rename_all = "camelCase")]
pub enum Appender {
    ServiceEntry(ServiceEntryConfig),
    DeadNode,
    ResponseTime(ResponseTimeConfig),
    SecurityPolicy(SecurityPolicyConfig),
    UnusedNode(UnusedNodeConfig),
    Istio,
    SidecarsCheck,
}

impl Appender {
    pub fn name(&self) -> AppenderName {
        match self {
            Appender::ServiceEntry(_) => AppenderName::ServiceEntry,
            Appender::DeadNode => AppenderName::DeadNode,
            Appender::ResponseTime(_) => AppenderName::ResponseTime,
            Appender::SecurityPolicy(_) => AppenderName::SecurityPolicy,
            Appender::UnusedNode(_) => AppenderName::UnusedNode,
            Appender::Istio => AppenderName::Istio,
            Appender::SidecarsCheck => AppenderName::SidecarsCheck,
        }
    }
}

/// Applies one stage to a graph. Implemented by the graph builder.
pub trait AppenderExecutor<G> {
    fn append(&self, appender: &Appender, graph: &mut G) -> anyhow::Result<()>;
}

/// Stages in execution order. Only built by the assembler, so the order is
/// always [`AppenderName::ORDERED`] filtered to the selected stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AppenderPipeline(Vec<Appender>);

impl AppenderPipeline {
    pub(crate) fn from_ordered(appenders: Vec<Appender>) -> Self {
        debug_assert!(appenders.windows(2).all(|w| w[0].name() < w[1].name()));
        Self(appenders)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appender> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|a| a.name().as_str()).collect()
    }

    pub fn get(&self, name: AppenderName) -> Option<&Appender> {
        self.0.iter().find(|a| a.name() == name)
    }

    /// Apply every stage in order, stopping at the first failure.
    pub fn run<G, E>(&self, graph: &mut G, executor: &E) -> anyhow::Result<()>
    where
        E: AppenderExecutor<G> + ?Sized,
    {
        for appender in &self.0 {
            debug!("Running appender {}", appender.name());
            executor
                .append(appender, graph)
                .with_context(|| format!("appender [{}] failed", appender.name()))?;
        }
        Ok(())
    }
}
