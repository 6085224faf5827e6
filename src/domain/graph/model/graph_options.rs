use std::collections::BTreeMap;

use chrono::Duration;
use serde::Serialize;

use crate::core::client::namespace_gateway_trait::AccessibleNamespaces;
use crate::domain::graph::appender::AppenderPipeline;
use crate::domain::graph::error::GraphOptionsError;
use crate::domain::graph::model::duration::{format_duration, serialize_as_seconds};
use crate::domain::graph::model::graph_enums::{GraphKind, GraphType, GroupBy, Vendor};

/// A namespace in scope for one request with its own lookback window.
///
/// `duration` may be shorter than the requested one when the namespace is
/// younger than that, and is negative when the namespace was created after
/// the query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceWindow {
    pub name: String,
    #[serde(rename = "durationSeconds", serialize_with = "serialize_as_seconds")]
    pub duration: Duration,
}

impl NamespaceWindow {
    /// A non-positive window holds no telemetry.
    pub fn is_empty(&self) -> bool {
        self.duration <= Duration::zero()
    }
}

pub type TargetNamespaces = BTreeMap<String, NamespaceWindow>;

/// Entity selected by a node-detail request. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
    pub app: Option<String>,
    pub namespace: Option<String>,
    pub service: Option<String>,
    pub version: Option<String>,
    pub workload: Option<String>,
}

impl NodeOptions {
    pub fn new(
        app: Option<String>,
        namespace: Option<String>,
        service: Option<String>,
        version: Option<String>,
        workload: Option<String>,
    ) -> Self {
        Self {
            app: set(app),
            namespace: set(namespace),
            service: set(service),
            version: set(version),
            workload: set(workload),
        }
    }

    /// Any entity field present. The namespace alone does not select a node.
    pub fn has_node_selector(&self) -> bool {
        self.app.is_some() || self.version.is_some() || self.workload.is_some() || self.service.is_some()
    }

    pub fn graph_kind(&self) -> GraphKind {
        if self.has_node_selector() {
            GraphKind::Node
        } else {
            GraphKind::Namespace
        }
    }
}

fn set(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Options handed to the vendor-specific graph generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorOptions {
    #[serde(rename = "durationSeconds", serialize_with = "serialize_as_seconds")]
    pub duration: Duration,
    pub graph_type: GraphType,
    pub group_by: GroupBy,
    /// Unix seconds.
    pub query_time: i64,
}

/// Inputs for [`GraphOptions::new`].
#[derive(Debug)]
pub struct GraphOptionsParts {
    pub accessible_namespaces: AccessibleNamespaces,
    pub namespaces: TargetNamespaces,
    pub node: NodeOptions,
    pub vendor_options: VendorOptions,
    pub vendor: Vendor,
    pub include_istio: bool,
    pub inject_service_nodes: bool,
    pub appenders: AppenderPipeline,
}

/// Fully resolved graph request. Read-only once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOptions {
    accessible_namespaces: AccessibleNamespaces,
    namespaces: TargetNamespaces,
    node: NodeOptions,
    vendor_options: VendorOptions,
    vendor: Vendor,
    include_istio: bool,
    inject_service_nodes: bool,
    graph_kind: GraphKind,
    appenders: AppenderPipeline,
}

impl GraphOptions {
    pub fn new(parts: GraphOptionsParts) -> Result<Self, GraphOptionsError> {
        if parts.namespaces.is_empty() {
            return Err(GraphOptionsError::bad_request(
                "At least one namespace must be specified via the namespaces query parameter.",
            ));
        }

        let graph_kind = parts.node.graph_kind();
        Ok(Self {
            accessible_namespaces: parts.accessible_namespaces,
            namespaces: parts.namespaces,
            node: parts.node,
            vendor_options: parts.vendor_options,
            vendor: parts.vendor,
            include_istio: parts.include_istio,
            inject_service_nodes: parts.inject_service_nodes,
            graph_kind,
            appenders: parts.appenders,
        })
    }

    pub fn accessible_namespaces(&self) -> &AccessibleNamespaces {
        &self.accessible_namespaces
    }

    pub fn namespaces(&self) -> &TargetNamespaces {
        &self.namespaces
    }

    pub fn node(&self) -> &NodeOptions {
        &self.node
    }

    pub fn vendor_options(&self) -> &VendorOptions {
        &self.vendor_options
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn include_istio(&self) -> bool {
        self.include_istio
    }

    pub fn inject_service_nodes(&self) -> bool {
        self.inject_service_nodes
    }

    pub fn appenders(&self) -> &AppenderPipeline {
        &self.appenders
    }

    pub fn graph_kind(&self) -> GraphKind {
        self.graph_kind
    }

    pub fn duration(&self) -> Duration {
        self.vendor_options.duration
    }

    pub fn graph_type(&self) -> GraphType {
        self.vendor_options.graph_type
    }

    pub fn group_by(&self) -> GroupBy {
        self.vendor_options.group_by
    }

    pub fn query_time(&self) -> i64 {
        self.vendor_options.query_time
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        format!(
            "kind={} graphType={} groupBy={} duration={} namespaces=[{}] appenders=[{}]",
            self.graph_kind.as_str(),
            self.graph_type(),
            self.group_by(),
            format_duration(self.duration()),
            self.namespaces.keys().cloned().collect::<Vec<_>>().join(","),
            self.appenders.names().join(","),
        )
    }
}
