use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Value outside of one of the closed option sets below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value [{0}]")]
pub struct UnknownVariant(pub String);

/// Shape of the nodes in a generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphType {
    App,
    Service,
    VersionedApp,
    #[default]
    Workload,
}

impl GraphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphType::App => "app",
            GraphType::Service => "service",
            GraphType::VersionedApp => "versionedApp",
            GraphType::Workload => "workload",
        }
    }

    /// Graph types a node-detail graph can be rendered with.
    pub fn supports_node_detail(&self) -> bool {
        matches!(self, GraphType::App | GraphType::VersionedApp | GraphType::Service)
    }
}

impl FromStr for GraphType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(GraphType::App),
            "service" => Ok(GraphType::Service),
            "versionedApp" => Ok(GraphType::VersionedApp),
            "workload" => Ok(GraphType::Workload),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Box grouping applied to nodes by the vendor renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    App,
    #[default]
    None,
    Version,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::App => "app",
            GroupBy::None => "none",
            GroupBy::Version => "version",
        }
    }
}

impl FromStr for GroupBy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(GroupBy::App),
            "none" => Ok(GroupBy::None),
            "version" => Ok(GroupBy::Version),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format consumer. Cytoscape is the only one supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    #[default]
    Cytoscape,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Cytoscape => "cytoscape",
        }
    }
}

impl FromStr for Vendor {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cytoscape" => Ok(Vendor::Cytoscape),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a graph covers whole namespaces or one selected entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Namespace,
    Node,
}

impl GraphKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Namespace => "namespace",
            GraphKind::Node => "node",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_type_names_match_query_values() {
        for name in ["app", "service", "versionedApp", "workload"] {
            let parsed: GraphType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
            assert_eq!(serde_json::to_value(parsed).unwrap(), name);
        }
        assert!("versionedapp".parse::<GraphType>().is_err());
        assert!("".parse::<GraphType>().is_err());
    }

    #[test]
    fn node_detail_excludes_workload_graphs() {
        assert!(GraphType::App.supports_node_detail());
        assert!(GraphType::VersionedApp.supports_node_detail());
        assert!(GraphType::Service.supports_node_detail());
        assert!(!GraphType::Workload.supports_node_detail());
    }

    #[test]
    fn defaults_follow_request_defaults() {
        assert_eq!(GraphType::default(), GraphType::Workload);
        assert_eq!(GroupBy::default(), GroupBy::None);
        assert_eq!(Vendor::default(), Vendor::Cytoscape);
    }

    #[test]
    fn group_by_and_vendor_reject_unknown_values() {
        assert_eq!("version".parse::<GroupBy>().unwrap(), GroupBy::Version);
        assert_eq!(
            "cluster".parse::<GroupBy>().unwrap_err(),
            UnknownVariant("cluster".to_string())
        );
        assert!("graphviz".parse::<Vendor>().is_err());
    }
}
