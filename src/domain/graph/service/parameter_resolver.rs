use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::api::dto::graph_dto::GraphPathParams;
use crate::domain::graph::error::GraphOptionsError;
use crate::domain::graph::model::duration::parse_duration;
use crate::domain::graph::model::graph_enums::{GraphType, GroupBy, Vendor};
use crate::domain::graph::model::graph_options::{NodeOptions, VendorOptions};

pub const DEFAULT_DURATION: &str = "10m";
pub const DEFAULT_INCLUDE_ISTIO: bool = false;
pub const DEFAULT_INJECT_SERVICE_NODES: bool = false;

pub const PARAM_APPENDERS: &str = "appenders";
pub const PARAM_DURATION: &str = "duration";
pub const PARAM_GRAPH_TYPE: &str = "graphType";
pub const PARAM_GROUP_BY: &str = "groupBy";
pub const PARAM_INCLUDE_ISTIO: &str = "includeIstio";
pub const PARAM_INJECT_SERVICE_NODES: &str = "injectServiceNodes";
pub const PARAM_NAMESPACES: &str = "namespaces";
pub const PARAM_QUERY_TIME: &str = "queryTime";
pub const PARAM_RESPONSE_TIME_QUANTILE: &str = "responseTimeQuantile";
pub const PARAM_VENDOR: &str = "vendor";

/// Request parameters after defaulting and validation, before any namespace
/// lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub node: NodeOptions,
    pub vendor_options: VendorOptions,
    pub vendor: Vendor,
    pub include_istio: bool,
    pub inject_service_nodes: bool,
    /// Comma separated, never blank.
    pub namespaces: String,
    /// `None` when the parameter was not supplied at all.
    pub appenders: Option<String>,
    pub response_time_quantile: Option<String>,
}

/// Validate and default the raw path and query values.
///
/// Checks run in a fixed order and the first failure is returned.
pub fn resolve_parameters(
    path: GraphPathParams,
    query: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<ResolvedParameters, GraphOptionsError> {
    let node = NodeOptions::new(path.app, path.namespace, path.service, path.version, path.workload);

    let duration = resolve_duration(param(query, PARAM_DURATION))?;

    let graph_type = match param(query, PARAM_GRAPH_TYPE) {
        Some(raw) => raw
            .parse::<GraphType>()
            .map_err(|_| GraphOptionsError::bad_request(format!("Invalid graphType [{raw}]")))?,
        None => GraphType::default(),
    };

    if node.has_node_selector() && !graph_type.supports_node_detail() {
        return Err(GraphOptionsError::bad_request(format!(
            "Invalid graphType [{graph_type}]. This node detail graph does not support graphType {graph_type}."
        )));
    }

    let group_by = match param(query, PARAM_GROUP_BY) {
        Some(raw) => raw
            .parse::<GroupBy>()
            .map_err(|_| GraphOptionsError::bad_request(format!("Invalid groupBy [{raw}]")))?,
        None => GroupBy::default(),
    };

    let include_istio = resolve_bool(query, PARAM_INCLUDE_ISTIO, DEFAULT_INCLUDE_ISTIO)?;
    let mut inject_service_nodes =
        resolve_bool(query, PARAM_INJECT_SERVICE_NODES, DEFAULT_INJECT_SERVICE_NODES)?;

    let query_time = match param(query, PARAM_QUERY_TIME) {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| GraphOptionsError::bad_request(format!("Invalid queryTime [{raw}]")))?,
        None => now.timestamp(),
    };

    let vendor = match param(query, PARAM_VENDOR) {
        Some(raw) => raw
            .parse::<Vendor>()
            .map_err(|_| GraphOptionsError::bad_request(format!("Invalid vendor [{raw}]")))?,
        None => Vendor::default(),
    };

    // A namespace path variable makes this a single-namespace node graph
    let namespaces = match (&node.namespace, param(query, PARAM_NAMESPACES)) {
        (Some(namespace), _) => namespace.clone(),
        (None, Some(csv)) if !csv.trim().is_empty() => csv.to_string(),
        _ => {
            return Err(GraphOptionsError::bad_request(
                "At least one namespace must be specified via the namespaces query parameter.",
            ))
        }
    };

    // Service graphs need the synthesized service nodes
    if graph_type == GraphType::Service {
        inject_service_nodes = true;
    }

    Ok(ResolvedParameters {
        node,
        vendor_options: VendorOptions {
            duration,
            graph_type,
            group_by,
            query_time,
        },
        vendor,
        include_istio,
        inject_service_nodes,
        namespaces,
        appenders: query.get(PARAM_APPENDERS).cloned(),
        response_time_quantile: query.get(PARAM_RESPONSE_TIME_QUANTILE).cloned(),
    })
}

/// Present and non-empty; an empty value means "use the default".
fn param<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn resolve_duration(raw: Option<&str>) -> Result<Duration, GraphOptionsError> {
    let raw = raw.unwrap_or(DEFAULT_DURATION);
    match parse_duration(raw) {
        Ok(duration) if duration > Duration::zero() => Ok(duration),
        _ => Err(GraphOptionsError::bad_request(format!("Invalid duration [{raw}]"))),
    }
}

fn resolve_bool(
    query: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, GraphOptionsError> {
    match param(query, key) {
        Some(raw) => parse_bool(raw)
            .ok_or_else(|| GraphOptionsError::bad_request(format!("Invalid {key} [{raw}]"))),
        None => Ok(default),
    }
}

/// Accepts the usual spellings: 1, t, T, TRUE, true, True and their false
/// counterparts.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve(pairs: &[(&str, &str)]) -> Result<ResolvedParameters, GraphOptionsError> {
        resolve_parameters(GraphPathParams::default(), &query(pairs), now())
    }

    fn app_node(app: &str, namespace: &str) -> GraphPathParams {
        GraphPathParams {
            app: Some(app.to_string()),
            namespace: Some(namespace.to_string()),
            ..GraphPathParams::default()
        }
    }

    fn assert_bad_request(result: Result<ResolvedParameters, GraphOptionsError>, expected: &str) {
        match result {
            Err(GraphOptionsError::BadRequest(msg)) => assert_eq!(msg, expected),
            other => panic!("expected BadRequest({expected}), got {other:?}"),
        }
    }

    #[test]
    fn applies_defaults() {
        let params = resolve(&[("namespaces", "bookinfo")]).unwrap();

        assert_eq!(params.vendor_options.duration, Duration::minutes(10));
        assert_eq!(params.vendor_options.graph_type, GraphType::Workload);
        assert_eq!(params.vendor_options.group_by, GroupBy::None);
        assert_eq!(params.vendor_options.query_time, now().timestamp());
        assert_eq!(params.vendor, Vendor::Cytoscape);
        assert!(!params.include_istio);
        assert!(!params.inject_service_nodes);
        assert_eq!(params.namespaces, "bookinfo");
        assert_eq!(params.appenders, None);
        assert_eq!(params.response_time_quantile, None);
        assert_eq!(params.node, NodeOptions::default());
    }

    #[test]
    fn empty_values_take_defaults() {
        let params = resolve(&[
            ("namespaces", "bookinfo"),
            ("duration", ""),
            ("graphType", ""),
            ("includeIstio", ""),
            ("queryTime", ""),
        ])
        .unwrap();

        assert_eq!(params.vendor_options.duration, Duration::minutes(10));
        assert_eq!(params.vendor_options.graph_type, GraphType::Workload);
        assert_eq!(params.vendor_options.query_time, now().timestamp());
    }

    #[test]
    fn reads_explicit_values() {
        let params = resolve(&[
            ("namespaces", "bookinfo,tutorial"),
            ("duration", "1h30m"),
            ("graphType", "versionedApp"),
            ("groupBy", "version"),
            ("includeIstio", "true"),
            ("injectServiceNodes", "T"),
            ("queryTime", "1714560000"),
            ("vendor", "cytoscape"),
            ("appenders", "deadNode"),
            ("responseTimeQuantile", "0.99"),
        ])
        .unwrap();

        assert_eq!(params.vendor_options.duration, Duration::minutes(90));
        assert_eq!(params.vendor_options.graph_type, GraphType::VersionedApp);
        assert_eq!(params.vendor_options.group_by, GroupBy::Version);
        assert_eq!(params.vendor_options.query_time, 1_714_560_000);
        assert!(params.include_istio);
        assert!(params.inject_service_nodes);
        assert_eq!(params.namespaces, "bookinfo,tutorial");
        assert_eq!(params.appenders.as_deref(), Some("deadNode"));
        assert_eq!(params.response_time_quantile.as_deref(), Some("0.99"));
    }

    #[test]
    fn rejects_bad_duration() {
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("duration", "ten minutes")]),
            "Invalid duration [ten minutes]",
        );
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("duration", "0")]),
            "Invalid duration [0]",
        );
    }

    #[test]
    fn rejects_values_outside_enums() {
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("graphType", "cluster")]),
            "Invalid graphType [cluster]",
        );
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("groupBy", "team")]),
            "Invalid groupBy [team]",
        );
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("vendor", "graphviz")]),
            "Invalid vendor [graphviz]",
        );
    }

    #[test]
    fn rejects_bad_booleans_and_query_time() {
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("includeIstio", "yes")]),
            "Invalid includeIstio [yes]",
        );
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("injectServiceNodes", "2")]),
            "Invalid injectServiceNodes [2]",
        );
        assert_bad_request(
            resolve(&[("namespaces", "bookinfo"), ("queryTime", "1.5")]),
            "Invalid queryTime [1.5]",
        );
    }

    #[test]
    fn first_failure_wins() {
        assert_bad_request(
            resolve(&[("duration", "x"), ("graphType", "y"), ("vendor", "z")]),
            "Invalid duration [x]",
        );
        assert_bad_request(
            resolve(&[("groupBy", "y"), ("vendor", "z")]),
            "Invalid groupBy [y]",
        );
    }

    #[test]
    fn requires_a_namespace() {
        let expected = "At least one namespace must be specified via the namespaces query parameter.";
        assert_bad_request(resolve(&[]), expected);
        assert_bad_request(resolve(&[("namespaces", "")]), expected);
        assert_bad_request(resolve(&[("namespaces", "   ")]), expected);
    }

    #[test]
    fn namespace_path_variable_replaces_query_list() {
        let path = GraphPathParams {
            namespace: Some("bookinfo".to_string()),
            workload: Some("reviews-v1".to_string()),
            ..GraphPathParams::default()
        };
        let params = resolve_parameters(
            path,
            &query(&[("namespaces", "other"), ("graphType", "app")]),
            now(),
        )
        .unwrap();

        assert_eq!(params.namespaces, "bookinfo");
        assert_eq!(params.node.workload.as_deref(), Some("reviews-v1"));
    }

    #[test]
    fn service_graphs_force_service_node_injection() {
        let params = resolve(&[
            ("namespaces", "bookinfo"),
            ("graphType", "service"),
            ("injectServiceNodes", "false"),
        ])
        .unwrap();

        assert!(params.inject_service_nodes);
    }

    #[test]
    fn node_graph_rejects_workload_graph_type() {
        assert_bad_request(
            resolve_parameters(
                app_node("reviews", "bookinfo"),
                &query(&[("graphType", "workload")]),
                now(),
            ),
            "Invalid graphType [workload]. This node detail graph does not support graphType workload.",
        );

        // the default graph type is workload too
        assert!(resolve_parameters(app_node("reviews", "bookinfo"), &HashMap::new(), now()).is_err());
    }

    #[test]
    fn node_graph_accepts_app_centric_graph_types() {
        for graph_type in ["app", "versionedApp", "service"] {
            let params = resolve_parameters(
                app_node("reviews", "bookinfo"),
                &query(&[("graphType", graph_type)]),
                now(),
            )
            .unwrap();
            assert_eq!(params.vendor_options.graph_type.as_str(), graph_type);
        }
    }

    #[test]
    fn bool_grammar() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        for raw in ["yes", "tRUE", "", " true"] {
            assert_eq!(parse_bool(raw), None, "{raw}");
        }
    }
}
