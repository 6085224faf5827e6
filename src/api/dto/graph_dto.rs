//! Graph API DTOs

use serde::Deserialize;

/// Path variables of the graph routes. Zero or more are set depending on the
/// route; a namespace-wide graph has none.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphPathParams {
    pub app: Option<String>,
    pub namespace: Option<String>,
    pub service: Option<String>,
    pub version: Option<String>,
    pub workload: Option<String>,
}
