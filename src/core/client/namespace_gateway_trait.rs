use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Namespace name → creation time. `None` when the cluster did not report one.
pub type AccessibleNamespaces = BTreeMap<String, Option<DateTime<Utc>>>;

/// Source of the namespaces a caller is allowed to query.
#[async_trait]
pub trait NamespaceGateway: Send + Sync {
    /// All namespaces visible to the holder of `token`, keyed by name.
    async fn accessible_namespaces(&self, token: &str) -> anyhow::Result<AccessibleNamespaces>;
}
