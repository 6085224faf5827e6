use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, warn};

use crate::core::client::namespace_gateway_trait::{AccessibleNamespaces, NamespaceGateway};
use crate::domain::graph::error::GraphOptionsError;
use crate::domain::graph::model::graph_options::{NamespaceWindow, TargetNamespaces};

/// Look up the caller's namespaces and resolve the requested ones against
/// them. Returns the accessible set together with the target windows.
pub async fn resolve_target_namespaces<G>(
    gateway: &G,
    token: Option<&str>,
    requested: &str,
    duration: Duration,
    query_time: i64,
    now: DateTime<Utc>,
) -> Result<(AccessibleNamespaces, TargetNamespaces), GraphOptionsError>
where
    G: NamespaceGateway + ?Sized,
{
    let token = token.ok_or_else(|| GraphOptionsError::internal("token missing in request context"))?;

    let accessible = gateway.accessible_namespaces(token).await.map_err(|err| {
        error!("Failed to fetch accessible namespaces: {:#}", err);
        GraphOptionsError::internal(format!("namespace lookup failed: {err:#}"))
    })?;
    debug!("Caller can access {} namespace(s)", accessible.len());

    let targets = resolve_namespaces(requested, &accessible, duration, query_time, now)?;
    Ok((accessible, targets))
}

/// Intersect a comma separated namespace list with the accessible set.
///
/// Blank entries are skipped. Any entry missing from `accessible` fails the
/// whole request.
pub fn resolve_namespaces(
    requested: &str,
    accessible: &AccessibleNamespaces,
    duration: Duration,
    query_time: i64,
    now: DateTime<Utc>,
) -> Result<TargetNamespaces, GraphOptionsError> {
    let mut targets = TargetNamespaces::new();

    for token in requested.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let Some(created) = accessible.get(token) else {
            debug!("Namespace {} is not accessible to the caller", token);
            return Err(GraphOptionsError::forbidden(format!(
                "Requested namespace [{token}] is not accessible."
            )));
        };

        let window = NamespaceWindow {
            name: token.to_string(),
            duration: resolve_namespace_duration(*created, duration, query_time, now),
        };
        if window.is_empty() {
            debug!("Namespace {} did not exist yet at the query time", token);
        }
        targets.insert(token.to_string(), window);
    }

    if targets.is_empty() {
        return Err(GraphOptionsError::bad_request(
            "At least one namespace must be specified via the namespaces query parameter.",
        ));
    }

    Ok(targets)
}

/// Shorten `requested` so the window never reaches back before the namespace
/// existed.
///
/// The reference instant is `query_time` (unix seconds) unless it is zero, in
/// which case `now` is used. An unknown creation time leaves `requested`
/// untouched. A namespace created after the reference instant yields a
/// negative window.
pub fn resolve_namespace_duration(
    ns_created: Option<DateTime<Utc>>,
    requested: Duration,
    query_time: i64,
    now: DateTime<Utc>,
) -> Duration {
    let Some(created) = ns_created else {
        return requested;
    };

    let reference = if query_time != 0 {
        DateTime::from_timestamp(query_time, 0).unwrap_or_else(|| {
            warn!("queryTime {} out of range, using current time", query_time);
            now
        })
    } else {
        now
    };

    let lifetime = reference - created;
    if lifetime < requested {
        lifetime
    } else {
        requested
    }
}
