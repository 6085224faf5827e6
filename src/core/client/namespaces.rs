use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kube::api::ListParams;
use kube::config::AuthInfo;
use kube::{Api, Client, Config};
use tracing::{debug, warn};

use crate::core::client::kube_resources::{Namespace, Time};
use crate::core::client::namespace_gateway_trait::{AccessibleNamespaces, NamespaceGateway};

/// Fetch all namespaces visible to `client`
pub async fn fetch_namespaces(client: &Client) -> Result<Vec<Namespace>> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let namespace_list = namespaces.list(&ListParams::default()).await?;

    debug!("Discovered {} namespace(s)", namespace_list.items.len());
    Ok(namespace_list.items)
}

/// Collapse namespace objects into name → creation time
pub fn map_accessible_namespaces(namespaces: Vec<Namespace>) -> AccessibleNamespaces {
    namespaces
        .into_iter()
        .filter_map(|ns| {
            let created = ns.metadata.creation_timestamp.as_ref().and_then(parse_time);
            ns.metadata.name.map(|name| (name, created))
        })
        .collect()
}

fn parse_time(ts: &Time) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(&ts.0.to_rfc3339()) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(err) => {
            warn!("Unparseable namespace creationTimestamp: {}", err);
            None
        }
    }
}

/// Lists namespaces with the caller's own bearer token so the API server
/// applies the caller's RBAC.
pub struct KubeNamespaceGateway {
    base: Config,
}

impl KubeNamespaceGateway {
    pub fn new(base: Config) -> Self {
        Self { base }
    }

    /// Cluster connection settings from kubeconfig or the in-cluster environment
    pub async fn infer() -> Result<Self> {
        let base = Config::infer().await?;
        debug!("Namespace gateway targeting {}", base.cluster_url);
        Ok(Self::new(base))
    }

    fn client_for(&self, token: &str) -> Result<Client> {
        let mut config = self.base.clone();
        config.auth_info = AuthInfo {
            token: Some(token.to_string().into()),
            ..AuthInfo::default()
        };
        Ok(Client::try_from(config)?)
    }
}

#[async_trait]
impl NamespaceGateway for KubeNamespaceGateway {
    async fn accessible_namespaces(&self, token: &str) -> Result<AccessibleNamespaces> {
        let client = self.client_for(token)?;
        let namespaces = fetch_namespaces(&client).await?;
        Ok(map_accessible_namespaces(namespaces))
    }
}
