// Kube-rs based Kubernetes client
pub mod kube_resources;
pub mod namespace_gateway_trait;
pub mod namespaces;
