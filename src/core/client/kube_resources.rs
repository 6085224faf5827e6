/// Re-export the Kubernetes resource types used by the clients
pub use k8s_openapi::api::core::v1::Namespace;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
