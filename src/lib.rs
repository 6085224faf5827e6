//! Resolves service-mesh graph requests into validated graph options and an
//! ordered appender pipeline.

pub mod api;
pub mod app_state;
pub mod core;
pub mod domain;
pub mod errors;
pub mod routes;
