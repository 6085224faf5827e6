//! Infrastructure: configuration and external clients

pub mod client;
pub mod config;
