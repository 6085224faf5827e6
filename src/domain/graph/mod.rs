//! Graph request options: validation, namespace windows and appender pipeline

pub mod appender;
pub mod error;
pub mod model;
pub mod service;
