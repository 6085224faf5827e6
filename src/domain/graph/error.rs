use thiserror::Error;

/// Reasons a graph request cannot be turned into [`GraphOptions`].
///
/// Resolution stops at the first of these; no partially built options are
/// ever returned.
///
/// [`GraphOptions`]: crate::domain::graph::model::graph_options::GraphOptions
#[derive(Debug, Error)]
pub enum GraphOptionsError {
    /// Malformed, out-of-range or missing client input.
    #[error("{0}")]
    BadRequest(String),

    /// A requested namespace is not visible to the caller.
    #[error("{0}")]
    Forbidden(String),

    /// Not attributable to the request content: no caller identity, or the
    /// namespace inventory could not be queried.
    #[error("{0}")]
    Internal(String),
}

impl GraphOptionsError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        GraphOptionsError::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        GraphOptionsError::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        GraphOptionsError::Internal(msg.into())
    }
}
