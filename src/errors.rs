use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::domain::graph::error::GraphOptionsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<GraphOptionsError> for AppError {
    fn from(err: GraphOptionsError) -> Self {
        match err {
            GraphOptionsError::BadRequest(msg) => AppError::BadRequest(msg),
            GraphOptionsError::Forbidden(msg) => AppError::Forbidden(msg),
            GraphOptionsError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (GraphOptionsError::bad_request("bad"), StatusCode::BAD_REQUEST),
            (GraphOptionsError::forbidden("no"), StatusCode::FORBIDDEN),
            (GraphOptionsError::internal("oops"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn keeps_domain_message() {
        let err = AppError::from(GraphOptionsError::forbidden(
            "Requested namespace [payments] is not accessible.",
        ));
        assert_eq!(
            err.to_string(),
            "Forbidden: Requested namespace [payments] is not accessible."
        );
    }
}
