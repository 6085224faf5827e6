//! Caller identity: the bearer token is moved from the request headers into
//! the request extensions, where handlers pick it up.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request};
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use http::request::Parts;

/// Bearer token of the caller, as presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerToken(pub String);

/// Stores the `Authorization: Bearer` value as a [`CallerToken`] extension.
/// Requests without one pass through untouched.
pub async fn capture_caller_token(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string);

    if let Some(token) = token {
        request.extensions_mut().insert(CallerToken(token));
    }

    next.run(request).await
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Extractor for the token captured by [`capture_caller_token`]. Never
/// rejects; absence is for the handler to judge.
#[derive(Clone, Debug, Default)]
pub struct MaybeCallerToken(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeCallerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeCallerToken(
            parts.extensions.get::<CallerToken>().map(|t| t.0.clone()),
        ))
    }
}
