//! Response mapping: success values and repository errors to status-coded
//! `lambda_http` responses. Success bodies are JSON; error bodies are plain
//! text in the form `"<Status Phrase>: <detail>"`.

use lambda_http::http::StatusCode;
use lambda_http::{Body, Error as LambdaError, Request, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::Error;

pub fn json<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, LambdaError> {
    let body = serde_json::to_string(value)?;
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body))
        .map_err(Box::new)?;
    Ok(response)
}

pub fn client_error(status: StatusCode, detail: &str) -> Result<Response<Body>, LambdaError> {
    warn!("{detail}");
    text(status, detail)
}

pub fn server_error(detail: &str) -> Result<Response<Body>, LambdaError> {
    error!("{detail}");
    text(StatusCode::INTERNAL_SERVER_ERROR, detail)
}

/// Maps a repository error to a response by kind.
pub fn from_error(err: &Error) -> Result<Response<Body>, LambdaError> {
    match err {
        Error::Validation(_) => client_error(StatusCode::BAD_REQUEST, &err.to_string()),
        Error::NotFound { .. } => client_error(StatusCode::NOT_FOUND, &err.to_string()),
        Error::Conflict { .. } => client_error(StatusCode::CONFLICT, &err.to_string()),
        Error::Backend { .. } => server_error(&err.to_string()),
    }
}

/// Account ID of the caller, taken from the `from` header. The client app is
/// expected to set it; submissions without one are tracked as a guest.
pub fn submitter(event: &Request) -> String {
    event
        .headers()
        .get("from")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("guest")
        .to_string()
}

fn text(status: StatusCode, detail: &str) -> Result<Response<Body>, LambdaError> {
    let phrase = status.canonical_reason().unwrap_or("Error");
    let response = Response::builder()
        .status(status)
        .header("content-type", "text/plain")
        .body(Body::Text(format!("{phrase}: {detail}")))
        .map_err(Box::new)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(response: &Response<Body>) -> &str {
        match response.body() {
            Body::Text(text) => text,
            other => panic!("expected text body, got {other:?}"),
        }
    }

    #[test]
    fn json_sets_content_type_and_cors() {
        let response = json(StatusCode::OK, &serde_json::json!({"url": "https://x"})).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[test]
    fn not_found_body_names_the_missing_key() {
        let err = Error::not_found("service", "042");
        let response = from_error(&err).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "text/plain");
        assert_eq!(body_text(&response), "Not Found: service '042' not in database");
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = Error::validation("no location included in request");
        let response = from_error(&err).unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(&response).starts_with("Bad Request: "));
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = Error::conflict("user", "abc");
        let response = from_error(&err).unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn backend_maps_to_server_error_with_context() {
        let err = Error::backend("put request", "timed out");
        let response = from_error(&err).unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(&response),
            "Internal Server Error: put request: timed out"
        );
    }

    #[test]
    fn submitter_falls_back_to_guest() {
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/request")
            .body(Body::Empty)
            .unwrap();
        assert_eq!(submitter(&event), "guest");

        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/request")
            .header("from", "d1a29c7f")
            .body(Body::Empty)
            .unwrap();
        assert_eq!(submitter(&event), "d1a29c7f");
    }
}
