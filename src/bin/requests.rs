use aws_config::BehaviorVersion;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};
use tracing::info;

use civic311::entities::ServiceRequest;
use civic311::repository::{Repository, Tables};
use civic311::response;

/// Routes the service-request resource group.
async fn route(repo: &Repository, event: Request) -> Result<Response<Body>, LambdaError> {
    match (event.method(), event.uri().path()) {
        (&Method::GET, "/requests") => get_requests(repo).await,
        (&Method::GET, path) if path.starts_with("/request/") => {
            get_request(repo, path.trim_start_matches("/request/")).await
        }
        (&Method::POST, "/request") => submit_request(repo, &event).await,
        _ => response::client_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "method must be 'GET' or 'POST'",
        ),
    }
}

async fn get_requests(repo: &Repository) -> Result<Response<Body>, LambdaError> {
    match repo.requests().await {
        Ok(requests) => response::json(StatusCode::OK, &requests),
        Err(err) => response::from_error(&err),
    }
}

async fn get_request(repo: &Repository, request_id: &str) -> Result<Response<Body>, LambdaError> {
    match repo.request(request_id).await {
        Ok(request) => response::json(StatusCode::OK, &request),
        Err(err) => response::from_error(&err),
    }
}

/// Creates a new request, or overwrites an existing one when the body already
/// carries a `service_request_id`.
async fn submit_request(repo: &Repository, event: &Request) -> Result<Response<Body>, LambdaError> {
    let account_id = response::submitter(event);

    let input: ServiceRequest = match serde_json::from_slice(event.body().as_ref()) {
        Ok(input) => input,
        Err(err) => {
            return response::client_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("malformed request JSON: {err}"),
            )
        }
    };

    let updating = !input.service_request_id.is_empty();
    let result = if updating {
        repo.update_request(input, &account_id).await
    } else {
        repo.submit_request(input, &account_id).await
    };

    match result {
        Ok(submitted) => {
            if updating {
                info!("request updated: {}", submitted.service_request_id);
            } else {
                info!("new request submitted: {}", submitted.service_request_id);
            }
            response::json(StatusCode::CREATED, &submitted)
        }
        Err(err) => response::from_error(&err),
    }
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let repo = Repository::new(aws_sdk_dynamodb::Client::new(&config), Tables::from_env());

    run(service_fn(|event: Request| route(&repo, event))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_repo() -> Repository {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
            .build();
        Repository::new(aws_sdk_dynamodb::Client::from_conf(config), Tables::default())
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_before_any_backend_call() {
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/request")
            .body(Body::Text("{not json".into()))
            .unwrap();
        let response = route(&offline_repo(), event).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unmatched_route_is_method_not_allowed() {
        let event = lambda_http::http::Request::builder()
            .method("DELETE")
            .uri("/request/638349")
            .body(Body::Empty)
            .unwrap();
        let response = route(&offline_repo(), event).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
