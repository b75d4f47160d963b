use aws_config::BehaviorVersion;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};

use civic311::repository::{Repository, Tables};
use civic311::response;

/// Routes the service-catalog resource group.
async fn route(repo: &Repository, event: Request) -> Result<Response<Body>, LambdaError> {
    match (event.method(), event.uri().path()) {
        (&Method::GET, "/services") => get_services(repo).await,
        (&Method::GET, path) if path.starts_with("/service/") => {
            get_service(repo, path.trim_start_matches("/service/")).await
        }
        _ => response::client_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "route must be GET /services or GET /service/{id}",
        ),
    }
}

async fn get_services(repo: &Repository) -> Result<Response<Body>, LambdaError> {
    match repo.services().await {
        Ok(services) => response::json(StatusCode::OK, &services),
        Err(err) => response::from_error(&err),
    }
}

async fn get_service(repo: &Repository, code: &str) -> Result<Response<Body>, LambdaError> {
    match repo.service(code).await {
        Ok(service) => response::json(StatusCode::OK, &service),
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
    async fn unmatched_route_is_method_not_allowed() {
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/services")
            .body(Body::Empty)
            .unwrap();
        let response = route(&offline_repo(), event).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
