use aws_config::BehaviorVersion;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};
use tracing::info;

use civic311::entities::Feedback;
use civic311::repository::{Repository, Tables};
use civic311::response;

/// Routes the user resource group.
async fn route(repo: &Repository, event: Request) -> Result<Response<Body>, LambdaError> {
    match (event.method(), event.uri().path()) {
        (&Method::GET, path) if path.starts_with("/user/") => {
            get_user(repo, path.trim_start_matches("/user/")).await
        }
        (&Method::POST, "/feedback") => submit_feedback(repo, &event).await,
        _ => response::client_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "method must be 'GET' or 'POST'",
        ),
    }
}

async fn get_user(repo: &Repository, account_id: &str) -> Result<Response<Body>, LambdaError> {
    match repo.user(account_id).await {
        Ok(user) => response::json(StatusCode::OK, &user),
        Err(err) => response::from_error(&err),
    }
}

async fn submit_feedback(repo: &Repository, event: &Request) -> Result<Response<Body>, LambdaError> {
    let account_id = response::submitter(event);

    let input: Feedback = match serde_json::from_slice(event.body().as_ref()) {
        Ok(input) => input,
        Err(err) => {
            return response::client_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("malformed feedback JSON: {err}"),
            )
        }
    };

    match repo.add_feedback(input, &account_id).await {
        Ok(stored) => {
            info!("feedback submitted: {}", stored.id);
            response::json(StatusCode::CREATED, &stored)
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
    async fn malformed_feedback_json_is_unprocessable() {
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/feedback")
            .body(Body::Text("[oops".into()))
            .unwrap();
        let response = route(&offline_repo(), event).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
