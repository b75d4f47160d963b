use aws_config::BehaviorVersion;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};
use tracing::info;

use civic311::entities::OnboardingRequest;
use civic311::repository::{Repository, Tables};
use civic311::response;

/// Routes the city resource group.
async fn route(repo: &Repository, event: Request) -> Result<Response<Body>, LambdaError> {
    match (event.method(), event.uri().path()) {
        (&Method::GET, "/cities") => get_cities(repo).await,
        (&Method::GET, path) if path.starts_with("/city/") && path != "/city/onboard" => {
            get_city(repo, path.trim_start_matches("/city/")).await
        }
        (&Method::POST, "/city/onboard") => submit_onboarding(repo, &event).await,
        _ => response::client_error(
            StatusCode::METHOD_NOT_ALLOWED,
            "method must be 'GET' or 'POST'",
        ),
    }
}

async fn get_cities(repo: &Repository) -> Result<Response<Body>, LambdaError> {
    match repo.cities().await {
        Ok(cities) => response::json(StatusCode::OK, &cities),
        Err(err) => response::from_error(&err),
    }
}

async fn get_city(repo: &Repository, name: &str) -> Result<Response<Body>, LambdaError> {
    match repo.city(name).await {
        Ok(city) => response::json(StatusCode::OK, &city),
        Err(err) => response::from_error(&err),
    }
}

async fn submit_onboarding(
    repo: &Repository,
    event: &Request,
) -> Result<Response<Body>, LambdaError> {
    let account_id = response::submitter(event);

    let input: OnboardingRequest = match serde_json::from_slice(event.body().as_ref()) {
        Ok(input) => input,
        Err(err) => {
            return response::client_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("malformed onboarding request JSON: {err}"),
            )
        }
    };

    match repo.add_onboarding_request(input, &account_id).await {
        Ok(stored) => {
            info!("new onboarding request submitted: {}", stored.id);
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
    async fn onboard_path_is_not_treated_as_a_city_name() {
        // POST /city/onboard with a malformed body must hit the onboarding
        // handler, not the city point lookup.
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/city/onboard")
            .body(Body::Text("{".into()))
            .unwrap();
        let response = route(&offline_repo(), event).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unmatched_route_is_method_not_allowed() {
        let event = lambda_http::http::Request::builder()
            .method("PUT")
            .uri("/cities")
            .body(Body::Empty)
            .unwrap();
        let response = route(&offline_repo(), event).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
