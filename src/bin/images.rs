use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};
use serde::Serialize;
use tracing::{error, info};

use civic311::response;

const IMAGE_BUCKET_DEFAULT: &str = "civic311-images";
const URL_EXPIRATION_TIME: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Serialize)]
struct SignedUrl {
    url: String,
}

/// Routes the image resource group: short-lived presigned S3 URLs for
/// fetching and storing image objects.
async fn route(s3_client: &aws_sdk_s3::Client, event: Request) -> Result<Response<Body>, LambdaError> {
    match (event.method(), event.uri().path()) {
        (&Method::GET, path) if path.starts_with("/images/fetch/") => {
            fetch_url(s3_client, path.trim_start_matches("/images/fetch/")).await
        }
        (&Method::GET, path) if path.starts_with("/images/store/") => {
            store_url(s3_client, path.trim_start_matches("/images/store/")).await
        }
        _ => response::client_error(StatusCode::METHOD_NOT_ALLOWED, "method must be 'GET'"),
    }
}

async fn fetch_url(s3_client: &aws_sdk_s3::Client, key: &str) -> Result<Response<Body>, LambdaError> {
    let presigned = s3_client
        .get_object()
        .bucket(image_bucket())
        .key(key)
        .presigned(PresigningConfig::expires_in(URL_EXPIRATION_TIME).map_err(Box::new)?)
        .await;

    match presigned {
        Ok(presigned) => {
            let url: String = presigned.uri().into();
            info!("presigned fetch URL for '{key}'");
            response::json(StatusCode::OK, &SignedUrl { url })
        }
        Err(err) => {
            error!("presigning fetch URL for '{key}' failed: {err}");
            response::server_error("error presigning S3 URL for fetching")
        }
    }
}

async fn store_url(s3_client: &aws_sdk_s3::Client, key: &str) -> Result<Response<Body>, LambdaError> {
    let presigned = s3_client
        .put_object()
        .bucket(image_bucket())
        .key(key)
        .presigned(PresigningConfig::expires_in(URL_EXPIRATION_TIME).map_err(Box::new)?)
        .await;

    match presigned {
        Ok(presigned) => {
            let url: String = presigned.uri().into();
            info!("presigned store URL for '{key}'");
            response::json(StatusCode::OK, &SignedUrl { url })
        }
        Err(err) => {
            error!("presigning store URL for '{key}' failed: {err}");
            response::server_error("error presigning S3 URL for storing")
        }
    }
}

// Read per invocation so a bucket swap doesn't need a redeploy.
fn image_bucket() -> String {
    std::env::var("IMAGE_BUCKET").unwrap_or(IMAGE_BUCKET_DEFAULT.into())
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
    let s3_client = aws_sdk_s3::Client::new(&config);

    run(service_fn(|event: Request| route(&s3_client, event))).await
}
