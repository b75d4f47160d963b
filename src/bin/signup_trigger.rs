use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error as LambdaError, LambdaEvent};
use serde_json::Value;
use tracing::{info, warn};

use civic311::error::Error;
use civic311::repository::{Repository, Tables};

/// Cognito post-confirmation trigger: creates the User record for a freshly
/// confirmed account. The event must be echoed back unchanged or Cognito
/// fails the signup.
async fn handle(repo: &Repository, event: LambdaEvent<Value>) -> Result<Value, LambdaError> {
    let payload = event.payload;

    let account_id = confirmed_account_id(&payload)
        .ok_or("post-confirmation event is missing the 'sub' user attribute")?
        .to_string();

    match repo.add_new_user(&account_id).await {
        Ok(()) => info!("user '{account_id}' added"),
        // Redelivered trigger; the existing record stands.
        Err(Error::Conflict { .. }) => warn!("user '{account_id}' already exists"),
        Err(err) => return Err(err.to_string().into()),
    }

    Ok(payload)
}

/// The confirmed account's key lands in the 'sub' user attribute.
fn confirmed_account_id(payload: &Value) -> Option<&str> {
    payload
        .pointer("/request/userAttributes/sub")
        .and_then(Value::as_str)
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

    run(service_fn(|event: LambdaEvent<Value>| handle(&repo, event))).await
}
