//! DynamoDB access layer: one table per collection, keyed by a natural string
//! key. The client is built once per process in each binary's `main` and
//! shared across invocations.

mod cities;
mod feedback;
mod requests;
mod services;
mod users;

use aws_sdk_dynamodb::types::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_item};

use crate::error::{Error, Result};

const SERVICES_TABLE_DEFAULT: &str = "civic311-services";
const REQUESTS_TABLE_DEFAULT: &str = "civic311-requests";
const USERS_TABLE_DEFAULT: &str = "civic311-users";
const CITIES_TABLE_DEFAULT: &str = "civic311-cities";
const FEEDBACK_TABLE_DEFAULT: &str = "civic311-feedback";
const ONBOARDING_TABLE_DEFAULT: &str = "civic311-onboarding";

/// Resolved table names, one per collection.
#[derive(Debug, Clone)]
pub struct Tables {
    pub services: String,
    pub requests: String,
    pub users: String,
    pub cities: String,
    pub feedback: String,
    pub onboarding: String,
}

impl Tables {
    pub fn from_env() -> Self {
        Self {
            services: std::env::var("SERVICES_TABLE").unwrap_or(SERVICES_TABLE_DEFAULT.into()),
            requests: std::env::var("REQUESTS_TABLE").unwrap_or(REQUESTS_TABLE_DEFAULT.into()),
            users: std::env::var("USERS_TABLE").unwrap_or(USERS_TABLE_DEFAULT.into()),
            cities: std::env::var("CITIES_TABLE").unwrap_or(CITIES_TABLE_DEFAULT.into()),
            feedback: std::env::var("FEEDBACK_TABLE").unwrap_or(FEEDBACK_TABLE_DEFAULT.into()),
            onboarding: std::env::var("ONBOARDING_TABLE")
                .unwrap_or(ONBOARDING_TABLE_DEFAULT.into()),
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            services: SERVICES_TABLE_DEFAULT.into(),
            requests: REQUESTS_TABLE_DEFAULT.into(),
            users: USERS_TABLE_DEFAULT.into(),
            cities: CITIES_TABLE_DEFAULT.into(),
            feedback: FEEDBACK_TABLE_DEFAULT.into(),
            onboarding: ONBOARDING_TABLE_DEFAULT.into(),
        }
    }
}

/// CRUD-style accessors for the five entity collections.
#[derive(Debug, Clone)]
pub struct Repository {
    client: aws_sdk_dynamodb::Client,
    tables: Tables,
}

impl Repository {
    pub fn new(client: aws_sdk_dynamodb::Client, tables: Tables) -> Self {
        Self { client, tables }
    }

    /// Full table scan. An empty table is `Ok(vec![])`, not an error. No
    /// ordering guarantee and no pagination.
    async fn scan_table<T: DeserializeOwned>(
        &self,
        table: &str,
        context: &'static str,
    ) -> Result<Vec<T>> {
        let output = self
            .client
            .scan()
            .table_name(table)
            .send()
            .await
            .map_err(|err| Error::backend(context, err))?;

        let items = output.items.unwrap_or_default();
        from_items(items).map_err(|err| Error::backend(context, err))
    }

    /// Point lookup by the collection's natural key.
    async fn get_record<T: DeserializeOwned>(
        &self,
        table: &str,
        key_attr: &'static str,
        key: &str,
        entity: &'static str,
        context: &'static str,
    ) -> Result<T> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(key_attr, AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(|err| Error::backend(context, err))?;

        let item = output.item.ok_or_else(|| Error::not_found(entity, key))?;
        from_item(item).map_err(|err| Error::backend(context, err))
    }

    /// Writes or overwrites a full record.
    async fn put_record<T: Serialize>(
        &self,
        table: &str,
        record: &T,
        context: &'static str,
    ) -> Result<()> {
        let item = to_item(record).map_err(|err| Error::backend(context, err))?;
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|err| Error::backend(context, err))?;
        Ok(())
    }
}
