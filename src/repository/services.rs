use aws_sdk_dynamodb::types::AttributeValue;
use tracing::warn;

use crate::entities::Service;
use crate::error::Result;

use super::Repository;

const KEY: &str = "service_code";

impl Repository {
    pub async fn services(&self) -> Result<Vec<Service>> {
        self.scan_table(&self.tables.services, "scan services table")
            .await
    }

    pub async fn service(&self, code: &str) -> Result<Service> {
        self.get_record(
            &self.tables.services,
            KEY,
            code,
            "service_code",
            "get service",
        )
        .await
    }

    /// Existence probe against the services table. Returns `false` both when
    /// the code is absent and when the lookup itself fails, so callers cannot
    /// distinguish "invalid" from "lookup failed"; the probe failure is
    /// logged here.
    pub async fn is_valid_service_code(&self, code: &str) -> bool {
        let result = self
            .client
            .get_item()
            .table_name(&self.tables.services)
            .key(KEY, AttributeValue::S(code.to_string()))
            .send()
            .await;

        match result {
            Ok(output) => output.item.is_some(),
            Err(err) => {
                warn!("service code probe for '{code}' failed: {err}");
                false
            }
        }
    }
}
