use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;

use crate::entities::User;
use crate::error::{Error, Result};

use super::Repository;

const KEY: &str = "account_id";

impl Repository {
    pub async fn users(&self) -> Result<Vec<User>> {
        self.scan_table(&self.tables.users, "scan users table").await
    }

    pub async fn user(&self, account_id: &str) -> Result<User> {
        self.get_record(&self.tables.users, KEY, account_id, "account_id", "get user")
            .await
    }

    /// Inserts an empty user record for a freshly confirmed account. Fails
    /// with `Conflict` if the account already exists, so a re-delivered
    /// signup trigger never clobbers an account's request lists.
    pub async fn add_new_user(&self, account_id: &str) -> Result<()> {
        let user = User {
            account_id: account_id.to_string(),
            ..Default::default()
        };
        let item = to_item(&user).map_err(|err| Error::backend("put user", err))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.tables.users)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(account_id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(SdkError::ServiceError(err)) => match err.err() {
                PutItemError::ConditionalCheckFailedException(_) => {
                    Err(Error::conflict("user", account_id))
                }
                _ => Err(Error::backend("put user", SdkError::ServiceError(err))),
            },
            Err(err) => Err(Error::backend("put user", err)),
        }
    }

    /// Appends a request ID to the account's submitted list, creating the
    /// user record if absent. The append is a single `update_item`, atomic at
    /// the item level, so concurrent submissions by the same account cannot
    /// lose each other's IDs.
    pub async fn append_submitted_request(
        &self,
        account_id: &str,
        request_id: &str,
    ) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.tables.users)
            .key(KEY, AttributeValue::S(account_id.to_string()))
            .update_expression(
                "SET submitted_requests = \
                 list_append(if_not_exists(submitted_requests, :empty), :id)",
            )
            .expression_attribute_values(":empty", AttributeValue::L(vec![]))
            .expression_attribute_values(
                ":id",
                AttributeValue::L(vec![AttributeValue::S(request_id.to_string())]),
            )
            .send()
            .await
            .map_err(|err| Error::backend("append submitted request", err))?;
        Ok(())
    }
}
