use chrono::Utc;

use crate::entities::Feedback;
use crate::error::Result;
use crate::id;

use super::Repository;

impl Repository {
    /// Stores a free-form feedback entry keyed by a generated ID; returns the
    /// stored record.
    pub async fn add_feedback(&self, input: Feedback, account_id: &str) -> Result<Feedback> {
        let mut entry = input;
        entry.id = id::new_id();
        entry.account_id = account_id.to_string();
        entry.datetime = Utc::now().to_rfc3339();

        self.put_record(&self.tables.feedback, &entry, "put feedback")
            .await?;
        Ok(entry)
    }
}
