use chrono::Utc;

use crate::entities::{City, OnboardingRequest};
use crate::error::{Error, Result};
use crate::id;

use super::Repository;

const KEY: &str = "city_name";

impl Repository {
    pub async fn cities(&self) -> Result<Vec<City>> {
        self.scan_table(&self.tables.cities, "scan cities table").await
    }

    pub async fn city(&self, name: &str) -> Result<City> {
        self.get_record(&self.tables.cities, KEY, name, "city_name", "get city")
            .await
    }

    /// Records a new city's interest in joining the platform. Write-once,
    /// keyed by a generated ID; returns the stored record.
    pub async fn add_onboarding_request(
        &self,
        input: OnboardingRequest,
        account_id: &str,
    ) -> Result<OnboardingRequest> {
        validate_onboarding(&input)?;

        let mut entry = input;
        entry.id = id::new_id();
        entry.account_id = account_id.to_string();
        entry.datetime = Utc::now().to_rfc3339();

        self.put_record(&self.tables.onboarding, &entry, "put onboarding request")
            .await?;
        Ok(entry)
    }
}

fn validate_onboarding(input: &OnboardingRequest) -> Result<()> {
    if input.city.is_empty() || input.state.is_empty() {
        return Err(Error::validation("city and state must be specified"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_requires_city_and_state() {
        let empty = OnboardingRequest::default();
        assert!(validate_onboarding(&empty).is_err());

        let city_only = OnboardingRequest {
            city: "Schenectady".into(),
            ..Default::default()
        };
        assert!(validate_onboarding(&city_only).is_err());

        let complete = OnboardingRequest {
            city: "Schenectady".into(),
            state: "NY".into(),
            ..Default::default()
        };
        assert!(validate_onboarding(&complete).is_ok());
    }
}
