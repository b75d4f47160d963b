use chrono::Utc;
use tracing::warn;

use crate::entities::{RequestResponse, ServiceRequest, Status};
use crate::error::{Error, Result};
use crate::id;

use super::Repository;

const KEY: &str = "service_request_id";

impl Repository {
    pub async fn requests(&self) -> Result<Vec<ServiceRequest>> {
        self.scan_table(&self.tables.requests, "scan requests table")
            .await
    }

    pub async fn request(&self, request_id: &str) -> Result<ServiceRequest> {
        self.get_record(
            &self.tables.requests,
            KEY,
            request_id,
            "service_request_id",
            "get request",
        )
        .await
    }

    /// Creates a new service request: validates the service code and the
    /// location, assigns a fresh identifier, stamps the submission instant
    /// and persists the record.
    ///
    /// The secondary write tracking the ID under the submitter's account is
    /// at-least-once and non-transactional: the request record is durable by
    /// the time it runs, and a failure there is reported to the caller but
    /// never rolls the request back.
    pub async fn submit_request(
        &self,
        input: ServiceRequest,
        account_id: &str,
    ) -> Result<RequestResponse> {
        if !self.is_valid_service_code(&input.service_code).await {
            return Err(Error::validation(format!(
                "invalid service code '{}'",
                input.service_code
            )));
        }
        if !has_location(&input) {
            return Err(Error::validation("no location included in request"));
        }

        let mut request = prepare_create(input);

        // The catalog entry names the agency that will own the issue. Losing
        // that lookup must not lose the submission itself.
        match self.service(&request.service_code).await {
            Ok(service) => {
                request.service_name = service.service_name;
                request.agency_responsible = service.group;
            }
            Err(err) => {
                warn!(
                    "service lookup for '{}' failed, submitting without agency: {err}",
                    request.service_code
                );
            }
        }

        self.put_record(&self.tables.requests, &request, "put request")
            .await?;

        let response = RequestResponse {
            service_request_id: request.service_request_id.clone(),
            service_notice: request.service_notice.clone(),
            account_id: account_id.to_string(),
        };

        self.append_submitted_request(account_id, &request.service_request_id)
            .await?;

        Ok(response)
    }

    /// Overwrites an existing request in full. Last write wins; there is no
    /// optimistic concurrency check, so a closed request can be reopened by a
    /// subsequent update.
    pub async fn update_request(
        &self,
        input: ServiceRequest,
        account_id: &str,
    ) -> Result<RequestResponse> {
        if input.service_request_id.is_empty() {
            return Err(Error::validation(
                "update requires a service_request_id",
            ));
        }

        let request = prepare_update(input);
        self.put_record(&self.tables.requests, &request, "put request")
            .await?;

        Ok(RequestResponse {
            service_request_id: request.service_request_id,
            service_notice: request.service_notice,
            account_id: account_id.to_string(),
        })
    }
}

/// A request is locatable if it carries an address or a non-zero lat/long
/// pair.
fn has_location(request: &ServiceRequest) -> bool {
    !request.address.is_empty() || request.lat != 0.0 || request.long != 0.0
}

/// Stamps the server-assigned fields of a new submission. Server-derived
/// catalog fields are cleared; the best-effort service lookup fills them.
fn prepare_create(mut input: ServiceRequest) -> ServiceRequest {
    input.service_request_id = id::new_id();
    input.status = Status::Open;
    input.requested_datetime = Utc::now().to_rfc3339();
    input.service_name = String::new();
    input.agency_responsible = String::new();
    input
}

fn prepare_update(mut input: ServiceRequest) -> ServiceRequest {
    input.updated_datetime = Utc::now().to_rfc3339();
    input
}
