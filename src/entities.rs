//! Entity model for the civic311 API. Serde field names are the public JSON
//! surface (Open311 GeoReport flavored); the same shapes are stored verbatim
//! in DynamoDB via `serde_dynamo`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A catalog entry describing a category of reportable issue. Immutable
/// reference data, read-only from the API surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub service_code: String,
    pub service_name: String,
    pub description: String,
    pub metadata: bool,
    #[serde(rename = "type")]
    pub service_type: String,
    pub keywords: Vec<String>,
    pub group: String,
}

/// Extra fields a service may require, unique to the jurisdiction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDefinition {
    pub service_code: String,
    pub attributes: Vec<ServiceAttribute>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAttribute {
    pub code: String,
    pub datatype: String,
    pub variable: bool,
    pub required: bool,
    pub order: i32,
    pub description: String,
    pub datatype_description: String,
    pub values: Vec<AttributeValue>,
}

/// One allowed value for a list-typed service attribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeValue {
    pub key: String,
    pub name: String,
}

/// Lifecycle state of a service request. Every request starts `Open`; updates
/// may move it to any other state (unconditional overwrite, no enforced
/// ordering).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Open,
    Accepted,
    InProgress,
    Closed,
}

/// A timestamped free-text note on a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub datetime: String,
    pub text: String,
}

/// A timestamped reference to an uploaded image or other media object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaRef {
    pub datetime: String,
    pub url: String,
}

/// A reported civic issue. Location is submitted via address or lat/long.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRequest {
    pub service_request_id: String,
    pub status: Status,
    pub status_notes: String,
    pub service_name: String,
    pub service_code: String,
    pub descriptions: Vec<Note>,
    pub media: Vec<MediaRef>,
    pub agency_responsible: String,
    pub service_notice: String,
    pub requested_datetime: String,
    pub updated_datetime: String,
    pub expected_datetime: String,
    pub address: String,
    pub address_id: String,
    pub zipcode: i32,
    pub lat: f64,
    pub long: f64,
    /// Jurisdiction-specific extension values, keyed by attribute code.
    pub attributes: HashMap<String, String>,
}

/// Projection returned after a request create/update. Derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestResponse {
    pub service_request_id: String,
    pub service_notice: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub account_id: String,
    pub groups: Vec<String>,
    pub submitted_requests: Vec<String>,
    pub watched_requests: Vec<String>,
}

/// A jurisdiction's own deployment of the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    pub city_name: String,
    pub endpoint: String,
}

/// Free-form feedback about the platform itself. Write-once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    pub id: String,
    pub account_id: String,
    pub datetime: String,
    pub feedback: String,
}

/// A new city's interest in joining the platform. Write-once; `city` and
/// `state` are required at submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingRequest {
    pub id: String,
    pub account_id: String,
    pub datetime: String,
    pub city: String,
    pub state: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub title: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&Status::Open).unwrap(), "\"open\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"inProgress\""
        );
    }

    #[test]
    fn new_request_defaults_to_open() {
        let request = ServiceRequest::default();
        assert_eq!(request.status, Status::Open);
    }

    #[test]
    fn minimal_submission_body_parses() {
        let body = r#"{"service_code": "003", "address": "8TH AVE and JUDAH ST"}"#;
        let request: ServiceRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.service_code, "003");
        assert_eq!(request.address, "8TH AVE and JUDAH ST");
        assert_eq!(request.status, Status::Open);
        assert!(request.service_request_id.is_empty());
    }

    #[test]
    fn service_uses_public_field_names() {
        let service = Service {
            service_code: "003".into(),
            service_name: "Curb or curb ramp defect".into(),
            service_type: "realtime".into(),
            group: "street".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["service_code"], "003");
        assert_eq!(json["type"], "realtime");
        assert_eq!(json["group"], "street");
    }

    #[test]
    fn request_round_trips_extension_attributes() {
        let body = r#"{
            "service_code": "002",
            "lat": 42.8170100653,
            "long": -73.9246079682,
            "attributes": {"plate_size": "large"}
        }"#;
        let request: ServiceRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.attributes["plate_size"], "large");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["attributes"]["plate_size"], "large");
    }
}
