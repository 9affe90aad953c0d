//! Request and response bodies exchanged over HTTP.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Plain informational response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    #[schema(example = "Patient Management System API")]
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every error response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    #[schema(example = "Patient not found")]
    pub detail: String,
}

/// Payload of `POST /create`.
///
/// Field types are enforced during deserialisation; value constraints are enforced by
/// `pms_core::Patient::new`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    /// Caller-assigned identifier, used as the storage key.
    #[schema(example = "P002")]
    pub id: String,
    #[schema(example = "Ananya Verma")]
    pub name: String,
    #[schema(example = "Guwahati")]
    pub city: String,
    /// Years, strictly between 0 and 120.
    #[schema(example = 28)]
    pub age: i64,
    /// One of `male`, `female`, `others`.
    #[schema(example = "female")]
    pub gender: String,
    /// Meters, greater than 0.
    #[schema(example = 1.65)]
    pub height: f64,
    /// Kilograms, greater than 0.
    #[schema(example = 90.0)]
    pub weight: f64,
}

/// A record as held in the data file: no id, no derived fields.
///
/// `GET /view` returns a map of these keyed by patient id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredPatientRes {
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

/// A stored record together with its derived fields.
///
/// Returned by `GET /patient/{id}` and, as a list, by `GET /sort`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    /// `round(weight / height^2, 2)`.
    #[schema(example = 33.06)]
    pub bmi: f64,
    /// `null` when the BMI falls outside every band.
    #[schema(example = "obese")]
    pub verdict: Option<String>,
}
