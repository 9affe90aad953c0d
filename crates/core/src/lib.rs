//! # PMS Core
//!
//! Core business logic for the patient management service.
//!
//! This crate contains pure data operations:
//! - The patient record model, its validation and derived BMI/verdict
//! - Whole-file JSON persistence of the patient mapping
//! - Lookup and sorting over a loaded mapping
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{CoreConfig, SaveMode};
pub use constants::DEFAULT_PATIENT_DATA_FILE;
pub use error::{PatientError, PatientResult};
pub use patient::{Gender, Patient, PatientBody, PatientView, Verdict};
pub use query::{SortField, SortOrder};
pub use service::PatientService;
pub use store::{PatientStore, RecordStore};
pub use validation::{FieldViolation, ValidationError};
