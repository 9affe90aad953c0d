//! # API Shared
//!
//! Shared wire types for the PMS API surface.
//!
//! Contains:
//! - Request/response bodies (`dto` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `pms-core` (which validates `CreatePatientReq`) and `api-rest`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
