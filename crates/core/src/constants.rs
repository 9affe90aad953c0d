//! Constants used throughout the PMS core crate.
//!
//! Record field names, validation bounds and default paths live here so the
//! model, the query engine and the storage adapter agree on them.

/// Default data file when no explicit path is configured.
pub const DEFAULT_PATIENT_DATA_FILE: &str = "patients.json";

/// Suffix appended to the data file name for the temporary file used by atomic saves.
pub const ATOMIC_SAVE_SUFFIX: &str = ".tmp";

/// Ages must lie strictly between these bounds.
pub const MIN_AGE_EXCLUSIVE: i64 = 0;
pub const MAX_AGE_EXCLUSIVE: i64 = 120;

/// Accepted gender values, in the order they are reported in validation messages.
pub const VALID_GENDERS: [&str; 3] = ["male", "female", "others"];

/// Fields `sort` accepts, in the order they are reported in error messages.
pub const VALID_SORT_FIELDS: [&str; 3] = ["height", "weight", "bmi"];

/// Stored body keys.
pub const FIELD_HEIGHT: &str = "height";
pub const FIELD_WEIGHT: &str = "weight";

/// Derived keys. Never persisted; stripped from stored bodies before they are recomputed.
pub const FIELD_BMI: &str = "bmi";
pub const FIELD_VERDICT: &str = "verdict";

/// Upper (exclusive) BMI bounds for each verdict band.
pub const BMI_UNDERWEIGHT_BELOW: f64 = 18.5;
pub const BMI_NORMAL_BELOW: f64 = 24.9;
pub const BMI_OVERWEIGHT_BELOW: f64 = 29.9;
pub const BMI_OBESE_BELOW: f64 = 34.9;
