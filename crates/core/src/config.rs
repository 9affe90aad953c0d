//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services. Request
//! handling never reads process-wide environment variables.

use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How [`PatientStore::save`](crate::PatientStore::save) writes the data file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Truncate and rewrite the data file in place. An interrupted write can leave it corrupt.
    #[default]
    Overwrite,
    /// Write a sibling temporary file and rename it over the data file.
    Atomic,
}

impl FromStr for SaveMode {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(SaveMode::Overwrite),
            "atomic" => Ok(SaveMode::Atomic),
            other => Err(PatientError::InvalidInput(format!(
                "unknown save mode '{other}' (expected 'overwrite' or 'atomic')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_file: PathBuf,
    save_mode: SaveMode,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(patient_data_file: PathBuf, save_mode: SaveMode) -> PatientResult<Self> {
        if patient_data_file.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "patient_data_file cannot be empty".into(),
            ));
        }

        Ok(Self {
            patient_data_file,
            save_mode,
        })
    }

    pub fn patient_data_file(&self) -> &Path {
        &self.patient_data_file
    }

    pub fn save_mode(&self) -> SaveMode {
        self.save_mode
    }
}

/// Parse the save mode from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`SaveMode::Overwrite`].
pub fn save_mode_from_env_value(value: Option<String>) -> PatientResult<SaveMode> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<SaveMode>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_mode_defaults_to_overwrite() {
        assert_eq!(save_mode_from_env_value(None).unwrap(), SaveMode::Overwrite);
        assert_eq!(
            save_mode_from_env_value(Some("   ".into())).unwrap(),
            SaveMode::Overwrite
        );
    }

    #[test]
    fn save_mode_parses_case_insensitively() {
        assert_eq!(
            save_mode_from_env_value(Some("Atomic".into())).unwrap(),
            SaveMode::Atomic
        );
        assert_eq!(
            save_mode_from_env_value(Some(" overwrite ".into())).unwrap(),
            SaveMode::Overwrite
        );
    }

    #[test]
    fn unknown_save_mode_is_rejected() {
        let err = save_mode_from_env_value(Some("journal".into())).unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(_)));
    }

    #[test]
    fn empty_data_file_path_is_rejected() {
        let err = CoreConfig::new(PathBuf::new(), SaveMode::Overwrite).unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(_)));
    }
}
