use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Patient not found")]
    NotFound(String),
    #[error("Patient already exists")]
    AlreadyExists(String),
    #[error("Invalid field select from {:?}", crate::constants::VALID_SORT_FIELDS)]
    InvalidSortField(String),
    #[error("Invalid order, select between asc and desc")]
    InvalidSortOrder(String),

    #[error("failed to read patient data file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient data file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to replace patient data file: {0}")]
    FileRename(std::io::Error),
    #[error("failed to serialize patient data: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient data: {0}")]
    Deserialization(serde_json::Error),
    #[error("patient data file must hold a JSON object keyed by patient id")]
    NotAnObject,
    #[error("stored record '{0}' is not a JSON object")]
    MalformedRecord(String),
}

impl PatientError {
    /// True for failures of the data file itself rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            PatientError::FileRead(_)
                | PatientError::FileWrite(_)
                | PatientError::FileRename(_)
                | PatientError::Serialization(_)
                | PatientError::Deserialization(_)
                | PatientError::NotAnObject
                | PatientError::MalformedRecord(_)
        )
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
