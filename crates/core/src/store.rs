//! Whole-file persistence of the patient mapping.
//!
//! ## Storage Layout
//!
//! One JSON object, keyed by patient id, values holding the stored body:
//!
//! ```text
//! {
//!   "P001": {"name": "...", "city": "...", "age": 30, "gender": "male", "height": 1.75, "weight": 70.0},
//!   ...
//! }
//! ```
//!
//! Every operation reads the whole file and every write replaces the whole file. There is no
//! locking: two concurrent load-modify-save cycles can lose one of the writes.

use crate::config::{CoreConfig, SaveMode};
use crate::constants::ATOMIC_SAVE_SUFFIX;
use crate::error::{PatientError, PatientResult};
use crate::patient::PatientBody;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory copy of the data file. Preserves the file's key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordStore {
    records: Map<String, Value>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Raw stored body for `id`.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }

    /// Appends a record. Callers check [`contains`](Self::contains) first; an existing key
    /// is overwritten in place.
    pub fn insert(&mut self, id: String, body: &PatientBody) -> PatientResult<()> {
        let value = serde_json::to_value(body).map_err(PatientError::Serialization)?;
        self.records.insert(id, value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The mapping exactly as stored.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.records
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.records
    }
}

impl From<Map<String, Value>> for RecordStore {
    fn from(records: Map<String, Value>) -> Self {
        Self { records }
    }
}

/// Reads and writes the patient data file.
#[derive(Clone, Debug)]
pub struct PatientStore {
    path: PathBuf,
    save_mode: SaveMode,
}

impl PatientStore {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            path: cfg.patient_data_file().to_path_buf(),
            save_mode: cfg.save_mode(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole data file.
    ///
    /// # Errors
    ///
    /// - [`PatientError::FileRead`] if the file is missing or unreadable,
    /// - [`PatientError::Deserialization`] if it is not valid JSON,
    /// - [`PatientError::NotAnObject`] if the top level is not a JSON object.
    pub fn load(&self) -> PatientResult<RecordStore> {
        let raw = fs::read_to_string(&self.path).map_err(PatientError::FileRead)?;
        let value: Value = serde_json::from_str(&raw).map_err(PatientError::Deserialization)?;
        match value {
            Value::Object(records) => Ok(RecordStore { records }),
            _ => Err(PatientError::NotAnObject),
        }
    }

    /// Replaces the data file with `store`.
    ///
    /// In [`SaveMode::Overwrite`] the file is truncated and rewritten; a failure part way
    /// leaves it corrupt. In [`SaveMode::Atomic`] the content is written to a sibling
    /// temporary file which is then renamed over the data file.
    pub fn save(&self, store: &RecordStore) -> PatientResult<()> {
        let json = serde_json::to_string(&store.records).map_err(PatientError::Serialization)?;

        match self.save_mode {
            SaveMode::Overwrite => fs::write(&self.path, json).map_err(PatientError::FileWrite),
            SaveMode::Atomic => {
                let tmp = self.temp_path();
                fs::write(&tmp, json).map_err(PatientError::FileWrite)?;
                if let Err(e) = fs::rename(&tmp, &self.path) {
                    if let Err(cleanup) = fs::remove_file(&tmp) {
                        tracing::warn!(
                            "failed to remove temporary data file {}: {}",
                            tmp.display(),
                            cleanup
                        );
                    }
                    return Err(PatientError::FileRename(e));
                }
                Ok(())
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(ATOMIC_SAVE_SUFFIX);
        self.path.with_file_name(name)
    }
}
