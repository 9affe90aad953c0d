//! Patient service.
//!
//! Each operation runs a full cycle against the data file: load, act in memory and, for
//! creation, save. Nothing is cached between calls.

use crate::config::CoreConfig;
use crate::error::{PatientError, PatientResult};
use crate::patient::{Patient, PatientView};
use crate::query::{self, SortField, SortOrder};
use crate::store::{PatientStore, RecordStore};
use api_shared::CreatePatientReq;
use std::sync::Arc;

/// Pure patient data operations - no API concerns
#[derive(Clone, Debug)]
pub struct PatientService {
    store: PatientStore,
}

impl PatientService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: PatientStore::new(&cfg),
        }
    }

    /// The whole stored mapping, untouched.
    pub fn view_all(&self) -> PatientResult<RecordStore> {
        self.store.load()
    }

    /// One record with its derived fields.
    ///
    /// # Errors
    ///
    /// [`PatientError::NotFound`] if no record has `id`, or a storage error.
    pub fn get_patient(&self, id: &str) -> PatientResult<PatientView> {
        let records = self.store.load()?;
        query::get_by_id(&records, id)
    }

    /// All records ordered by `sort_by` (`height`, `weight` or `bmi`).
    ///
    /// `order` defaults to ascending. Both arguments are checked before the data file is read.
    ///
    /// # Errors
    ///
    /// [`PatientError::InvalidSortField`] or [`PatientError::InvalidSortOrder`] for bad
    /// arguments, or a storage error.
    pub fn sort_patients(
        &self,
        sort_by: &str,
        order: Option<&str>,
    ) -> PatientResult<Vec<PatientView>> {
        let field = sort_by.parse::<SortField>()?;
        let order = order
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        let records = self.store.load()?;
        query::sort(&records, field, order)
    }

    /// Validates `req` and appends it to the data file.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if:
    /// - the payload breaks a field rule ([`PatientError::Validation`]),
    /// - a record with the same id exists ([`PatientError::AlreadyExists`]); the file is
    ///   left untouched,
    /// - the data file cannot be read or written.
    pub fn create_patient(&self, req: CreatePatientReq) -> PatientResult<Patient> {
        let patient = Patient::new(req)?;

        let mut records = self.store.load()?;
        if records.contains(patient.id()) {
            return Err(PatientError::AlreadyExists(patient.id().to_string()));
        }

        records.insert(patient.id().to_string(), patient.body())?;
        self.store.save(&records)?;

        tracing::info!(
            "created patient {} ({} records)",
            patient.id(),
            records.len()
        );
        Ok(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SaveMode;
    use crate::patient::Verdict;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const SEED: &str = r#"{"P001": {"name": "Ananya Verma", "city": "Guwahati", "age": 28, "gender": "female", "height": 1.65, "weight": 90.0}, "P002": {"name": "Ravi Mehta", "city": "Mumbai", "age": 35, "gender": "male", "height": 1.75, "weight": 85}, "P003": {"name": "Sneha Kulkarni", "city": "Pune", "age": 22, "gender": "female", "height": 1.6, "weight": 45}}"#;

    fn test_service(dir: &Path, seed: Option<&str>) -> (PatientService, std::path::PathBuf) {
        let path = dir.join("patients.json");
        if let Some(seed) = seed {
            fs::write(&path, seed).expect("seed data file");
        }
        let cfg = Arc::new(
            CoreConfig::new(path.clone(), SaveMode::Overwrite)
                .expect("CoreConfig::new should succeed"),
        );
        (PatientService::new(cfg), path)
    }

    fn request(id: &str) -> CreatePatientReq {
        CreatePatientReq {
            id: id.into(),
            name: "A".into(),
            city: "X".into(),
            age: 30,
            gender: "male".into(),
            height: 1.75,
            weight: 70.0,
        }
    }

    #[test]
    fn create_then_get_round_trips_stored_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, _) = test_service(temp_dir.path(), Some("{}"));

        service.create_patient(request("P1")).unwrap();
        let view = service.get_patient("P1").unwrap();

        let fields = view.fields();
        assert_eq!(fields["name"], "A");
        assert_eq!(fields["city"], "X");
        assert_eq!(fields["age"], 30);
        assert_eq!(fields["gender"], "male");
        assert_eq!(fields["height"], 1.75);
        assert_eq!(fields["weight"], 70.0);
        assert_eq!(view.bmi(), 22.86);
        assert_eq!(view.verdict(), Some(Verdict::Normal));
    }

    #[test]
    fn duplicate_create_leaves_file_unchanged() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, path) = test_service(temp_dir.path(), Some(SEED));

        let err = service.create_patient(request("P002")).unwrap_err();
        assert!(matches!(err, PatientError::AlreadyExists(id) if id == "P002"));
        assert_eq!(fs::read_to_string(&path).unwrap(), SEED);
    }

    #[test]
    fn invalid_create_does_not_touch_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, path) = test_service(temp_dir.path(), Some(SEED));

        let req = CreatePatientReq {
            gender: "robot".into(),
            ..request("P9")
        };
        let err = service.create_patient(req).unwrap_err();
        assert!(matches!(err, PatientError::Validation(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), SEED);
    }

    #[test]
    fn create_appends_after_existing_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, _) = test_service(temp_dir.path(), Some(SEED));

        service.create_patient(request("P004")).unwrap();
        let records = service.view_all().unwrap();
        let ids: Vec<&str> = records.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["P001", "P002", "P003", "P004"]);
    }

    #[test]
    fn sort_checks_arguments_before_reading_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, _) = test_service(temp_dir.path(), None);

        assert!(matches!(
            service.sort_patients("age", None),
            Err(PatientError::InvalidSortField(_))
        ));
        assert!(matches!(
            service.sort_patients("bmi", Some("up")),
            Err(PatientError::InvalidSortOrder(_))
        ));
        assert!(matches!(
            service.sort_patients("bmi", None),
            Err(PatientError::FileRead(_))
        ));
    }

    #[test]
    fn sort_defaults_to_ascending() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, _) = test_service(temp_dir.path(), Some(SEED));

        let views = service.sort_patients("height", None).unwrap();
        let heights: Vec<f64> = views.iter().map(PatientView::height).collect();
        assert_eq!(heights, vec![1.6, 1.65, 1.75]);
    }

    #[test]
    fn view_all_returns_stored_bodies_verbatim() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, _) = test_service(temp_dir.path(), Some(SEED));

        let records = service.view_all().unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.get("P001").unwrap().get("bmi").is_none());
        assert_eq!(records.get("P002").unwrap()["weight"], 85);
    }

    #[test]
    fn missing_file_is_storage_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let (service, _) = test_service(temp_dir.path(), None);

        let err = service.get_patient("P1").unwrap_err();
        assert!(err.is_storage());
    }
}
