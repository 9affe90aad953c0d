//! Read-only derivations over a loaded [`RecordStore`].

use crate::constants::{FIELD_BMI, FIELD_HEIGHT, FIELD_WEIGHT};
use crate::error::{PatientError, PatientResult};
use crate::patient::PatientView;
use crate::store::RecordStore;
use std::str::FromStr;

/// Field a patient list can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    fn key(&self, view: &PatientView) -> f64 {
        match self {
            SortField::Height => view.height(),
            SortField::Weight => view.weight(),
            SortField::Bmi => view.bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FIELD_HEIGHT => Ok(SortField::Height),
            FIELD_WEIGHT => Ok(SortField::Weight),
            FIELD_BMI => Ok(SortField::Bmi),
            other => Err(PatientError::InvalidSortField(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(PatientError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Looks up one record and renders it with its derived fields.
pub fn get_by_id(store: &RecordStore, id: &str) -> PatientResult<PatientView> {
    let body = store
        .get(id)
        .ok_or_else(|| PatientError::NotFound(id.to_string()))?;
    PatientView::from_stored(id, body)
}

/// All records ordered by `field`.
///
/// Stable in both directions: records with equal keys stay in store order.
pub fn sort(
    store: &RecordStore,
    field: SortField,
    order: SortOrder,
) -> PatientResult<Vec<PatientView>> {
    let mut views = store
        .iter()
        .map(|(id, body)| PatientView::from_stored(id, body))
        .collect::<PatientResult<Vec<_>>>()?;

    views.sort_by(|a, b| {
        let (ka, kb) = (field.key(a), field.key(b));
        match order {
            SortOrder::Asc => ka.total_cmp(&kb),
            SortOrder::Desc => kb.total_cmp(&ka),
        }
    });

    Ok(views)
}
