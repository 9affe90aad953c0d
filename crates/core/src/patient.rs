//! Patient record model.
//!
//! A [`Patient`] is only ever built through [`Patient::new`], which enforces every field
//! constraint. The stored form ([`PatientBody`]) carries no identifier and no derived values;
//! `bmi` and `verdict` are recomputed whenever a record is rendered ([`PatientView`]).

use crate::constants::{
    BMI_NORMAL_BELOW, BMI_OBESE_BELOW, BMI_OVERWEIGHT_BELOW, BMI_UNDERWEIGHT_BELOW, FIELD_BMI,
    FIELD_HEIGHT, FIELD_VERDICT, FIELD_WEIGHT, MAX_AGE_EXCLUSIVE, MIN_AGE_EXCLUSIVE,
    VALID_GENDERS,
};
use crate::error::{PatientError, PatientResult};
use crate::validation::{
    require_non_empty, require_one_of, require_open_range, require_positive, ValidationError,
};
use api_shared::CreatePatientReq;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "others" => Ok(Gender::Others),
            _ => Err(ValidationError::single(
                "gender",
                format!("must be one of {VALID_GENDERS:?}"),
            )),
        }
    }
}

/// BMI classification band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    /// Classifies an already rounded BMI.
    ///
    /// Returns `None` from 34.9 upwards: no band covers that range.
    pub fn from_bmi(bmi: f64) -> Option<Self> {
        if bmi < BMI_UNDERWEIGHT_BELOW {
            Some(Verdict::Underweight)
        } else if bmi < BMI_NORMAL_BELOW {
            Some(Verdict::Normal)
        } else if bmi < BMI_OVERWEIGHT_BELOW {
            Some(Verdict::Overweight)
        } else if bmi < BMI_OBESE_BELOW {
            Some(Verdict::Obese)
        } else {
            None
        }
    }
}

/// `round(weight / height^2, 2)`, with exact halves going to the even digit.
pub fn bmi(height: f64, weight: f64) -> f64 {
    let raw = weight / (height * height);
    (raw * 100.0).round_ties_even() / 100.0
}

/// Stored form of a record: everything except the id and the derived fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientBody {
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl PatientBody {
    pub fn bmi(&self) -> f64 {
        bmi(self.height, self.weight)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        Verdict::from_bmi(self.bmi())
    }
}

/// A validated patient record.
#[derive(Clone, Debug, PartialEq)]
pub struct Patient {
    id: String,
    body: PatientBody,
}

impl Patient {
    /// Validates a create payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every broken rule:
    /// - `id`, `name` or `city` empty or whitespace-only,
    /// - `age` not strictly between 0 and 120,
    /// - `gender` not one of `male`, `female`, `others`,
    /// - `height` or `weight` not greater than 0.
    pub fn new(req: CreatePatientReq) -> Result<Self, ValidationError> {
        let violations = [
            require_non_empty("id", &req.id),
            require_non_empty("name", &req.name),
            require_non_empty("city", &req.city),
            require_open_range("age", req.age, MIN_AGE_EXCLUSIVE, MAX_AGE_EXCLUSIVE),
            require_one_of("gender", &req.gender, &VALID_GENDERS),
            require_positive("height", req.height),
            require_positive("weight", req.weight),
        ]
        .into_iter()
        .flatten()
        .collect();
        ValidationError::check(violations)?;

        let gender = req.gender.parse::<Gender>()?;

        Ok(Self {
            id: req.id,
            body: PatientBody {
                name: req.name,
                city: req.city,
                age: req.age,
                gender,
                height: req.height,
                weight: req.weight,
            },
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn body(&self) -> &PatientBody {
        &self.body
    }

    pub fn bmi(&self) -> f64 {
        self.body.bmi()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.body.verdict()
    }

    pub fn into_parts(self) -> (String, PatientBody) {
        (self.id, self.body)
    }
}

/// A stored record rendered with its derived fields.
///
/// Built from the raw stored object so that whatever the file holds is passed through
/// unchanged; only `bmi` and `verdict` are (re)computed. Missing or non-numeric `height`
/// and `weight` count as 0, and a record without a positive height gets a BMI of 0.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatientView {
    #[serde(flatten)]
    fields: Map<String, Value>,
    bmi: f64,
    verdict: Option<Verdict>,
}

impl PatientView {
    pub fn from_stored(id: &str, body: &Value) -> PatientResult<Self> {
        let fields: Map<String, Value> = body
            .as_object()
            .ok_or_else(|| PatientError::MalformedRecord(id.to_string()))?
            .iter()
            .filter(|(key, _)| key.as_str() != FIELD_BMI && key.as_str() != FIELD_VERDICT)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let height = numeric_field(&fields, FIELD_HEIGHT);
        let weight = numeric_field(&fields, FIELD_WEIGHT);
        let bmi = if height > 0.0 { bmi(height, weight) } else { 0.0 };

        Ok(Self {
            fields,
            bmi,
            verdict: Verdict::from_bmi(bmi),
        })
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn height(&self) -> f64 {
        numeric_field(&self.fields, FIELD_HEIGHT)
    }

    pub fn weight(&self) -> f64 {
        numeric_field(&self.fields, FIELD_WEIGHT)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn numeric_field(fields: &Map<String, Value>, key: &str) -> f64 {
    fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}
