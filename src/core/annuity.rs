use serde::Serialize;

use super::engine::check_annuity_factor;
use super::error::ProjectionError;

pub const MALE_ANNUITY_FACTOR: f64 = 205.0;
pub const FEMALE_ANNUITY_FACTOR: f64 = 215.0;
pub const MIN_ANNUITY_FACTOR: f64 = 1.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn annuity_factor(self) -> f64 {
        match self {
            Gender::Male => MALE_ANNUITY_FACTOR,
            Gender::Female => FEMALE_ANNUITY_FACTOR,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnnuityFactorChoice {
    Override(f64),
    Category(Gender),
}

pub fn resolve_annuity_factor(choice: AnnuityFactorChoice) -> Result<f64, ProjectionError> {
    match choice {
        AnnuityFactorChoice::Override(factor) => {
            check_annuity_factor(factor)?;
            Ok(factor)
        }
        AnnuityFactorChoice::Category(gender) => Ok(gender.annuity_factor()),
    }
}
