mod annuity;
mod engine;
mod error;
mod types;

pub use annuity::{
    AnnuityFactorChoice, FEMALE_ANNUITY_FACTOR, Gender, MALE_ANNUITY_FACTOR, MIN_ANNUITY_FACTOR,
    resolve_annuity_factor,
};
pub use engine::{monthly_all, monthly_annuity, project, project_all, project_trace, round_to_cents};
pub use error::ProjectionError;
pub use types::{
    CONTRIBUTION_RATE, FeeSchedule, MANAGEMENT_FEE, MonthlyOutcome, MonthlyResult,
    ProjectionParameters, ProjectionResult, ProjectionYear, Scenario, ScenarioOutcome,
    ScenarioSet,
};
