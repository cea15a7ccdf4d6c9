use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("{field} {reason}")]
    InvalidRange { field: &'static str, reason: String },

    #[error("annuity factor must be > 0, got {0}")]
    InvalidAnnuityFactor(f64),

    #[error("duplicate scenario key: {0}")]
    DuplicateScenario(String),
}

impl ProjectionError {
    pub(crate) fn range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            field,
            reason: reason.into(),
        }
    }
}
