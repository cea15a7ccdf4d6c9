use serde::Serialize;

use super::error::ProjectionError;

pub const MANAGEMENT_FEE: f64 = 0.007;
pub const CONTRIBUTION_RATE: f64 = 0.18;
pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    pub total_years: u32,
    pub contributing_years: u32,
    pub current_balance: f64,
    pub gross_monthly_salary: f64,
}

impl ProjectionParameters {
    pub fn new(
        total_years: u32,
        contributing_years: u32,
        current_balance: f64,
        gross_monthly_salary: f64,
    ) -> Result<Self, ProjectionError> {
        if total_years == 0 {
            return Err(ProjectionError::range("total_years", "must be >= 1"));
        }
        if contributing_years > total_years {
            return Err(ProjectionError::range(
                "contributing_years",
                format!("must be <= total_years ({total_years})"),
            ));
        }
        if !current_balance.is_finite() || current_balance < 0.0 {
            return Err(ProjectionError::range("current_balance", "must be >= 0"));
        }
        if !gross_monthly_salary.is_finite() || gross_monthly_salary < 0.0 {
            return Err(ProjectionError::range(
                "gross_monthly_salary",
                "must be >= 0",
            ));
        }

        Ok(Self {
            total_years,
            contributing_years,
            current_balance,
            gross_monthly_salary,
        })
    }

    pub fn start_delay(&self) -> u32 {
        self.total_years.saturating_sub(self.contributing_years)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    pub management_fee: f64,
    pub contribution_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            management_fee: MANAGEMENT_FEE,
            contribution_rate: CONTRIBUTION_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub key: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub const VERY_OPTIMISTIC: &'static str = "very-optimistic";
    pub const OPTIMISTIC: &'static str = "optimistic";
    pub const REALISTIC: &'static str = "realistic";
    pub const CONSERVATIVE: &'static str = "conservative";
    pub const MINIMUM: &'static str = "minimum";

    pub fn standard() -> Self {
        let scenarios = [
            (Self::VERY_OPTIMISTIC, 0.10),
            (Self::OPTIMISTIC, 0.07),
            (Self::REALISTIC, 0.06),
            (Self::CONSERVATIVE, 0.04),
            (Self::MINIMUM, 0.03),
        ]
        .into_iter()
        .map(|(key, rate)| Scenario {
            key: key.to_string(),
            rate,
        })
        .collect();
        Self { scenarios }
    }

    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, ProjectionError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut scenarios: Vec<Scenario> = Vec::new();
        for (key, rate) in pairs {
            let key = key.into();
            if scenarios.iter().any(|s| s.key == key) {
                return Err(ProjectionError::DuplicateScenario(key));
            }
            scenarios.push(Scenario { key, rate });
        }
        Ok(Self { scenarios })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub key: String,
    pub rate: f64,
    pub final_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectionResult {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl ProjectionResult {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.final_balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOutcome {
    pub key: String,
    pub monthly_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlyResult {
    pub outcomes: Vec<MonthlyOutcome>,
}

impl MonthlyResult {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.monthly_amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionYear {
    pub year: u32,
    pub opening_balance: f64,
    pub growth: f64,
    pub contribution: f64,
    pub closing_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_reject_contributing_years_beyond_total() {
        let err = ProjectionParameters::new(10, 11, 0.0, 0.0).expect_err("must reject");
        assert!(matches!(
            err,
            ProjectionError::InvalidRange {
                field: "contributing_years",
                ..
            }
        ));
    }

    #[test]
    fn parameters_reject_zero_years_and_negative_money() {
        assert!(ProjectionParameters::new(0, 0, 0.0, 0.0).is_err());
        assert!(ProjectionParameters::new(5, 5, -1.0, 0.0).is_err());
        assert!(ProjectionParameters::new(5, 5, 0.0, -0.01).is_err());
        assert!(ProjectionParameters::new(5, 5, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn start_delay_is_years_without_contributions() {
        let params = ProjectionParameters::new(41, 39, 27_500.0, 18_000.0).expect("valid");
        assert_eq!(params.start_delay(), 2);
        let params = ProjectionParameters::new(41, 0, 27_500.0, 18_000.0).expect("valid");
        assert_eq!(params.start_delay(), 41);
    }

    #[test]
    fn standard_scenarios_are_fixed_and_ordered() {
        let set = ScenarioSet::standard();
        let pairs = set
            .iter()
            .map(|s| (s.key.as_str(), s.rate))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("very-optimistic", 0.10),
                ("optimistic", 0.07),
                ("realistic", 0.06),
                ("conservative", 0.04),
                ("minimum", 0.03),
            ]
        );
    }

    #[test]
    fn scenario_set_rejects_duplicate_keys() {
        let err = ScenarioSet::from_pairs([("a", 0.01), ("a", 0.02)]).expect_err("duplicate");
        assert_eq!(err, ProjectionError::DuplicateScenario("a".to_string()));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ProjectionParameters::new(3, 4, 0.0, 0.0).expect_err("must reject");
        assert_eq!(err.to_string(), "contributing_years must be <= total_years (3)");
    }
}
