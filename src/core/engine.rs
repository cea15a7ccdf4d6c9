use log::debug;

use super::error::ProjectionError;
use super::types::{
    FeeSchedule, MONTHS_PER_YEAR, MonthlyOutcome, MonthlyResult, ProjectionParameters,
    ProjectionResult, ProjectionYear, ScenarioOutcome, ScenarioSet,
};

#[derive(Debug, Clone, Copy)]
struct YearStep {
    grown: f64,
    contribution: f64,
}

impl YearStep {
    fn closing(self) -> f64 {
        self.grown + self.contribution
    }
}

pub fn project(params: &ProjectionParameters, annual_return: f64, fees: FeeSchedule) -> f64 {
    let delay = params.start_delay();
    let mut balance = params.current_balance;
    for year in 0..params.total_years {
        balance = advance_year(params, balance, year, delay, annual_return, fees).closing();
    }
    balance
}

pub fn project_all(
    params: &ProjectionParameters,
    scenarios: &ScenarioSet,
    fees: FeeSchedule,
) -> ProjectionResult {
    let outcomes = scenarios
        .iter()
        .map(|scenario| {
            let final_balance = round_to_cents(project(params, scenario.rate, fees));
            debug!(
                "scenario {} at {:.4}: final balance {final_balance:.2}",
                scenario.key, scenario.rate
            );
            ScenarioOutcome {
                key: scenario.key.clone(),
                rate: scenario.rate,
                final_balance,
            }
        })
        .collect();
    ProjectionResult { outcomes }
}

/// Year-by-year breakdown of [`project`]. The last closing balance equals `project` exactly.
pub fn project_trace(
    params: &ProjectionParameters,
    annual_return: f64,
    fees: FeeSchedule,
) -> Vec<ProjectionYear> {
    let delay = params.start_delay();
    let mut balance = params.current_balance;
    let mut years = Vec::with_capacity(params.total_years as usize);
    for year in 0..params.total_years {
        let step = advance_year(params, balance, year, delay, annual_return, fees);
        let closing = step.closing();
        years.push(ProjectionYear {
            year,
            opening_balance: balance,
            growth: step.grown - balance,
            contribution: step.contribution,
            closing_balance: closing,
        });
        balance = closing;
    }
    years
}

pub fn monthly_annuity(final_balance: f64, annuity_factor: f64) -> Result<f64, ProjectionError> {
    check_annuity_factor(annuity_factor)?;
    Ok(round_to_cents(final_balance / annuity_factor))
}

pub fn monthly_all(
    result: &ProjectionResult,
    annuity_factor: f64,
) -> Result<MonthlyResult, ProjectionError> {
    check_annuity_factor(annuity_factor)?;
    let outcomes = result
        .iter()
        .map(|outcome| MonthlyOutcome {
            key: outcome.key.clone(),
            monthly_amount: round_to_cents(outcome.final_balance / annuity_factor),
        })
        .collect();
    Ok(MonthlyResult { outcomes })
}

// Decimal-correct, ties to the even cent on the exact binary value.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

pub(crate) fn check_annuity_factor(annuity_factor: f64) -> Result<(), ProjectionError> {
    if annuity_factor.is_finite() && annuity_factor > 0.0 {
        Ok(())
    } else {
        Err(ProjectionError::InvalidAnnuityFactor(annuity_factor))
    }
}

fn advance_year(
    params: &ProjectionParameters,
    balance: f64,
    year: u32,
    delay: u32,
    annual_return: f64,
    fees: FeeSchedule,
) -> YearStep {
    let contribution = if year >= delay {
        params.gross_monthly_salary * MONTHS_PER_YEAR * fees.contribution_rate
    } else {
        0.0
    };
    YearStep {
        grown: balance * (1.0 + annual_return - fees.management_fee),
        contribution,
    }
}
