// src/backend/services/simulation.rs
//
// Retirement savings projection: yearly compounding with end-of-year contributions until
// retirement, then end-of-year withdrawals until life expectancy.

use validator::Validate;

use crate::error::PlannerError;
use crate::models::simulation::{ProjectionYear, SimulationPhase, SimulationRequest, SimulationResult};
use crate::utils::money::round_cents;

pub const DEFAULT_LIFE_EXPECTANCY: u32 = 90;

/// Closed-form future value of `present` plus `payment` deposited at the end of each of `years` years.
pub fn future_value(present: f64, payment: f64, rate: f64, years: u32) -> f64 {
    let n = f64::from(years);
    if rate == 0.0 {
        return present + payment * n;
    }
    let growth = (1.0 + rate).powf(n);
    present * growth + payment * (growth - 1.0) / rate
}

/// Runs the projection year by year.
///
/// # Arguments
/// * `request` - ages, amounts and rates; validated before use.
///
/// # Returns
/// * `Result<SimulationResult, PlannerError>` - one row per projected year plus headline figures.
///
/// # Errors
///
/// Returns `PlannerError::InvalidInput` when a field is out of range or not finite, or retirement comes
/// before the current age.
pub fn simulate_retirement(request: &SimulationRequest) -> Result<SimulationResult, PlannerError> {
    if let Some(field) = request.first_non_finite() {
        return Err(PlannerError::InvalidInput(format!("{} must be a finite number", field)));
    }
    request.validate()?;
    if request.retirement_age < request.current_age {
        return Err(PlannerError::InvalidInput(format!(
            "retirement age {} is before current age {}",
            request.retirement_age, request.current_age
        )));
    }

    let last_age = request
        .life_expectancy
        .unwrap_or(DEFAULT_LIFE_EXPECTANCY)
        .max(request.retirement_age);
    let growth = 1.0 + request.annual_return_rate;
    let deflator = 1.0 + request.inflation_rate;

    let mut balance = request.current_savings;
    let mut contributed = 0.0;
    let mut balance_at_retirement = request.current_savings;
    let mut real_balance_at_retirement = request.current_savings;
    let mut depletion_age = None;
    let mut years = Vec::with_capacity(last_age.saturating_sub(request.current_age) as usize);

    for (age, elapsed) in (request.current_age + 1..=last_age).zip(1u32..) {
        let phase = if age <= request.retirement_age {
            balance = balance * growth + request.annual_contribution;
            contributed += request.annual_contribution;
            SimulationPhase::Accumulation
        } else {
            balance *= growth;
            if depletion_age.is_none() && request.annual_withdrawal > 0.0 && balance < request.annual_withdrawal {
                depletion_age = Some(age);
            }
            balance = (balance - request.annual_withdrawal).max(0.0);
            SimulationPhase::Withdrawal
        };

        let real_balance = balance / deflator.powf(f64::from(elapsed));
        if age == request.retirement_age {
            balance_at_retirement = balance;
            real_balance_at_retirement = real_balance;
        }

        years.push(ProjectionYear {
            age,
            phase,
            nominal_balance: round_cents(balance),
            real_balance: round_cents(real_balance),
            contributions_to_date: round_cents(contributed),
        });
    }

    Ok(SimulationResult {
        years,
        balance_at_retirement: round_cents(balance_at_retirement),
        real_balance_at_retirement: round_cents(real_balance_at_retirement),
        total_contributions: round_cents(contributed),
        depletion_age,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SimulationRequest {
        SimulationRequest {
            current_age: 30,
            retirement_age: 65,
            life_expectancy: Some(90),
            current_savings: 10_000.0,
            annual_contribution: 5_000.0,
            annual_withdrawal: 0.0,
            annual_return_rate: 0.05,
            inflation_rate: 0.02,
        }
    }

    #[test]
    fn accumulation_matches_closed_form() {
        let result = simulate_retirement(&request()).unwrap();
        let expected = future_value(10_000.0, 5_000.0, 0.05, 35);
        assert!((result.balance_at_retirement - expected).abs() < 0.01);
        assert_eq!(result.total_contributions, 175_000.0);
        assert_eq!(result.years.len(), 60);
        assert_eq!(result.years[0].age, 31);
        assert_eq!(result.years[34].phase, SimulationPhase::Accumulation);
        assert_eq!(result.years[35].phase, SimulationPhase::Withdrawal);
        assert!(result.real_balance_at_retirement < result.balance_at_retirement);
    }

    #[test]
    fn zero_rate_is_linear() {
        assert_eq!(future_value(1_000.0, 100.0, 0.0, 10), 2_000.0);
        let req = SimulationRequest {
            annual_return_rate: 0.0,
            inflation_rate: 0.0,
            ..request()
        };
        let result = simulate_retirement(&req).unwrap();
        assert_eq!(result.balance_at_retirement, 185_000.0);
        assert_eq!(result.real_balance_at_retirement, 185_000.0);
    }

    #[test]
    fn withdrawals_report_depletion_age() {
        let req = SimulationRequest {
            current_age: 65,
            retirement_age: 65,
            life_expectancy: Some(90),
            current_savings: 100_000.0,
            annual_contribution: 0.0,
            annual_withdrawal: 30_000.0,
            annual_return_rate: 0.0,
            inflation_rate: 0.0,
        };
        let result = simulate_retirement(&req).unwrap();
        assert_eq!(result.balance_at_retirement, 100_000.0);
        assert_eq!(result.years[0].nominal_balance, 70_000.0);
        assert_eq!(result.years[2].nominal_balance, 10_000.0);
        assert_eq!(result.depletion_age, Some(69));
        assert_eq!(result.years.last().map(|y| y.nominal_balance), Some(0.0));
    }

    #[test]
    fn rejects_non_finite_amounts_and_rates() {
        let req = SimulationRequest { current_savings: f64::NAN, ..request() };
        assert_eq!(
            simulate_retirement(&req).unwrap_err(),
            PlannerError::InvalidInput("current_savings must be a finite number".to_string())
        );
        let req = SimulationRequest { annual_contribution: f64::INFINITY, ..request() };
        assert!(matches!(simulate_retirement(&req), Err(PlannerError::InvalidInput(_))));
        let req = SimulationRequest { inflation_rate: f64::NAN, ..request() };
        assert!(matches!(simulate_retirement(&req), Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn rejects_retirement_before_current_age() {
        let req = SimulationRequest { retirement_age: 25, ..request() };
        assert!(matches!(simulate_retirement(&req), Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        let req = SimulationRequest { annual_return_rate: 0.9, ..request() };
        assert!(matches!(simulate_retirement(&req), Err(PlannerError::InvalidInput(_))));
        let req = SimulationRequest { current_savings: -1.0, ..request() };
        assert!(simulate_retirement(&req).is_err());
    }
}
