// src/backend/models/simulation.rs
use candid::CandidType;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inputs of the retirement savings projection.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Validate)]
pub struct SimulationRequest {
    #[validate(range(min = 18, max = 100))]
    pub current_age: u32,
    #[validate(range(min = 18, max = 110))]
    pub retirement_age: u32,
    /// Age the projection runs to; defaults to 90.
    #[validate(range(min = 18, max = 120))]
    pub life_expectancy: Option<u32>,
    #[validate(range(min = 0.0))]
    pub current_savings: f64,
    #[validate(range(min = 0.0))]
    pub annual_contribution: f64,
    /// Yearly withdrawal once retired.
    #[validate(range(min = 0.0))]
    pub annual_withdrawal: f64,
    /// Nominal yearly return, e.g. 0.05 for 5 %.
    #[validate(range(min = -0.5, max = 0.5))]
    pub annual_return_rate: f64,
    #[validate(range(min = 0.0, max = 0.2))]
    pub inflation_rate: f64,
}

impl SimulationRequest {
    /// Name of the first amount or rate that is NaN or infinite. Range checks pass NaN through.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("current_savings", self.current_savings),
            ("annual_contribution", self.annual_contribution),
            ("annual_withdrawal", self.annual_withdrawal),
            ("annual_return_rate", self.annual_return_rate),
            ("inflation_rate", self.inflation_rate),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}

#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationPhase {
    Accumulation,
    Withdrawal,
}

/// Balance at the end of one projected year.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ProjectionYear {
    pub age: u32,
    pub phase: SimulationPhase,
    pub nominal_balance: f64,
    /// Nominal balance deflated to today's dollars.
    pub real_balance: f64,
    pub contributions_to_date: f64,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SimulationResult {
    pub years: Vec<ProjectionYear>,
    pub balance_at_retirement: f64,
    pub real_balance_at_retirement: f64,
    pub total_contributions: f64,
    /// First age at which the balance can no longer cover the withdrawal.
    pub depletion_age: Option<u32>,
}
