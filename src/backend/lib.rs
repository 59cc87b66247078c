// src/backend/lib.rs

pub mod api;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

use crate::api::{ExportFile, ImportRequest};
use crate::error::PlannerError;
use crate::metrics::PlannerMetrics;
use crate::models::init::{InitArgs, PlannerConfig};
use crate::models::simulation::{SimulationRequest, SimulationResult};
use crate::services::stats::{EmergencyStats, PlanningStats};
use crate::services::PlanningSummary;

fn apply_init_args(args: Option<InitArgs>) {
    utils::console::init_console_logging();
    if let Err(e) = storage::init_config(&args.unwrap_or_default()) {
        tracing::error!(error = %e, "failed to persist configuration");
    }
    schedule_rng_seeding();
}

#[cfg(target_arch = "wasm32")]
fn schedule_rng_seeding() {
    ic_cdk_timers::set_timer(std::time::Duration::ZERO, || {
        ic_cdk::spawn(utils::rng::initialize_internal_rng());
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_rng_seeding() {}

#[ic_cdk::init]
fn init(args: Option<InitArgs>) {
    apply_init_args(args);
    ic_cdk::println!("Planner backend canister initialized.");
}

#[ic_cdk::post_upgrade]
fn post_upgrade(args: Option<InitArgs>) {
    apply_init_args(args);
    ic_cdk::println!("Planner backend canister upgraded.");
}

// Export Candid interface
ic_cdk::export_candid!();
