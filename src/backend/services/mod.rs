// src/backend/services/mod.rs

pub mod emergency_service;
pub mod planning_service;
pub mod simulation;
pub mod stats;

pub use emergency_service::EmergencyInfoService;
pub use planning_service::{PlanningSummary, UltimatePlanningService};
