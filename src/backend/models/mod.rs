pub mod backup;
pub mod common;
pub mod emergency_info;
pub mod init;
pub mod record;
pub mod simulation;
pub mod ultimate_planning;

// Re-export common types/enums for easier access
pub use common::*;
pub use emergency_info::EmergencyInfo;
pub use record::PlanRecord;
pub use ultimate_planning::UltimatePlanningData;
