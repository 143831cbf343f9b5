pub mod contracts;
pub mod health;

pub use contracts::analyze_contract;
pub use health::{health_check, metrics_endpoint, readiness_check};
