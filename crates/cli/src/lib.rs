// Library interface for ezballot
// This exposes the host modules for testing and external use

pub mod cli;
pub mod config;
pub mod report;
pub mod scenario;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use report::Report;
pub use scenario::{Scenario, ScenarioRunner};
