pub mod config;
pub mod error;
pub mod greenstar;
pub mod telemetry;
