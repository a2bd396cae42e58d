pub mod config;
pub mod error;
pub mod mentor;
pub mod telemetry;
