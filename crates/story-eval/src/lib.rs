pub mod config;
pub mod enrichment;
pub mod error;
pub mod evaluation;
pub mod telemetry;
