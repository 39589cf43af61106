pub mod config;
pub mod error;
pub mod listings;
pub mod profile;
pub mod telemetry;
