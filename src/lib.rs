pub mod aggregate;
pub mod application;
pub mod config;
pub mod engine;
pub mod error;
pub mod kra;
pub mod rank;
pub mod reporter;
pub mod scoring;
pub mod telemetry;
