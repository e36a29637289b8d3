//! Shared errors and configuration for LedgerLab.
//!
//! This crate provides what every other crate needs:
//! - Application-wide error types
//! - Layered configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, LoggingConfig, ReportsConfig};
pub use error::{AppError, AppResult};
