// ABOUTME: Core types and utilities for the OnCall engine
// ABOUTME: Engine URL building, phone number validation, and environment configuration

pub mod config;
pub mod constants;
pub mod phone;
pub mod urls;

// Re-export main types
pub use config::{ConfigError, EngineConfig};
pub use constants::{default_database_path, oncall_dir};
pub use phone::{PhoneNumber, PhoneNumberError};
pub use urls::{engine_url, UrlError};
