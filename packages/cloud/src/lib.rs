//! Grafana Cloud OnCall connector
//!
//! Verifies a cloud API token against the cloud info endpoint and records the
//! cloud URL returned on success.

pub mod api;
pub mod client;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use client::CloudConnector;
pub use error::{CloudError, CloudResult};
pub use storage::{CloudConnection, CloudConnectorStorage};
