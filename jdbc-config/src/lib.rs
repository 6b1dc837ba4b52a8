//! # jdbc-config
//!
//! Test-harness configuration for containerized databases.
//!
//! - `harness.toml` loading with `${VAR}` expansion and per-environment overrides
//! - Database-name extraction for the container configuration
//! - Rewriting the configured URL to the port the container published
//!
//! ## Example
//!
//! ```toml
//! [database]
//! url = "${DATABASE_URL:-jdbc:mysql://localhost:3306/test}"
//! username = "test"
//! password = "${DB_PASSWORD:-changeit}"
//!
//! [container]
//! image = "mysql:8.0"
//!
//! [environments.ci.database]
//! url = "jdbc:postgresql://localhost:5432/ci"
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod env;
pub mod error;
pub mod setup;

pub use config::{ContainerConfig, DatabaseConfig, EnvironmentOverride, HarnessConfig, PROFILE_VAR};
pub use env::{EnvExpander, EnvSource, MapEnvSource, StdEnvSource};
pub use error::{ConfigError, ConfigResult};
pub use setup::{ContainerSettings, MappedPort, PersistenceSettings, TestDatabase};
