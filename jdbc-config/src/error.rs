//! Error types for harness configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use jdbc_url::JdbcUrlError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration or preparing a test database.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(jdbc::config::io_error))]
    IoError {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error.
    #[error("invalid configuration: {source}")]
    #[diagnostic(code(jdbc::config::toml_error))]
    TomlError {
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Environment variable not found.
    #[error("environment variable not found: {0}")]
    #[diagnostic(
        code(jdbc::config::env_not_found),
        help("set the variable or give a default with `${{VAR:-default}}`")
    )]
    EnvNotFound(String),

    /// Invalid environment variable reference or value.
    #[error("invalid environment variable '{name}': {message}")]
    #[diagnostic(code(jdbc::config::invalid_env))]
    InvalidEnvValue {
        /// Variable name.
        name: String,
        /// What was wrong.
        message: String,
    },

    /// A required setting is absent.
    #[error("missing required setting `{0}`")]
    #[diagnostic(code(jdbc::config::missing_field))]
    MissingField(&'static str),

    /// The configured JDBC URL was rejected.
    #[error("invalid database URL: {0}")]
    #[diagnostic(code(jdbc::config::url))]
    Url(#[from] JdbcUrlError),

    /// The container did not report a host port for the database port.
    #[error("container port {container_port} is not mapped to a host port")]
    #[diagnostic(
        code(jdbc::config::port_not_mapped),
        help("make sure the container exposes the database port before reading the URL")
    )]
    PortNotMapped {
        /// Database port inside the container.
        container_port: u16,
    },
}
