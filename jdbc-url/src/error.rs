//! Error types for JDBC URL operations.
//!
//! Every failure is a permanent validation error: the operations in this
//! crate never perform I/O, so retrying with the same input always fails
//! the same way.
//!
//! ```rust
//! use jdbc_url::{InvalidUrlKind, JdbcUrlError, extract_database_name};
//!
//! let err = extract_database_name("jdbc:mysql://localhost:3306/").unwrap_err();
//! assert_eq!(err.invalid_kind(), Some(InvalidUrlKind::EmptyDatabaseName));
//! assert!(err.to_string().contains("empty database name"));
//! ```

use std::fmt;

use thiserror::Error;

use crate::vendor::AuthorityConvention;

/// Result type for JDBC URL operations.
pub type JdbcUrlResult<T> = Result<T, JdbcUrlError>;

/// The specific way a URL failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidUrlKind {
    /// The URL does not start with `jdbc:`.
    MalformedScheme,
    /// Nothing follows the `jdbc:` prefix, or the sub-scheme token is empty.
    MissingSubScheme,
    /// The vendor's authority marker (`://` or `:@`) does not occur.
    MissingAuthoritySeparator,
    /// The authority marker sits at offset 0 with no scheme before it.
    EmptySegmentBeforeMarker,
    /// The path component is empty once the leading `/` is stripped.
    EmptyDatabaseName,
    /// The host segment is not shaped like `host:port/path`.
    UnparseableHostPort,
    /// The remainder after the sub-scheme was rejected by the URI parser.
    InvalidUri,
}

impl InvalidUrlKind {
    /// Short human-readable description of the failure.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedScheme => "malformed scheme, expected 'jdbc:' prefix",
            Self::MissingSubScheme => "missing sub-scheme after 'jdbc:'",
            Self::MissingAuthoritySeparator => "missing authority separator",
            Self::EmptySegmentBeforeMarker => "empty segment before authority separator",
            Self::EmptyDatabaseName => "empty database name",
            Self::UnparseableHostPort => "unparseable host/port segment",
            Self::InvalidUri => "remainder is not a valid URI",
        }
    }
}

impl fmt::Display for InvalidUrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while classifying or rewriting a JDBC URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JdbcUrlError {
    /// The URL is malformed for the requested operation.
    #[error("Invalid JDBC URL '{url}': {kind}{}", fmt_position(.position))]
    InvalidUrl {
        /// What was wrong with the URL.
        kind: InvalidUrlKind,
        /// The offending input.
        url: String,
        /// Byte offset the failure refers to, when one exists.
        position: Option<usize>,
    },

    /// The operation is not defined for the URL's authority convention.
    #[error("Unsupported operation '{operation}' for '{convention}' URL '{url}'")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Convention the URL uses.
        convention: AuthorityConvention,
        /// The offending input.
        url: String,
    },
}

impl JdbcUrlError {
    /// Create an invalid-URL error without a position.
    pub fn invalid(kind: InvalidUrlKind, url: impl Into<String>) -> Self {
        Self::InvalidUrl {
            kind,
            url: url.into(),
            position: None,
        }
    }

    /// Create an invalid-URL error pointing at a byte offset.
    pub fn invalid_at(kind: InvalidUrlKind, url: impl Into<String>, position: usize) -> Self {
        Self::InvalidUrl {
            kind,
            url: url.into(),
            position: Some(position),
        }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(
        operation: &'static str,
        convention: AuthorityConvention,
        url: impl Into<String>,
    ) -> Self {
        Self::Unsupported {
            operation,
            convention,
            url: url.into(),
        }
    }

    /// The validation kind, if this is an invalid-URL error.
    pub fn invalid_kind(&self) -> Option<InvalidUrlKind> {
        match self {
            Self::InvalidUrl { kind, .. } => Some(*kind),
            Self::Unsupported { .. } => None,
        }
    }

    /// Check if this is an invalid-URL error.
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. })
    }

    /// Check if this is an unsupported-operation error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// The URL that caused the error.
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. } | Self::Unsupported { url, .. } => url,
        }
    }
}

fn fmt_position(position: &Option<usize>) -> String {
    match position {
        Some(pos) => format!(" (at offset {})", pos),
        None => String::new(),
    }
}
