//! Validated JDBC connection URL.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::database::extract_database_name;
use crate::error::JdbcUrlResult;
use crate::parser::{classify, convention, locate_authority_separator};
use crate::port::{port, replace_port};
use crate::vendor::{AuthorityConvention, Vendor};

/// A JDBC URL whose prefix, sub-scheme and authority marker have been checked.
///
/// # Examples
///
/// ```rust
/// use jdbc_url::{JdbcUrl, Vendor};
///
/// let url = JdbcUrl::parse("jdbc:mysql://localhost:3306/test").unwrap();
/// assert_eq!(url.vendor(), &Vendor::MySql);
/// assert_eq!(url.authority_offset(), 10);
/// assert_eq!(url.database_name().unwrap(), "test");
/// assert_eq!(url.port().unwrap(), Some(3306));
///
/// let mapped = url.with_port(49160).unwrap();
/// assert_eq!(mapped.as_str(), "jdbc:mysql://localhost:49160/test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JdbcUrl {
    original: String,
    vendor: Vendor,
    convention: AuthorityConvention,
    authority_offset: usize,
}

impl JdbcUrl {
    /// Parse and validate a JDBC URL.
    pub fn parse(url: &str) -> JdbcUrlResult<Self> {
        debug!(url_len = url.len(), "JdbcUrl::parse()");
        let vendor = classify(url)?;
        let convention = convention(url)?;
        let authority_offset = locate_authority_separator(url)?;
        debug!(vendor = %vendor, marker = convention.marker(), authority_offset, "JDBC URL parsed");
        Ok(Self {
            original: url.to_string(),
            vendor,
            convention,
            authority_offset,
        })
    }

    /// Get the original URL string.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Get the database vendor.
    pub fn vendor(&self) -> &Vendor {
        &self.vendor
    }

    /// Get the authority convention.
    pub fn convention(&self) -> AuthorityConvention {
        self.convention
    }

    /// Byte offset of the authority marker.
    pub fn authority_offset(&self) -> usize {
        self.authority_offset
    }

    /// Get the database name from the URL path.
    pub fn database_name(&self) -> JdbcUrlResult<String> {
        extract_database_name(&self.original)
    }

    /// Get the explicit port, if any.
    pub fn port(&self) -> JdbcUrlResult<Option<u16>> {
        port(&self.original)
    }

    /// Get the explicit port or the vendor default.
    pub fn port_or_default(&self) -> JdbcUrlResult<Option<u16>> {
        Ok(self.port()?.or_else(|| self.vendor.default_port()))
    }

    /// Build a new URL with the port replaced.
    pub fn with_port(&self, new_port: u16) -> JdbcUrlResult<Self> {
        let rewritten = replace_port(&self.original, new_port)?;
        Ok(Self {
            original: rewritten,
            vendor: self.vendor.clone(),
            convention: self.convention,
            authority_offset: self.authority_offset,
        })
    }

    /// Consume the wrapper and return the URL string.
    pub fn into_string(self) -> String {
        self.original
    }
}

impl FromStr for JdbcUrl {
    type Err = crate::error::JdbcUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for JdbcUrl {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for JdbcUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
