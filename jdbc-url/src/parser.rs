//! Sub-scheme classification and authority-separator lookup.

use tracing::trace;

use crate::error::{InvalidUrlKind, JdbcUrlError, JdbcUrlResult};
use crate::vendor::{AuthorityConvention, Vendor};

/// Literal prefix every JDBC URL starts with.
pub const JDBC_PREFIX: &str = "jdbc:";

/// Fail with [`InvalidUrlKind::MalformedScheme`] unless `url` starts with `jdbc:`.
pub(crate) fn require_jdbc_prefix(url: &str) -> JdbcUrlResult<()> {
    if url.starts_with(JDBC_PREFIX) {
        Ok(())
    } else {
        Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::MalformedScheme,
            url,
            0,
        ))
    }
}

/// Extract the vendor sub-scheme token, e.g. `mysql` from `jdbc:mysql://h/db`.
///
/// The token is everything between `jdbc:` and the next `:`.
///
/// ```rust
/// use jdbc_url::subscheme;
///
/// assert_eq!(subscheme("jdbc:oracle:thin:@db:1521/xe").unwrap(), "oracle");
/// assert!(subscheme("jdbc:").is_err());
/// ```
pub fn subscheme(url: &str) -> JdbcUrlResult<&str> {
    require_jdbc_prefix(url)?;
    let start = JDBC_PREFIX.len();
    let rest = &url[start..];

    match rest.find(':') {
        Some(0) => Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::MissingSubScheme,
            url,
            start,
        )),
        Some(end) => Ok(&rest[..end]),
        None if rest.is_empty() => Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::MissingSubScheme,
            url,
            start,
        )),
        None => Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::MissingAuthoritySeparator,
            url,
            url.len(),
        )),
    }
}

/// Classify a JDBC URL by database vendor.
///
/// ```rust
/// use jdbc_url::{Vendor, classify};
///
/// assert_eq!(classify("jdbc:mysql://localhost:3306/test").unwrap(), Vendor::MySql);
/// assert_eq!(classify("jdbc:oracle:thin:@db:1521/xe").unwrap(), Vendor::Oracle);
/// ```
pub fn classify(url: &str) -> JdbcUrlResult<Vendor> {
    subscheme(url).map(Vendor::from_subscheme)
}

/// Authority convention of a JDBC URL, chosen by its exact sub-scheme token.
///
/// ```rust
/// use jdbc_url::{AuthorityConvention, convention};
///
/// assert_eq!(convention("jdbc:oracle:thin:@db:1521/xe").unwrap(), AuthorityConvention::AtSign);
/// assert_eq!(convention("jdbc:ORACLE://db:1521/xe").unwrap(), AuthorityConvention::Standard);
/// ```
pub fn convention(url: &str) -> JdbcUrlResult<AuthorityConvention> {
    subscheme(url).map(AuthorityConvention::for_subscheme)
}

/// Locate the first byte of the authority marker in a JDBC URL.
///
/// URLs whose sub-scheme is exactly `oracle` are searched for `:@`, every
/// other sub-scheme for `://`. The first occurrence in the string wins.
///
/// ```rust
/// use jdbc_url::locate_authority_separator;
///
/// assert_eq!(locate_authority_separator("jdbc:mysql://host:1234/db").unwrap(), 10);
/// assert_eq!(locate_authority_separator("jdbc:oracle:thin:@host:1521/db").unwrap(), 16);
/// ```
pub fn locate_authority_separator(url: &str) -> JdbcUrlResult<usize> {
    let convention = convention(url)?;
    let offset = find_marker(url, convention)?;
    trace!(marker = convention.marker(), offset, "Authority separator located");
    Ok(offset)
}

/// Find the `://` marker for operations only defined on the standard convention.
pub(crate) fn find_standard_marker(url: &str) -> JdbcUrlResult<usize> {
    let offset = find_marker(url, AuthorityConvention::Standard)?;
    if offset == 0 {
        return Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::EmptySegmentBeforeMarker,
            url,
            0,
        ));
    }
    Ok(offset)
}

fn find_marker(url: &str, convention: AuthorityConvention) -> JdbcUrlResult<usize> {
    url.find(convention.marker()).ok_or_else(|| {
        JdbcUrlError::invalid_at(InvalidUrlKind::MissingAuthoritySeparator, url, url.len())
    })
}
