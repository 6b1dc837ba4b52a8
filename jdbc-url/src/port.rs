//! Reading and rewriting the port of a `://` JDBC URL.

use std::ops::Range;

use tracing::debug;

use crate::error::{InvalidUrlKind, JdbcUrlError, JdbcUrlResult};
use crate::parser::{convention, find_standard_marker};
use crate::vendor::AuthorityConvention;

/// Replace the explicit port of a JDBC URL.
///
/// Everything except the port digits is copied byte for byte. The URL must
/// already carry a port in a `host:port/path` segment; no port is ever
/// inserted. Oracle `:@` URLs are rejected as unsupported.
///
/// ```rust
/// use jdbc_url::replace_port;
///
/// assert_eq!(
///     replace_port("jdbc:mysql://localhost:3306/test", 54321).unwrap(),
///     "jdbc:mysql://localhost:54321/test"
/// );
/// assert!(replace_port("jdbc:mysql://localhost/test", 54321).is_err());
/// ```
pub fn replace_port(url: &str, new_port: u16) -> JdbcUrlResult<String> {
    let Some(range) = locate_port(url, "replace_port")? else {
        let offset = find_standard_marker(url)? + AuthorityConvention::Standard.marker().len();
        return Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::UnparseableHostPort,
            url,
            offset,
        ));
    };

    let mut rewritten = String::with_capacity(url.len() + 5);
    rewritten.push_str(&url[..range.start]);
    rewritten.push_str(&new_port.to_string());
    rewritten.push_str(&url[range.end..]);

    debug!(
        old_port = &url[range.clone()],
        new_port,
        "JDBC URL port replaced"
    );
    Ok(rewritten)
}

/// Read the explicit port of a JDBC URL, if it has one.
///
/// Uses the same segment rules as [`replace_port`]: the host segment must be
/// terminated by `/`, and a URL without a port yields `Ok(None)`.
///
/// ```rust
/// use jdbc_url::port;
///
/// assert_eq!(port("jdbc:postgresql://db:5432/app").unwrap(), Some(5432));
/// assert_eq!(port("jdbc:postgresql://db/app").unwrap(), None);
/// ```
pub fn port(url: &str) -> JdbcUrlResult<Option<u16>> {
    let Some(range) = locate_port(url, "port")? else {
        return Ok(None);
    };
    url[range.clone()]
        .parse()
        .map(Some)
        .map_err(|_| JdbcUrlError::invalid_at(InvalidUrlKind::UnparseableHostPort, url, range.start))
}

/// Byte range of the port digits, or `None` if the host carries no port.
fn locate_port(url: &str, operation: &'static str) -> JdbcUrlResult<Option<Range<usize>>> {
    let convention = convention(url)?;
    if convention != AuthorityConvention::Standard {
        return Err(JdbcUrlError::unsupported(operation, convention, url));
    }

    let authority_start = find_standard_marker(url)? + convention.marker().len();
    let unparseable = || {
        JdbcUrlError::invalid_at(InvalidUrlKind::UnparseableHostPort, url, authority_start)
    };

    let segment_len = url[authority_start..].find('/').ok_or_else(unparseable)?;
    let segment = &url[authority_start..authority_start + segment_len];

    // Skip `user[:password]@` so a colon in the credentials is not taken for the port.
    let host_start = segment.rfind('@').map_or(0, |at| at + 1);
    let host = &segment[host_start..];

    // Colons inside a bracketed IPv6 literal belong to the address.
    let search_from = if host.starts_with('[') {
        host.find(']').ok_or_else(unparseable)? + 1
    } else {
        0
    };

    let Some(colon) = host[search_from..].find(':') else {
        return Ok(None);
    };

    let start = authority_start + host_start + search_from + colon + 1;
    let end = authority_start + segment_len;
    let digits = &url[start..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::UnparseableHostPort,
            url,
            start,
        ));
    }

    Ok(Some(start..end))
}
