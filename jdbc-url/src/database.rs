//! Database-name extraction from the URL path.

use tracing::debug;
use url::{Position, Url};

use crate::error::{InvalidUrlKind, JdbcUrlError, JdbcUrlResult};
use crate::parser::{find_standard_marker, require_jdbc_prefix};
use crate::vendor::AuthorityConvention;

/// Derive a standard URI from a `jdbc:<subscheme>://...` URL.
///
/// The `jdbc:` prefix is stripped up to the last `:` preceding the `://`
/// marker, so `jdbc:mysql://h:3306/db` becomes `mysql://h:3306/db`.
/// Only the `://` convention is supported here.
///
/// ```rust
/// use jdbc_url::derive_authority_uri;
///
/// let uri = derive_authority_uri("jdbc:mysql://localhost:3306/test").unwrap();
/// assert_eq!(uri.scheme(), "mysql");
/// assert_eq!(uri.host_str(), Some("localhost"));
/// assert_eq!(uri.port(), Some(3306));
/// assert_eq!(uri.path(), "/test");
/// ```
pub fn derive_authority_uri(url: &str) -> JdbcUrlResult<Url> {
    require_jdbc_prefix(url)?;
    let marker = find_standard_marker(url)?;

    let start = url[..marker].rfind(':').map_or(0, |sep| sep + 1);
    Url::parse(&url[start..]).map_err(|e| {
        debug!(error = %e, offset = start, "URI parser rejected JDBC remainder");
        JdbcUrlError::invalid_at(InvalidUrlKind::InvalidUri, url, start)
    })
}

/// Turn a URI path into a database name by stripping one leading `/`.
///
/// The path is taken as the [`Url`] holds it, so dot segments have already
/// been resolved by the URI parser. [`extract_database_name`] reads the
/// path from the JDBC URL text instead.
///
/// ```rust
/// use jdbc_url::path_to_database_name;
/// use jdbc_url::Url;
///
/// let uri = Url::parse("mysql://localhost:3306/test").unwrap();
/// assert_eq!(path_to_database_name(&uri).unwrap(), "test");
///
/// let uri = Url::parse("mysql://localhost:3306/").unwrap();
/// assert!(path_to_database_name(&uri).is_err());
/// ```
pub fn path_to_database_name(uri: &Url) -> JdbcUrlResult<String> {
    let offset = uri[..Position::BeforePath].len();
    name_from_path(uri.path(), uri.as_str(), offset)
}

/// Extract the database name from a JDBC URL.
///
/// The name is the path exactly as written between the authority and the
/// first `?` or `#`, minus one leading `/`. Dot segments are kept and
/// percent-escapes are not decoded, so `/my%20db` yields `my%20db`.
///
/// ```rust
/// use jdbc_url::extract_database_name;
///
/// assert_eq!(extract_database_name("jdbc:mysql://host:1234/db").unwrap(), "db");
/// assert_eq!(
///     extract_database_name("jdbc:postgresql://localhost/pokemon?ssl=false").unwrap(),
///     "pokemon"
/// );
/// ```
pub fn extract_database_name(url: &str) -> JdbcUrlResult<String> {
    require_jdbc_prefix(url)?;
    let authority_start = find_standard_marker(url)? + AuthorityConvention::Standard.marker().len();

    let remainder = &url[authority_start..];
    let path_start = remainder.find(['/', '?', '#']).unwrap_or(remainder.len());
    let after_authority = &remainder[path_start..];
    let path_len = after_authority.find(['?', '#']).unwrap_or(after_authority.len());

    let name = name_from_path(
        &after_authority[..path_len],
        url,
        authority_start + path_start,
    )?;
    debug!(database = %name, "Database name extracted");
    Ok(name)
}

fn name_from_path(path: &str, url: &str, offset: usize) -> JdbcUrlResult<String> {
    let name = path.strip_prefix('/').unwrap_or(path);
    // An empty first segment (`//db`) would leave a leading separator.
    if name.is_empty() || name.starts_with('/') {
        return Err(JdbcUrlError::invalid_at(
            InvalidUrlKind::EmptyDatabaseName,
            url,
            offset,
        ));
    }
    Ok(name.to_string())
}
