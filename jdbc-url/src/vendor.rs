//! Database vendor classification by JDBC sub-scheme.

use std::fmt;

/// How the authority (host and port) is introduced inside a JDBC URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorityConvention {
    /// `jdbc:<subscheme>://host[:port]/path`
    Standard,
    /// `jdbc:oracle:<type>:@host[:port](/service|:sid)`
    AtSign,
}

impl AuthorityConvention {
    /// Pick the convention for a raw sub-scheme token.
    ///
    /// The `:@` form is reserved for the exact token `oracle`; any other
    /// spelling, including `ORACLE`, uses `://`.
    ///
    /// ```rust
    /// use jdbc_url::AuthorityConvention;
    ///
    /// assert_eq!(AuthorityConvention::for_subscheme("oracle"), AuthorityConvention::AtSign);
    /// assert_eq!(AuthorityConvention::for_subscheme("Oracle"), AuthorityConvention::Standard);
    /// ```
    pub fn for_subscheme(token: &str) -> Self {
        if token == "oracle" {
            Self::AtSign
        } else {
            Self::Standard
        }
    }

    /// The literal marker that precedes the host.
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Standard => "://",
            Self::AtSign => ":@",
        }
    }
}

impl fmt::Display for AuthorityConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Database vendor identified from the sub-scheme token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// MySQL
    MySql,
    /// MariaDB
    MariaDb,
    /// PostgreSQL
    Postgres,
    /// Oracle Database
    Oracle,
    /// Microsoft SQL Server
    SqlServer,
    /// H2 (server mode)
    H2,
    /// IBM Db2
    Db2,
    /// Apache Derby (network server)
    Derby,
    /// Any other sub-scheme, lowercased.
    Other(String),
}

impl Vendor {
    /// Classify a sub-scheme token such as `mysql` or `oracle`.
    ///
    /// Matching is case-insensitive; unknown tokens are kept as [`Vendor::Other`].
    /// The vendor only labels the URL: the authority marker comes from
    /// [`AuthorityConvention::for_subscheme`].
    ///
    /// ```rust
    /// use jdbc_url::Vendor;
    ///
    /// assert_eq!(Vendor::from_subscheme("postgresql"), Vendor::Postgres);
    /// assert_eq!(Vendor::from_subscheme("ORACLE"), Vendor::Oracle);
    /// assert_eq!(Vendor::from_subscheme("hsqldb"), Vendor::Other("hsqldb".into()));
    /// ```
    pub fn from_subscheme(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "mysql" => Self::MySql,
            "mariadb" => Self::MariaDb,
            "postgresql" | "postgres" => Self::Postgres,
            "oracle" => Self::Oracle,
            "sqlserver" => Self::SqlServer,
            "h2" => Self::H2,
            "db2" => Self::Db2,
            "derby" => Self::Derby,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the vendor name.
    pub fn name(&self) -> &str {
        match self {
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Postgres => "postgresql",
            Self::Oracle => "oracle",
            Self::SqlServer => "sqlserver",
            Self::H2 => "h2",
            Self::Db2 => "db2",
            Self::Derby => "derby",
            Self::Other(name) => name,
        }
    }

    /// Get the default listener port for this vendor.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySql | Self::MariaDb => Some(3306),
            Self::Postgres => Some(5432),
            Self::Oracle => Some(1521),
            Self::SqlServer => Some(1433),
            Self::H2 => Some(9092),
            Self::Db2 => Some(50000),
            Self::Derby => Some(1527),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
