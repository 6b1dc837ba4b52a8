//! Wiring a configured JDBC URL to a dynamically mapped test container.
//!
//! The container itself is an external collaborator; this module only needs
//! it to report which host port a container port was published on.
//!
//! ```rust
//! use std::collections::HashMap;
//! use jdbc_config::{HarnessConfig, MapEnvSource, TestDatabase};
//!
//! let config = HarnessConfig::from_toml_with_source(
//!     r#"
//!         [database]
//!         url = "jdbc:mysql://localhost:3306/pokemon"
//!         username = "test"
//!     "#,
//!     MapEnvSource::new(),
//! )
//! .unwrap();
//!
//! let db = TestDatabase::from_config(&config).unwrap();
//! assert_eq!(db.container_settings().database_name, "pokemon");
//!
//! // What the started container reports for its published ports.
//! let ports: HashMap<u16, u16> = HashMap::from([(3306, 49153)]);
//! let persistence = db.persistence_settings(&ports).unwrap();
//! assert_eq!(persistence.url, "jdbc:mysql://localhost:49153/pokemon");
//! ```

use std::collections::HashMap;

use jdbc_url::{AuthorityConvention, JdbcUrl, JdbcUrlError, Vendor, logging};
use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::error::{ConfigError, ConfigResult};

/// A started container that can report its published ports.
pub trait MappedPort {
    /// Host port the given container port is published on.
    fn mapped_port(&self, container_port: u16) -> Option<u16>;
}

impl MappedPort for HashMap<u16, u16> {
    fn mapped_port(&self, container_port: u16) -> Option<u16> {
        self.get(&container_port).copied()
    }
}

/// Settings handed to the container configuration before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSettings {
    /// Database vendor.
    pub vendor: Vendor,
    /// Container image, if configured.
    pub image: Option<String>,
    /// Database (schema) to create.
    pub database_name: String,
    /// Database user.
    pub username: Option<String>,
    /// Database password.
    pub password: Option<String>,
    /// Port the database listens on inside the container.
    pub container_port: u16,
}

/// Settings handed to the persistence provider once the container is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceSettings {
    /// JDBC URL pointing at the mapped host port.
    pub url: String,
    /// Database user.
    pub username: Option<String>,
    /// Database password.
    pub password: Option<String>,
}

/// A test database derived from harness configuration.
#[derive(Debug, Clone)]
pub struct TestDatabase {
    url: JdbcUrl,
    database_name: String,
    container_port: u16,
    image: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl TestDatabase {
    /// Validate the configured URL and resolve the container port.
    ///
    /// This is the harness entry point, so it also installs the
    /// `JDBC_HARNESS_*` log subscriber (see [`jdbc_url::logging`]).
    ///
    /// Only `://` URLs are supported; an Oracle `:@` URL yields
    /// [`JdbcUrlError::Unsupported`].
    pub fn from_config(config: &HarnessConfig) -> ConfigResult<Self> {
        logging::init();

        let url = JdbcUrl::parse(config.database_url()?)?;
        if url.convention() != AuthorityConvention::Standard {
            let err = JdbcUrlError::unsupported("test_database", url.convention(), url.as_str());
            return Err(err.into());
        }

        let database_name = url.database_name()?;
        let container_port = match config.container.port {
            Some(port) => port,
            None => url
                .port_or_default()?
                .ok_or(ConfigError::MissingField("container.port"))?,
        };

        info!(
            vendor = %url.vendor(),
            database = %database_name,
            container_port,
            "Test database configured"
        );

        Ok(Self {
            url,
            database_name,
            container_port,
            image: config.container.image.clone(),
            username: config.database.username.clone(),
            password: config.database.password.clone(),
        })
    }

    /// Get the configured URL.
    pub fn url(&self) -> &JdbcUrl {
        &self.url
    }

    /// Get the database name.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Get the database port inside the container.
    pub fn container_port(&self) -> u16 {
        self.container_port
    }

    /// Settings for configuring the container before it starts.
    pub fn container_settings(&self) -> ContainerSettings {
        ContainerSettings {
            vendor: self.url.vendor().clone(),
            image: self.image.clone(),
            database_name: self.database_name.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            container_port: self.container_port,
        }
    }

    /// Settings for the persistence provider, with the URL pointed at the
    /// host port the container published.
    pub fn persistence_settings<M: MappedPort + ?Sized>(
        &self,
        container: &M,
    ) -> ConfigResult<PersistenceSettings> {
        let container_port = self.container_port;
        let host_port = container
            .mapped_port(container_port)
            .ok_or(ConfigError::PortNotMapped { container_port })?;

        let url = self.url.with_port(host_port)?;
        debug!(container_port, host_port, "Test database URL remapped");

        Ok(PersistenceSettings {
            url: url.into_string(),
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvSource;
    use jdbc_url::InvalidUrlKind;
    use pretty_assertions::assert_eq;

    fn config(toml: &str) -> HarnessConfig {
        HarnessConfig::from_toml_with_source(toml, MapEnvSource::new()).unwrap()
    }

    struct FixedPort(u16);

    impl MappedPort for FixedPort {
        fn mapped_port(&self, _container_port: u16) -> Option<u16> {
            Some(self.0)
        }
    }

    #[test]
    fn test_container_settings() {
        let db = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:mysql://localhost:3306/pokemon"
                username = "user"
                password = "pass"

                [container]
                image = "mysql:8.0"
            "#,
        ))
        .unwrap();

        assert_eq!(
            db.container_settings(),
            ContainerSettings {
                vendor: Vendor::MySql,
                image: Some("mysql:8.0".to_string()),
                database_name: "pokemon".to_string(),
                username: Some("user".to_string()),
                password: Some("pass".to_string()),
                container_port: 3306,
            }
        );
    }

    #[test]
    fn test_persistence_settings() {
        let db = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:postgresql://localhost:5432/test?sslmode=disable"
                username = "user"
            "#,
        ))
        .unwrap();

        let settings = db.persistence_settings(&FixedPort(32770)).unwrap();
        assert_eq!(
            settings.url,
            "jdbc:postgresql://localhost:32770/test?sslmode=disable"
        );
        assert_eq!(settings.username.as_deref(), Some("user"));
    }

    #[test]
    fn test_container_port_override() {
        let db = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:mysql://localhost:13306/test"

                [container]
                port = 3306
            "#,
        ))
        .unwrap();
        assert_eq!(db.container_port(), 3306);

        let ports: HashMap<u16, u16> = HashMap::from([(3306, 40001)]);
        let settings = db.persistence_settings(&ports).unwrap();
        assert_eq!(settings.url, "jdbc:mysql://localhost:40001/test");
    }

    #[test]
    fn test_container_port_defaults_to_vendor() {
        let db = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:postgresql://localhost/test"
            "#,
        ))
        .unwrap();
        assert_eq!(db.container_port(), 5432);

        // No explicit port in the URL, so there is nothing to rewrite.
        let err = db.persistence_settings(&FixedPort(40000)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Url(ref e) if e.invalid_kind() == Some(InvalidUrlKind::UnparseableHostPort)
        ));
    }

    #[test]
    fn test_unknown_vendor_needs_port() {
        let result = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:hsqldb:hsql://localhost/test"
            "#,
        ));
        assert!(matches!(result, Err(ConfigError::MissingField("container.port"))));
    }

    #[test]
    fn test_port_not_mapped() {
        let db = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:mysql://localhost:3306/test"
            "#,
        ))
        .unwrap();

        let err = db.persistence_settings(&HashMap::<u16, u16>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::PortNotMapped { container_port: 3306 }));
    }

    #[test]
    fn test_oracle_unsupported() {
        let result = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:oracle:thin:@localhost:1521/XEPDB1"
            "#,
        ));
        assert!(matches!(result, Err(ConfigError::Url(ref e)) if e.is_unsupported()));
    }

    #[test]
    fn test_empty_database_name() {
        let result = TestDatabase::from_config(&config(
            r#"
                [database]
                url = "jdbc:mysql://localhost:3306/"
            "#,
        ));
        assert!(matches!(
            result,
            Err(ConfigError::Url(ref e)) if e.invalid_kind() == Some(InvalidUrlKind::EmptyDatabaseName)
        ));
    }

    #[test]
    fn test_bootstrap_with_debug_logging() {
        // SAFETY: no other test in this crate reads the logging variables.
        unsafe {
            std::env::set_var("JDBC_HARNESS_LOG_LEVEL", "debug");
            std::env::set_var("JDBC_HARNESS_LOG_FORMAT", "compact");
        }

        let config = config(
            r#"
                [database]
                url = "jdbc:mariadb://localhost:3306/pokemon"
            "#,
        );
        let first = TestDatabase::from_config(&config).unwrap();
        let second = TestDatabase::from_config(&config).unwrap();
        assert_eq!(first.database_name(), second.database_name());

        let ports: HashMap<u16, u16> = HashMap::from([(3306, 41000)]);
        assert_eq!(
            second.persistence_settings(&ports).unwrap().url,
            "jdbc:mariadb://localhost:41000/pokemon"
        );
    }

    #[test]
    fn test_missing_url() {
        let result = TestDatabase::from_config(&HarnessConfig::default());
        assert!(matches!(result, Err(ConfigError::MissingField("database.url"))));
    }
}
