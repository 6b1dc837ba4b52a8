//! Integration tests for harness configuration and container wiring.
//!
//! These tests walk the bootstrap sequence a database test suite runs:
//! load config, configure the container, then point the persistence
//! provider at the published port.

use std::collections::HashMap;

use jdbc_harness::config::{
    ConfigError, HarnessConfig, MapEnvSource, MappedPort, TestDatabase,
};
use jdbc_harness::url::{Vendor, extract_database_name, locate_authority_separator};
use pretty_assertions::assert_eq;

/// Stand-in for a started container publishing one port.
struct StubContainer {
    exposed: u16,
    published: u16,
}

impl MappedPort for StubContainer {
    fn mapped_port(&self, container_port: u16) -> Option<u16> {
        (container_port == self.exposed).then_some(self.published)
    }
}

const HARNESS_TOML: &str = r#"
    [database]
    url = "${DATABASE_URL:-jdbc:mysql://localhost:3306/pokemon}"
    username = "test"
    password = "${DB_PASSWORD:-changeit}"

    [container]
    image = "mysql:8.0"

    [environments.ci.database]
    url = "jdbc:postgresql://localhost:5432/pokemon_ci"

    [environments.ci.container]
    image = "postgres:16"
"#;

/// Test the full bootstrap with defaults
#[test]
fn test_bootstrap_defaults() {
    let config = HarnessConfig::from_toml_with_source(HARNESS_TOML, MapEnvSource::new())
        .expect("Failed to parse config");
    let db = TestDatabase::from_config(&config).expect("Failed to configure database");

    let container = db.container_settings();
    assert_eq!(container.vendor, Vendor::MySql);
    assert_eq!(container.image.as_deref(), Some("mysql:8.0"));
    assert_eq!(container.database_name, "pokemon");
    assert_eq!(container.password.as_deref(), Some("changeit"));
    assert_eq!(container.container_port, 3306);

    let started = StubContainer {
        exposed: container.container_port,
        published: 49153,
    };
    let persistence = db.persistence_settings(&started).unwrap();
    assert_eq!(persistence.url, "jdbc:mysql://localhost:49153/pokemon");
    assert_eq!(persistence.username.as_deref(), Some("test"));

    // The rewritten URL still names the database the container created.
    assert_eq!(
        extract_database_name(&persistence.url).unwrap(),
        container.database_name
    );
    assert_eq!(
        locate_authority_separator(&persistence.url).unwrap(),
        locate_authority_separator(db.url().as_str()).unwrap()
    );
}

/// Test URL supplied through the environment
#[test]
fn test_bootstrap_from_environment_variable() {
    let source = MapEnvSource::new()
        .set("DATABASE_URL", "jdbc:mariadb://127.0.0.1:3307/league")
        .set("DB_PASSWORD", "s3cret");
    let config = HarnessConfig::from_toml_with_source(HARNESS_TOML, source).unwrap();
    let db = TestDatabase::from_config(&config).unwrap();

    assert_eq!(db.database_name(), "league");
    assert_eq!(db.container_port(), 3307);
    assert_eq!(db.container_settings().password.as_deref(), Some("s3cret"));

    let ports: HashMap<u16, u16> = HashMap::from([(3307, 32801)]);
    assert_eq!(
        db.persistence_settings(&ports).unwrap().url,
        "jdbc:mariadb://127.0.0.1:32801/league"
    );
}

/// Test CI environment override
#[test]
fn test_bootstrap_ci_environment() {
    let config = HarnessConfig::from_toml_with_source(HARNESS_TOML, MapEnvSource::new())
        .unwrap()
        .with_environment("ci");
    let db = TestDatabase::from_config(&config).unwrap();

    let container = db.container_settings();
    assert_eq!(container.vendor, Vendor::Postgres);
    assert_eq!(container.image.as_deref(), Some("postgres:16"));
    assert_eq!(container.database_name, "pokemon_ci");
    assert_eq!(container.container_port, 5432);
}

/// Test that a container not publishing the database port aborts setup
#[test]
fn test_bootstrap_unpublished_port() {
    let config = HarnessConfig::from_toml_with_source(HARNESS_TOML, MapEnvSource::new()).unwrap();
    let db = TestDatabase::from_config(&config).unwrap();

    let started = StubContainer {
        exposed: 5432,
        published: 40000,
    };
    let err = db.persistence_settings(&started).unwrap_err();
    assert!(matches!(err, ConfigError::PortNotMapped { container_port: 3306 }));
}

/// Test loading from a file on disk
#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harness.toml");
    std::fs::write(
        &path,
        r#"
            [database]
            url = "jdbc:postgresql://localhost:5432/pokemon"

            [container]
            image = "postgres:16"
        "#,
    )
    .unwrap();

    let config = HarnessConfig::from_file(&path).unwrap();
    let db = TestDatabase::from_config(&config).unwrap();
    assert_eq!(db.database_name(), "pokemon");
}

/// Test that the raw TOML shape deserializes without expansion
#[test]
fn test_config_shape() {
    let config: HarnessConfig = toml::from_str(HARNESS_TOML).expect("Failed to parse config");

    // The value still has the ${} syntax until expansion happens
    assert_eq!(
        config.database.url.as_deref(),
        Some("${DATABASE_URL:-jdbc:mysql://localhost:3306/pokemon}")
    );
    assert!(config.environments.contains_key("ci"));
}

/// Test that an Oracle URL is rejected for container wiring
#[test]
fn test_oracle_rejected() {
    let config = HarnessConfig::from_toml_with_source(
        "[database]\nurl = \"jdbc:oracle:thin:@localhost:1521/XEPDB1\"\n",
        MapEnvSource::new(),
    )
    .unwrap();

    let err = TestDatabase::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Url(ref e) if e.is_unsupported()));
}
