//! Configuration file parsing for `harness.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::env::{EnvExpander, EnvSource, StdEnvSource};
use crate::error::{ConfigError, ConfigResult};

/// Environment variable selecting an `[environments.<name>]` override.
pub const PROFILE_VAR: &str = "JDBC_HARNESS_ENV";

/// Main configuration structure for `harness.toml`.
///
/// ```rust
/// use jdbc_config::{HarnessConfig, MapEnvSource};
///
/// let config = HarnessConfig::from_toml_with_source(
///     r#"
///         [database]
///         url = "${DATABASE_URL:-jdbc:mysql://localhost:3306/test}"
///     "#,
///     MapEnvSource::new(),
/// )
/// .unwrap();
/// assert_eq!(config.database_url().unwrap(), "jdbc:mysql://localhost:3306/test");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Test container settings.
    #[serde(default)]
    pub container: ContainerConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl HarnessConfig {
    /// Load configuration from a file path, expanding variables from the process environment.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_file_with_source(path, StdEnvSource)
    }

    /// Load configuration from a file path with a custom environment source.
    pub fn from_file_with_source<S: EnvSource>(
        path: impl AsRef<Path>,
        source: S,
    ) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::from_toml_with_source(&content, source)?;
        info!(path = %path.display(), "Harness configuration loaded");
        Ok(config)
    }

    /// Load a file and apply the override named by `JDBC_HARNESS_ENV`, if set.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load_with_source(path, StdEnvSource)
    }

    /// Like [`HarnessConfig::load`], reading both `${VAR}` references and
    /// `JDBC_HARNESS_ENV` from `source`.
    ///
    /// An empty profile name selects no override.
    pub fn load_with_source<S: EnvSource>(path: impl AsRef<Path>, source: S) -> ConfigResult<Self> {
        let config = Self::from_file_with_source(path, &source)?;
        Ok(match source.get(PROFILE_VAR).filter(|profile| !profile.is_empty()) {
            Some(profile) => config.with_environment(&profile),
            None => config,
        })
    }

    /// Parse configuration from a TOML string using the process environment.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Self::from_toml_with_source(content, StdEnvSource)
    }

    /// Parse configuration from a TOML string with a custom environment source.
    ///
    /// Variables are expanded inside string values only, after parsing.
    pub fn from_toml_with_source<S: EnvSource>(content: &str, source: S) -> ConfigResult<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| ConfigError::TomlError { source: e })?;
        config.expand(&EnvExpander::with_source(source))?;
        Ok(config)
    }

    /// Get the database URL.
    pub fn database_url(&self) -> ConfigResult<&str> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingField("database.url"))
    }

    /// Apply environment-specific overrides.
    pub fn with_environment(mut self, env: &str) -> Self {
        let Some(overrides) = self.environments.remove(env) else {
            warn!(environment = env, "No configuration override for environment");
            return self;
        };

        if let Some(db) = overrides.database {
            if let Some(url) = db.url {
                self.database.url = Some(url);
            }
            if let Some(username) = db.username {
                self.database.username = Some(username);
            }
            if let Some(password) = db.password {
                self.database.password = Some(password);
            }
        }
        if let Some(container) = overrides.container {
            if let Some(image) = container.image {
                self.container.image = Some(image);
            }
            if let Some(port) = container.port {
                self.container.port = Some(port);
            }
        }

        info!(environment = env, "Configuration override applied");
        self
    }

    fn expand<S: EnvSource>(&mut self, expander: &EnvExpander<S>) -> ConfigResult<()> {
        expand_opt(&mut self.database.url, expander)?;
        expand_opt(&mut self.database.username, expander)?;
        expand_opt(&mut self.database.password, expander)?;
        expand_opt(&mut self.container.image, expander)?;

        for overrides in self.environments.values_mut() {
            if let Some(db) = overrides.database.as_mut() {
                expand_opt(&mut db.url, expander)?;
                expand_opt(&mut db.username, expander)?;
                expand_opt(&mut db.password, expander)?;
            }
            if let Some(container) = overrides.container.as_mut() {
                expand_opt(&mut container.image, expander)?;
            }
        }
        Ok(())
    }
}

fn expand_opt<S: EnvSource>(
    value: &mut Option<String>,
    expander: &EnvExpander<S>,
) -> ConfigResult<()> {
    if let Some(raw) = value.as_mut() {
        *raw = expander.expand(raw)?;
    }
    Ok(())
}

/// Database configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// JDBC connection URL (supports `${ENV_VAR}` interpolation).
    pub url: Option<String>,

    /// Database user.
    pub username: Option<String>,

    /// Database password.
    pub password: Option<String>,
}

/// Test container configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerConfig {
    /// Container image, e.g. `mysql:8.0`.
    pub image: Option<String>,

    /// Database port inside the container. Defaults to the URL port, then
    /// the vendor's default port.
    pub port: Option<u16>,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Database overrides.
    pub database: Option<DatabaseConfig>,

    /// Container overrides.
    pub container: Option<ContainerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvSource;
    use pretty_assertions::assert_eq;

    const FULL: &str = r#"
        [database]
        url = "jdbc:mysql://localhost:3306/test"
        username = "test"
        password = "${DB_PASSWORD:-changeit}"

        [container]
        image = "mysql:8.0"

        [environments.ci.database]
        url = "jdbc:postgresql://localhost:5432/${CI_DB}"

        [environments.ci.container]
        image = "postgres:16"
        port = 5432
    "#;

    fn source() -> MapEnvSource {
        MapEnvSource::new().set("CI_DB", "pipeline")
    }

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert!(config.database.url.is_none());
        assert!(matches!(
            config.database_url(),
            Err(ConfigError::MissingField("database.url"))
        ));
    }

    #[test]
    fn test_parse_full() {
        let config = HarnessConfig::from_toml_with_source(FULL, source()).unwrap();
        assert_eq!(config.database_url().unwrap(), "jdbc:mysql://localhost:3306/test");
        assert_eq!(config.database.username.as_deref(), Some("test"));
        assert_eq!(config.database.password.as_deref(), Some("changeit"));
        assert_eq!(config.container.image.as_deref(), Some("mysql:8.0"));
        assert_eq!(config.container.port, None);
    }

    #[test]
    fn test_with_environment() {
        let config = HarnessConfig::from_toml_with_source(FULL, source())
            .unwrap()
            .with_environment("ci");
        assert_eq!(
            config.database_url().unwrap(),
            "jdbc:postgresql://localhost:5432/pipeline"
        );
        assert_eq!(config.database.username.as_deref(), Some("test"));
        assert_eq!(config.container.image.as_deref(), Some("postgres:16"));
        assert_eq!(config.container.port, Some(5432));
    }

    #[test]
    fn test_with_unknown_environment() {
        let config = HarnessConfig::from_toml_with_source(FULL, source())
            .unwrap()
            .with_environment("staging");
        assert_eq!(config.database_url().unwrap(), "jdbc:mysql://localhost:3306/test");
    }

    #[test]
    fn test_missing_variable() {
        let result = HarnessConfig::from_toml_with_source(
            r#"
                [database]
                url = "${DATABASE_URL}"
            "#,
            MapEnvSource::new(),
        );
        assert!(matches!(result, Err(ConfigError::EnvNotFound(name)) if name == "DATABASE_URL"));
    }

    #[test]
    fn test_unknown_field() {
        let result = HarnessConfig::from_toml_with_source(
            r#"
                [database]
                uri = "jdbc:mysql://localhost:3306/test"
            "#,
            MapEnvSource::new(),
        );
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn test_empty_url_is_missing() {
        let config = HarnessConfig::from_toml_with_source(
            r#"
                [database]
                url = "${DATABASE_URL:-}"
            "#,
            MapEnvSource::new(),
        )
        .unwrap();
        assert!(matches!(
            config.database_url(),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        std::fs::write(
            &path,
            "[database]\nurl = \"jdbc:mariadb://localhost:3306/pokemon\"\n",
        )
        .unwrap();

        let config = HarnessConfig::from_file(&path).unwrap();
        assert_eq!(
            config.database_url().unwrap(),
            "jdbc:mariadb://localhost:3306/pokemon"
        );
    }

    #[test]
    fn test_load_applies_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        std::fs::write(&path, FULL).unwrap();

        let config =
            HarnessConfig::load_with_source(&path, source().set(PROFILE_VAR, "ci")).unwrap();
        assert_eq!(
            config.database_url().unwrap(),
            "jdbc:postgresql://localhost:5432/pipeline"
        );
        assert_eq!(config.container.port, Some(5432));
        assert!(config.environments.is_empty());
    }

    #[test]
    fn test_load_without_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harness.toml");
        std::fs::write(&path, FULL).unwrap();

        for source in [source(), source().set(PROFILE_VAR, "")] {
            let config = HarnessConfig::load_with_source(&path, source).unwrap();
            assert_eq!(config.database_url().unwrap(), "jdbc:mysql://localhost:3306/test");
            assert!(config.environments.contains_key("ci"));
        }
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = HarnessConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
