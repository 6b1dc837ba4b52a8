//! `${VAR}` expansion inside configuration values.

use std::collections::HashMap;

use crate::error::{ConfigError, ConfigResult};

/// Source for environment variables.
pub trait EnvSource {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed set of variables, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// What a braced reference yields when its variable is unset or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback<'a> {
    /// `${VAR}`
    Required,
    /// `${VAR:-default}`
    Default(&'a str),
    /// `${VAR:?message}`
    Fail(&'a str),
    /// `${VAR:+value}`, which yields `value` only when the variable is set.
    Alternate(&'a str),
}

/// Expands `$VAR`, `${VAR}`, `${VAR:-default}`, `${VAR:?message}` and
/// `${VAR:+value}` references.
///
/// A `$` not followed by `{`, a letter or `_` is kept literally. Only the
/// first `:` in a braced reference starts the modifier, so defaults may
/// themselves be JDBC URLs.
///
/// ```rust
/// use jdbc_config::{EnvExpander, MapEnvSource};
///
/// let expander = EnvExpander::with_source(MapEnvSource::new().set("DB_HOST", "db"));
/// assert_eq!(
///     expander.expand("jdbc:mysql://${DB_HOST}:${DB_PORT:-3306}/test").unwrap(),
///     "jdbc:mysql://db:3306/test"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EnvExpander<S> {
    source: S,
}

impl<S: EnvSource> EnvExpander<S> {
    /// Create an expander reading from `source`.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Expand every variable reference in `input`.
    pub fn expand(&self, input: &str) -> ConfigResult<String> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(dollar) = rest.find('$') {
            out.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];

            if let Some(body) = after.strip_prefix('{') {
                let close = body.find('}').ok_or_else(|| ConfigError::InvalidEnvValue {
                    name: body.split(':').next().unwrap_or_default().to_string(),
                    message: "unterminated variable reference".to_string(),
                })?;
                out.push_str(&self.resolve(&body[..close])?);
                rest = &body[close + 1..];
            } else if after.starts_with(|c: char| c.is_alphabetic() || c == '_') {
                let len = after
                    .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                let name = &after[..len];
                let value = self
                    .source
                    .get(name)
                    .ok_or_else(|| ConfigError::EnvNotFound(name.to_string()))?;
                out.push_str(&value);
                rest = &after[len..];
            } else {
                out.push('$');
                rest = after;
            }
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Resolve the body of a `${...}` reference.
    fn resolve(&self, reference: &str) -> ConfigResult<String> {
        let (name, fallback) = match reference.split_once(':') {
            None => (reference, Fallback::Required),
            Some((name, modifier)) => {
                let argument = modifier.get(1..).unwrap_or_default();
                let fallback = match modifier.chars().next() {
                    Some('-') => Fallback::Default(argument),
                    Some('?') => Fallback::Fail(argument),
                    Some('+') => Fallback::Alternate(argument),
                    _ => {
                        return Err(ConfigError::InvalidEnvValue {
                            name: name.to_string(),
                            message: format!("unknown modifier in '${{{reference}}}'"),
                        });
                    }
                };
                (name, fallback)
            }
        };

        if name.is_empty() {
            return Err(ConfigError::InvalidEnvValue {
                name: String::new(),
                message: "empty variable name".to_string(),
            });
        }

        let value = self.source.get(name).filter(|v| !v.is_empty());
        match (fallback, value) {
            (Fallback::Alternate(alternate), Some(_)) => Ok(alternate.to_string()),
            (Fallback::Alternate(_), None) => Ok(String::new()),
            (_, Some(value)) => Ok(value),
            (Fallback::Default(default), None) => Ok(default.to_string()),
            (Fallback::Fail(message), None) => Err(ConfigError::InvalidEnvValue {
                name: name.to_string(),
                message: if message.is_empty() {
                    format!("required variable '{name}' is not set")
                } else {
                    message.to_string()
                },
            }),
            (Fallback::Required, None) => Err(ConfigError::EnvNotFound(name.to_string())),
        }
    }
}
