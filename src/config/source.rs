//! Environment snapshots and per-group views over them.
//!
//! Settings are never read from the live process environment directly. A
//! [`EnvSnapshot`] is captured once (optionally merged with a `.env` file) and
//! each settings group resolves its fields from a [`Section`] of it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config::{Config, Environment};

use super::error::ConfigError;

/// Immutable mapping of environment variable names to values.
///
/// Names are case-insensitive and stored upper-cased.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        Self::from_pairs(
            std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
        )
    }

    /// Build a snapshot from explicit name/value pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.as_ref().to_ascii_uppercase(), value.into()))
                .collect(),
        }
    }

    /// Read a `KEY=VALUE` file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn from_dotenv(path: &Path) -> Result<Option<Self>, ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(err) if err.not_found() => return Ok(None),
            Err(err) => return Err(env_file_error(path, &err)),
        };

        let mut vars = BTreeMap::new();
        for item in iter {
            let (key, value) = item.map_err(|err| env_file_error(path, &err))?;
            vars.insert(key.to_ascii_uppercase(), value);
        }

        tracing::debug!(path = %path.display(), entries = vars.len(), "Loaded env file");
        Ok(Some(Self { vars }))
    }

    /// Merge an optional env file (lower precedence) with `process` (higher precedence).
    pub fn load(process: Self, dotenv_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match dotenv_path {
            Some(path) => Self::from_dotenv(path)?,
            None => None,
        };

        Ok(match file {
            Some(file) => file.overlay(process),
            None => process,
        })
    }

    /// Return a copy of `self` with every variable of `other` applied on top.
    pub fn overlay(mut self, other: Self) -> Self {
        self.vars.extend(other.vars);
        self
    }

    /// Set a single variable, replacing any existing value.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_ascii_uppercase(), value.into());
        self
    }

    /// Look up a variable by case-insensitive name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&key.to_ascii_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// Values routinely carry secrets, so only names are printed.
impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.vars.keys()).finish()
    }
}

fn env_file_error(path: &Path, err: &dotenvy::Error) -> ConfigError {
    ConfigError::invalid("env_file", path.display().to_string(), err.to_string())
}

/// Binding table for one settings group.
#[derive(Debug)]
pub struct SectionSpec {
    /// Section name in the aggregate, used in error paths (`database`).
    pub name: &'static str,

    /// Flat variable prefix without separator (`DB` for `DB_POOL_SIZE`).
    pub prefix: &'static str,

    /// Nested override name without delimiter (`DATABASE` for `DATABASE__POOL_SIZE`).
    pub nested: &'static str,

    /// Every field name the group binds, lower-case.
    pub fields: &'static [&'static str],
}

impl SectionSpec {
    /// Variables of `env` named `{head}{separator}{field}` for a bound field.
    fn collect(&self, env: &EnvSnapshot, head: &str, separator: &str) -> config::Map<String, String> {
        let pattern = format!("{head}{separator}");
        env.vars
            .iter()
            .filter(|(key, _)| {
                key.strip_prefix(&pattern)
                    .is_some_and(|field| self.fields.contains(&field.to_ascii_lowercase().as_str()))
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Resolved variables for one settings group.
///
/// Flat `PREFIX_FIELD` variables are layered first, nested `SECTION__FIELD`
/// overrides on top of them.
pub struct Section {
    spec: &'static SectionSpec,
    values: Config,
}

impl Section {
    pub fn new(env: &EnvSnapshot, spec: &'static SectionSpec) -> Result<Self, ConfigError> {
        let values = Config::builder()
            .add_source(
                Environment::with_prefix(spec.prefix)
                    .prefix_separator("_")
                    .source(Some(spec.collect(env, spec.prefix, "_"))),
            )
            .add_source(
                Environment::with_prefix(spec.nested)
                    .prefix_separator("__")
                    .source(Some(spec.collect(env, spec.nested, "__"))),
            )
            .build()
            .map_err(|err| ConfigError::invalid(spec.name, "", err.to_string()))?;

        Ok(Self { spec, values })
    }

    /// Dotted path of `field` inside the aggregate.
    pub fn path(&self, field: &str) -> String {
        format!("{}.{}", self.spec.name, field)
    }

    /// Raw string value of `field`, if any source set it.
    pub fn raw(&self, field: &str) -> Option<String> {
        debug_assert!(self.spec.fields.contains(&field), "unbound field {field}");
        self.values.get_string(field).ok()
    }

    pub fn string(&self, field: &str, default: &str) -> String {
        self.raw(field).unwrap_or_else(|| default.to_string())
    }

    /// An empty value, `none` or `null` disables the field.
    pub fn optional_string(&self, field: &str, default: Option<&str>) -> Option<String> {
        match self.raw(field) {
            Some(raw) if is_null(&raw) => None,
            Some(raw) => Some(raw),
            None => default.map(str::to_string),
        }
    }

    pub fn integer<T>(&self, field: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
    {
        match self.raw(field) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::invalid(
                    self.path(field),
                    raw,
                    format!("expected an integer ({})", std::any::type_name::<T>()),
                )
            }),
            None => Ok(default),
        }
    }

    /// Like [`Section::integer`], additionally rejecting zero.
    pub fn positive<T>(&self, field: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + PartialEq + Default + ToString,
    {
        let value = self.integer(field, default)?;
        if value == T::default() {
            return Err(ConfigError::invalid(
                self.path(field),
                value.to_string(),
                "must be at least 1",
            ));
        }
        Ok(value)
    }

    pub fn boolean(&self, field: &str, default: bool) -> Result<bool, ConfigError> {
        match self.raw(field) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::invalid(self.path(field), raw, "expected a boolean (true/false, yes/no, on/off, 1/0)")
            }),
            None => Ok(default),
        }
    }

    /// Accepts a JSON array of strings or a comma-separated list.
    pub fn list(&self, field: &str, default: &[&str]) -> Result<Vec<String>, ConfigError> {
        match self.raw(field) {
            Some(raw) => parse_list(&raw).ok_or_else(|| {
                ConfigError::invalid(self.path(field), raw, "expected a JSON array of strings")
            }),
            None => Ok(default.iter().map(|item| (*item).to_string()).collect()),
        }
    }

    /// Parse `field` with its [`FromStr`] implementation.
    pub fn parsed<T>(&self, field: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.raw(field) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|err: T::Err| ConfigError::invalid(self.path(field), raw, err.to_string())),
            None => Ok(default),
        }
    }
}

fn is_null(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("null")
}

/// Parse the usual truthy/falsy spellings, case-insensitively.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Option<Vec<String>> {
    let raw = raw.trim();
    let items: Vec<String> = if raw.starts_with('[') {
        serde_json::from_str(raw).ok()?
    } else {
        raw.split(',').map(str::to_string).collect()
    };

    Some(
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}
