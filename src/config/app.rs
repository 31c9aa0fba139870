//! Application metadata, server binding, CORS and logging settings (`APP_*`).

use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;
use super::source::{EnvSnapshot, Section, SectionSpec};

static SPEC: SectionSpec = SectionSpec {
    name: "app",
    prefix: "APP",
    nested: "APP",
    fields: &[
        "title",
        "description",
        "version",
        "environment",
        "api_v1_prefix",
        "docs_url",
        "redoc_url",
        "openapi_url",
        "host",
        "port",
        "reload",
        "allowed_origins",
        "allowed_methods",
        "allowed_headers",
        "log_level",
        "log_format",
    ],
};

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "testing" => Ok(Self::Testing),
            "production" => Ok(Self::Production),
            _ => Err("expected one of: development, testing, production".to_string()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum severity that gets logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Equivalent `tracing` filter directive. `CRITICAL` has no counterpart and maps to `error`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err("expected one of: DEBUG, INFO, WARNING, ERROR, CRITICAL".to_string()),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Human-readable lines
    #[default]
    Console,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "console" => Ok(Self::Console),
            _ => Err("expected one of: json, console".to_string()),
        }
    }
}

/// Main application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub title: String,
    pub description: String,
    pub version: String,

    pub environment: Environment,

    /// Mount point for versioned API routers
    pub api_v1_prefix: String,
    /// Swagger UI path, `None` when disabled
    pub docs_url: Option<String>,
    /// ReDoc path, `None` when disabled
    pub redoc_url: Option<String>,
    /// OpenAPI document path, `None` when disabled
    pub openapi_url: Option<String>,

    pub host: String,
    pub port: u16,
    pub reload: bool,

    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,

    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Build from `APP_*` variables.
    ///
    /// In production the documentation endpoints are always disabled,
    /// whatever the variables say.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let section = Section::new(env, &SPEC)?;

        let mut config = Self {
            title: section.string("title", "Authentication Service"),
            description: section.string("description", "Professional authentication microservice"),
            version: section.string("version", "0.1.0"),
            environment: section.parsed("environment", Environment::Development)?,
            api_v1_prefix: section.string("api_v1_prefix", "/api/v1"),
            docs_url: section.optional_string("docs_url", Some("/docs")),
            redoc_url: section.optional_string("redoc_url", Some("/redoc")),
            openapi_url: section.optional_string("openapi_url", Some("/openapi.json")),
            host: section.string("host", "127.0.0.1"),
            port: section.integer("port", 8000)?,
            reload: section.boolean("reload", true)?,
            allowed_origins: section.list("allowed_origins", &["http://localhost:3000"])?,
            allowed_methods: section.list("allowed_methods", &["GET", "POST", "PUT", "DELETE"])?,
            allowed_headers: section.list("allowed_headers", &["*"])?,
            log_level: section.parsed("log_level", LogLevel::Info)?,
            log_format: section.parsed("log_format", LogFormat::Console)?,
        };

        if config.is_production() {
            config.docs_url = None;
            config.redoc_url = None;
            config.openapi_url = None;
        }

        config.validate_paths()?;
        Ok(config)
    }

    /// Route paths must be absolute literal paths that do not shadow each
    /// other or the built-in endpoints. The Swagger UI also owns every path
    /// below `docs_url`.
    fn validate_paths(&self) -> Result<(), ConfigError> {
        let mut taken = vec!["/", "/health"];

        let docs = [
            ("app.openapi_url", &self.openapi_url),
            ("app.docs_url", &self.docs_url),
            ("app.redoc_url", &self.redoc_url),
        ];
        for (field, path) in docs {
            let Some(path) = path.as_deref() else {
                continue;
            };
            if !path.starts_with('/') {
                return Err(ConfigError::invalid(field, path, "path must start with '/'"));
            }
            if path.len() > 1 && path.ends_with('/') {
                return Err(ConfigError::invalid(field, path, "path must not end with '/'"));
            }
            if path.contains(['{', '}', '*']) {
                return Err(ConfigError::invalid(
                    field,
                    path,
                    "path must not contain route parameters or wildcards",
                ));
            }
            if taken.contains(&path) {
                return Err(ConfigError::invalid(field, path, "path is already in use"));
            }
            taken.push(path);
        }

        if let Some(docs_url) = self.docs_url.as_deref() {
            let below_docs = format!("{docs_url}/");
            let others = [
                ("app.openapi_url", &self.openapi_url),
                ("app.redoc_url", &self.redoc_url),
            ];
            for (field, path) in others {
                if let Some(path) = path.as_deref().filter(|p| p.starts_with(&below_docs)) {
                    return Err(ConfigError::invalid(
                        field,
                        path,
                        "path is reserved by the Swagger UI at app.docs_url",
                    ));
                }
            }
        }

        if !self.api_v1_prefix.starts_with('/') {
            return Err(ConfigError::invalid(
                "app.api_v1_prefix",
                self.api_v1_prefix.clone(),
                "path must start with '/'",
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Authentication Service".to_string(),
            description: "Professional authentication microservice".to_string(),
            version: "0.1.0".to_string(),
            environment: Environment::Development,
            api_v1_prefix: "/api/v1".to_string(),
            docs_url: Some("/docs".to_string()),
            redoc_url: Some("/redoc".to_string()),
            openapi_url: Some("/openapi.json".to_string()),
            host: "127.0.0.1".to_string(),
            port: 8000,
            reload: true,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE"].map(String::from).to_vec(),
            allowed_headers: vec!["*".to_string()],
            log_level: LogLevel::Info,
            log_format: LogFormat::Console,
        }
    }
}
