//! Settings Loading Tests

use std::io::Write;

use auth_service::config::{
    AppConfig, DatabaseConfig, EmailConfig, EnvSnapshot, Environment, LogFormat, LogLevel,
    Settings,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::common::TEST_SECRET;

fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
    EnvSnapshot::from_pairs(pairs.iter().copied())
}

/// Test every omitted variable falls back to its documented default
#[test]
fn test_defaults_match_documentation() {
    let settings = Settings::load(EnvSnapshot::default(), None).unwrap();

    assert_eq!(settings.database.url, "sqlite+aiosqlite:///.auth.db");
    assert_eq!(settings.database.pool_size, 10);
    assert_eq!(settings.database.max_overflow, 20);
    assert_eq!(settings.database.pool_timeout, 30);
    assert_eq!(settings.database.pool_recycle, 3600);
    assert!(!settings.database.echo);

    assert_eq!(settings.security.algorithm, "HS256");
    assert_eq!(settings.security.access_token_expire_minutes, 30);
    assert_eq!(settings.security.password_min_length, 8);
    assert_eq!(settings.security.password_max_length, 128);
    assert_eq!(settings.security.rate_limit_requests, 100);
    assert_eq!(settings.security.rate_limit_window, 3600);
    assert_eq!(settings.security.max_login_attempts, 5);
    assert_eq!(settings.security.lockdown_duration, 900);
    assert!(settings.security.secret_key().len() >= 32);

    assert_eq!(settings.email.smtp_port, 587);
    assert_eq!(settings.email.verification_token_expire_hours, 24);

    assert_eq!(settings.app.environment, Environment::Development);
    assert_eq!(settings.app.api_v1_prefix, "/api/v1");
    assert_eq!(settings.app.host, "127.0.0.1");
    assert_eq!(settings.app.port, 8000);
    assert_eq!(settings.app.allowed_origins, vec!["http://localhost:3000"]);
    assert_eq!(settings.app.allowed_methods, vec!["GET", "POST", "PUT", "DELETE"]);
    assert_eq!(settings.app.allowed_headers, vec!["*"]);
    assert_eq!(settings.app.log_level, LogLevel::Info);
    assert_eq!(settings.app.log_format, LogFormat::Console);
}

/// Test a fully specified snapshot reads back exactly
#[test]
fn test_full_snapshot_round_trip() {
    let settings = Settings::load(
        env(&[
            ("DB_URL", "postgresql+asyncpg://auth:pw@db/auth"),
            ("DB_POOL_SIZE", "5"),
            ("DB_MAX_OVERFLOW", "2"),
            ("DB_POOL_TIMEOUT", "15"),
            ("DB_POOL_RECYCLE", "60"),
            ("DB_ECHO", "true"),
            ("SECURITY_SECRET_KEY", TEST_SECRET),
            ("SECURITY_ALGORITHM", "HS512"),
            ("SECURITY_ACCESS_TOKEN_EXPIRE_MINUTES", "45"),
            ("SECURITY_PASSWORD_MIN_LENGTH", "10"),
            ("SECURITY_PASSWORD_MAX_LENGTH", "64"),
            ("SECURITY_PASSWORD_REQUIRE_UPPERCASE", "false"),
            ("SECURITY_PASSWORD_REQUIRE_LOWERCASE", "false"),
            ("SECURITY_PASSWORD_REQUIRE_NUMBERS", "false"),
            ("SECURITY_PASSWORD_REQUIRE_SPECIAL", "false"),
            ("SECURITY_RATE_LIMIT_REQUESTS", "10"),
            ("SECURITY_RATE_LIMIT_WINDOW", "60"),
            ("SECURITY_MAX_LOGIN_ATTEMPTS", "3"),
            ("SECURITY_LOCKDOWN_DURATION", "120"),
            ("EMAIL_SMTP_HOST", "smtp.example.com"),
            ("EMAIL_SMTP_PORT", "465"),
            ("EMAIL_SMTP_USERNAME", "mailer"),
            ("EMAIL_SMTP_PASSWORD", "pw"),
            ("EMAIL_SMTP_USE_TLS", "false"),
            ("EMAIL_FROM_EMAIL", "auth@example.com"),
            ("EMAIL_FROM_NAME", "Example"),
            ("EMAIL_VERIFICATION_TOKEN_EXPIRE_HOURS", "12"),
            ("APP_TITLE", "Example Auth"),
            ("APP_DESCRIPTION", "Example description"),
            ("APP_VERSION", "2.0.0"),
            ("APP_ENVIRONMENT", "testing"),
            ("APP_API_V1_PREFIX", "/v1"),
            ("APP_DOCS_URL", "/d"),
            ("APP_REDOC_URL", "/r"),
            ("APP_OPENAPI_URL", "/o.json"),
            ("APP_HOST", "0.0.0.0"),
            ("APP_PORT", "8443"),
            ("APP_RELOAD", "false"),
            ("APP_ALLOWED_ORIGINS", r#"["https://example.com"]"#),
            ("APP_ALLOWED_METHODS", r#"["GET"]"#),
            ("APP_ALLOWED_HEADERS", r#"["authorization","content-type"]"#),
            ("APP_LOG_LEVEL", "DEBUG"),
            ("APP_LOG_FORMAT", "json"),
        ]),
        None,
    )
    .unwrap();

    assert_eq!(
        settings.database,
        DatabaseConfig {
            url: "postgresql+asyncpg://auth:pw@db/auth".into(),
            pool_size: 5,
            max_overflow: 2,
            pool_timeout: 15,
            pool_recycle: 60,
            echo: true,
        }
    );

    let security = &settings.security;
    assert_eq!(security.secret_key(), TEST_SECRET);
    assert!(!security.secret_generated());
    assert_eq!(security.algorithm, "HS512");
    assert_eq!(security.access_token_expire_minutes, 45);
    assert_eq!(security.password_min_length, 10);
    assert_eq!(security.password_max_length, 64);
    assert!(!security.password_require_uppercase);
    assert!(!security.password_require_lowercase);
    assert!(!security.password_require_numbers);
    assert!(!security.password_require_special);
    assert_eq!(security.rate_limit_requests, 10);
    assert_eq!(security.rate_limit_window, 60);
    assert_eq!(security.max_login_attempts, 3);
    assert_eq!(security.lockdown_duration, 120);

    assert_eq!(
        settings.email,
        EmailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 465,
            smtp_username: "mailer".into(),
            smtp_password: "pw".into(),
            smtp_use_tls: false,
            from_email: "auth@example.com".into(),
            from_name: "Example".into(),
            verification_token_expire_hours: 12,
        }
    );

    assert_eq!(
        settings.app,
        AppConfig {
            title: "Example Auth".into(),
            description: "Example description".into(),
            version: "2.0.0".into(),
            environment: Environment::Testing,
            api_v1_prefix: "/v1".into(),
            docs_url: Some("/d".into()),
            redoc_url: Some("/r".into()),
            openapi_url: Some("/o.json".into()),
            host: "0.0.0.0".into(),
            port: 8443,
            reload: false,
            allowed_origins: vec!["https://example.com".into()],
            allowed_methods: vec!["GET".into()],
            allowed_headers: vec!["authorization".into(), "content-type".into()],
            log_level: LogLevel::Debug,
            log_format: LogFormat::Json,
        }
    );
}

/// Test integer fields reject non-numeric values and name the field
#[test_case("DB_POOL_SIZE", "database.pool_size")]
#[test_case("SECURITY_MAX_LOGIN_ATTEMPTS", "security.max_login_attempts")]
#[test_case("EMAIL_SMTP_PORT", "email.smtp_port")]
#[test_case("EMAIL_VERIFICATION_TOKEN_EXPIRE_HOURS", "email.verification_token_expire_hours")]
#[test_case("APP_PORT", "app.port")]
fn test_non_numeric_integer_is_rejected(var: &str, field: &str) {
    let err = Settings::load(env(&[(var, "not-a-number")]), None).unwrap_err();

    assert_eq!(err.field, field);
    assert_eq!(err.raw_value, "not-a-number");
    assert!(err.to_string().contains(field));
}

/// Test the secret length boundary
#[test]
fn test_secret_key_boundary() {
    let short = "a".repeat(31);
    let exact = "a".repeat(32);

    let err = Settings::load(env(&[("SECURITY_SECRET_KEY", &short)]), None).unwrap_err();
    assert_eq!(err.field, "security.secret_key");
    assert!(!err.to_string().contains(&short));

    assert!(Settings::load(env(&[("SECURITY_SECRET_KEY", &exact)]), None).is_ok());
}

/// Test nested override changes only its own field
#[test]
fn test_nested_override() {
    let settings = Settings::load(env(&[("SECURITY__MAX_LOGIN_ATTEMPTS", "3")]), None).unwrap();

    assert_eq!(settings.security.max_login_attempts, 3);
    assert_eq!(settings.security.lockdown_duration, 900);
    assert_eq!(settings.security.password_min_length, 8);
    assert_eq!(settings.app, AppConfig::default());
}

/// Test variable names are matched case-insensitively
#[test]
fn test_variable_names_are_case_insensitive() {
    let settings = Settings::load(env(&[("app_port", "9100"), ("Database__Echo", "on")]), None).unwrap();

    assert_eq!(settings.app.port, 9100);
    assert!(settings.database.echo);
}

/// Test mixed-case production disables all documentation paths
#[test]
fn test_production_forces_docs_off() {
    let settings = Settings::load(
        env(&[
            ("APP_ENVIRONMENT", "PRODUCTION"),
            ("APP_DOCS_URL", "/docs"),
            ("APP_REDOC_URL", "/redoc"),
            ("APP_OPENAPI_URL", "/openapi.json"),
        ]),
        None,
    )
    .unwrap();

    assert_eq!(settings.app.environment.to_string(), "production");
    assert_eq!(settings.app.docs_url, None);
    assert_eq!(settings.app.redoc_url, None);
    assert_eq!(settings.app.openapi_url, None);
}

/// Test the env file is read and the process environment wins over it
#[test]
fn test_env_file_precedence() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# service settings").unwrap();
    writeln!(file, "APP_TITLE=From File").unwrap();
    writeln!(file, "APP_PORT=9000").unwrap();
    writeln!(file, "SECURITY__LOCKDOWN_DURATION=60").unwrap();

    let settings = Settings::load(env(&[("APP_PORT", "9500")]), Some(file.path())).unwrap();

    assert_eq!(settings.app.title, "From File");
    assert_eq!(settings.app.port, 9500);
    assert_eq!(settings.security.lockdown_duration, 60);
}

/// Test a nested key from the env file beats a flat key from the process environment
#[test]
fn test_nested_env_file_key_beats_flat_process_key() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "SECURITY__LOCKDOWN_DURATION=60").unwrap();

    let settings = Settings::load(
        env(&[("SECURITY_LOCKDOWN_DURATION", "120")]),
        Some(file.path()),
    )
    .unwrap();

    assert_eq!(settings.security.lockdown_duration, 60);
}

/// Test invalid values in the env file fail the load too
#[test]
fn test_env_file_values_are_validated() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "DB_POOL_TIMEOUT=soon").unwrap();

    let err = Settings::load(EnvSnapshot::default(), Some(file.path())).unwrap_err();

    assert_eq!(err.field, "database.pool_timeout");
}
