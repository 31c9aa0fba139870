//! Token signing, password policy and lockout settings (`SECURITY_*`).
//!
//! Nothing in this crate issues tokens or hashes passwords yet; these values
//! are the knobs those components will read.

use std::fmt;

use rand::distr::Alphanumeric;
use rand::Rng;

use super::error::{ConfigError, REDACTED};
use super::source::{EnvSnapshot, Section, SectionSpec};

/// Minimum signing secret length in characters (256 bits of ASCII).
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Length of a generated secret.
const GENERATED_SECRET_LENGTH: usize = 43;

static SPEC: SectionSpec = SectionSpec {
    name: "security",
    prefix: "SECURITY",
    nested: "SECURITY",
    fields: &[
        "secret_key",
        "algorithm",
        "access_token_expire_minutes",
        "password_min_length",
        "password_max_length",
        "password_require_uppercase",
        "password_require_lowercase",
        "password_require_numbers",
        "password_require_special",
        "rate_limit_requests",
        "rate_limit_window",
        "max_login_attempts",
        "lockdown_duration",
    ],
};

/// Security configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    secret_key: String,
    secret_generated: bool,

    /// JWT signing algorithm name
    pub algorithm: String,
    pub access_token_expire_minutes: u32,

    pub password_min_length: u32,
    pub password_max_length: u32,
    pub password_require_uppercase: bool,
    pub password_require_lowercase: bool,
    pub password_require_numbers: bool,
    pub password_require_special: bool,

    /// Requests allowed per window
    pub rate_limit_requests: u32,
    /// Window length in seconds
    pub rate_limit_window: u64,

    /// Failed logins before the account is locked
    pub max_login_attempts: u32,
    /// Lockout length in seconds
    pub lockdown_duration: u64,
}

impl SecurityConfig {
    /// Build from `SECURITY_*` variables.
    ///
    /// When no secret is configured a random one is generated. It lives only
    /// as long as the process, so tokens signed with it do not survive a
    /// restart.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let section = Section::new(env, &SPEC)?;

        let (secret_key, secret_generated) = match section.raw("secret_key") {
            Some(secret) => (secret, false),
            None => (generate_secret(), true),
        };

        let config = Self {
            secret_key,
            secret_generated,
            algorithm: section.string("algorithm", "HS256"),
            access_token_expire_minutes: section.positive("access_token_expire_minutes", 30)?,
            password_min_length: section.integer("password_min_length", 8)?,
            password_max_length: section.integer("password_max_length", 128)?,
            password_require_uppercase: section.boolean("password_require_uppercase", true)?,
            password_require_lowercase: section.boolean("password_require_lowercase", true)?,
            password_require_numbers: section.boolean("password_require_numbers", true)?,
            password_require_special: section.boolean("password_require_special", true)?,
            rate_limit_requests: section.integer("rate_limit_requests", 100)?,
            rate_limit_window: section.integer("rate_limit_window", 3600)?,
            max_login_attempts: section.integer("max_login_attempts", 5)?,
            lockdown_duration: section.integer("lockdown_duration", 900)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let secret_length = self.secret_key.chars().count();
        if secret_length < MIN_SECRET_KEY_LENGTH {
            return Err(ConfigError::redacted(
                "security.secret_key",
                format!(
                    "secret key must be at least {MIN_SECRET_KEY_LENGTH} characters long (got {secret_length})"
                ),
            ));
        }

        if self.password_min_length > self.password_max_length {
            return Err(ConfigError::invalid(
                "security.password_min_length",
                self.password_min_length.to_string(),
                format!(
                    "must not exceed password_max_length ({})",
                    self.password_max_length
                ),
            ));
        }

        Ok(())
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Secret key bytes for token signing and verification.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Whether the secret was generated for this process rather than configured.
    pub fn secret_generated(&self) -> bool {
        self.secret_generated
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret_key", &REDACTED)
            .field("secret_generated", &self.secret_generated)
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("password_min_length", &self.password_min_length)
            .field("password_max_length", &self.password_max_length)
            .field("password_require_uppercase", &self.password_require_uppercase)
            .field("password_require_lowercase", &self.password_require_lowercase)
            .field("password_require_numbers", &self.password_require_numbers)
            .field("password_require_special", &self.password_require_special)
            .field("rate_limit_requests", &self.rate_limit_requests)
            .field("rate_limit_window", &self.rate_limit_window)
            .field("max_login_attempts", &self.max_login_attempts)
            .field("lockdown_duration", &self.lockdown_duration)
            .finish()
    }
}

/// Random URL-safe secret drawn from the thread-local CSPRNG.
fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LENGTH)
        .map(char::from)
        .collect()
}
