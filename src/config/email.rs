//! Outgoing mail settings (`EMAIL_*`).

use std::fmt;

use super::error::{ConfigError, REDACTED};
use super::source::{EnvSnapshot, Section, SectionSpec};

static SPEC: SectionSpec = SectionSpec {
    name: "email",
    prefix: "EMAIL",
    nested: "EMAIL",
    fields: &[
        "smtp_host",
        "smtp_port",
        "smtp_username",
        "smtp_password",
        "smtp_use_tls",
        "from_email",
        "from_name",
        "verification_token_expire_hours",
    ],
};

/// SMTP configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_use_tls: bool,

    /// Default sender address
    pub from_email: String,
    /// Default sender display name
    pub from_name: String,

    pub verification_token_expire_hours: u32,
}

impl EmailConfig {
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let section = Section::new(env, &SPEC)?;

        Ok(Self {
            smtp_host: section.string("smtp_host", "localhost"),
            smtp_port: section.integer("smtp_port", 587)?,
            smtp_username: section.string("smtp_username", ""),
            smtp_password: section.string("smtp_password", ""),
            smtp_use_tls: section.boolean("smtp_use_tls", true)?,
            from_email: section.string("from_email", "noreply@email.com"),
            from_name: section.string("from_name", "Auth Service"),
            verification_token_expire_hours: section.integer("verification_token_expire_hours", 24)?,
        })
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            smtp_use_tls: true,
            from_email: "noreply@email.com".to_string(),
            from_name: "Auth Service".to_string(),
            verification_token_expire_hours: 24,
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &REDACTED)
            .field("smtp_use_tls", &self.smtp_use_tls)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("verification_token_expire_hours", &self.verification_token_expire_hours)
            .finish()
    }
}
