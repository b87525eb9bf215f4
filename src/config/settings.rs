//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_MAIL_QUEUE, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SMTP_FROM, DEFAULT_SMTP_PORT, MIN_JWT_SECRET_LENGTH,
};

/// Outbound mail settings.
///
/// `queue` names the apalis namespace the mail worker consumes; every
/// producer and the worker must agree on it.
#[derive(Clone)]
pub struct MailConfig {
    pub queue: String,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    smtp_pass: Option<String>,
    pub smtp_from: String,
}

impl MailConfig {
    /// Load mail settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            queue: env::var("MAIL_QUEUE").unwrap_or_else(|_| DEFAULT_MAIL_QUEUE.to_string()),
            smtp_host: env::var("SMTP_HOST").ok().filter(|h| !h.is_empty()),
            smtp_port: parse_or(env::var("SMTP_PORT").ok(), DEFAULT_SMTP_PORT),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_pass: env::var("SMTP_PASS").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_SMTP_FROM.to_string()),
        }
    }

    /// Whether an SMTP relay is configured (otherwise emails are only logged).
    pub fn is_smtp_configured(&self) -> bool {
        self.smtp_host.is_some()
    }

    /// SMTP password, if any.
    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_pass.as_deref()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            queue: DEFAULT_MAIL_QUEUE.to_string(),
            smtp_host: None,
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_user: None,
            smtp_pass: None,
            smtp_from: DEFAULT_SMTP_FROM.to_string(),
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("queue", &self.queue)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &"[REDACTED]")
            .field("smtp_from", &self.smtp_from)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub mail: MailConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("mail", &self.mail)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: parse_or(
                env::var("JWT_EXPIRATION_HOURS").ok(),
                DEFAULT_JWT_EXPIRATION_HOURS,
            ),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or(env::var("SERVER_PORT").ok(), DEFAULT_SERVER_PORT),
            mail: MailConfig::from_env(),
        }
    }

    /// Build a configuration from explicit values (tests and embedding).
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            mail: MailConfig::default(),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("2525".to_string()), 587u16), 2525);
        assert_eq!(parse_or(Some("not-a-port".to_string()), 587u16), 587);
        assert_eq!(parse_or(None, 587u16), 587);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Config::new("postgres://u:p@db/clinic", "x".repeat(40));
        config.mail.smtp_pass = Some("hunter2".to_string());

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("u:p@db"));
        assert!(rendered.contains("clinic::mail"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::new("sqlite::memory:", "x".repeat(40));
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }
}
