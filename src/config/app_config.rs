use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SMTP_FROM: &str = "ReGenflo <no-reply@lifely.health>";
pub const DEFAULT_LEAD_NOTIFY_EMAIL: &str = "care@lifely.ae";
pub const DEFAULT_WHATSAPP_NOTIFY_NUMBER: &str = "919726616008"; // +91 97266 16008
pub const DEFAULT_WHATSAPP_API_BASE: &str = "https://graph.facebook.com/v20.0";
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("unknown SMTP_TLS mode {0:?}, expected one of tls, starttls, opportunistic, none")]
    InvalidTlsMode(String),
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTlsMode {
    /// TLS from the first byte (SMTPS)
    Implicit,
    /// STARTTLS, refusing to continue without it
    StartTls,
    /// STARTTLS when the relay offers it, plaintext otherwise
    Opportunistic,
    None,
}

impl SmtpTlsMode {
    /// Fallback when `SMTP_TLS` is not set.
    pub fn for_port(port: u16) -> Self {
        if port == IMPLICIT_TLS_PORT {
            SmtpTlsMode::Implicit
        } else {
            SmtpTlsMode::Opportunistic
        }
    }
}

impl FromStr for SmtpTlsMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tls" | "implicit" | "wrapper" => Ok(SmtpTlsMode::Implicit),
            "starttls" | "required" => Ok(SmtpTlsMode::StartTls),
            "opportunistic" => Ok(SmtpTlsMode::Opportunistic),
            "none" | "plain" => Ok(SmtpTlsMode::None),
            other => Err(ConfigError::InvalidTlsMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub tls: Option<SmtpTlsMode>,
    pub notify_email: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            username: None,
            password: None,
            from: DEFAULT_SMTP_FROM.to_string(),
            tls: None,
            notify_email: DEFAULT_LEAD_NOTIFY_EMAIL.to_string(),
        }
    }
}

/// A fully configured SMTP relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRelay {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub tls: SmtpTlsMode,
}

impl SmtpConfig {
    /// Returns `None` unless host, port, username and password are all set.
    pub fn relay(&self) -> Option<SmtpRelay> {
        let port = self.port?;
        Some(SmtpRelay {
            host: self.host.clone()?,
            port,
            username: self.username.clone()?,
            password: self.password.clone()?,
            tls: self.tls.unwrap_or_else(|| SmtpTlsMode::for_port(port)),
        })
    }
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub token: Option<String>,
    pub phone_id: Option<String>,
    pub notify_number: String,
    pub api_base: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            token: None,
            phone_id: None,
            notify_number: DEFAULT_WHATSAPP_NOTIFY_NUMBER.to_string(),
            api_base: DEFAULT_WHATSAPP_API_BASE.to_string(),
        }
    }
}

impl WhatsAppConfig {
    /// `(token, phone_id)` when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.token.as_deref(), self.phone_id.as_deref()) {
            (Some(token), Some(phone_id)) => Some((token, phone_id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub smtp: SmtpConfig,
    pub whatsapp: WhatsAppConfig,
    pub http_timeout: Duration,
    pub blog_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub sentry_dsn: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            smtp: SmtpConfig::default(),
            whatsapp: WhatsAppConfig::default(),
            http_timeout: Duration::from_secs(10),
            blog_dir: PathBuf::from("content/blog"),
            static_dir: None,
            sentry_dsn: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every setting through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = AppConfig::default();

        let smtp = SmtpConfig {
            host: get("SMTP_HOST"),
            port: get("SMTP_PORT")
                .map(|value| parse_number("SMTP_PORT", value))
                .transpose()?,
            username: get("SMTP_USER"),
            password: get("SMTP_PASS"),
            from: get("SMTP_FROM").unwrap_or(defaults.smtp.from),
            tls: get("SMTP_TLS").map(|value| value.parse()).transpose()?,
            notify_email: get("LEAD_NOTIFY_EMAIL").unwrap_or(defaults.smtp.notify_email),
        };

        let whatsapp = WhatsAppConfig {
            token: get("WHATSAPP_TOKEN"),
            phone_id: get("WHATSAPP_PHONE_ID"),
            notify_number: get("WHATSAPP_NOTIFY_NUMBER").unwrap_or(defaults.whatsapp.notify_number),
            api_base: get("WHATSAPP_API_BASE").unwrap_or(defaults.whatsapp.api_base),
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number("HTTP_TIMEOUT_SECS", value)?),
            None => defaults.http_timeout,
        };

        Ok(AppConfig {
            host: get("HOST").unwrap_or(defaults.host),
            port: match get("PORT") {
                Some(value) => parse_number("PORT", value)?,
                None => defaults.port,
            },
            smtp,
            whatsapp,
            http_timeout,
            blog_dir: get("BLOG_DIR").map(PathBuf::from).unwrap_or(defaults.blog_dir),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            sentry_dsn: get("SENTRY_DSN"),
        })
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value })
}
