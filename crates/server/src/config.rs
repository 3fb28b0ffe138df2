use std::{env, str::FromStr};

/// What a contact submission reports when its notification email fails.
/// The message itself is stored either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyFailurePolicy {
    /// The request fails with a server error.
    #[default]
    Fail,
    /// The request succeeds and the visitor sees a warning.
    Warn,
}

impl FromStr for NotifyFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "warn" => Ok(Self::Warn),
            other => Err(format!("unknown notification failure policy: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub static_path: String,
    pub media_path: String,
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password_hash: Option<String>,
    pub contact_email: String,
    pub default_from_email: String,
    pub smtp: Option<SmtpConfig>,
    pub notify_failure: NotifyFailurePolicy,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".to_string());

        let smtp = env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
            host,
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: env::var("SMTP_USERNAME").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
        });

        let notify_failure = match env::var("CONTACT_NOTIFY_FAILURE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}, falling back to 'fail'");
                NotifyFailurePolicy::Fail
            }),
            Err(_) => NotifyFailurePolicy::default(),
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./data/folio.db?mode=rwc".to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
            static_path: env::var("STATIC_PATH").unwrap_or_else(|_| "./static".to_string()),
            media_path: env::var("MEDIA_PATH").unwrap_or_else(|_| "./data/media".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-change-in-production".to_string()),
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|h| !h.trim().is_empty()),
            contact_email: env::var("CONTACT_EMAIL").unwrap_or_else(|_| admin_email.clone()),
            default_from_email: env::var("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@localhost".to_string()),
            admin_email,
            smtp,
            notify_failure,
        }
    }
}
