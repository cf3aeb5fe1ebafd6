use std::{env, fs};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

use crate::email::gmail::GmailCredentials;

const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DIGEST_SIZE: usize = 3;

pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// The zone every lifecycle decision is made in. One campus, one clock.
    pub reference_timezone: Tz,
    /// How many top-ranked posts the daily digest includes.
    pub digest_size: usize,
    pub gmail: Option<GmailCredentials>,
    pub geocoding_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/noms".to_string()),
            reference_timezone: parse_timezone(env::var("REFERENCE_TIMEZONE").ok()),
            digest_size: env::var("DIGEST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DIGEST_SIZE),
            gmail: gmail_credentials(),
            geocoding_api_key: secret("GEOCODING_API_KEY"),
        }
    }

    /// Current time on the reference clock.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.reference_timezone)
    }
}

fn parse_timezone(value: Option<String>) -> Tz {
    let fallback = || DEFAULT_TIMEZONE.parse().expect("default time zone is valid");
    match value {
        Some(name) => name.parse().unwrap_or_else(|_| {
            tracing::warn!(%name, "unrecognized REFERENCE_TIMEZONE, using {DEFAULT_TIMEZONE}");
            fallback()
        }),
        None => fallback(),
    }
}

/// A secret comes from the environment or, as on a container platform,
/// from a file mounted under /run/secrets.
fn secret(name: &str) -> Option<String> {
    if let Ok(value) = env::var(name) {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }
    fs::read_to_string(format!("/run/secrets/{name}"))
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn gmail_credentials() -> Option<GmailCredentials> {
    let client_id = secret("GMAIL_CLIENT_ID");
    let client_secret = secret("GMAIL_CLIENT_SECRET");
    let refresh_token = secret("GMAIL_REFRESH_TOKEN");

    match (client_id, client_secret, refresh_token) {
        (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(GmailCredentials {
            client_id,
            client_secret,
            refresh_token,
            sender: secret("GMAIL_SENDER").unwrap_or_else(|| "me".to_string()),
        }),
        (None, None, None) => None,
        _ => {
            tracing::warn!("incomplete Gmail credentials, email delivery disabled");
            None
        }
    }
}
