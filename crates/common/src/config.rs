use std::ops::RangeInclusive;

use crate::error::TrackerError;

const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Upper bound on `LOOKBACK_DAYS` (about a century).
pub const MAX_LOOKBACK_DAYS: u64 = 36_500;

/// Variables that must be present (and non-blank) for the tracker to start.
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Application configuration loaded from environment variables.
///
/// Built once at startup and handed to the poller; lives for the whole process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth token for the homework review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives status notifications
    pub telegram_chat_id: String,

    /// Homework statuses endpoint
    pub practicum_endpoint: String,

    /// Telegram Bot API base URL (overridable for tests and proxies)
    pub telegram_api_url: String,

    /// Pause between two polls in seconds (default: 600)
    pub retry_interval_secs: u64,

    /// How far back the poll window reaches, in days (default: 30)
    pub lookback_days: u64,

    /// Per-request timeout for both outbound APIs in seconds (default: 30)
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, TrackerError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as missing. All missing required variables are
    /// reported together in a single `TrackerError::Config`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TrackerError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|&key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(TrackerError::Config(format!(
                "required environment variables are not set: {}",
                missing.join(", ")
            )));
        }

        let required = |key: &str| {
            get(key).ok_or_else(|| TrackerError::Config(format!("{key} is not set")))
        };
        let number =
            |key: &str, default: u64, range: RangeInclusive<u64>| -> Result<u64, TrackerError> {
                let value = match get(key) {
                    Some(raw) => raw
                        .trim()
                        .parse::<u64>()
                        .map_err(|_| TrackerError::Config(format!("{key} must be a valid u64")))?,
                    None => default,
                };
                if !range.contains(&value) {
                    return Err(TrackerError::Config(format!(
                        "{key} must be between {} and {}",
                        range.start(),
                        range.end()
                    )));
                }
                Ok(value)
            };

        Ok(Self {
            practicum_token: required("PRACTICUM_TOKEN")?,
            telegram_token: required("TELEGRAM_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            practicum_endpoint: get("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_interval_secs: number("RETRY_INTERVAL_SECS", 600, 1..=u64::MAX)?,
            lookback_days: number("LOOKBACK_DAYS", 30, 0..=MAX_LOOKBACK_DAYS)?,
            request_timeout_secs: number("REQUEST_TIMEOUT_SECS", 30, 1..=u64::MAX)?,
        })
    }
}
