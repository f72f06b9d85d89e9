use thiserror::Error;

/// Errors raised while fetching, validating or formatting homework statuses.
///
/// Everything except `Config` is contained by the poller: it is logged,
/// reported to the chat and the loop carries on.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Endpoint {endpoint} is unavailable, API response code: {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed API response: {0}")]
    Shape(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Homework record has no `{0}` field")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Delivery failure reported by a notifier. Always swallowed by the caller.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Notification rejected ({status}): {description}")]
    Rejected { status: u16, description: String },
}
