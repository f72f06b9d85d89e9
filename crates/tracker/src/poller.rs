use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use homework_common::error::TrackerError;
use homework_notifier::Notifier;

use crate::api::HomeworkSource;
use crate::response::check_response;
use crate::status::parse_status;

/// What a single poll iteration ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was sent to the chat.
    Sent,
    /// The status message matches the last one sent; nothing was sent.
    Unchanged,
    /// The API returned no homework records.
    NoUpdates,
    /// A stage failed; the failure was logged and reported to the chat.
    Failed,
}

/// Start of the poll window: `lookback_days` before `now`, in unix seconds.
pub fn poll_window_start(now: DateTime<Utc>, lookback_days: u64) -> Result<i64, TrackerError> {
    i64::try_from(lookback_days)
        .ok()
        .and_then(TimeDelta::try_days)
        .and_then(|lookback| now.checked_sub_signed(lookback))
        .map(|start| start.timestamp())
        .ok_or_else(|| {
            TrackerError::Config(format!("LOOKBACK_DAYS={lookback_days} is out of range"))
        })
}

/// Polls the homework API and forwards status changes to a chat.
///
/// The poll window is fixed at construction and never advanced, so every
/// iteration re-queries the same range.
pub struct StatusPoller<S, N> {
    source: S,
    notifier: N,
    chat_id: String,
    from_date: i64,
    retry_interval: Duration,
    last_message: Option<String>,
}

impl<S: HomeworkSource, N: Notifier> StatusPoller<S, N> {
    pub fn new(
        source: S,
        notifier: N,
        chat_id: String,
        from_date: i64,
        retry_interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            chat_id,
            from_date,
            retry_interval,
            last_message: None,
        }
    }

    /// Start the polling loop. Runs until the task is dropped.
    ///
    /// `poll_once` contains every failure, so the sleep runs exactly once per
    /// iteration whatever the outcome.
    pub async fn run(&mut self) {
        tracing::info!(
            from_date = self.from_date,
            retry_interval_secs = self.retry_interval.as_secs(),
            "Status poller started"
        );

        loop {
            let outcome = self.poll_once().await;
            tracing::debug!(?outcome, "Poll iteration finished");

            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Run one fetch → validate → format → notify iteration.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.check_for_update().await {
            Ok(None) => {
                tracing::debug!("No homework updates in the poll window");
                CycleOutcome::NoUpdates
            }
            Ok(Some(message)) if self.last_message.as_deref() == Some(message.as_str()) => {
                tracing::debug!("Homework status unchanged");
                CycleOutcome::Unchanged
            }
            Ok(Some(message)) => {
                self.notify(&message).await;
                self.last_message = Some(message);
                CycleOutcome::Sent
            }
            Err(e) => {
                tracing::error!(error = %e, "Homework status check failed");
                self.notify(&format!("Сбой в работе программы: {}", e)).await;
                CycleOutcome::Failed
            }
        }
    }

    /// Fetch, validate and format the most recent homework, if any.
    async fn check_for_update(&self) -> Result<Option<String>, TrackerError> {
        let body = self.source.homework_statuses(self.from_date).await?;
        let homeworks = check_response(&body)?;

        homeworks.first().map(parse_status).transpose()
    }

    /// Best-effort delivery: failures are logged, never propagated.
    async fn notify(&self, text: &str) {
        match self.notifier.send_message(&self.chat_id, text).await {
            Ok(()) => tracing::info!(chat_id = %self.chat_id, text, "Message sent"),
            Err(e) => tracing::error!(
                chat_id = %self.chat_id,
                error = %e,
                "Failed to send message"
            ),
        }
    }

    /// Last status message delivered (or attempted) to the chat.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_poll_window_start_thirty_days_back() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        assert_eq!(poll_window_start(now, 30).unwrap(), 1_700_000_000 - 30 * 86_400);
    }

    #[test]
    fn test_poll_window_start_zero_lookback_is_now() {
        let now = Utc.timestamp_opt(1_650_000_000, 0).single().unwrap();
        assert_eq!(poll_window_start(now, 0).unwrap(), 1_650_000_000);
    }

    #[test]
    fn test_poll_window_start_overflow_is_error() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        for days in [200_000_000_000_000, u64::MAX] {
            let err = poll_window_start(now, days).unwrap_err();
            assert!(matches!(err, TrackerError::Config(msg) if msg.contains("LOOKBACK_DAYS")));
        }
    }
}
