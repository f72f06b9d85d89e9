use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

use homework_common::error::TrackerError;

/// Source of raw homework status payloads.
pub trait HomeworkSource {
    /// Fetch statuses updated since `from_date` (unix seconds) as parsed JSON.
    fn homework_statuses(
        &self,
        from_date: i64,
    ) -> impl Future<Output = Result<serde_json::Value, TrackerError>> + Send;
}

/// HTTP client for the homework review API.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Result<Self, TrackerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| TrackerError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    fn request_error(&self, source: reqwest::Error) -> TrackerError {
        TrackerError::Request {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

impl HomeworkSource for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<serde_json::Value, TrackerError> {
        // Zero means "from now".
        let from_date = if from_date == 0 {
            Utc::now().timestamp()
        } else {
            from_date
        };

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TrackerError::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.json().await.map_err(|e| self.request_error(e))?;
        tracing::debug!(from_date, "Fetched homework statuses");
        Ok(body)
    }
}
