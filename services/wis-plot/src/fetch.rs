//! HTTP retrieval of station files from the THREDDS file server.
//!
//! Each file is streamed into memory; monthly station files are a few
//! megabytes. No retries: a failed request fails the run.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::error::FetchError;

/// Upper bound on the buffer reserved from a `Content-Length` header.
const MAX_PREALLOCATE: u64 = 64 * 1024 * 1024;

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// HTTP request timeout
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Download progress information.
#[derive(Debug, Clone)]
pub struct FetchProgress {
    pub url: String,
    pub total_bytes: Option<u64>,
    pub downloaded_bytes: u64,
    pub started_at: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
}

impl FetchProgress {
    fn start(url: &str, total_bytes: Option<u64>) -> Self {
        let now = Utc::now();
        Self {
            url: url.to_string(),
            total_bytes,
            downloaded_bytes: 0,
            started_at: now,
            last_update: now,
        }
    }

    pub fn percent_complete(&self) -> Option<f64> {
        self.total_bytes
            .filter(|total| *total > 0)
            .map(|total| (self.downloaded_bytes as f64 / total as f64) * 100.0)
    }

    pub fn bytes_per_second(&self) -> f64 {
        let elapsed = (self.last_update - self.started_at).num_milliseconds() as f64 / 1000.0;
        if elapsed > 0.0 {
            self.downloaded_bytes as f64 / elapsed
        } else {
            0.0
        }
    }
}

/// Streams station files over HTTP.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Download `url` into memory.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let unreachable = |reason: String| FetchError::ResourceUnreachable {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable(format!("HTTP error: {}", status)));
        }

        let mut progress = FetchProgress::start(url, response.content_length());
        // The header is untrusted; a short body is caught by the size check below
        let reserve = progress.total_bytes.unwrap_or(0).min(MAX_PREALLOCATE);
        let mut body = Vec::with_capacity(reserve as usize);
        let mut bytes_since_update = 0u64;
        let update_interval = 1_000_000; // Log every 1MB

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| unreachable(format!("Error reading response chunk: {}", e)))?;
            body.extend_from_slice(&chunk);

            progress.downloaded_bytes += chunk.len() as u64;
            progress.last_update = Utc::now();
            bytes_since_update += chunk.len() as u64;

            if bytes_since_update >= update_interval {
                bytes_since_update = 0;
                debug!(
                    downloaded = progress.downloaded_bytes,
                    total = ?progress.total_bytes,
                    percent = ?progress.percent_complete().map(|p| format!("{:.1}%", p)),
                    "Download progress"
                );
            }
        }

        if let Some(expected) = progress.total_bytes {
            if progress.downloaded_bytes != expected {
                return Err(unreachable(format!(
                    "Download size mismatch: expected {} bytes, got {}",
                    expected, progress.downloaded_bytes
                )));
            }
        }

        info!(
            bytes = progress.downloaded_bytes,
            speed = format!("{:.1} KB/s", progress.bytes_per_second() / 1024.0),
            "Downloaded file"
        );

        Ok(Bytes::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        let mut progress = FetchProgress::start("http://example.com/file", Some(1000));
        progress.downloaded_bytes = 500;

        assert_eq!(progress.percent_complete(), Some(50.0));
    }

    #[test]
    fn test_progress_no_total() {
        let mut progress = FetchProgress::start("http://example.com/file", None);
        progress.downloaded_bytes = 500;

        assert_eq!(progress.percent_complete(), None);
    }

    #[test]
    fn test_progress_speed_without_elapsed_time() {
        let progress = FetchProgress::start("http://example.com/file", Some(10));
        assert_eq!(progress.bytes_per_second(), 0.0);
    }
}
