//! Blocking HTTP client with timeouts and bounded retries.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::core::{ArtifactUnavailableError, ReleaseError};
use crate::sources::{Probe, ReleaseApi};
use crate::util::config::NetConfig;

/// How many times a request is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based).
    pub fn delay(&self, retry: u32) -> Duration {
        self.backoff.saturating_mul(1 << retry.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Result of a single request attempt.
enum Attempt<T> {
    Done(T),
    /// Transient failure; try again if attempts remain
    Retry(String),
    /// Permanent failure
    Fail(String),
}

/// Classify a non-success status.
fn failed<T>(status: StatusCode) -> Attempt<T> {
    let message = format!("HTTP {}", status);
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Attempt::Retry(message)
    } else {
        Attempt::Fail(message)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

/// HTTP client used for artifact probes and release lookups.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
    api_base: String,
}

impl HttpClient {
    /// Build a client from the `[net]` configuration.
    pub fn new(config: &NetConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpClient {
            client,
            retry: config.retry_policy(),
            api_base: config.api_base(),
        })
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Point release lookups at a different API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Run `attempt` until it succeeds, fails permanently, or attempts run out.
    fn retrying<T>(&self, what: &str, mut attempt: impl FnMut() -> Attempt<T>) -> Result<T, String> {
        let attempts = self.retry.attempts.max(1);
        let mut last_error = String::new();

        for n in 0..attempts {
            if n > 0 {
                let delay = self.retry.delay(n - 1);
                tracing::debug!("retrying {} in {:?}", what, delay);
                thread::sleep(delay);
            }

            match attempt() {
                Attempt::Done(value) => return Ok(value),
                Attempt::Fail(message) => return Err(message),
                Attempt::Retry(message) => {
                    tracing::debug!("{} failed (attempt {}/{}): {}", what, n + 1, attempts, message);
                    last_error = message;
                }
            }
        }

        Err(last_error)
    }

    fn probe_once(&self, url: &Url) -> Attempt<()> {
        let response = match self.client.head(url.clone()).send() {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(e.to_string()),
        };

        let status = if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            match self.client.get(url.clone()).send() {
                Ok(response) => response.status(),
                Err(e) => return Attempt::Retry(e.to_string()),
            }
        } else {
            response.status()
        };

        if status.is_success() {
            Attempt::Done(())
        } else {
            failed(status)
        }
    }
}

impl Probe for HttpClient {
    fn probe(&self, url: &Url) -> Result<(), ArtifactUnavailableError> {
        tracing::debug!("probing {}", url);
        self.retrying(url.as_str(), || self.probe_once(url))
            .map_err(|reason| ArtifactUnavailableError {
                url: url.to_string(),
                reason,
            })
    }
}

impl ReleaseApi for HttpClient {
    fn latest_tag(&self, owner: &str, repo: &str) -> Result<String, ReleaseError> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base.trim_end_matches('/'),
            owner,
            repo
        );
        tracing::debug!("querying {}", url);

        let body = self
            .retrying(&url, || {
                let response = match self
                    .client
                    .get(&url)
                    .header(ACCEPT, "application/vnd.github+json")
                    .send()
                {
                    Ok(response) => response,
                    Err(e) => return Attempt::Retry(e.to_string()),
                };

                let status = response.status();
                if !status.is_success() {
                    return failed(status);
                }
                match response.text() {
                    Ok(body) => Attempt::Done(body),
                    Err(e) => Attempt::Retry(e.to_string()),
                }
            })
            .map_err(|message| ReleaseError::Request {
                url: url.clone(),
                message,
            })?;

        let release: LatestRelease =
            serde_json::from_str(&body).map_err(|source| ReleaseError::Decode {
                url: url.clone(),
                source,
            })?;

        release.tag_name.ok_or_else(|| ReleaseError::MissingTag {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}
