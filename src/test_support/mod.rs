//! Test utilities and mocks for sdkpack unit tests.
//!
//! The network collaborators ([`Probe`], [`ReleaseApi`]) get in-memory doubles
//! that record every request, so resolution can be tested without a server.
//!
//! # Example
//!
//! ```rust,ignore
//! use sdkpack::test_support::MockProbe;
//!
//! let probe = MockProbe::accept_all().reject("https://example.com/missing.zip");
//! // resolve something with &probe ...
//! assert_eq!(probe.requests().len(), 1);
//! ```

pub mod fixtures;

use std::collections::HashSet;
use std::sync::Mutex;

use url::Url;

use crate::core::{ArtifactUnavailableError, ReleaseError};
use crate::sources::{Probe, ReleaseApi};

pub use fixtures::*;

/// Existence probe answering from a fixed set of rejected URLs.
#[derive(Debug, Default)]
pub struct MockProbe {
    rejected: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl MockProbe {
    /// A probe for which every URL exists.
    pub fn accept_all() -> Self {
        MockProbe::default()
    }

    /// Make `url` answer 404.
    pub fn reject(mut self, url: impl Into<String>) -> Self {
        self.rejected.insert(url.into());
        self
    }

    /// URLs probed so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Probe for MockProbe {
    fn probe(&self, url: &Url) -> Result<(), ArtifactUnavailableError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        if self.rejected.contains(url.as_str()) {
            return Err(ArtifactUnavailableError {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            });
        }
        Ok(())
    }
}

/// Release API returning a canned tag, or failing.
#[derive(Debug)]
pub struct MockReleaseApi {
    tag: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockReleaseApi {
    pub fn with_tag(tag: impl Into<String>) -> Self {
        MockReleaseApi {
            tag: Some(tag.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every lookup fails with a request error.
    pub fn failing() -> Self {
        MockReleaseApi {
            tag: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(owner, repo)` pairs queried so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl ReleaseApi for MockReleaseApi {
    fn latest_tag(&self, owner: &str, repo: &str) -> Result<String, ReleaseError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((owner.to_string(), repo.to_string()));
        }
        self.tag.clone().ok_or_else(|| ReleaseError::Request {
            url: format!("https://api.github.com/repos/{owner}/{repo}/releases/latest"),
            message: "connection refused".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_probe_records_requests() {
        let probe = MockProbe::accept_all().reject("https://example.com/b.zip");
        let a = Url::parse("https://example.com/a.zip").unwrap();
        let b = Url::parse("https://example.com/b.zip").unwrap();

        assert!(probe.probe(&a).is_ok());
        assert!(probe.probe(&b).is_err());
        assert_eq!(
            probe.requests(),
            vec![a.to_string(), b.to_string()]
        );
    }

    #[test]
    fn test_mock_release_api() {
        let api = MockReleaseApi::with_tag("v24.05.01");
        assert_eq!(api.latest_tag("Sensing-Dev", "sensing-dev-installer").unwrap(), "v24.05.01");
        assert_eq!(api.calls().len(), 1);

        assert!(MockReleaseApi::failing().latest_tag("o", "r").is_err());
    }
}
