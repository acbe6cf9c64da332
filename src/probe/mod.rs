/**
 * Remote probe client.
 *
 * A probe is a single HTTP request carrying Basic credentials, sent to a
 * fixed URL purely to find out whether the remote side accepts them. The
 * HTTP client itself is never built here: it comes from an injected
 * `HttpClientProvider`, so pooled clients and test doubles are swappable.
 */
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::{StatusCode, Url};

use crate::auth::Credentials;

pub mod challenge;
pub mod client;
mod mode;
mod reqwest_probe;

pub use client::{DefaultHttpClientProvider, HttpClientProvider, RemoteContext};
pub use mode::{ProbeMethod, ProbeMode};
pub use reqwest_probe::ReqwestProbe;

/**
 * The endpoint a realm probes. One per realm instance, fixed at construction.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    url: Url,
}

impl ProbeTarget {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/**
 * Why a probe could not produce an authentication verdict.
 */
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
    #[error("HTTP client unavailable: {0}")]
    ClientUnavailable(String),
}

/**
 * Outcome of a single probe.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Unauthorized,
    TransportError(ProbeFailure),
}

/**
 * Issues an authenticated request against a target and reports how the
 * remote side answered. Implementations must be safe to share between
 * concurrent callers.
 */
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn probe(&self, target: &ProbeTarget, credentials: &Credentials) -> ProbeOutcome;
}

#[async_trait]
impl<P: HttpProbe + ?Sized> HttpProbe for Arc<P> {
    async fn probe(&self, target: &ProbeTarget, credentials: &Credentials) -> ProbeOutcome {
        (**self).probe(target, credentials).await
    }
}

/**
 * Builds the `Authorization` header value for HTTP Basic authentication.
 *
 * @param credentials The username/password pair.
 * @return `Basic base64(username ":" password)`
 */
pub fn basic_authorization(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username(), credentials.password());
    format!("Basic {}", STANDARD.encode(raw.as_bytes()))
}

/**
 * Maps a final response status onto a probe outcome.
 *
 * Only 2xx grants; 401 denies. Every other status is an unexpected answer
 * from the endpoint and must never be read as a grant.
 */
pub fn classify(status: StatusCode) -> ProbeOutcome {
    if status.is_success() {
        ProbeOutcome::Success
    } else if status == StatusCode::UNAUTHORIZED {
        ProbeOutcome::Unauthorized
    } else {
        ProbeOutcome::TransportError(ProbeFailure::UnexpectedStatus(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;

    use super::*;

    #[test]
    fn test_basic_authorization_header() {
        let credentials = Credentials::new("popeye", "spinach");
        assert_eq!(basic_authorization(&credentials), "Basic cG9wZXllOnNwaW5hY2g=");
    }

    #[test]
    fn test_basic_authorization_keeps_colons_in_password() {
        let credentials = Credentials::new("user", "a:b");
        assert_eq!(basic_authorization(&credentials), "Basic dXNlcjphOmI=");
    }

    #[test]
    fn test_basic_authorization_utf8() {
        let credentials = Credentials::new("józef", "hasło");
        let header = basic_authorization(&credentials);
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "józef:hasło");
    }

    #[test]
    fn test_classify_success_range() {
        assert_eq!(classify(StatusCode::OK), ProbeOutcome::Success);
        assert_eq!(classify(StatusCode::NO_CONTENT), ProbeOutcome::Success);
    }

    #[test]
    fn test_classify_unauthorized() {
        assert_eq!(classify(StatusCode::UNAUTHORIZED), ProbeOutcome::Unauthorized);
    }

    #[test]
    fn test_classify_other_statuses_are_failures() {
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            assert_eq!(
                classify(status),
                ProbeOutcome::TransportError(ProbeFailure::UnexpectedStatus(status.as_u16()))
            );
        }
    }
}
