/**
 * HTTP client construction, delegated to an injectable provider.
 */
use std::time::Duration;

use reqwest::redirect::Policy;

use crate::config::Settings;

use super::ProbeFailure;

/**
 * The shared HTTP context handed to a client provider.
 *
 * Fields:
 * - `connect_timeout`: Upper bound for connecting to the probe target. Unset means the client default.
 * - `request_timeout`: Upper bound for the whole request. Unset means no timeout.
 * - `user_agent`: Value of the `User-Agent` header, if any.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteContext {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl RemoteContext {
    /**
     * Builds the context from loaded settings. Zero timeouts and an empty
     * user agent are treated as "not configured".
     */
    pub fn from_settings(settings: &Settings) -> Self {
        let millis = |value: u64| (value > 0).then(|| Duration::from_millis(value));
        Self {
            connect_timeout: millis(settings.connect_timeout_ms),
            request_timeout: millis(settings.request_timeout_ms),
            user_agent: Some(settings.user_agent.clone()).filter(|ua| !ua.is_empty()),
        }
    }
}

/**
 * Factory producing a configured HTTP client for a given context.
 */
pub trait HttpClientProvider: Send + Sync {
    fn create_http_client(&self, context: &RemoteContext) -> Result<reqwest::Client, ProbeFailure>;
}

/**
 * Builds a plain `reqwest::Client` honouring the context's timeouts and user agent.
 *
 * Redirects are never followed; a 3xx from the probe target is classified as-is.
 */
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHttpClientProvider;

impl HttpClientProvider for DefaultHttpClientProvider {
    fn create_http_client(&self, context: &RemoteContext) -> Result<reqwest::Client, ProbeFailure> {
        let mut builder = reqwest::Client::builder().redirect(Policy::none());
        if let Some(timeout) = context.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = context.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &context.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        builder
            .build()
            .map_err(|e| ProbeFailure::ClientUnavailable(e.to_string()))
    }
}
