/**
 * `HttpProbe` backed by a `reqwest::Client` obtained from a provider.
 */
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use slog::{debug, error, o, trace, warn, Logger};
use tokio::sync::OnceCell;

use super::challenge::find_basic_challenge;
use super::{
    basic_authorization, classify, HttpClientProvider, HttpProbe, ProbeFailure, ProbeMethod,
    ProbeMode, ProbeOutcome, ProbeTarget, RemoteContext,
};
use crate::auth::Credentials;

pub struct ReqwestProbe {
    logger: Logger,
    provider: Arc<dyn HttpClientProvider>,
    context: RemoteContext,
    method: ProbeMethod,
    mode: ProbeMode,
    client: OnceCell<Client>,
}

impl ReqwestProbe {
    /**
     * Creates a probe. The HTTP client is not built until the first probe,
     * after which the same client (and its connection pool) is reused.
     *
     * @param logger Parent logger.
     * @param context HTTP context handed to the provider.
     * @param provider Factory for the underlying HTTP client.
     */
    pub fn new(logger: &Logger, context: RemoteContext, provider: Arc<dyn HttpClientProvider>) -> Self {
        Self {
            logger: logger.new(o!("component" => "probe")),
            provider,
            context,
            method: ProbeMethod::default(),
            mode: ProbeMode::default(),
            client: OnceCell::new(),
        }
    }

    pub fn with_method(mut self, method: ProbeMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_mode(mut self, mode: ProbeMode) -> Self {
        self.mode = mode;
        self
    }

    async fn client(&self) -> Result<&Client, ProbeFailure> {
        self.client
            .get_or_try_init(|| async {
                debug!(self.logger, "Creating HTTP client for probes");
                self.provider.create_http_client(&self.context)
            })
            .await
    }

    fn request(&self, client: &Client, target: &ProbeTarget, authorization: Option<&str>) -> RequestBuilder {
        let builder = match self.method {
            ProbeMethod::Get => client.get(target.url().clone()),
            ProbeMethod::Head => client.head(target.url().clone()),
        };
        match authorization {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ProbeFailure> {
        builder.send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connect"
            } else {
                "request"
            };
            ProbeFailure::Transport(format!("{kind} error: {e}"))
        })
    }

    async fn send_with_credentials(
        &self,
        client: &Client,
        target: &ProbeTarget,
        authorization: &str,
    ) -> ProbeOutcome {
        match self.send(self.request(client, target, Some(authorization))).await {
            Ok(response) => classify(response.status()),
            Err(failure) => ProbeOutcome::TransportError(failure),
        }
    }

    /**
     * Sends the request anonymously first and answers a Basic challenge with
     * exactly one credentialed retry.
     */
    async fn send_after_challenge(
        &self,
        client: &Client,
        target: &ProbeTarget,
        authorization: &str,
    ) -> ProbeOutcome {
        let response = match self.send(self.request(client, target, None)).await {
            Ok(response) => response,
            Err(failure) => return ProbeOutcome::TransportError(failure),
        };

        let status = response.status();
        if status.is_success() {
            warn!(
                self.logger,
                "Probe target {} accepted an anonymous request, it does not enforce authentication",
                target.url()
            );
            return ProbeOutcome::Success;
        }
        if status != StatusCode::UNAUTHORIZED {
            return classify(status);
        }

        match find_basic_challenge(response.headers()) {
            Some(challenge) => {
                trace!(
                    self.logger,
                    "Answering Basic challenge for realm {:?}",
                    challenge.realm
                );
                self.send_with_credentials(client, target, authorization).await
            }
            None => {
                debug!(self.logger, "401 without a Basic challenge, not retrying");
                ProbeOutcome::Unauthorized
            }
        }
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn probe(&self, target: &ProbeTarget, credentials: &Credentials) -> ProbeOutcome {
        let client = match self.client().await {
            Ok(client) => client,
            Err(failure) => {
                error!(self.logger, "Unable to create HTTP client: {}", failure);
                return ProbeOutcome::TransportError(failure);
            }
        };

        let authorization = basic_authorization(credentials);
        let outcome = match self.mode {
            ProbeMode::Preemptive => self.send_with_credentials(client, target, &authorization).await,
            ProbeMode::Challenge => self.send_after_challenge(client, target, &authorization).await,
        };

        debug!(self.logger, "Probe finished";
            "url" => %target.url(),
            "method" => self.method.as_str(),
            "username" => credentials.username(),
            "outcome" => ?outcome);
        outcome
    }
}
