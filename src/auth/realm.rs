/**
 * A realm that authenticates against a remote URL protected by HTTP Basic
 * authentication and grants one fixed role to everyone it authenticates.
 */
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use slog::{debug, error, info, o, trace, Logger};

use super::cache::PrincipalCache;
use super::verifier::{CredentialVerifier, VerificationResult};
use super::{AuthenticationInfo, Credentials, PrincipalCollection, Realm, RealmError};
use crate::config::Settings;
use crate::probe::{HttpClientProvider, HttpProbe, ProbeTarget, RemoteContext, ReqwestProbe};

pub const DEFAULT_REALM_NAME: &str = "url";

/**
 * Realm configuration.
 *
 * Fields:
 * - `name`: Realm name, stamped on every principal this realm produces.
 * - `probe_url`: Absolute http(s) URL probed with the submitted credentials.
 * - `role_name`: The single role granted to every authenticated principal.
 * - `cache_ttl`: How long a verified principal is remembered. `None` disables caching.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealmConfig {
    pub name: String,
    pub probe_url: Url,
    pub role_name: String,
    pub cache_ttl: Option<Duration>,
}

impl RealmConfig {
    pub fn new(probe_url: &str, role_name: &str) -> Result<Self, RealmError> {
        Self::validated(DEFAULT_REALM_NAME, probe_url, role_name, None)
    }

    pub fn with_name(mut self, name: &str) -> Result<Self, RealmError> {
        if name.trim().is_empty() {
            return Err(RealmError::InvalidConfiguration(
                "realm name must not be empty".to_string(),
            ));
        }
        self.name = name.to_string();
        Ok(self)
    }

    pub fn with_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.cache_ttl = ttl.filter(|ttl| !ttl.is_zero());
        self
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, RealmError> {
        let ttl = (settings.cache_ttl_secs > 0).then(|| Duration::from_secs(settings.cache_ttl_secs));
        Self::validated(
            &settings.realm_name,
            &settings.probe_url,
            &settings.role_name,
            ttl,
        )
    }

    fn validated(
        name: &str,
        probe_url: &str,
        role_name: &str,
        cache_ttl: Option<Duration>,
    ) -> Result<Self, RealmError> {
        let probe_url = Url::parse(probe_url).map_err(|e| {
            RealmError::InvalidConfiguration(format!("invalid probe URL '{probe_url}': {e}"))
        })?;
        if !matches!(probe_url.scheme(), "http" | "https") {
            return Err(RealmError::InvalidConfiguration(format!(
                "probe URL must use http or https, got '{}'",
                probe_url.scheme()
            )));
        }
        if role_name.trim().is_empty() {
            return Err(RealmError::InvalidConfiguration(
                "role name must not be empty".to_string(),
            ));
        }
        Self {
            name: DEFAULT_REALM_NAME.to_string(),
            probe_url,
            role_name: role_name.to_string(),
            cache_ttl: None,
        }
        .with_name(name)
        .map(|config| config.with_cache_ttl(cache_ttl))
    }
}

pub struct UrlRealm<P> {
    logger: Logger,
    name: String,
    role_name: String,
    verifier: CredentialVerifier<P>,
    cache: Option<PrincipalCache>,
}

impl UrlRealm<ReqwestProbe> {
    /**
     * Builds a realm probing with a reqwest client obtained from `provider`.
     *
     * @param logger Parent logger.
     * @param settings Loaded settings; supply the probe URL, role, realm name, cache TTL and probe behaviour.
     * @param provider HTTP client factory, usually shared with the rest of the host.
     * @return The realm, or `InvalidConfiguration`.
     */
    pub fn from_settings(
        logger: &Logger,
        settings: &Settings,
        provider: Arc<dyn HttpClientProvider>,
    ) -> Result<Self, RealmError> {
        let config = RealmConfig::from_settings(settings)?;
        let probe = ReqwestProbe::new(logger, RemoteContext::from_settings(settings), provider)
            .with_method(settings.probe_method)
            .with_mode(settings.probe_mode);
        Ok(Self::new(logger, config, probe))
    }
}

impl<P: HttpProbe> UrlRealm<P> {
    pub fn new(logger: &Logger, config: RealmConfig, probe: P) -> Self {
        let logger = logger.new(o!("realm" => config.name.clone()));
        let verifier = CredentialVerifier::new(
            &logger,
            ProbeTarget::new(config.probe_url),
            &config.name,
            probe,
        );
        Self {
            cache: config.cache_ttl.map(PrincipalCache::new),
            logger,
            name: config.name,
            role_name: config.role_name,
            verifier,
        }
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn probe_target(&self) -> &ProbeTarget {
        self.verifier.target()
    }
}

#[async_trait]
impl<P: HttpProbe> Realm for UrlRealm<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, credentials: &Credentials) -> bool {
        !credentials.username().is_empty()
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticationInfo, RealmError> {
        if !self.supports(credentials) {
            debug!(self.logger, "Refusing credentials without a username");
            return Err(RealmError::UnknownAccount);
        }

        if let Some(principal) = self.cache.as_ref().and_then(|cache| cache.get(credentials)) {
            trace!(self.logger, "Cached principal for {}", principal.username());
            return Ok(AuthenticationInfo::new(principal));
        }

        match self.verifier.verify(credentials).await {
            VerificationResult::Authenticated(principal) => {
                if let Some(cache) = &self.cache {
                    cache.insert(credentials, principal.clone());
                }
                info!(self.logger, "Authenticated {}", principal.username());
                Ok(AuthenticationInfo::new(principal))
            }
            VerificationResult::Rejected => {
                if let Some(cache) = &self.cache {
                    cache.invalidate(credentials);
                }
                debug!(self.logger, "Unknown account or bad credentials for {}", credentials.username());
                Err(RealmError::UnknownAccount)
            }
            VerificationResult::Unreachable(failure) => {
                error!(
                    self.logger,
                    "Authentication service at {} unavailable: {}",
                    self.verifier.target().url(),
                    failure
                );
                Err(RealmError::ServiceUnavailable(failure))
            }
        }
    }

    fn check_role(&self, principals: &PrincipalCollection, role: &str) -> Result<(), RealmError> {
        let unauthorized = || RealmError::Unauthorized {
            role: role.to_string(),
        };

        let principal = principals.primary_principal().ok_or_else(unauthorized)?;
        if principal.realm_name() != self.name {
            trace!(self.logger, "Principal {} belongs to another realm", principal);
            return Err(unauthorized());
        }
        if role != self.role_name {
            debug!(self.logger, "Denied role {} to {}", role, principal.username());
            return Err(unauthorized());
        }
        Ok(())
    }
}
