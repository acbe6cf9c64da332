/**
 * Initialize realm configuration, using hierarchical configuration
 * https://docs.rs/config/latest/config/
 *
 * 1. First url-realm.yaml is read
 * 2. Then url-realm.{environment}.yaml is read
 * 3. Then url-realm.local.yaml is read (this is normally used for dev and not checked in git)
 * 4. Finally, environment variables prefixed with URL_REALM_ are read
 */
use config::{Config, ConfigError, Environment, File};
use environment_type::EnvironmentType;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod environment_type;
mod loglevel_type;
mod probe_method_type;
mod probe_mode_type;

use crate::probe::{ProbeMethod, ProbeMode};

pub(crate) const ENVIRONMENT_VAR: &str = "URL_REALM_ENVIRONMENT";

/**
 * Represents the configuration settings for the URL realm.
 *
 * Fields:
 * - `environment`: The environment type (e.g., development, staging, or production).
 * - `log_level`: The logging level. By default, logging is inferred from environment type if no other settings are found.
 * - `realm_name`: Name of the realm, stamped on the principals it produces.
 * - `probe_url`: Absolute URL probed with HTTP Basic credentials. Must be set before a realm can be built.
 * - `role_name`: The single role granted to every authenticated principal.
 * - `probe_method`: `get` or `head`.
 * - `probe_mode`: `preemptive` (send credentials immediately) or `challenge` (wait for a 401 Basic challenge).
 * - `connect_timeout_ms`, `request_timeout_ms`: Probe timeouts, 0 leaves them unset.
 * - `cache_ttl_secs`: Lifetime of cached verified principals, 0 disables the cache.
 * - `user_agent`: User-Agent sent with probes, empty to send none.
 */
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: EnvironmentType,
    #[serde(deserialize_with = "loglevel_type::deserialize")]
    pub log_level: slog::Level,
    pub realm_name: String,
    pub probe_url: String,
    pub role_name: String,
    #[serde(deserialize_with = "probe_method_type::deserialize")]
    pub probe_method: ProbeMethod,
    #[serde(deserialize_with = "probe_mode_type::deserialize")]
    pub probe_mode: ProbeMode,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub cache_ttl_secs: u64,
    pub user_agent: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "production".into());
        let environment = EnvironmentType::from_str(&run_mode).unwrap_or(EnvironmentType::production);

        let s = Config::builder()
            // default config file
            .add_source(File::with_name("url-realm.yaml").required(false))
            // environment-based config file
            .add_source(
                File::with_name(&format!("url-realm.{}.yaml", environment.as_str())).required(false),
            )
            // local config file (don't check this into source control)
            .add_source(File::with_name("url-realm.local.yaml").required(false))
            .add_source(Environment::with_prefix("URL_REALM"))
            .set_default("environment", environment.as_str())?
            .set_default("log_level", environment.default_log_level())?
            .set_default("realm_name", crate::auth::DEFAULT_REALM_NAME)?
            .set_default("probe_url", "")?
            .set_default("role_name", "default-url-role")?
            .set_default("probe_method", ProbeMethod::default().as_str())?
            .set_default("probe_mode", ProbeMode::default().as_str())?
            .set_default("connect_timeout_ms", 0)?
            .set_default("request_timeout_ms", 0)?
            .set_default("cache_ttl_secs", 0)?
            .set_default("user_agent", concat!("url-realm/", env!("CARGO_PKG_VERSION")))?
            .build()?;

        s.try_deserialize()
    }
}
