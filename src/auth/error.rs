use crate::probe::ProbeFailure;

/**
 * Failures a realm reports to its host.
 *
 * `UnknownAccount` deliberately covers both an unknown user and a wrong
 * password. `ServiceUnavailable` stays distinct so outages can be told apart
 * from bad credentials.
 */
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RealmError {
    #[error("unknown account or bad credentials")]
    UnknownAccount,
    #[error("authentication service unavailable: {0}")]
    ServiceUnavailable(#[source] ProbeFailure),
    #[error("subject does not have role [{role}]")]
    Unauthorized { role: String },
    #[error("invalid realm configuration: {0}")]
    InvalidConfiguration(String),
}

impl RealmError {
    /**
     * Whether retrying the same request later may succeed.
     */
    pub fn is_transient(&self) -> bool {
        matches!(self, RealmError::ServiceUnavailable(_))
    }
}
