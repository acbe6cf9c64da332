/**
 * Credential verifier: runs one probe and turns its outcome into a verdict.
 */
use slog::{debug, o, warn, Logger};

use super::{Credentials, Principal};
use crate::probe::{HttpProbe, ProbeFailure, ProbeOutcome, ProbeTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Authenticated(Principal),
    /// The remote side refused the credentials. Never says why.
    Rejected,
    Unreachable(ProbeFailure),
}

pub struct CredentialVerifier<P> {
    logger: Logger,
    target: ProbeTarget,
    realm_name: String,
    probe: P,
}

impl<P: HttpProbe> CredentialVerifier<P> {
    /**
     * @param logger Parent logger.
     * @param target The endpoint every verification probes.
     * @param realm_name Name stamped on principals this verifier produces.
     * @param probe The probe client.
     */
    pub fn new(logger: &Logger, target: ProbeTarget, realm_name: &str, probe: P) -> Self {
        Self {
            logger: logger.new(o!("component" => "verifier")),
            target,
            realm_name: realm_name.to_string(),
            probe,
        }
    }

    pub fn target(&self) -> &ProbeTarget {
        &self.target
    }

    pub async fn verify(&self, credentials: &Credentials) -> VerificationResult {
        match self.probe.probe(&self.target, credentials).await {
            ProbeOutcome::Success => {
                debug!(self.logger, "Credentials accepted for {}", credentials.username());
                VerificationResult::Authenticated(Principal::new(
                    credentials.username(),
                    self.realm_name.as_str(),
                ))
            }
            ProbeOutcome::Unauthorized => {
                debug!(self.logger, "Credentials rejected for {}", credentials.username());
                VerificationResult::Rejected
            }
            ProbeOutcome::TransportError(failure) => {
                warn!(
                    self.logger,
                    "Probe of {} failed: {}",
                    self.target.url(),
                    failure
                );
                VerificationResult::Unreachable(failure)
            }
        }
    }
}
