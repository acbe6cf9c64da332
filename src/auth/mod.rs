/**
 * Authentication and authorization contract between a host and its realms,
 * plus the URL realm implementation.
 */
use async_trait::async_trait;

mod cache;
mod error;
mod principal;
mod realm;
mod verifier;

pub use cache::PrincipalCache;
pub use error::RealmError;
pub use principal::{AuthenticationInfo, Credentials, Principal, PrincipalCollection};
pub use realm::{RealmConfig, UrlRealm, DEFAULT_REALM_NAME};
pub use verifier::{CredentialVerifier, VerificationResult};

/**
 * A pluggable source of identities and roles for a host security layer.
 *
 * Realms are shared between request handlers and may be called
 * concurrently; none of these methods may keep per-request state.
 */
#[async_trait]
pub trait Realm: Send + Sync {
    fn name(&self) -> &str;

    /**
     * Whether this realm can attempt to authenticate these credentials at all.
     */
    fn supports(&self, credentials: &Credentials) -> bool;

    /**
     * Authenticates a username/password pair.
     *
     * @param credentials The submitted credentials.
     * @return The subject's identity, `UnknownAccount` for any rejected
     *   credentials, or `ServiceUnavailable` when no verdict could be reached.
     */
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticationInfo, RealmError>;

    /**
     * Succeeds iff the subject holds `role` in this realm, otherwise fails with `Unauthorized`.
     */
    fn check_role(&self, principals: &PrincipalCollection, role: &str) -> Result<(), RealmError>;

    fn has_role(&self, principals: &PrincipalCollection, role: &str) -> bool {
        self.check_role(principals, role).is_ok()
    }
}
