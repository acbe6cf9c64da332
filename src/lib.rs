//! A security realm that authenticates users by replaying their credentials
//! as HTTP Basic authentication against a remote URL, and grants every
//! authenticated principal one configured role.

pub mod auth;
pub mod config;
pub mod logging;
pub mod probe;

#[cfg(test)]
mod test_support;

pub use auth::{
    AuthenticationInfo, Credentials, Principal, PrincipalCollection, Realm, RealmConfig,
    RealmError, UrlRealm,
};
pub use probe::{DefaultHttpClientProvider, HttpClientProvider, HttpProbe, ProbeOutcome};
