/**
 * Identity types exchanged between a realm and its host.
 */
use std::fmt;

/**
 * A username/password pair submitted for authentication. Lives only for the
 * duration of one call; the password is never printed.
 */
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/**
 * An authenticated subject, tagged with the realm that vouched for it.
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    username: String,
    realm_name: String,
}

impl Principal {
    pub fn new(username: impl Into<String>, realm_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            realm_name: realm_name.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.realm_name)
    }
}

/**
 * The principals a subject holds, possibly from several realms. The first
 * one added is the primary principal.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalCollection {
    principals: Vec<Principal>,
}

impl PrincipalCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /**
     * A collection holding a single principal for `username` in `realm_name`.
     */
    pub fn single(username: impl Into<String>, realm_name: impl Into<String>) -> Self {
        Self::from(Principal::new(username, realm_name))
    }

    pub fn add(&mut self, principal: Principal) {
        self.principals.push(principal);
    }

    pub fn primary_principal(&self) -> Option<&Principal> {
        self.principals.first()
    }

    /**
     * Principals contributed by the named realm, in insertion order.
     */
    pub fn from_realm<'a>(&'a self, realm_name: &'a str) -> impl Iterator<Item = &'a Principal> + 'a {
        self.principals
            .iter()
            .filter(move |p| p.realm_name() == realm_name)
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }
}

impl From<Principal> for PrincipalCollection {
    fn from(principal: Principal) -> Self {
        Self {
            principals: vec![principal],
        }
    }
}

/**
 * What a successful authentication hands back to the host: the identity the
 * subject carries for the rest of its session.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationInfo {
    principal: Principal,
}

impl AuthenticationInfo {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn principals(&self) -> PrincipalCollection {
        PrincipalCollection::from(self.principal.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("popeye", "spinach");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("popeye"));
        assert!(!printed.contains("spinach"));
    }

    #[test]
    fn test_primary_principal_is_first() {
        let mut principals = PrincipalCollection::single("popeye", "url");
        principals.add(Principal::new("olive", "ldap"));
        assert_eq!(principals.len(), 2);
        assert_eq!(principals.primary_principal().unwrap().username(), "popeye");
    }

    #[test]
    fn test_from_realm_filters() {
        let mut principals = PrincipalCollection::new();
        assert!(principals.is_empty());
        assert!(principals.primary_principal().is_none());

        principals.add(Principal::new("olive", "ldap"));
        principals.add(Principal::new("popeye", "url"));
        let names: Vec<&str> = principals.from_realm("url").map(|p| p.username()).collect();
        assert_eq!(names, vec!["popeye"]);
    }

    #[test]
    fn test_authentication_info_principals() {
        let info = AuthenticationInfo::new(Principal::new("popeye", "url"));
        assert_eq!(info.principal().to_string(), "popeye@url");
        assert_eq!(info.principals(), PrincipalCollection::single("popeye", "url"));
    }
}
