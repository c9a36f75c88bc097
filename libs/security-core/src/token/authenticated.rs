use std::collections::BTreeSet;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, MutableToken, Token, TokenState};

/// Token produced by a fresh, credential-based authentication.
///
/// The resolver classifies it as full-fledged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedToken {
    #[serde(flatten)]
    state: TokenState,
    firewall_name: String,
    /// Never serialized/persisted.
    #[serde(skip)]
    credentials: Option<SecretString>,
}

impl AuthenticatedToken {
    /// Create an authenticated token for `user_identifier` issued by `firewall_name`.
    ///
    /// The token is authenticated from construction, whether or not roles are granted.
    #[must_use]
    pub fn new(user_identifier: impl Into<String>, firewall_name: impl Into<String>) -> Self {
        Self {
            state: TokenState::new(user_identifier).authenticated(true),
            firewall_name: firewall_name.into(),
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state = self.state.with_roles(roles);
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: impl Into<SecretString>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    #[must_use]
    pub fn firewall_name(&self) -> &str {
        &self.firewall_name
    }
}

impl Token for AuthenticatedToken {
    fn user_identifier(&self) -> &str {
        self.state.user_identifier()
    }

    fn credentials(&self) -> Option<&SecretString> {
        self.credentials.as_ref()
    }

    fn role_names(&self) -> &BTreeSet<String> {
        self.state.roles()
    }

    fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    fn attributes(&self) -> &Attributes {
        self.state.attributes()
    }
}

impl MutableToken for AuthenticatedToken {
    fn set_user_identifier(&mut self, identifier: String) {
        self.state.set_user_identifier(identifier);
    }

    fn set_authenticated(&mut self, authenticated: bool) {
        self.state.set_authenticated(authenticated);
    }

    fn set_attributes(&mut self, attributes: Attributes) {
        self.state.set_attributes(attributes);
    }

    fn set_attribute(&mut self, name: String, value: Value) {
        self.state.set_attribute(name, value);
    }

    fn erase_credentials(&mut self) {
        self.credentials = None;
    }
}

impl fmt::Display for AuthenticatedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt_as(f, "AuthenticatedToken")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::TokenKind;

    #[test]
    fn new_token_is_authenticated_standard_kind() {
        let token = AuthenticatedToken::new("alice", "main").with_roles(["ROLE_USER"]);

        assert_eq!(token.kind(), TokenKind::Standard);
        assert!(token.is_authenticated());
        assert_eq!(token.user_identifier(), "alice");
        assert_eq!(token.firewall_name(), "main");
        assert!(token.role_names().contains("ROLE_USER"));
    }

    #[test]
    fn new_token_without_roles_is_authenticated() {
        let token = AuthenticatedToken::new("alice", "main");

        assert!(token.role_names().is_empty());
        assert!(token.is_authenticated());

        let token = token.with_roles(Vec::<String>::new());
        assert!(token.is_authenticated());
    }

    #[test]
    fn erase_credentials_scrubs_secret() {
        let mut token =
            AuthenticatedToken::new("alice", "main").with_credentials("p4ssw0rd".to_owned());
        assert_eq!(
            token.credentials().map(ExposeSecret::expose_secret),
            Some("p4ssw0rd"),
        );

        token.erase_credentials();

        assert!(token.credentials().is_none());
    }

    #[test]
    #[allow(clippy::use_debug)]
    fn debug_redacts_credentials() {
        let token =
            AuthenticatedToken::new("alice", "main").with_credentials("p4ssw0rd".to_owned());

        assert!(!format!("{token:?}").contains("p4ssw0rd"));
    }

    #[test]
    fn display_lists_user_and_roles() {
        let token =
            AuthenticatedToken::new("alice", "main").with_roles(["ROLE_USER", "ROLE_ADMIN"]);

        assert_eq!(
            token.to_string(),
            r#"AuthenticatedToken(user="alice", roles="ROLE_ADMIN, ROLE_USER")"#
        );
    }

    #[test]
    fn serialization_skips_credentials() {
        let mut token = AuthenticatedToken::new("alice", "main")
            .with_roles(["ROLE_USER"])
            .with_credentials("p4ssw0rd".to_owned());
        token.set_attribute("tenant".to_owned(), Value::from("acme"));

        let serialized = serde_json::to_string(&token).unwrap();
        assert!(!serialized.contains("p4ssw0rd"));

        let restored: AuthenticatedToken = serde_json::from_str(&serialized).unwrap();
        assert_eq!(restored.user_identifier(), "alice");
        assert_eq!(restored.firewall_name(), "main");
        assert_eq!(restored.role_names(), token.role_names());
        assert_eq!(restored.attribute("tenant"), Some(&Value::from("acme")));
        assert!(restored.is_authenticated());
        assert!(restored.credentials().is_none());
    }

    #[test]
    fn set_authenticated_flips_flag() {
        let mut token = AuthenticatedToken::new("alice", "main");
        token.set_authenticated(false);

        assert!(!token.is_authenticated());
    }
}
