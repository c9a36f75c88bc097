use std::collections::BTreeSet;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, MutableToken, Token, TokenKind, TokenState};
use crate::error::TokenError;

/// Token for a principal restored from a persistent remember-me cookie
/// rather than from fresh credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RememberMeToken {
    #[serde(flatten)]
    state: TokenState,
    firewall_name: String,
    /// Key shared with the issuing firewall. Never serialized/persisted.
    #[serde(skip, default = "super::empty_secret")]
    secret: SecretString,
}

impl RememberMeToken {
    /// Create a remember-me token for `user_identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EmptyFirewallName`] if `firewall_name` is empty.
    pub fn new(
        user_identifier: impl Into<String>,
        firewall_name: impl Into<String>,
        secret: impl Into<SecretString>,
    ) -> Result<Self, TokenError> {
        let firewall_name = firewall_name.into();
        if firewall_name.is_empty() {
            return Err(TokenError::EmptyFirewallName);
        }

        Ok(Self {
            state: TokenState::new(user_identifier).authenticated(true),
            firewall_name,
            secret: secret.into(),
        })
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
    pub fn firewall_name(&self) -> &str {
        &self.firewall_name
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }
}

impl Token for RememberMeToken {
    fn kind(&self) -> TokenKind {
        TokenKind::RememberMe
    }

    fn user_identifier(&self) -> &str {
        self.state.user_identifier()
    }

    fn credentials(&self) -> Option<&SecretString> {
        None
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

impl MutableToken for RememberMeToken {
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

    fn erase_credentials(&mut self) {}
}

impl fmt::Display for RememberMeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt_as(f, "RememberMeToken")
    }
}
