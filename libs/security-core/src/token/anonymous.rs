use std::collections::BTreeSet;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, MutableToken, Token, TokenKind, TokenState};

/// Identifier given to anonymous visitors unless another one is set.
pub const ANONYMOUS_USER_IDENTIFIER: &str = "anon.";

/// Token for a recognized visitor that has not proven an identity.
///
/// The token is authenticated (the anonymous marker itself was accepted) but
/// the resolver classifies it as anonymous, never as full-fledged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymousToken {
    #[serde(flatten)]
    state: TokenState,
    /// Key shared with the issuing firewall. Never serialized/persisted.
    #[serde(skip, default = "super::empty_secret")]
    secret: SecretString,
}

impl AnonymousToken {
    #[must_use]
    pub fn new(secret: impl Into<SecretString>) -> Self {
        Self {
            state: TokenState::new(ANONYMOUS_USER_IDENTIFIER).authenticated(true),
            secret: secret.into(),
        }
    }

    #[must_use]
    pub fn with_user_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.state.set_user_identifier(identifier.into());
        self
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
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }
}

impl Token for AnonymousToken {
    fn kind(&self) -> TokenKind {
        TokenKind::Anonymous
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

impl MutableToken for AnonymousToken {
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

impl fmt::Display for AnonymousToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt_as(f, "AnonymousToken")
    }
}
