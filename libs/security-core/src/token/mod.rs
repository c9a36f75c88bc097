//! Authentication tokens.
//!
//! A token carries the authentication state of a single request: who the
//! principal is, which roles it holds, free-form attributes and whether it
//! has been verified. Every token also reports a [`TokenKind`], which is what
//! the [`TrustResolver`](crate::TrustResolver) inspects when classifying it.
//!
//! Reading is covered by [`Token`]. Mutation lives in [`MutableToken`], which
//! the [`NullToken`] sentinel deliberately does not implement.

mod anonymous;
mod authenticated;
mod current;
mod null;
mod remember_me;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use anonymous::{ANONYMOUS_USER_IDENTIFIER, AnonymousToken};
pub use authenticated::AuthenticatedToken;
pub use current::CurrentToken;
pub use null::NullToken;
pub use remember_me::RememberMeToken;

/// Free-form per-token metadata.
pub type Attributes = BTreeMap<String, Value>;

pub(crate) static EMPTY_ROLES: BTreeSet<String> = BTreeSet::new();
pub(crate) static EMPTY_ATTRIBUTES: Attributes = BTreeMap::new();

pub(crate) fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

/// Classification tag carried by every token.
///
/// Token types that specialize the built-in anonymous or remember-me tokens
/// report the same kind as the token they specialize, so the resolver treats
/// them alike without knowing their concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// The [`NullToken`] sentinel: a token exists but asserts nothing.
    Null,
    /// A recognized visitor without a verified identity.
    Anonymous,
    /// A principal restored from a persistent remember-me cookie.
    RememberMe,
    /// Any token produced by a fresh authentication.
    #[default]
    Standard,
    /// Application-defined kind, mapped to a category through configuration.
    Custom(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Anonymous => f.write_str("anonymous"),
            Self::RememberMe => f.write_str("remember_me"),
            Self::Standard => f.write_str("standard"),
            Self::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// Read access to an authentication token.
pub trait Token: fmt::Debug + fmt::Display + Send + Sync {
    /// Classification tag. Defaults to [`TokenKind::Standard`].
    #[must_use]
    fn kind(&self) -> TokenKind {
        TokenKind::Standard
    }

    /// Identifier of the principal, `""` when there is none.
    #[must_use]
    fn user_identifier(&self) -> &str;

    /// Raw credential material, `None` once erased or when never present.
    #[must_use]
    fn credentials(&self) -> Option<&SecretString>;

    #[must_use]
    fn role_names(&self) -> &BTreeSet<String>;

    #[must_use]
    fn is_authenticated(&self) -> bool;

    #[must_use]
    fn attributes(&self) -> &Attributes;

    #[must_use]
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes().contains_key(name)
    }

    #[must_use]
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes().get(name)
    }
}

/// Tokens whose state may change after construction.
pub trait MutableToken: Token {
    fn set_user_identifier(&mut self, identifier: String);

    fn set_authenticated(&mut self, authenticated: bool);

    /// Replaces all attributes.
    fn set_attributes(&mut self, attributes: Attributes);

    fn set_attribute(&mut self, name: String, value: Value);

    /// Scrubs sensitive material. Implementations without credentials may
    /// leave this as a no-op.
    fn erase_credentials(&mut self);
}

/// State shared by the built-in token types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenState {
    user_identifier: String,
    #[serde(default)]
    roles: BTreeSet<String>,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    authenticated: bool,
}

impl TokenState {
    #[must_use]
    pub fn new(user_identifier: impl Into<String>) -> Self {
        Self {
            user_identifier: user_identifier.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    #[must_use]
    pub fn user_identifier(&self) -> &str {
        &self.user_identifier
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn set_user_identifier(&mut self, identifier: String) {
        self.user_identifier = identifier;
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    pub fn set_attribute(&mut self, name: String, value: Value) {
        self.attributes.insert(name, value);
    }

    /// Writes `Type(user="id", roles="A, B")`.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    pub fn fmt_as(&self, f: &mut fmt::Formatter<'_>, type_name: &str) -> fmt::Result {
        write!(f, "{type_name}(user=\"{}\", roles=\"", self.user_identifier)?;
        for (i, role) in self.roles.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role)?;
        }
        f.write_str("\")")
    }
}
