use std::collections::BTreeSet;
use std::fmt;

use secrecy::SecretString;
use serde_json::Value;
use tracing::warn;

use super::{Attributes, MutableToken, NullToken, Token, TokenKind};
use crate::error::TokenError;

/// The token attached to a request context.
///
/// Either the immutable [`NullToken`] sentinel or a mutable token produced by
/// an authenticator. Mutators are forwarded to the active token; on the
/// sentinel they fail with a [`TokenError`] instead of silently doing nothing.
#[derive(Debug)]
pub enum CurrentToken {
    Null(NullToken),
    Active(Box<dyn MutableToken>),
}

impl Default for CurrentToken {
    fn default() -> Self {
        Self::Null(NullToken)
    }
}

impl From<NullToken> for CurrentToken {
    fn from(token: NullToken) -> Self {
        Self::Null(token)
    }
}

impl From<Box<dyn MutableToken>> for CurrentToken {
    fn from(token: Box<dyn MutableToken>) -> Self {
        Self::Active(token)
    }
}

impl CurrentToken {
    /// Attach a mutable token.
    #[must_use]
    pub fn new(token: impl MutableToken + 'static) -> Self {
        Self::Active(Box::new(token))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// Borrow the attached token for classification.
    #[must_use]
    pub fn as_token(&self) -> &dyn Token {
        match self {
            Self::Null(token) => token,
            Self::Active(token) => &**token,
        }
    }

    /// # Errors
    ///
    /// Returns [`TokenError::SetUser`] if the null token is attached.
    pub fn set_user_identifier(
        &mut self,
        identifier: impl Into<String>,
    ) -> Result<(), TokenError> {
        match self {
            Self::Active(token) => {
                token.set_user_identifier(identifier.into());
                Ok(())
            }
            Self::Null(_) => Err(reject(TokenError::SetUser)),
        }
    }

    /// # Errors
    ///
    /// Returns [`TokenError::SetAuthenticated`] if the null token is attached.
    pub fn set_authenticated(&mut self, authenticated: bool) -> Result<(), TokenError> {
        match self {
            Self::Active(token) => {
                token.set_authenticated(authenticated);
                Ok(())
            }
            Self::Null(_) => Err(reject(TokenError::SetAuthenticated)),
        }
    }

    /// # Errors
    ///
    /// Returns [`TokenError::SetAttributes`] if the null token is attached.
    pub fn set_attributes(&mut self, attributes: Attributes) -> Result<(), TokenError> {
        match self {
            Self::Active(token) => {
                token.set_attributes(attributes);
                Ok(())
            }
            Self::Null(_) => Err(reject(TokenError::SetAttributes)),
        }
    }

    /// # Errors
    ///
    /// Returns [`TokenError::SetAttribute`] if the null token is attached.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Result<(), TokenError> {
        let name = name.into();
        match self {
            Self::Active(token) => {
                token.set_attribute(name, value);
                Ok(())
            }
            Self::Null(_) => Err(reject(TokenError::SetAttribute { name })),
        }
    }

    /// Erase credentials of the active token. No-op on the null token.
    pub fn erase_credentials(&mut self) {
        if let Self::Active(token) = self {
            token.erase_credentials();
        }
    }
}

fn reject(err: TokenError) -> TokenError {
    warn!(error = %err, "Rejected mutation of the null token");
    err
}

impl Token for CurrentToken {
    fn kind(&self) -> TokenKind {
        self.as_token().kind()
    }

    fn user_identifier(&self) -> &str {
        self.as_token().user_identifier()
    }

    fn credentials(&self) -> Option<&SecretString> {
        self.as_token().credentials()
    }

    fn role_names(&self) -> &BTreeSet<String> {
        self.as_token().role_names()
    }

    fn is_authenticated(&self) -> bool {
        self.as_token().is_authenticated()
    }

    fn attributes(&self) -> &Attributes {
        self.as_token().attributes()
    }
}

impl fmt::Display for CurrentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_token(), f)
    }
}
