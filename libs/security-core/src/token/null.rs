use std::collections::BTreeSet;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::{Attributes, EMPTY_ATTRIBUTES, EMPTY_ROLES, Token, TokenKind};

/// Sentinel token meaning "a token exists but asserts nothing".
///
/// It has no identity, no roles, no attributes and no credentials, yet
/// reports itself as authenticated. Callers must not use
/// [`Token::is_authenticated`] to tell it apart from a real principal; ask the
/// [`TrustResolver`](crate::TrustResolver) instead, which never classifies it
/// as full-fledged.
///
/// `NullToken` does not implement [`MutableToken`](super::MutableToken).
/// Mutating it through a [`CurrentToken`](super::CurrentToken) fails with
/// [`TokenError`](crate::TokenError).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullToken;

impl Token for NullToken {
    fn kind(&self) -> TokenKind {
        TokenKind::Null
    }

    fn user_identifier(&self) -> &str {
        ""
    }

    fn credentials(&self) -> Option<&SecretString> {
        None
    }

    fn role_names(&self) -> &BTreeSet<String> {
        &EMPTY_ROLES
    }

    fn is_authenticated(&self) -> bool {
        true
    }

    fn attributes(&self) -> &Attributes {
        &EMPTY_ATTRIBUTES
    }
}

impl fmt::Display for NullToken {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}
