//! Error types for token construction and mutation.

use thiserror::Error;

/// Errors raised by token operations.
///
/// The `Set*` variants are returned when a caller tries to mutate the
/// [`NullToken`](crate::NullToken) sentinel through a
/// [`CurrentToken`](crate::CurrentToken). They indicate a programming error
/// at the call site and must be propagated, not ignored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("cannot set user on a null token")]
    SetUser,

    #[error("cannot change authentication state of a null token")]
    SetAuthenticated,

    #[error("cannot set attributes of a null token")]
    SetAttributes,

    #[error("cannot add attribute '{name}' to a null token")]
    SetAttribute { name: String },

    /// A remember-me token needs the firewall that issued it.
    #[error("remember-me token requires a non-empty firewall name")]
    EmptyFirewallName,
}

impl TokenError {
    /// Returns `true` for errors caused by mutating an immutable token.
    #[must_use]
    pub fn is_unsupported_mutation(&self) -> bool {
        matches!(
            self,
            Self::SetUser | Self::SetAuthenticated | Self::SetAttributes | Self::SetAttribute { .. }
        )
    }
}
