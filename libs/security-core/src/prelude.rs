//! Common imports for code that inspects or classifies tokens.

pub use crate::error::TokenError;
pub use crate::token::{CurrentToken, MutableToken, Token, TokenKind};
pub use crate::trust_resolver::{TrustLevel, TrustResolver};
