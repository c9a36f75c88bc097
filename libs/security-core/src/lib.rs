#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod config;
pub mod error;
pub mod prelude;
pub mod token;
pub mod trust_resolver;

pub use config::TrustResolverConfig;
pub use error::TokenError;
pub use token::{
    ANONYMOUS_USER_IDENTIFIER, AnonymousToken, Attributes, AuthenticatedToken, CurrentToken,
    MutableToken, NullToken, RememberMeToken, Token, TokenKind, TokenState,
};
pub use trust_resolver::{TokenMatcher, TrustLevel, TrustResolver, TrustResolverBuilder};
