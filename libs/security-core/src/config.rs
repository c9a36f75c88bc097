//! Configuration for the trust resolver.

use serde::Deserialize;

use crate::token::TokenKind;

/// Which token kinds count as anonymous or remember-me.
///
/// ```yaml
/// anonymous_kinds: [anonymous, { custom: guest }]
/// remember_me_kinds: [remember_me]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrustResolverConfig {
    /// Token kinds classified as anonymous.
    pub anonymous_kinds: Vec<TokenKind>,

    /// Token kinds classified as remember-me.
    pub remember_me_kinds: Vec<TokenKind>,
}

impl Default for TrustResolverConfig {
    fn default() -> Self {
        Self {
            anonymous_kinds: vec![TokenKind::Anonymous],
            remember_me_kinds: vec![TokenKind::RememberMe],
        }
    }
}
