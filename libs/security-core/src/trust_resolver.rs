//! Classification of authentication tokens by trust level.
//!
//! [`TrustResolver`] answers three questions about the token attached to a
//! request, or about its absence:
//!
//! - is it anonymous?
//! - was it restored through remember-me?
//! - is it fully authenticated ("full-fledged")?
//!
//! Matching is driven by [`TokenKind`] rather than by concrete types, so a
//! token type that reports [`TokenKind::Anonymous`] is treated exactly like
//! the built-in [`AnonymousToken`](crate::AnonymousToken).

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::config::TrustResolverConfig;
use crate::token::{Token, TokenKind};

type TokenPredicate = dyn Fn(&dyn Token) -> bool + Send + Sync;

/// Decides whether a token belongs to a category.
#[derive(Clone)]
pub enum TokenMatcher {
    /// Matches tokens of exactly this kind.
    Kind(TokenKind),
    /// Matches tokens of any of these kinds.
    AnyKind(Vec<TokenKind>),
    /// Matches tokens accepted by the predicate.
    Predicate(Arc<TokenPredicate>),
}

impl TokenMatcher {
    #[must_use]
    pub fn kind(kind: TokenKind) -> Self {
        Self::Kind(kind)
    }

    #[must_use]
    pub fn any_kind(kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        Self::AnyKind(kinds.into_iter().collect())
    }

    #[must_use]
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&dyn Token) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    #[must_use]
    pub fn matches(&self, token: &dyn Token) -> bool {
        match self {
            Self::Kind(kind) => token.kind() == *kind,
            Self::AnyKind(kinds) => kinds.contains(&token.kind()),
            Self::Predicate(predicate) => predicate(token),
        }
    }
}

impl fmt::Debug for TokenMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Self::AnyKind(kinds) => f.debug_tuple("AnyKind").field(kinds).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Outcome of [`TrustResolver::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustLevel {
    /// No token, or the null token.
    None,
    Anonymous,
    RememberMe,
    FullFledged,
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Anonymous => f.write_str("anonymous"),
            Self::RememberMe => f.write_str("remember_me"),
            Self::FullFledged => f.write_str("full_fledged"),
        }
    }
}

/// Stateless classifier for authentication tokens.
///
/// All operations are pure and total: an absent token is a valid input and
/// yields `false` from every predicate.
#[derive(Debug, Clone)]
pub struct TrustResolver {
    anonymous: TokenMatcher,
    remember_me: TokenMatcher,
}

impl Default for TrustResolver {
    fn default() -> Self {
        Self {
            anonymous: TokenMatcher::Kind(TokenKind::Anonymous),
            remember_me: TokenMatcher::Kind(TokenKind::RememberMe),
        }
    }
}

impl TrustResolver {
    /// Resolver recognizing only the built-in anonymous and remember-me kinds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> TrustResolverBuilder {
        TrustResolverBuilder::default()
    }

    #[must_use]
    pub fn from_config(cfg: &TrustResolverConfig) -> Self {
        Self {
            anonymous: TokenMatcher::any_kind(cfg.anonymous_kinds.iter().cloned()),
            remember_me: TokenMatcher::any_kind(cfg.remember_me_kinds.iter().cloned()),
        }
    }

    #[must_use]
    pub fn is_anonymous(&self, token: Option<&dyn Token>) -> bool {
        token.is_some_and(|t| self.anonymous.matches(t))
    }

    #[must_use]
    pub fn is_remember_me(&self, token: Option<&dyn Token>) -> bool {
        token.is_some_and(|t| self.remember_me.matches(t))
    }

    /// `true` for a present token that is neither anonymous nor remember-me.
    ///
    /// The null token asserts nothing and is never full-fledged, even though
    /// it reports itself as authenticated.
    #[must_use]
    pub fn is_full_fledged(&self, token: Option<&dyn Token>) -> bool {
        match token {
            Some(t) if t.kind() != TokenKind::Null => {
                !self.is_anonymous(token) && !self.is_remember_me(token)
            }
            _ => false,
        }
    }

    /// Single trust level for `token`.
    ///
    /// If custom matchers put a token in both categories, anonymous wins.
    #[must_use]
    pub fn classify(&self, token: Option<&dyn Token>) -> TrustLevel {
        let level = if self.is_anonymous(token) {
            TrustLevel::Anonymous
        } else if self.is_remember_me(token) {
            TrustLevel::RememberMe
        } else if self.is_full_fledged(token) {
            TrustLevel::FullFledged
        } else {
            TrustLevel::None
        };

        trace!(kind = ?token.map(Token::kind), %level, "Classified token");
        level
    }
}

/// Builder for a [`TrustResolver`] with custom matchers.
///
/// A configured matcher replaces the built-in one for its category; combine
/// kinds with [`TokenMatcher::any_kind`] to extend rather than replace.
#[derive(Debug, Clone, Default)]
pub struct TrustResolverBuilder {
    anonymous: Option<TokenMatcher>,
    remember_me: Option<TokenMatcher>,
}

impl TrustResolverBuilder {
    #[must_use]
    pub fn anonymous(mut self, matcher: TokenMatcher) -> Self {
        self.anonymous = Some(matcher);
        self
    }

    #[must_use]
    pub fn remember_me(mut self, matcher: TokenMatcher) -> Self {
        self.remember_me = Some(matcher);
        self
    }

    #[must_use]
    pub fn build(self) -> TrustResolver {
        let defaults = TrustResolver::default();
        TrustResolver {
            anonymous: self.anonymous.unwrap_or(defaults.anonymous),
            remember_me: self.remember_me.unwrap_or(defaults.remember_me),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{AnonymousToken, AuthenticatedToken, NullToken, RememberMeToken};

    fn anonymous() -> AnonymousToken {
        AnonymousToken::new("key".to_owned())
    }

    fn remember_me() -> RememberMeToken {
        RememberMeToken::new("alice", "main", "key".to_owned()).unwrap()
    }

    fn authenticated() -> AuthenticatedToken {
        AuthenticatedToken::new("alice", "main").with_roles(["ROLE_USER"])
    }

    #[test]
    fn is_anonymous() {
        let resolver = TrustResolver::new();

        assert!(!resolver.is_anonymous(None));
        assert!(!resolver.is_anonymous(Some(&authenticated())));
        assert!(!resolver.is_anonymous(Some(&remember_me())));
        assert!(!resolver.is_anonymous(Some(&NullToken)));
        assert!(resolver.is_anonymous(Some(&anonymous())));
    }

    #[test]
    fn is_remember_me() {
        let resolver = TrustResolver::new();

        assert!(!resolver.is_remember_me(None));
        assert!(!resolver.is_remember_me(Some(&authenticated())));
        assert!(!resolver.is_remember_me(Some(&anonymous())));
        assert!(!resolver.is_remember_me(Some(&NullToken)));
        assert!(resolver.is_remember_me(Some(&remember_me())));
    }

    #[test]
    fn is_full_fledged() {
        let resolver = TrustResolver::new();

        assert!(!resolver.is_full_fledged(None));
        assert!(!resolver.is_full_fledged(Some(&anonymous())));
        assert!(!resolver.is_full_fledged(Some(&remember_me())));
        assert!(!resolver.is_full_fledged(Some(&NullToken)));
        assert!(resolver.is_full_fledged(Some(&authenticated())));
    }

    #[test]
    fn null_token_is_authenticated_but_not_full_fledged() {
        let resolver = TrustResolver::new();

        assert!(NullToken.is_authenticated());
        assert!(!resolver.is_full_fledged(Some(&NullToken)));
        assert_eq!(resolver.classify(Some(&NullToken)), TrustLevel::None);
    }

    #[test]
    fn classify_returns_single_level() {
        let resolver = TrustResolver::new();

        assert_eq!(resolver.classify(None), TrustLevel::None);
        assert_eq!(resolver.classify(Some(&anonymous())), TrustLevel::Anonymous);
        assert_eq!(resolver.classify(Some(&remember_me())), TrustLevel::RememberMe);
        assert_eq!(
            resolver.classify(Some(&authenticated())),
            TrustLevel::FullFledged
        );
    }

    #[test]
    fn unauthenticated_flag_does_not_change_classification() {
        let resolver = TrustResolver::new();
        let mut token = anonymous();
        crate::MutableToken::set_authenticated(&mut token, false);

        assert!(resolver.is_anonymous(Some(&token)));
        assert!(!resolver.is_full_fledged(Some(&token)));
    }

    #[test]
    fn builder_matcher_replaces_default() {
        let resolver = TrustResolver::builder()
            .anonymous(TokenMatcher::kind(TokenKind::Custom("guest".to_owned())))
            .build();

        assert!(!resolver.is_anonymous(Some(&anonymous())));
        assert!(resolver.is_full_fledged(Some(&anonymous())));
        assert!(resolver.is_remember_me(Some(&remember_me())));
    }

    #[test]
    fn predicate_matcher_inspects_token() {
        let resolver = TrustResolver::builder()
            .remember_me(TokenMatcher::predicate(|t| {
                t.kind() == TokenKind::RememberMe || t.has_attribute("restored")
            }))
            .build();

        let mut token = authenticated();
        assert!(resolver.is_full_fledged(Some(&token)));

        crate::MutableToken::set_attribute(&mut token, "restored".to_owned(), true.into());
        assert!(resolver.is_remember_me(Some(&token)));
        assert!(!resolver.is_full_fledged(Some(&token)));
    }

    #[test]
    fn from_default_config_matches_new() {
        let resolver = TrustResolver::from_config(&TrustResolverConfig::default());

        assert!(resolver.is_anonymous(Some(&anonymous())));
        assert!(resolver.is_remember_me(Some(&remember_me())));
        assert!(resolver.is_full_fledged(Some(&authenticated())));
    }

    #[test]
    #[allow(clippy::use_debug)]
    fn matcher_debug_hides_predicate() {
        let matcher = TokenMatcher::predicate(|_| true);

        assert_eq!(format!("{matcher:?}"), "Predicate(..)");
    }
}
