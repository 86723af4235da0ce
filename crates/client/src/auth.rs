//! Bearer token state for the API session.
//!
//! Tokens live behind an `RwLock` so every in-flight request reads the
//! current access token and a refresh swaps the pair atomically. The refresh
//! itself is driven by [`crate::http`]; this module only owns the state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Access and refresh token pair as issued by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token sent on every request.
    pub access_token: String,
    /// Long-lived token exchanged for a new pair on 401.
    pub refresh_token: String,
}

/// Shared authentication state.
///
/// Cloning is cheap; all clones observe the same token pair.
#[derive(Clone, Default)]
pub struct AuthContext {
    tokens: Arc<RwLock<Option<TokenPair>>>,
}

impl AuthContext {
    /// Creates an unauthenticated context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a token pair, replacing any previous session.
    pub async fn install(&self, tokens: TokenPair) {
        *self.tokens.write().await = Some(tokens);
    }

    /// Clears the session. Subsequent requests go out unauthenticated.
    pub async fn clear(&self) {
        *self.tokens.write().await = None;
    }

    /// Whether a session is currently installed.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// The current access token, if any.
    pub(crate) async fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// The current refresh token, if any.
    pub(crate) async fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        }
    }

    #[tokio::test]
    async fn test_install_replaces_previous_pair() {
        let auth = AuthContext::new();
        assert!(!auth.is_authenticated().await);

        auth.install(pair("a1", "r1")).await;
        assert_eq!(auth.access_token().await.as_deref(), Some("a1"));

        auth.install(pair("a2", "r2")).await;
        assert_eq!(auth.access_token().await.as_deref(), Some("a2"));
        assert_eq!(auth.refresh_token().await.as_deref(), Some("r2"));
    }

    #[tokio::test]
    async fn test_clear_removes_session() {
        let auth = AuthContext::new();
        auth.install(pair("a1", "r1")).await;
        auth.clear().await;
        assert!(!auth.is_authenticated().await);
        assert!(auth.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let auth = AuthContext::new();
        let clone = auth.clone();
        auth.install(pair("a1", "r1")).await;
        assert!(clone.is_authenticated().await);
    }
}
