//! Operator session port.

use async_trait::async_trait;

/// Server-side session state for the single shared operator account.
///
/// Sessions only exist once the operator has authenticated; the token handed
/// out by [`SessionStore::begin`] is opaque and carries no meaning without
/// the server-side entry behind it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a new authenticated session and return its opaque token.
    async fn begin(&self) -> Result<String, SessionError>;

    /// True when the token maps to a live authenticated session.
    /// A successful check refreshes the idle expiry.
    async fn verify(&self, token: &str) -> bool;

    /// Invalidate the session behind the token. Revoking an unknown or
    /// already-expired token is not an error.
    async fn revoke(&self, token: &str) -> Result<(), SessionError>;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session backend failed: {0}")]
    Backend(String),
}
