use crate::errors::BoxError;
use crate::migration::token::MigrationToken;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Control-path capability that hands out migration tokens.
///
/// Implementations enforce their own authorization and uniqueness policy and
/// must be safe to share between migrators. Any error means "no token now".
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue_token(
        &self,
        cancel: &CancellationToken,
        session_id: &str,
    ) -> Result<String, BoxError>;
}

/// Capability that opens and validates a direct path candidate.
///
/// The dialer is the only place a token's authenticity is checked. Single-use
/// enforcement, if the issuer requires it, also belongs here: the migrator keeps
/// the most recent token after a successful open.
#[async_trait]
pub trait PathDialer: Send + Sync {
    async fn open(
        &self,
        cancel: &CancellationToken,
        target: &str,
        token: &MigrationToken,
    ) -> Result<(), BoxError>;
}

#[async_trait]
impl<T: TokenIssuer + ?Sized> TokenIssuer for Arc<T> {
    async fn issue_token(
        &self,
        cancel: &CancellationToken,
        session_id: &str,
    ) -> Result<String, BoxError> {
        (**self).issue_token(cancel, session_id).await
    }
}

#[async_trait]
impl<T: PathDialer + ?Sized> PathDialer for Arc<T> {
    async fn open(
        &self,
        cancel: &CancellationToken,
        target: &str,
        token: &MigrationToken,
    ) -> Result<(), BoxError> {
        (**self).open(cancel, target, token).await
    }
}
