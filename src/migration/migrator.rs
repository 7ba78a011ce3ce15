use crate::errors::{BoxError, QuicError, Result};
use crate::migration::path::validate_direct_path;
use crate::migration::services::{PathDialer, TokenIssuer};
use crate::migration::token::MigrationToken;
use std::sync::{Arc, PoisonError, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Coordinates token acquisition and direct-path opening for one session.
///
/// Holds at most one token: the one returned by the latest successful
/// [`Migrator::request_migration_token`]. The lock guarding it is never held
/// while the issuer or dialer runs.
pub struct Migrator {
    issuer: Arc<dyn TokenIssuer>,
    dialer: Arc<dyn PathDialer>,
    token: RwLock<Option<MigrationToken>>,
}

impl Migrator {
    pub fn new<I, D>(issuer: I, dialer: D) -> Self
    where
        I: TokenIssuer + 'static,
        D: PathDialer + 'static,
    {
        Self::from_shared(Arc::new(issuer), Arc::new(dialer))
    }

    pub fn from_shared(issuer: Arc<dyn TokenIssuer>, dialer: Arc<dyn PathDialer>) -> Self {
        Self {
            issuer,
            dialer,
            token: RwLock::new(None),
        }
    }

    /// Asks the issuer for a fresh token and stores it, replacing any previous
    /// one. On failure the previously stored token is left untouched.
    pub async fn request_migration_token(
        &self,
        cancel: &CancellationToken,
        session_id: &str,
    ) -> Result<MigrationToken> {
        if cancel.is_cancelled() {
            return Err(QuicError::Cancelled);
        }

        let issued = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(QuicError::Cancelled),
            issued = self.issuer.issue_token(cancel, session_id) => issued,
        };

        let token = issued
            .and_then(|raw| {
                MigrationToken::new(raw)
                    .ok_or_else(|| BoxError::from("issuer returned an empty token"))
            })
            .map_err(|source| QuicError::TokenRequest {
                session_id: session_id.to_string(),
                source,
            })?;

        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        debug!(session_id, "migration token stored");
        Ok(token)
    }

    /// Opens a direct path to `target` using the stored token.
    ///
    /// The target is checked before anything else, so a malformed address never
    /// reaches the dialer. The token is kept after a successful open.
    pub async fn open_direct_path(&self, cancel: &CancellationToken, target: &str) -> Result<()> {
        let path = validate_direct_path(target)?;
        let token = self.current_token().ok_or(QuicError::NoMigrationToken)?;

        if cancel.is_cancelled() {
            return Err(QuicError::Cancelled);
        }

        let opened = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(QuicError::Cancelled),
            opened = self.dialer.open(cancel, target, &token) => opened,
        };

        opened.map_err(|source| QuicError::OpenPath {
            target: target.to_string(),
            source,
        })?;
        debug!(path = %path, "direct path opened");
        Ok(())
    }

    pub fn current_token(&self) -> Option<MigrationToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}
