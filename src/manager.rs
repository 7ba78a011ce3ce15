use std::sync::{PoisonError, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{ManagerConfig, MigrationConfig};
use crate::ech::EchSuite;
use crate::errors::{QuicError, Result};
use crate::migration::Migrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Created,
    Started,
    Closed,
}

/// Entry point for the transport session lifecycle.
///
/// State only moves forward: `Created -> Started -> Closed`, or straight to
/// `Closed`. Nothing leaves `Closed`.
pub struct Manager {
    config: ManagerConfig,
    state: RwLock<LifecycleState>,
    ech: Option<EchSuite>,
}

impl Manager {
    /// Validates `config` and builds a manager in the `Created` state. When ECH
    /// is enabled a fresh sealing key is generated for the manager's lifetime.
    pub fn new(mut config: ManagerConfig) -> Result<Self> {
        config.validate()?;
        let ech = if config.enable_ech {
            Some(EchSuite::generate()?)
        } else {
            None
        };
        Ok(Self::build(config, ech))
    }

    /// Like [`Manager::new`], but seals with an externally supplied key.
    pub fn with_ech_key(mut config: ManagerConfig, key: &[u8]) -> Result<Self> {
        config.enable_ech = true;
        config.validate()?;
        let ech = EchSuite::new(key)?;
        Ok(Self::build(config, Some(ech)))
    }

    fn build(config: ManagerConfig, ech: Option<EchSuite>) -> Self {
        debug!(
            server_name = %config.server_name,
            bind_address = %config.bind_address,
            enable_ech = config.enable_ech,
            "quic manager created"
        );
        Self {
            config,
            state: RwLock::new(LifecycleState::Created),
            ech,
        }
    }

    /// Marks the manager started. Starting twice is a no-op; starting a closed
    /// manager fails. `_cancel` is accepted for parity with the other entry
    /// points and is not consulted.
    pub fn start(&self, _cancel: &CancellationToken) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match *state {
            LifecycleState::Closed => Err(QuicError::ManagerClosed),
            LifecycleState::Started => Ok(()),
            LifecycleState::Created => {
                *state = LifecycleState::Started;
                debug!("quic manager started");
                Ok(())
            }
        }
    }

    pub fn close(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if *state != LifecycleState::Closed {
            *state = LifecycleState::Closed;
            debug!("quic manager closed");
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// True while the manager is started. A closed manager reports false, even
    /// if it was started before: callers gate work on this, and a closed manager
    /// must never look usable.
    pub fn is_started(&self) -> bool {
        self.state() == LifecycleState::Started
    }

    pub fn is_closed(&self) -> bool {
        self.state() == LifecycleState::Closed
    }

    pub fn config(&self) -> ManagerConfig {
        self.config.clone()
    }

    pub fn ech_suite(&self) -> Option<&EchSuite> {
        self.ech.as_ref()
    }

    /// Seals the configured server name for outbound handshake material.
    pub fn sealed_server_name(&self) -> Result<String> {
        self.ech
            .as_ref()
            .ok_or(QuicError::EchDisabled)?
            .seal_sni(&self.config.server_name)
    }

    pub fn open_server_name(&self, sealed: &str) -> Result<String> {
        self.ech
            .as_ref()
            .ok_or(QuicError::EchDisabled)?
            .open_sni(sealed)
    }

    /// Moves a session onto a new path: validate, request a token, open the path.
    ///
    /// Structural errors in `migration` are reported before the issuer or
    /// dialer is contacted. Only a closed manager is refused; the manager does
    /// not need to be started. A non-zero `migration.timeout` bounds both steps
    /// together. A token obtained before a later failure stays on the migrator.
    pub async fn migrate_connection(
        &self,
        cancel: &CancellationToken,
        migrator: &Migrator,
        migration: &MigrationConfig,
    ) -> Result<()> {
        let path = migration.validate()?;
        if self.is_closed() {
            return Err(QuicError::ManagerClosed);
        }

        debug!(session_id = %migration.session_id, path = %path, "migrating connection");
        let attempt = async {
            migrator
                .request_migration_token(cancel, &migration.session_id)
                .await?;
            migrator.open_direct_path(cancel, &migration.target).await
        };

        let result = if migration.timeout.is_zero() {
            attempt.await
        } else {
            tokio::time::timeout(migration.timeout, attempt)
                .await
                .unwrap_or_else(|_| {
                    Err(QuicError::Timeout {
                        timeout: migration.timeout,
                    })
                })
        };

        if let Err(e) = &result {
            warn!(session_id = %migration.session_id, kind = ?e.kind(), "migration failed");
        }
        result
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("ech", &self.ech)
            .finish()
    }
}
