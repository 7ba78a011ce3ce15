use serde_derive::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{QuicError, Result};
use crate::migration::{validate_direct_path, DirectPath};

/// Idle timeout applied when a [`ManagerConfig`] leaves it unset.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Startup settings for a [`Manager`](crate::Manager).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    pub server_name: String,
    pub bind_address: String,
    pub enable_ech: bool,
    pub idle_timeout: Duration,
}

impl ManagerConfig {
    pub fn new(server_name: impl Into<String>, bind_address: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            bind_address: bind_address.into(),
            enable_ech: false,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_enable_ech(mut self, enable: bool) -> Self {
        self.enable_ech = enable;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Checks the config is usable and fills in the idle timeout default.
    pub fn validate(&mut self) -> Result<()> {
        if self.server_name.is_empty() {
            return Err(QuicError::InvalidServerName);
        }
        if self.bind_address.is_empty() {
            return Err(QuicError::InvalidBindAddress);
        }
        if self.idle_timeout.is_zero() {
            self.idle_timeout = DEFAULT_IDLE_TIMEOUT;
        }
        Ok(())
    }
}

/// Describes one migration attempt for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    pub session_id: String,
    pub target: String,
    /// Upper bound on the whole attempt. Zero means no deadline.
    pub timeout: Duration,
}

impl MigrationConfig {
    pub fn new(session_id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            target: target.into(),
            timeout: Duration::ZERO,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<DirectPath> {
        if self.session_id.is_empty() {
            return Err(QuicError::InvalidSessionId);
        }
        validate_direct_path(&self.target)
    }
}
