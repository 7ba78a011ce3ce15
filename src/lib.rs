//! QUIC session continuity primitives.
//!
//! - [`ech`]: AES-256-GCM sealing of the server name (encrypted SNI).
//! - [`migration`]: token-gated migration of a session onto a new path.
//! - [`Manager`]: lifecycle gate that owns the session configuration and drives
//!   a [`Migrator`].
//!
//! The issuer and dialer capabilities are supplied by the embedding
//! application through [`TokenIssuer`] and [`PathDialer`].

pub mod config;
pub mod ech;
pub mod errors;
pub mod manager;
pub mod migration;

pub use config::{ManagerConfig, MigrationConfig, DEFAULT_IDLE_TIMEOUT};
pub use ech::{generate_key, EchSuite, ECH_KEY_SIZE, ECH_NONCE_SIZE};
pub use errors::{BoxError, ErrorKind, QuicError, Result};
pub use manager::{LifecycleState, Manager};
pub use migration::{
    validate_direct_path, DirectPath, MigrationToken, Migrator, PathDialer, TokenIssuer,
};

pub use tokio_util::sync::CancellationToken;
