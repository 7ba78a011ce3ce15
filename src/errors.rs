use thiserror::Error;

/// Error type returned by the external issuer and dialer capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, QuicError>;

#[derive(Debug, Error)]
pub enum QuicError {
    #[error("invalid server name")]
    InvalidServerName,

    #[error("invalid bind address")]
    InvalidBindAddress,

    #[error("invalid session id")]
    InvalidSessionId,

    #[error("invalid target address: {target:?}")]
    InvalidTargetAddress { target: String },

    #[error("no migration token")]
    NoMigrationToken,

    #[error("invalid ECH key length: expected 32 bytes, got {len}")]
    InvalidKeyLength { len: usize },

    #[error("ciphertext too short")]
    CiphertextTooShort,

    #[error("malformed ciphertext encoding: {0}")]
    MalformedCiphertext(#[from] base64::DecodeError),

    // Carries no cause on purpose: tag mismatch, wrong key and garbled payloads
    // must be indistinguishable to the caller.
    #[error("decrypt sni: authentication failed")]
    Decryption,

    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("seal sni: {0}")]
    Encryption(String),

    #[error("ECH is not enabled for this manager")]
    EchDisabled,

    #[error("quic manager closed")]
    ManagerClosed,

    #[error("request migration token for session {session_id}: {source}")]
    TokenRequest {
        session_id: String,
        #[source]
        source: BoxError,
    },

    #[error("open direct path to {target}: {source}")]
    OpenPath {
        target: String,
        #[source]
        source: BoxError,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("migration timed out after {timeout:?}")]
    Timeout { timeout: std::time::Duration },
}

/// Comparable kind of a [`QuicError`], independent of the context it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidServerName,
    InvalidBindAddress,
    InvalidSessionId,
    InvalidTargetAddress,
    NoMigrationToken,
    InvalidKeyLength,
    CiphertextTooShort,
    MalformedCiphertext,
    Decryption,
    Entropy,
    Encryption,
    EchDisabled,
    ManagerClosed,
    TokenRequestFailed,
    OpenPathFailed,
    Cancelled,
    Timeout,
}

impl QuicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuicError::InvalidServerName => ErrorKind::InvalidServerName,
            QuicError::InvalidBindAddress => ErrorKind::InvalidBindAddress,
            QuicError::InvalidSessionId => ErrorKind::InvalidSessionId,
            QuicError::InvalidTargetAddress { .. } => ErrorKind::InvalidTargetAddress,
            QuicError::NoMigrationToken => ErrorKind::NoMigrationToken,
            QuicError::InvalidKeyLength { .. } => ErrorKind::InvalidKeyLength,
            QuicError::CiphertextTooShort => ErrorKind::CiphertextTooShort,
            QuicError::MalformedCiphertext(_) => ErrorKind::MalformedCiphertext,
            QuicError::Decryption => ErrorKind::Decryption,
            QuicError::Entropy(_) => ErrorKind::Entropy,
            QuicError::Encryption(_) => ErrorKind::Encryption,
            QuicError::EchDisabled => ErrorKind::EchDisabled,
            QuicError::ManagerClosed => ErrorKind::ManagerClosed,
            QuicError::TokenRequest { .. } => ErrorKind::TokenRequestFailed,
            QuicError::OpenPath { .. } => ErrorKind::OpenPathFailed,
            QuicError::Cancelled => ErrorKind::Cancelled,
            QuicError::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// Caller-correctable configuration errors, never worth retrying as-is.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidServerName
                | ErrorKind::InvalidBindAddress
                | ErrorKind::InvalidSessionId
                | ErrorKind::InvalidTargetAddress
                | ErrorKind::NoMigrationToken
        )
    }

    pub fn is_capability_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TokenRequestFailed | ErrorKind::OpenPathFailed
        )
    }
}
