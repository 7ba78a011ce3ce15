use std::fmt;

/// Opaque, issuer-granted credential authorizing a session to open a new path.
///
/// The value only means something to the issuer/dialer pair; it is never
/// inspected here and never printed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MigrationToken(String);

impl MigrationToken {
    /// Wraps an issued value. Returns `None` for an empty value, which cannot
    /// authorize anything.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            return None;
        }
        Some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MigrationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MigrationToken").field(&"<redacted>").finish()
    }
}
