//! Encrypted SNI sealing.
//!
//! Conceals a server name from passive observers with AES-256-GCM under a fixed
//! key. A sealed value is `nonce || ciphertext || tag`, rendered as unpadded
//! standard base64 so it can travel in a text handshake field. Wiring the sealed
//! value into the handshake itself happens outside this crate.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use zeroize::Zeroizing;

use crate::errors::{QuicError, Result};

pub const ECH_KEY_SIZE: usize = 32;
pub const ECH_NONCE_SIZE: usize = 12;

/// Generates a random AES-256 key from the OS entropy source.
pub fn generate_key() -> Result<Zeroizing<[u8; ECH_KEY_SIZE]>> {
    let mut key = Zeroizing::new([0u8; ECH_KEY_SIZE]);
    OsRng
        .try_fill_bytes(&mut key[..])
        .map_err(|e| QuicError::Entropy(e.to_string()))?;
    Ok(key)
}

fn random_nonce() -> Result<[u8; ECH_NONCE_SIZE]> {
    let mut nonce = [0u8; ECH_NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| QuicError::Entropy(e.to_string()))?;
    Ok(nonce)
}

/// SNI sealing suite bound to one key. The key is wiped when the suite drops.
pub struct EchSuite {
    key: Zeroizing<[u8; ECH_KEY_SIZE]>,
}

impl EchSuite {
    /// Builds a suite from a raw key. The bytes are copied, so the caller may
    /// reuse or wipe its buffer afterward.
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.len() != ECH_KEY_SIZE {
            return Err(QuicError::InvalidKeyLength { len: key.len() });
        }
        let mut owned = Zeroizing::new([0u8; ECH_KEY_SIZE]);
        owned.copy_from_slice(key);
        Ok(Self { key: owned })
    }

    pub fn generate() -> Result<Self> {
        let key = generate_key()?;
        Self::new(&key[..])
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key[..]))
    }

    /// Encrypts `sni` under a fresh random nonce.
    pub fn seal_sni(&self, sni: &str) -> Result<String> {
        let nonce = random_nonce()?;
        let ciphertext = self
            .cipher()
            .encrypt(Nonce::from_slice(&nonce), sni.as_bytes())
            .map_err(|e| QuicError::Encryption(e.to_string()))?;

        let mut out = Vec::with_capacity(ECH_NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(STANDARD_NO_PAD.encode(out))
    }

    /// Decrypts a value produced by [`EchSuite::seal_sni`].
    pub fn open_sni(&self, sealed: &str) -> Result<String> {
        let raw = STANDARD_NO_PAD.decode(sealed)?;
        if raw.len() < ECH_NONCE_SIZE {
            return Err(QuicError::CiphertextTooShort);
        }

        let (nonce, payload) = raw.split_at(ECH_NONCE_SIZE);
        let plain = self
            .cipher()
            .decrypt(Nonce::from_slice(nonce), payload)
            .map_err(|_| QuicError::Decryption)?;

        String::from_utf8(plain).map_err(|_| QuicError::Decryption)
    }
}

impl std::fmt::Debug for EchSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EchSuite").field("key", &"<redacted>").finish()
    }
}
