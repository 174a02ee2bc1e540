//! # Identity Key
//!
//! Long-term Ed25519 key that authenticates this side of the secret
//! connection. The dialer only borrows it for the handshake; it is never
//! logged (the `Debug` impl prints the public key only).

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};

use super::errors::KeyError;

/// Ed25519 identity used for the secret handshake.
#[derive(Clone)]
pub struct IdentityKey {
    signing: SigningKey,
}

impl IdentityKey {
    /// Build from a 32-byte secret seed.
    pub fn from_secret_bytes(secret: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing: SigningKey::from_bytes(secret),
        }
    }

    /// Build from raw bytes: either a 32-byte seed or a 64-byte
    /// `seed || public key` pair as stored in validator key files.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        match bytes.len() {
            SECRET_KEY_LENGTH => {
                let mut seed = [0u8; SECRET_KEY_LENGTH];
                seed.copy_from_slice(bytes);
                Ok(Self::from_secret_bytes(&seed))
            }
            KEYPAIR_LENGTH => {
                let mut pair = [0u8; KEYPAIR_LENGTH];
                pair.copy_from_slice(bytes);
                let signing = SigningKey::from_keypair_bytes(&pair)
                    .map_err(|e| KeyError::Mismatch(e.to_string()))?;
                Ok(Self { signing })
            }
            got => Err(KeyError::InvalidLength {
                expected: SECRET_KEY_LENGTH,
                got,
            }),
        }
    }

    /// Public half of the identity.
    pub fn public_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }

    /// Hex-encoded public key, safe to log.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key().as_bytes())
    }

    /// Signing key for handshake providers.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityKey")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}
