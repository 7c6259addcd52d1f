//! Key derivation from a BIP-39 mnemonic.
//!
//! The local identity's signing key is derived from the participant's
//! 24-word mnemonic with HKDF-SHA256 and domain separation:
//!
//! ```text
//! BIP-39 Mnemonic (24 words)
//!         │
//!         ▼
//! bip39::Mnemonic::to_seed("")  → [u8; 64]
//!         │
//!         ▼
//! HKDF-SHA256(salt="urbanplan-identity-v1", seed)
//!         │
//!         └─► HKDF expand("wallet-signing") → Ed25519 seed
//! ```
//!
//! The mnemonic itself is never stored; the derived seed is zeroized on drop.

use bip39::Mnemonic;
use hkdf::Hkdf;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroize;

/// Domain separation salt (versioned for rotation)
const MASTER_SALT: &[u8] = b"urbanplan-identity-v1";

/// HKDF info string for the wallet signing key
const WALLET_SIGNING: &[u8] = b"wallet-signing";

/// Errors that can occur during key derivation
#[derive(Debug, Error)]
pub enum KeyringError {
    /// Invalid BIP-39 mnemonic
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// HKDF expansion failed (should never happen with valid lengths)
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    /// Derived seed was not accepted as an Ed25519 key
    #[error("Signing key rejected: {0}")]
    KeyRejected(String),
}

/// Keys derived from the participant's mnemonic.
pub struct IdentityKeyring {
    signing_seed: [u8; 32],
}

impl Drop for IdentityKeyring {
    fn drop(&mut self) {
        self.signing_seed.zeroize();
    }
}

impl IdentityKeyring {
    /// Create a keyring from a BIP-39 mnemonic phrase.
    ///
    /// Caller should zeroize the mnemonic string after this call.
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self, KeyringError> {
        let parsed =
            Mnemonic::parse(mnemonic).map_err(|e| KeyringError::InvalidMnemonic(e.to_string()))?;

        // PBKDF2 with 2048 rounds; empty passphrase is standard here
        let mut seed = parsed.to_seed("");
        let hkdf = Hkdf::<Sha256>::new(Some(MASTER_SALT), &seed);
        seed.zeroize();

        let mut signing_seed = [0u8; 32];
        hkdf.expand(WALLET_SIGNING, &mut signing_seed)
            .map_err(|e| KeyringError::DerivationFailed(format!("{:?}", e)))?;

        Ok(Self { signing_seed })
    }

    /// Ed25519 seed for the wallet signing key.
    pub fn signing_seed(&self) -> &[u8; 32] {
        &self.signing_seed
    }
}
