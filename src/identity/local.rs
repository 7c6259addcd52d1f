//! Local signing identity.
//!
//! Stands in for a browser wallet when driving the system from the CLI. The
//! Ed25519 key comes from the mnemonic keyring; the address is
//! `0x` + the last 20 bytes of SHA-256 over the public key. Every signature
//! request goes through a confirmation hook, and a "no" surfaces as
//! `IdentityError::Declined` just like a wallet rejecting the prompt.

use super::keyring::{IdentityKeyring, KeyringError};
use super::traits::{IdentityError, IdentityProvider, IdentityResult, Signature};
use async_trait::async_trait;
use ring::signature::{Ed25519KeyPair, KeyPair};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Callback asked to approve each message before it is signed.
pub type ConfirmFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Mnemonic-backed identity.
pub struct LocalIdentity {
    key_pair: Ed25519KeyPair,
    address: String,
    chain_id: u64,
    confirm: ConfirmFn,
}

impl LocalIdentity {
    /// Build an identity that signs without asking.
    pub fn new(keyring: &IdentityKeyring, chain_id: u64) -> Result<Self, KeyringError> {
        Self::with_confirmation(keyring, chain_id, Arc::new(|_| true))
    }

    /// Build an identity that asks `confirm` before every signature.
    pub fn with_confirmation(
        keyring: &IdentityKeyring,
        chain_id: u64,
        confirm: ConfirmFn,
    ) -> Result<Self, KeyringError> {
        let key_pair = Ed25519KeyPair::from_seed_unchecked(keyring.signing_seed())
            .map_err(|e| KeyringError::KeyRejected(e.to_string()))?;
        let address = address_for_public_key(key_pair.public_key().as_ref());

        Ok(Self {
            key_pair,
            address,
            chain_id,
            confirm,
        })
    }

    /// Raw Ed25519 public key.
    pub fn public_key(&self) -> &[u8] {
        self.key_pair.public_key().as_ref()
    }
}

/// `0x` + hex of the trailing 20 bytes of SHA-256(public key).
pub fn address_for_public_key(public_key: &[u8]) -> String {
    let digest = Sha256::digest(public_key);
    format!("0x{}", hex::encode(&digest[12..]))
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    fn address(&self) -> &str {
        &self.address
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn sign(&self, message: &str) -> IdentityResult<Signature> {
        let confirm = self.confirm.clone();
        let prompt = message.to_string();

        // Confirmation may block on a terminal prompt.
        let approved = tokio::task::spawn_blocking(move || confirm(&prompt))
            .await
            .map_err(|e| IdentityError::Provider(format!("confirmation task failed: {}", e)))?;

        if !approved {
            tracing::info!(address = %self.address, "signature request declined");
            return Err(IdentityError::Declined);
        }

        let signature = self.key_pair.sign(message.as_bytes());
        Ok(Signature(signature.as_ref().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring::signature::{UnparsedPublicKey, ED25519};

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    fn keyring() -> IdentityKeyring {
        IdentityKeyring::from_mnemonic(TEST_MNEMONIC).unwrap()
    }

    #[test]
    fn test_address_format() {
        let identity = LocalIdentity::new(&keyring(), 1).unwrap();
        let address = identity.address();

        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42);
        assert!(address[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_address_is_deterministic() {
        let a = LocalIdentity::new(&keyring(), 1).unwrap();
        let b = LocalIdentity::new(&keyring(), 5).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(b.chain_id(), 5);
    }

    #[tokio::test]
    async fn test_signature_verifies() {
        let identity = LocalIdentity::new(&keyring(), 1).unwrap();
        let signature = identity.sign("publickey:0xabc").await.unwrap();

        let public_key = UnparsedPublicKey::new(&ED25519, identity.public_key());
        assert!(public_key
            .verify(b"publickey:0xabc", &signature.0)
            .is_ok());
    }

    #[tokio::test]
    async fn test_declined_confirmation() {
        let identity =
            LocalIdentity::with_confirmation(&keyring(), 1, Arc::new(|_| false)).unwrap();

        let result = identity.sign("anything").await;
        assert_eq!(result, Err(IdentityError::Declined));
    }

    #[tokio::test]
    async fn test_confirmation_sees_exact_message() {
        let seen = Arc::new(std::sync::Mutex::new(String::new()));
        let seen_clone = seen.clone();
        let identity = LocalIdentity::with_confirmation(
            &keyring(),
            1,
            Arc::new(move |msg| {
                *seen_clone.lock().unwrap() = msg.to_string();
                true
            }),
        )
        .unwrap();

        identity.sign("line one\nline two").await.unwrap();
        assert_eq!(*seen.lock().unwrap(), "line one\nline two");
    }
}
