//! Identity provider abstractions.
//!
//! The identity provider is the viewer's wallet: it names the current
//! identity, the network it is on, and signs messages on request. The core
//! cannot tell a user who declined from a provider that failed; both surface
//! as `IdentityError` and end a disclosure attempt the same way.

use async_trait::async_trait;
use std::fmt;

/// Detached signature bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Result type for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity provider errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Signature request declined")]
    Declined,

    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// Identity provider abstraction for testing
///
/// `sign` has no timeout: it resolves only when the provider answers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current identity (wallet address)
    fn address(&self) -> &str;

    /// Network / chain identifier the identity is connected to
    fn chain_id(&self) -> u64;

    /// Sign `message` exactly as given
    async fn sign(&self, message: &str) -> IdentityResult<Signature>;
}
