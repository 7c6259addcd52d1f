//! Canonical disclosure challenge.
//!
//! The viewer signs this exact text. Field order and labels are fixed:
//!
//! ```text
//! publickey:<0x + 2000 hex digits>
//! contractAddresses:<directory address>
//! contractsChainId:<chain id>
//! startTimestamp:<unix seconds>
//! durationDays:<days>
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline. Any change
//! here changes the message wallets are asked to approve.

use crate::directory::{DirectoryClient, DirectoryResult};
use crate::identity::IdentityProvider;
use crate::proposals::record::unix_now;
use rand::RngCore;

/// Validity window used when none is configured.
pub const DEFAULT_VALIDITY_DAYS: u32 = 30;

/// Random bytes behind the public key material (rendered as 2000 hex digits).
const PUBLIC_KEY_BYTES: usize = 1000;

/// Per-session inputs to the challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureContext {
    pub public_key: String,
    pub directory_address: String,
    pub chain_id: u64,
    pub start_timestamp: u64,
    pub duration_days: u32,
}

impl DisclosureContext {
    /// Start a session: fresh key material, the directory's address, the
    /// identity's chain, and the current time.
    pub async fn establish<D, I>(
        directory: &D,
        identity: &I,
        duration_days: u32,
    ) -> DirectoryResult<Self>
    where
        D: DirectoryClient + ?Sized,
        I: IdentityProvider + ?Sized,
    {
        Ok(Self {
            public_key: generate_public_key(),
            directory_address: directory.address().await?,
            chain_id: identity.chain_id(),
            start_timestamp: unix_now(),
            duration_days,
        })
    }

    /// The exact text to be signed.
    pub fn challenge(&self) -> String {
        format!(
            "publickey:{}\ncontractAddresses:{}\ncontractsChainId:{}\nstartTimestamp:{}\ndurationDays:{}",
            self.public_key,
            self.directory_address,
            self.chain_id,
            self.start_timestamp,
            self.duration_days
        )
    }
}

/// `0x` followed by 2000 random hex digits.
pub fn generate_public_key() -> String {
    let mut bytes = vec![0u8; PUBLIC_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}
