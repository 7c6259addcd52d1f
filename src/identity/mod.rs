//! Identity provider: who the viewer is and how they sign.

pub mod keyring;
pub mod local;
pub mod mock;
pub mod traits;

pub use keyring::{IdentityKeyring, KeyringError};
pub use local::LocalIdentity;
pub use mock::{MockIdentity, SignReply};
pub use traits::{IdentityError, IdentityProvider, IdentityResult, Signature};

/// Case-insensitive identity comparison (wallet addresses differ only in
/// checksum casing).
pub fn same_identity(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_identity_ignores_case() {
        assert!(same_identity("0xAbCdEf", "0xabcdef"));
        assert!(!same_identity("0xabcdef", "0xabcde0"));
    }
}
