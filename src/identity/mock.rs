//! Mock identity provider for testing

use super::traits::*;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted reply to the next signature request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignReply {
    Approve,
    Decline,
    Fail(String),
}

/// Mock identity provider
///
/// Replies are consumed in order; once the script is exhausted every request
/// is approved.
#[derive(Clone)]
pub struct MockIdentity {
    address: String,
    chain_id: u64,
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    script: VecDeque<SignReply>,
    prompts: Vec<String>,
}

impl MockIdentity {
    /// Create new mock identity
    pub fn new(address: &str, chain_id: u64) -> Self {
        Self {
            address: address.to_string(),
            chain_id,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queue a reply for a future signature request
    pub fn push_reply(&self, reply: SignReply) {
        self.state.lock().unwrap().script.push_back(reply);
    }

    /// Messages the provider was asked to sign
    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    fn address(&self) -> &str {
        &self.address
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn sign(&self, message: &str) -> IdentityResult<Signature> {
        let mut state = self.state.lock().unwrap();
        state.prompts.push(message.to_string());

        match state.script.pop_front().unwrap_or(SignReply::Approve) {
            SignReply::Approve => Ok(Signature(message.as_bytes().iter().rev().copied().collect())),
            SignReply::Decline => Err(IdentityError::Declined),
            SignReply::Fail(msg) => Err(IdentityError::Provider(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_script_order() {
        let identity = MockIdentity::new("0xabc", 1);
        identity.push_reply(SignReply::Decline);
        identity.push_reply(SignReply::Fail("offline".to_string()));

        assert_eq!(identity.sign("m").await, Err(IdentityError::Declined));
        assert!(matches!(
            identity.sign("m").await,
            Err(IdentityError::Provider(_))
        ));
        assert!(identity.sign("m").await.is_ok());
        assert_eq!(identity.prompts().len(), 3);
    }
}
