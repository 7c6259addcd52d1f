//! Per-record disclosure state machine.
//!
//! ```text
//! Idle ──toggle──► AwaitingSignature ──signed──► Revealed(value)
//!                          │                          │
//!                          └──declined/error──► Failed │
//!                                                     ▼
//!                          Revealed ──toggle──► Idle (no prompt)
//! ```
//!
//! A Failed session prompts again on the next toggle. The signature only
//! gates local decoding; nothing checks it against the value.
//!
//! `toggle` holds the session borrowed while the provider is asked, so
//! observers follow transitions through [`DisclosureSession::subscribe`].
//! AwaitingSignature is published before the signature request goes out.

use super::challenge::DisclosureContext;
use crate::codec::{self, CodecError};
use crate::identity::{IdentityError, IdentityProvider};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Why a disclosure attempt ended without a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisclosureError {
    #[error("Signature declined by the viewer")]
    SignatureDeclined,

    #[error("Identity provider failed: {0}")]
    Provider(String),

    #[error(transparent)]
    Decode(#[from] CodecError),
}

impl From<IdentityError> for DisclosureError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Declined => Self::SignatureDeclined,
            IdentityError::Provider(msg) => Self::Provider(msg),
        }
    }
}

/// Session state.
#[derive(Debug, Clone, PartialEq)]
pub enum DisclosureState {
    Idle,
    AwaitingSignature,
    Revealed(f64),
    Failed(DisclosureError),
}

/// Sign the session challenge, then decode `token`.
pub async fn reveal<I: IdentityProvider + ?Sized>(
    context: &DisclosureContext,
    identity: &I,
    token: &str,
) -> Result<f64, DisclosureError> {
    let signature = identity.sign(&context.challenge()).await?;
    debug!(signer = identity.address(), signature = %signature, "challenge signed");
    Ok(codec::decode(token)?)
}

/// Show/hide state for one record's vote count.
#[derive(Debug)]
pub struct DisclosureSession {
    state: DisclosureState,
    updates: watch::Sender<DisclosureState>,
}

impl Default for DisclosureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DisclosureSession {
    pub fn new() -> Self {
        let (updates, _) = watch::channel(DisclosureState::Idle);
        Self {
            state: DisclosureState::Idle,
            updates,
        }
    }

    pub fn state(&self) -> &DisclosureState {
        &self.state
    }

    /// Receiver that sees every state the session enters.
    pub fn subscribe(&self) -> watch::Receiver<DisclosureState> {
        self.updates.subscribe()
    }

    fn transition(&mut self, next: DisclosureState) {
        self.updates.send_replace(next.clone());
        self.state = next;
    }

    /// Decoded value while revealed.
    pub fn revealed(&self) -> Option<f64> {
        match self.state {
            DisclosureState::Revealed(value) => Some(value),
            _ => None,
        }
    }

    /// Hide the value again.
    pub fn collapse(&mut self) {
        self.transition(DisclosureState::Idle);
    }

    /// Reveal, or hide when already revealed.
    ///
    /// Hiding never prompts. Every other state starts a fresh signature
    /// request over the session challenge.
    pub async fn toggle<I: IdentityProvider + ?Sized>(
        &mut self,
        context: &DisclosureContext,
        identity: &I,
        token: &str,
    ) -> &DisclosureState {
        if matches!(self.state, DisclosureState::Revealed(_)) {
            self.collapse();
            return &self.state;
        }

        self.transition(DisclosureState::AwaitingSignature);
        let next = match reveal(context, identity, token).await {
            Ok(value) => DisclosureState::Revealed(value),
            Err(e) => {
                warn!(error = %e, "disclosure failed");
                DisclosureState::Failed(e)
            }
        };
        self.transition(next);
        &self.state
    }
}
