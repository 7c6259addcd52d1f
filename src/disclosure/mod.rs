//! Signature-gated disclosure of obscured vote counts.
//!
//! A viewer proves control of an identity by signing a canonical challenge;
//! any successful signature unlocks local decoding of the record's token.
//! Nothing is persisted.

pub mod challenge;
pub mod session;

pub use challenge::{DisclosureContext, DEFAULT_VALIDITY_DAYS};
pub use session::{reveal, DisclosureError, DisclosureSession, DisclosureState};
