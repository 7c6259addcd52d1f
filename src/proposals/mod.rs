//! Urban development proposals.
//!
//! - `record`: data model and directory wire format
//! - `repository`: Index + record persistence (list, create, status change)
//! - `lifecycle`: owner-authorized pending → approved/rejected transitions
//! - `summary`: status tallies and district occupancy for front ends

pub mod lifecycle;
pub mod record;
pub mod repository;
pub mod summary;

pub use lifecycle::{approve, is_owner, reject, transition};
pub use record::{District, Proposal, ProposalDraft, ProposalRecord, ProposalStatus};
pub use repository::ProposalRepository;
pub use summary::Tally;

use crate::directory::DirectoryError;
use crate::serialization::SerializationError;

/// Result type for proposal operations
pub type ProposalResult<T> = Result<T, ProposalError>;

/// Proposal operation errors
#[derive(Debug, thiserror::Error)]
pub enum ProposalError {
    #[error("Proposal not found: {0}")]
    NotFound(String),

    #[error("Proposal {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: ProposalStatus,
        to: ProposalStatus,
    },

    #[error("{actor} is not the owner of proposal {id}")]
    Unauthorized { id: String, actor: String },

    #[error("Invalid proposal: {0}")]
    InvalidDraft(String),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Malformed proposal data: {0}")]
    Serialization(#[from] SerializationError),
}
