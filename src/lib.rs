//! UrbanPlan - urban development proposals with obscured vote counts
//!
//! Proposals live in an external key-value directory; their vote counts are
//! stored as codec tokens and only shown after the viewer signs a challenge.
//!
//! Key principles:
//! - The directory is the source of truth (Index + one record per proposal)
//! - Record is written before its id is listed
//! - One corrupt record never blocks a listing
//! - Disclosure results are never persisted

pub mod codec;
pub mod directory;
pub mod disclosure;
pub mod identity;
pub mod notice;
pub mod proposals;
pub mod serialization;
