//! Proposal repository.
//!
//! Owns the canonical proposal state inside the directory: the Index
//! document enumerating every proposal id, and one record per proposal.
//!
//! Ordering rule for `create`: the record is written before its id is
//! appended to the Index, so any reader that sees the id can read the record.
//!
//! The Index append is a plain read-modify-write. Two `create` calls that
//! read the Index at the same time both write back their own version and one
//! append is lost. The directory offers no compare-and-swap, so this stays a
//! documented property of the design.

use super::record::{
    generate_proposal_id, record_key, unix_now, Proposal, ProposalDraft, ProposalRecord,
    ProposalStatus, INDEX_KEY,
};
use super::{ProposalError, ProposalResult};
use crate::codec;
use crate::directory::{DirectoryClient, DirectoryError};
use crate::serialization::{from_json_bytes, to_json_bytes, SerializationError};
use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Repository over a directory client.
pub struct ProposalRepository<D: DirectoryClient> {
    directory: D,
}

impl<D: DirectoryClient> ProposalRepository<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Underlying directory.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Every listed proposal, newest first.
    ///
    /// A directory that is not ready lists as empty. Records that are absent,
    /// unreadable, or unparseable are logged and skipped; one bad record never
    /// fails the listing. An Index that cannot be read lists as empty.
    /// Ties on `created_at` keep Index order.
    pub async fn list_all(&self) -> ProposalResult<Vec<Proposal>> {
        if !self.directory.is_available().await? {
            debug!("directory not ready, listing as empty");
            return Ok(Vec::new());
        }

        let ids = match self.read_index().await {
            Ok(ids) => dedup_preserving_order(ids),
            Err(e) => {
                warn!(error = %e, "failed to read proposal index, listing as empty");
                Vec::new()
            }
        };
        let fetches = ids.iter().map(|id| self.fetch_listed(id));
        let mut proposals: Vec<Proposal> = join_all(fetches).await.into_iter().flatten().collect();

        // Stable sort: equal timestamps stay in Index order.
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(proposals)
    }

    /// Read a single proposal by id, listed or not.
    pub async fn get(&self, id: &str) -> ProposalResult<Proposal> {
        if !self.directory.is_available().await? {
            return Err(ProposalError::NotFound(id.to_string()));
        }

        let bytes = self.directory.get(&record_key(id)).await?;
        if bytes.is_empty() {
            return Err(ProposalError::NotFound(id.to_string()));
        }

        let record: ProposalRecord = from_json_bytes(&bytes)?;
        Ok(Proposal::from_record(id, record))
    }

    /// Store a new pending proposal and list it. Returns the new id.
    pub async fn create(&self, owner: &str, draft: ProposalDraft) -> ProposalResult<String> {
        draft.validate().map_err(ProposalError::InvalidDraft)?;

        if !self.directory.is_available().await? {
            return Err(DirectoryError::Unavailable.into());
        }

        let id = generate_proposal_id();
        let record = ProposalRecord {
            votes: codec::encode(draft.votes),
            timestamp: unix_now(),
            owner: owner.to_string(),
            location: draft.district,
            status: ProposalStatus::Pending,
            title: draft.title,
            description: draft.description,
        };

        // Record first, Index second.
        self.directory
            .set(&record_key(&id), &to_json_bytes(&record)?)
            .await?;

        let mut ids = self.read_index().await?;
        if !ids.contains(&id) {
            ids.push(id.clone());
        }
        self.directory.set(INDEX_KEY, &to_json_bytes(&ids)?).await?;

        info!(proposal = %id, owner, district = %record.location, "proposal created");
        Ok(id)
    }

    /// Move a pending proposal to a terminal status.
    ///
    /// Every other stored field, including ones this version does not know,
    /// is written back unchanged. The Index is not touched. Authorization is
    /// the caller's concern.
    pub async fn set_status(&self, id: &str, status: ProposalStatus) -> ProposalResult<()> {
        if !self.directory.is_available().await? {
            return Err(ProposalError::NotFound(id.to_string()));
        }

        let key = record_key(id);
        let bytes = self.directory.get(&key).await?;
        if bytes.is_empty() {
            return Err(ProposalError::NotFound(id.to_string()));
        }

        let mut fields: Map<String, Value> = from_json_bytes(&bytes)?;
        let current: ProposalRecord = serde_json::from_value(Value::Object(fields.clone()))
            .map_err(|e| SerializationError::Decode(e.to_string()))?;

        if !current.status.can_transition_to(status) {
            return Err(ProposalError::InvalidTransition {
                id: id.to_string(),
                from: current.status,
                to: status,
            });
        }

        fields.insert(
            "status".to_string(),
            Value::String(status.as_str().to_string()),
        );
        self.directory.set(&key, &to_json_bytes(&fields)?).await?;

        info!(proposal = %id, from = %current.status, to = %status, "proposal status changed");
        Ok(())
    }

    /// Current Index. Absent means empty; unparseable is logged and treated
    /// as empty.
    async fn read_index(&self) -> ProposalResult<Vec<String>> {
        let bytes = self.directory.get(INDEX_KEY).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match from_json_bytes::<Vec<String>>(&bytes) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!(error = %e, "unparseable proposal index, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Fetch a listed record, or `None` (logged) when it cannot be shown.
    async fn fetch_listed(&self, id: &str) -> Option<Proposal> {
        let bytes = match self.directory.get(&record_key(id)).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(proposal = %id, error = %e, "failed to load proposal, skipping");
                return None;
            }
        };

        if bytes.is_empty() {
            warn!(proposal = %id, "indexed proposal has no record, skipping");
            return None;
        }

        match from_json_bytes::<ProposalRecord>(&bytes) {
            Ok(record) => Some(Proposal::from_record(id, record)),
            Err(e) => {
                warn!(proposal = %id, error = %e, "unparseable proposal record, skipping");
                None
            }
        }
    }
}

/// The Index is an ordered set: keep the first occurrence of each id.
fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
