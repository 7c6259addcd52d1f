//! Proposal data model and its directory wire format.
//!
//! Layout inside the directory:
//! - `proposal_keys` holds the Index, a JSON array of proposal ids
//! - `proposal_<id>` holds one record object:
//!   `{votes, timestamp, owner, location, status, title, description}`

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Directory key of the Index document.
pub const INDEX_KEY: &str = "proposal_keys";

/// Number of fixed districts on the city map.
pub const DISTRICT_COUNT: u8 = 16;

/// Directory key of a single proposal record.
pub fn record_key(id: &str) -> String {
    format!("proposal_{}", id)
}

/// Generate a fresh proposal id: `prop-<unix millis>-<4 base36 chars>`.
///
/// Uniqueness rests on the timestamp plus random suffix; collisions are
/// treated as negligible.
pub fn generate_proposal_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("prop-{}-{}", millis, suffix)
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Proposal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ProposalStatus {
    /// The only legal moves are pending → approved and pending → rejected.
    pub fn can_transition_to(self, next: ProposalStatus) -> bool {
        matches!(
            (self, next),
            (ProposalStatus::Pending, ProposalStatus::Approved)
                | (ProposalStatus::Pending, ProposalStatus::Rejected)
        )
    }

    /// Approved and rejected are final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ProposalStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the sixteen districts, stored as the label `District N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct District(u8);

impl District {
    /// District by number, 1 through 16.
    pub fn new(number: u8) -> Option<Self> {
        (1..=DISTRICT_COUNT).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based position on the map grid.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// All districts in map order.
    pub fn all() -> impl Iterator<Item = District> {
        (1..=DISTRICT_COUNT).map(District)
    }

    /// Stored label, e.g. `District 7`.
    pub fn label(self) -> String {
        format!("District {}", self.0)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "District {}", self.0)
    }
}

impl FromStr for District {
    type Err = String;

    /// Accepts `District 7`, `D7`, or `7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("District ")
            .or_else(|| trimmed.strip_prefix('D'))
            .unwrap_or(trimmed);

        digits
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(District::new)
            .ok_or_else(|| format!("unknown district '{}' (expected District 1-16)", s))
    }
}

impl TryFrom<String> for District {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<District> for String {
    fn from(district: District) -> Self {
        district.label()
    }
}

/// Stored proposal record (wire format, id lives in the key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    /// Codec token of the vote count.
    pub votes: String,
    /// Creation time, unix seconds.
    pub timestamp: u64,
    pub owner: String,
    pub location: District,
    /// Records written without a status are pending.
    #[serde(default)]
    pub status: ProposalStatus,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A proposal as seen by readers.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub id: String,
    pub encoded_votes: String,
    pub created_at: u64,
    pub owner: String,
    pub location: District,
    pub status: ProposalStatus,
    pub title: String,
    pub description: String,
}

impl Proposal {
    /// Attach an id to a stored record.
    pub fn from_record(id: impl Into<String>, record: ProposalRecord) -> Self {
        Self {
            id: id.into(),
            encoded_votes: record.votes,
            created_at: record.timestamp,
            owner: record.owner,
            location: record.location,
            status: record.status,
            title: record.title,
            description: record.description,
        }
    }

    /// Wire form of this proposal.
    pub fn to_record(&self) -> ProposalRecord {
        ProposalRecord {
            votes: self.encoded_votes.clone(),
            timestamp: self.created_at,
            owner: self.owner.clone(),
            location: self.location,
            status: self.status,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Creator input for a new proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub district: District,
    /// Plain vote count; encoded before it is stored.
    pub votes: f64,
}

impl ProposalDraft {
    /// Title is required; the vote count must be a non-negative finite number.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        if !self.votes.is_finite() || self.votes < 0.0 {
            return Err(format!(
                "vote count must be a non-negative number, got {}",
                self.votes
            ));
        }
        Ok(())
    }
}
