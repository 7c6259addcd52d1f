//! Tallies over a proposal listing.

use super::record::{District, Proposal, ProposalStatus, DISTRICT_COUNT};

/// Counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl Tally {
    pub fn from_proposals(proposals: &[Proposal]) -> Self {
        proposals.iter().fold(Self::default(), |mut tally, p| {
            tally.total += 1;
            match p.status {
                ProposalStatus::Pending => tally.pending += 1,
                ProposalStatus::Approved => tally.approved += 1,
                ProposalStatus::Rejected => tally.rejected += 1,
            }
            tally
        })
    }
}

/// Proposals per district, indexed by map position.
pub fn district_occupancy(proposals: &[Proposal]) -> [usize; DISTRICT_COUNT as usize] {
    let mut counts = [0usize; DISTRICT_COUNT as usize];
    for p in proposals {
        counts[p.location.index()] += 1;
    }
    counts
}

/// First proposal in listing order located in `district`.
pub fn first_in_district(proposals: &[Proposal], district: District) -> Option<&Proposal> {
    proposals.iter().find(|p| p.location == district)
}
