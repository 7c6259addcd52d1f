//! Proposal lifecycle management.
//!
//! States: pending, approved, rejected. Transitions: pending → approved and
//! pending → rejected, both only by the proposal's owner. Nothing leaves a
//! terminal state.
//!
//! Steps for every transition:
//! 1. Read the current record (NotFound if absent)
//! 2. Check the actor owns it (case-insensitive address compare)
//! 3. Check the move is legal from the current status
//! 4. Rewrite the record with the new status

use super::record::{Proposal, ProposalStatus};
use super::repository::ProposalRepository;
use super::{ProposalError, ProposalResult};
use crate::directory::DirectoryClient;
use crate::identity::same_identity;

/// Whether `actor` may adjudicate `proposal`.
pub fn is_owner(actor: &str, proposal: &Proposal) -> bool {
    same_identity(actor, &proposal.owner)
}

/// Apply `target` to proposal `id` on behalf of `actor`.
pub async fn transition<D: DirectoryClient>(
    repository: &ProposalRepository<D>,
    actor: &str,
    id: &str,
    target: ProposalStatus,
) -> ProposalResult<()> {
    let proposal = repository.get(id).await?;

    if !is_owner(actor, &proposal) {
        return Err(ProposalError::Unauthorized {
            id: id.to_string(),
            actor: actor.to_string(),
        });
    }

    if !proposal.status.can_transition_to(target) {
        return Err(ProposalError::InvalidTransition {
            id: id.to_string(),
            from: proposal.status,
            to: target,
        });
    }

    repository.set_status(id, target).await
}

/// pending → approved
pub async fn approve<D: DirectoryClient>(
    repository: &ProposalRepository<D>,
    actor: &str,
    id: &str,
) -> ProposalResult<()> {
    transition(repository, actor, id, ProposalStatus::Approved).await
}

/// pending → rejected
pub async fn reject<D: DirectoryClient>(
    repository: &ProposalRepository<D>,
    actor: &str,
    id: &str,
) -> ProposalResult<()> {
    transition(repository, actor, id, ProposalStatus::Rejected).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MockDirectory;
    use crate::proposals::record::{District, ProposalDraft};

    async fn setup(owner: &str) -> (ProposalRepository<MockDirectory>, String) {
        let repo = ProposalRepository::new(MockDirectory::new());
        let id = repo
            .create(
                owner,
                ProposalDraft {
                    title: "Tram line".to_string(),
                    description: String::new(),
                    district: District::new(9).unwrap(),
                    votes: 12.0,
                },
            )
            .await
            .unwrap();
        (repo, id)
    }

    #[tokio::test]
    async fn test_owner_can_approve() {
        let (repo, id) = setup("0xOwner").await;

        approve(&repo, "0xOwner", &id).await.unwrap();
        assert_eq!(repo.get(&id).await.unwrap().status, ProposalStatus::Approved);
    }

    #[tokio::test]
    async fn test_owner_compare_is_case_insensitive() {
        let (repo, id) = setup("0xAbCdEf").await;

        reject(&repo, "0xABCDEF", &id).await.unwrap();
        assert_eq!(repo.get(&id).await.unwrap().status, ProposalStatus::Rejected);
    }

    #[tokio::test]
    async fn test_non_owner_is_refused() {
        let (repo, id) = setup("0xowner").await;

        let result = approve(&repo, "0xsomeoneelse", &id).await;
        assert!(matches!(result, Err(ProposalError::Unauthorized { .. })));
        assert_eq!(repo.get(&id).await.unwrap().status, ProposalStatus::Pending);
    }

    #[tokio::test]
    async fn test_no_transition_out_of_terminal_state() {
        let (repo, id) = setup("0xowner").await;

        approve(&repo, "0xowner", &id).await.unwrap();
        let result = reject(&repo, "0xowner", &id).await;

        assert!(matches!(
            result,
            Err(ProposalError::InvalidTransition {
                from: ProposalStatus::Approved,
                to: ProposalStatus::Rejected,
                ..
            })
        ));
        assert_eq!(repo.get(&id).await.unwrap().status, ProposalStatus::Approved);
    }

    #[tokio::test]
    async fn test_pending_is_not_a_target() {
        let (repo, id) = setup("0xowner").await;

        let result = transition(&repo, "0xowner", &id, ProposalStatus::Pending).await;
        assert!(matches!(result, Err(ProposalError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_missing_proposal() {
        let repo = ProposalRepository::new(MockDirectory::new());
        let result = approve(&repo, "0xowner", "prop-0-none").await;
        assert!(matches!(result, Err(ProposalError::NotFound(_))));
    }
}
