//! Next-action recommendation.
//!
//! A pure function of the current collection with a fixed priority order;
//! it holds no memory of past recommendations. Dependency ids are taken at
//! face value — existence and cycles are not validated, so a dependency
//! cycle leaves its members permanently non-recommendable.

use std::collections::HashSet;
use std::fmt;

use crate::document::Proposal;
use crate::frontmatter::Status;

/// The single next actionable step for a proposal collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction<'a> {
    /// An ACCEPTED proposal whose dependencies are all DONE. `fresh` when it
    /// has no dependencies at all.
    Implement { proposal: &'a Proposal, fresh: bool },
    /// A DRAFT proposal awaiting review.
    Review(&'a Proposal),
    /// Only BLOCKED proposals remain; resolve the blockers first.
    ResolveBlocked,
    /// Nothing in flight; start a new proposal.
    Create,
}

/// Pick the next action, first match wins:
///
/// 1. the first ACCEPTED proposal (scan order) whose every dependency is
///    DONE;
/// 2. else the first DRAFT proposal;
/// 3. else, if anything is BLOCKED, resolve blockers;
/// 4. else create a new proposal.
pub fn recommend(proposals: &[Proposal]) -> NextAction<'_> {
    let done: HashSet<&str> = proposals
        .iter()
        .filter(|p| p.status == Status::Done.as_ref())
        .map(|p| p.number.as_str())
        .collect();

    for proposal in proposals.iter().filter(|p| p.status == Status::Accepted.as_ref()) {
        if proposal.depends_on.iter().all(|dep| done.contains(dep.as_str())) {
            return NextAction::Implement {
                proposal,
                fresh: proposal.depends_on.is_empty(),
            };
        }
    }
    if let Some(draft) = proposals.iter().find(|p| p.status == Status::Draft.as_ref()) {
        return NextAction::Review(draft);
    }
    if proposals.iter().any(|p| p.status == Status::Blocked.as_ref()) {
        return NextAction::ResolveBlocked;
    }
    NextAction::Create
}

impl fmt::Display for NextAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextAction::Implement { proposal, fresh: true } => {
                write!(f, "Implement {} (no dependencies)", proposal.id())
            }
            NextAction::Implement { proposal, fresh: false } => {
                write!(f, "Implement {} (dependencies met)", proposal.id())
            }
            NextAction::Review(proposal) => {
                write!(f, "Review {} (approval needed before implementation)", proposal.id())
            }
            NextAction::ResolveBlocked => write!(f, "Resolve blocked SEPs to continue"),
            NextAction::Create => {
                write!(f, "Create a new SEP with 'sepctl new \"Feature Name\"'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(number: &str, status: &str, depends_on: &[&str]) -> Proposal {
        Proposal {
            number: number.to_string(),
            status: status.to_string(),
            depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
            ..Proposal::default()
        }
    }

    #[test]
    fn lone_accepted_proposal_is_a_fresh_start() {
        let proposals = vec![proposal("0001", "ACCEPTED", &[])];
        let action = recommend(&proposals);
        assert!(matches!(
            action,
            NextAction::Implement { proposal, fresh: true } if proposal.number == "0001"
        ));
        assert_eq!(action.to_string(), "Implement SEP-0001 (no dependencies)");
    }

    #[test]
    fn accepted_dependency_does_not_satisfy_a_dependent() {
        let proposals = vec![
            proposal("0001", "ACCEPTED", &[]),
            proposal("0002", "ACCEPTED", &["0001"]),
        ];
        assert!(matches!(
            recommend(&proposals),
            NextAction::Implement { proposal, .. } if proposal.number == "0001"
        ));
    }

    #[test]
    fn done_dependencies_unlock_the_dependent() {
        let proposals = vec![
            proposal("0001", "DONE", &[]),
            proposal("0002", "ACCEPTED", &["0001"]),
        ];
        let action = recommend(&proposals);
        assert!(matches!(
            action,
            NextAction::Implement { proposal, fresh: false } if proposal.number == "0002"
        ));
        assert_eq!(action.to_string(), "Implement SEP-0002 (dependencies met)");
    }

    #[test]
    fn drafts_are_reviewed_when_nothing_is_implementable() {
        let proposals = vec![
            proposal("0001", "ACCEPTED", &["0099"]),
            proposal("0002", "DRAFT", &[]),
            proposal("0003", "DRAFT", &[]),
        ];
        assert!(matches!(
            recommend(&proposals),
            NextAction::Review(p) if p.number == "0002"
        ));
    }

    #[test]
    fn blocked_only_collections_ask_for_blocker_resolution() {
        let proposals = vec![
            proposal("0001", "BLOCKED", &[]),
            proposal("0002", "DONE", &[]),
        ];
        assert_eq!(recommend(&proposals), NextAction::ResolveBlocked);
    }

    #[test]
    fn empty_or_retired_collections_suggest_creation() {
        assert_eq!(recommend(&[]), NextAction::Create);
        let proposals = vec![
            proposal("0001", "DONE", &[]),
            proposal("0002", "CANCELLED", &[]),
        ];
        assert_eq!(recommend(&proposals), NextAction::Create);
    }

    #[test]
    fn dependency_cycles_make_members_non_recommendable() {
        let proposals = vec![
            proposal("0001", "ACCEPTED", &["0002"]),
            proposal("0002", "ACCEPTED", &["0001"]),
        ];
        assert_eq!(recommend(&proposals), NextAction::Create);
    }

    #[test]
    fn recommendation_is_deterministic() {
        let proposals = vec![
            proposal("0001", "DRAFT", &[]),
            proposal("0002", "ACCEPTED", &["0001"]),
        ];
        assert_eq!(recommend(&proposals), recommend(&proposals));
    }
}
