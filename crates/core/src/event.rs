//! Notifications recorded by successful operations.

use crate::{Identity, PhaseChange, ProposalId, WorkflowPhase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something observable happened to the election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The administrator registered a voter.
    VoterRegistered { voter: Identity },

    /// The workflow advanced by one phase.
    WorkflowStatusChange {
        previous: WorkflowPhase,
        current: WorkflowPhase,
    },

    /// A voter added a proposal.
    ProposalRegistered { proposal_id: ProposalId },

    /// A voter cast their ballot.
    Voted {
        voter: Identity,
        proposal_id: ProposalId,
    },
}

impl From<PhaseChange> for Event {
    fn from(change: PhaseChange) -> Self {
        Event::WorkflowStatusChange {
            previous: change.previous,
            current: change.current,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::VoterRegistered { voter } => write!(f, "VoterRegistered({})", voter),
            Event::WorkflowStatusChange { previous, current } => {
                write!(f, "WorkflowStatusChange({}, {})", previous.index(), current.index())
            }
            Event::ProposalRegistered { proposal_id } => {
                write!(f, "ProposalRegistered({})", proposal_id)
            }
            Event::Voted { voter, proposal_id } => write!(f, "Voted({}, {})", voter, proposal_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_change_displays_indices() {
        let event = Event::from(PhaseChange {
            previous: WorkflowPhase::VotingSessionStarted,
            current: WorkflowPhase::VotingSessionEnded,
        });
        assert_eq!(event.to_string(), "WorkflowStatusChange(3, 4)");
    }

    #[test]
    fn serializes_with_tag() {
        let event = Event::ProposalRegistered { proposal_id: 1 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "proposal_registered");
        assert_eq!(json["proposal_id"], 1);

        let event = Event::WorkflowStatusChange {
            previous: WorkflowPhase::RegisteringVoters,
            current: WorkflowPhase::ProposalsRegistrationStarted,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["previous"], 0);
        assert_eq!(json["current"], 1);
    }
}
