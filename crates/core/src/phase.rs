//! Workflow phase definitions.
//!
//! The election follows a linear progression:
//! registering voters → proposals open → proposals closed → voting open → voting closed → tallied

use crate::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six ordered stages of an election.
///
/// Serialized as its numeric index (`0..=5`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WorkflowPhase {
    #[default]
    RegisteringVoters,
    ProposalsRegistrationStarted,
    ProposalsRegistrationEnded,
    VotingSessionStarted,
    VotingSessionEnded,
    VotesTallied,
}

/// The canonical ordering of workflow phases.
pub const WORKFLOW_PHASES: [WorkflowPhase; 6] = [
    WorkflowPhase::RegisteringVoters,
    WorkflowPhase::ProposalsRegistrationStarted,
    WorkflowPhase::ProposalsRegistrationEnded,
    WorkflowPhase::VotingSessionStarted,
    WorkflowPhase::VotingSessionEnded,
    WorkflowPhase::VotesTallied,
];

impl WorkflowPhase {
    /// The 0-based position of this phase in the progression.
    pub fn index(self) -> u8 {
        match self {
            WorkflowPhase::RegisteringVoters => 0,
            WorkflowPhase::ProposalsRegistrationStarted => 1,
            WorkflowPhase::ProposalsRegistrationEnded => 2,
            WorkflowPhase::VotingSessionStarted => 3,
            WorkflowPhase::VotingSessionEnded => 4,
            WorkflowPhase::VotesTallied => 5,
        }
    }

    /// Look up a phase by its index.
    pub fn from_index(index: u8) -> Option<Self> {
        WORKFLOW_PHASES.get(usize::from(index)).copied()
    }

    /// The phase that follows this one, or `None` once votes are tallied.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Operations that may run while the election is in this phase.
    pub fn allowed_operations(self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| op.required_phase() == self)
            .collect()
    }

    /// Snake-case name, used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowPhase::RegisteringVoters => "registering_voters",
            WorkflowPhase::ProposalsRegistrationStarted => "proposals_registration_started",
            WorkflowPhase::ProposalsRegistrationEnded => "proposals_registration_ended",
            WorkflowPhase::VotingSessionStarted => "voting_session_started",
            WorkflowPhase::VotingSessionEnded => "voting_session_ended",
            WorkflowPhase::VotesTallied => "votes_tallied",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<WorkflowPhase> for u8 {
    fn from(phase: WorkflowPhase) -> Self {
        phase.index()
    }
}

impl TryFrom<u8> for WorkflowPhase {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or_else(|| format!("invalid workflow phase index: {}", index))
    }
}

/// A single step forward in the workflow, reported by every phase-advancing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub previous: WorkflowPhase,
    pub current: WorkflowPhase,
}

impl fmt::Display for PhaseChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.previous, self.current)
    }
}
