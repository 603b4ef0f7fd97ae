//! The mutating operations of an election and the phase each one requires.

use crate::WorkflowPhase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A state-changing election operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    RegisterVoter,
    OpenProposalsRegistration,
    AddProposal,
    CloseProposalsRegistration,
    OpenVotingSession,
    CastVote,
    CloseVotingSession,
    TallyVotes,
}

impl Operation {
    /// Every operation, in workflow order.
    pub const ALL: [Operation; 8] = [
        Operation::RegisterVoter,
        Operation::OpenProposalsRegistration,
        Operation::AddProposal,
        Operation::CloseProposalsRegistration,
        Operation::OpenVotingSession,
        Operation::CastVote,
        Operation::CloseVotingSession,
        Operation::TallyVotes,
    ];

    /// The only phase in which this operation is legal.
    pub fn required_phase(self) -> WorkflowPhase {
        match self {
            Operation::RegisterVoter => WorkflowPhase::RegisteringVoters,
            Operation::OpenProposalsRegistration => WorkflowPhase::RegisteringVoters,
            Operation::AddProposal => WorkflowPhase::ProposalsRegistrationStarted,
            Operation::CloseProposalsRegistration => WorkflowPhase::ProposalsRegistrationStarted,
            Operation::OpenVotingSession => WorkflowPhase::ProposalsRegistrationEnded,
            Operation::CastVote => WorkflowPhase::VotingSessionStarted,
            Operation::CloseVotingSession => WorkflowPhase::VotingSessionStarted,
            Operation::TallyVotes => WorkflowPhase::VotingSessionEnded,
        }
    }

    /// Whether only the administrator may perform this operation.
    pub fn requires_administrator(self) -> bool {
        !matches!(self, Operation::AddProposal | Operation::CastVote)
    }

    /// The rejection message when this operation is attempted in `current`.
    ///
    /// Phrasing tells "too early" apart from "already past".
    pub fn wrong_phase_message(self, current: WorkflowPhase) -> &'static str {
        let too_early = current < self.required_phase();
        match (self, too_early) {
            (Operation::RegisterVoter, _) => "Voters registration is not open anymore",
            (Operation::OpenProposalsRegistration, _) => "Registering proposals cant be started now",
            (Operation::AddProposal, true) => "Proposals are not allowed yet",
            (Operation::AddProposal, false) => "Proposals registration has ended",
            (Operation::CloseProposalsRegistration, true) => "Registering proposals havent started yet",
            (Operation::CloseProposalsRegistration, false) => "Registering proposals has already ended",
            (Operation::OpenVotingSession, true) => "Registering proposals phase is not finished",
            (Operation::OpenVotingSession, false) => "Voting session has already started",
            (Operation::CastVote, true) => "Voting session havent started yet",
            (Operation::CastVote, false) => "Voting session has ended",
            (Operation::CloseVotingSession, true) => "Voting session havent started yet",
            (Operation::CloseVotingSession, false) => "Voting session has already ended",
            (Operation::TallyVotes, true) => "Current status is not voting session ended",
            (Operation::TallyVotes, false) => "Votes have already been tallied",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::RegisterVoter => "register_voter",
            Operation::OpenProposalsRegistration => "open_proposals_registration",
            Operation::AddProposal => "add_proposal",
            Operation::CloseProposalsRegistration => "close_proposals_registration",
            Operation::OpenVotingSession => "open_voting_session",
            Operation::CastVote => "cast_vote",
            Operation::CloseVotingSession => "close_voting_session",
            Operation::TallyVotes => "tally_votes",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
