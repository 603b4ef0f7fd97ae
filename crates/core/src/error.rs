//! Error types for ezballot-core.
//!
//! Messages keep the revert wording of the Solidity voting contract so existing suites match.

use thiserror::Error;

use crate::{Identity, Operation, ProposalId, WorkflowPhase};

/// Reasons an election operation is rejected.
///
/// A rejected call never changes the election.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Caller is not the administrator.
    #[error("Ownable: caller is not the owner")]
    Unauthorized { caller: Identity },

    /// Operation attempted outside its phase.
    #[error("{message}")]
    WrongPhase {
        operation: Operation,
        current: WorkflowPhase,
        message: &'static str,
    },

    /// Identity is already in the voter registry.
    #[error("Already registered")]
    AlreadyRegistered(Identity),

    /// Caller is not a registered voter.
    #[error("You're not a voter")]
    NotAVoter(Identity),

    /// Proposal description is empty.
    #[error("Vous ne pouvez pas ne rien proposer")]
    EmptyProposal,

    /// No proposal at this index.
    #[error("Proposal not found")]
    ProposalNotFound(ProposalId),

    /// Voter has already cast their ballot.
    #[error("You have already voted")]
    AlreadyVoted(Identity),

    /// The winner was requested before tallying.
    #[error("Votes have not been tallied yet")]
    NotTallied,

    /// Encoding a snapshot failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn wrong_phase(operation: Operation, current: WorkflowPhase) -> Self {
        Error::WrongPhase {
            operation,
            current,
            message: operation.wrong_phase_message(current),
        }
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(e: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::Serialization(e.to_string())
    }
}
