//! Proposals submitted by voters.

use serde::{Deserialize, Serialize};

/// Position of a proposal in the append-only proposal sequence.
pub type ProposalId = usize;

/// Description of the sentinel proposal stored at index 0.
pub const GENESIS_DESCRIPTION: &str = "GENESIS";

/// A named option accumulating votes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    /// Create a proposal with no votes.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
        }
    }

    /// The sentinel proposal created when proposals registration opens.
    pub fn genesis() -> Self {
        Self::new(GENESIS_DESCRIPTION)
    }
}
