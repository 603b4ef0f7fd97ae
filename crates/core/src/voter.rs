//! Voter records.

use crate::ProposalId;
use serde::{Deserialize, Serialize};

/// An opaque caller identity (address, principal, user name...).
///
/// The host authenticates it; the core only compares it.
pub type Identity = String;

/// A registered voter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    pub voted_proposal_id: Option<ProposalId>,
}

impl Voter {
    /// A freshly registered voter who has not voted yet.
    pub fn registered() -> Self {
        Self {
            is_registered: true,
            has_voted: false,
            voted_proposal_id: None,
        }
    }

    /// Record this voter's ballot.
    pub(crate) fn record_vote(&mut self, proposal_id: ProposalId) {
        self.has_voted = true;
        self.voted_proposal_id = Some(proposal_id);
    }
}
