//! Point-in-time copies of an election.

use crate::{Digest, Error, Identity, Proposal, ProposalId, Voter, WorkflowPhase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A detached, serializable copy of an election's state.
///
/// Voters are kept in identity order so equal elections encode identically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub administrator: Identity,
    pub phase: WorkflowPhase,
    pub voters: BTreeMap<Identity, Voter>,
    pub proposals: Vec<Proposal>,
    pub winning_proposal_id: Option<ProposalId>,
}

impl Snapshot {
    /// Fingerprint of the whole snapshot.
    pub fn digest(&self) -> Result<Digest, Error> {
        Digest::of_value(self)
    }

    /// Total number of ballots cast.
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }

    /// The winning proposal, once tallied.
    pub fn winner(&self) -> Option<(ProposalId, &Proposal)> {
        let id = self.winning_proposal_id?;
        self.proposals.get(id).map(|p| (id, p))
    }
}
