//! Vote counting.

use crate::{Proposal, ProposalId};

/// Select the winning proposal.
///
/// Scans in index order starting from index 0 with a count of 0. A later proposal only
/// replaces the tracked winner with a strictly greater count, so ties go to the lowest index.
/// An empty sequence yields 0.
pub fn tally(proposals: &[Proposal]) -> ProposalId {
    let mut winner: ProposalId = 0;
    let mut max_votes: u64 = 0;

    for (id, proposal) in proposals.iter().enumerate() {
        if proposal.vote_count > max_votes {
            max_votes = proposal.vote_count;
            winner = id;
        }
    }

    winner
}
