//! The election engine: owns the workflow phase and both registries.

use crate::{
    Error, Event, Identity, Operation, PhaseChange, Proposal, ProposalId, Snapshot, Voter,
    WorkflowPhase, tally,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A single election, driven by its administrator from voter registration to tally.
///
/// Every operation checks all of its preconditions before touching any state, so a
/// rejected call leaves the election exactly as it was.
#[derive(Clone, Debug)]
pub struct Election {
    /// Identity allowed to register voters and advance phases.
    administrator: Identity,

    /// Current workflow phase.
    phase: WorkflowPhase,

    /// Voter registry.
    voters: BTreeMap<Identity, Voter>,

    /// Proposals in insertion order; index 0 is GENESIS once proposals open.
    proposals: Vec<Proposal>,

    /// Cached result of the tally.
    winning_proposal_id: Option<ProposalId>,

    /// Events not yet drained by the host.
    history: Vec<Event>,
}

impl Election {
    /// Create an election in the voter registration phase.
    pub fn new(administrator: impl Into<Identity>) -> Self {
        Self {
            administrator: administrator.into(),
            phase: WorkflowPhase::RegisteringVoters,
            voters: BTreeMap::new(),
            proposals: Vec::new(),
            winning_proposal_id: None,
            history: Vec::new(),
        }
    }

    // =========================================================================
    // Administrator operations
    // =========================================================================

    /// Add `voter` to the registry.
    pub fn register_voter(&mut self, caller: &str, voter: &str) -> Result<(), Error> {
        self.authorize(caller, Operation::RegisterVoter)?;
        if self.is_registered(voter) {
            return Err(Error::AlreadyRegistered(voter.to_string()));
        }

        self.voters.insert(voter.to_string(), Voter::registered());
        debug!(voter, "voter registered");
        self.history.push(Event::VoterRegistered {
            voter: voter.to_string(),
        });

        Ok(())
    }

    /// Open proposals registration and create the GENESIS proposal at index 0.
    pub fn open_proposals_registration(&mut self, caller: &str) -> Result<PhaseChange, Error> {
        let change = self.transition(caller, Operation::OpenProposalsRegistration)?;
        self.proposals.push(Proposal::genesis());
        Ok(change)
    }

    pub fn close_proposals_registration(&mut self, caller: &str) -> Result<PhaseChange, Error> {
        self.transition(caller, Operation::CloseProposalsRegistration)
    }

    pub fn open_voting_session(&mut self, caller: &str) -> Result<PhaseChange, Error> {
        self.transition(caller, Operation::OpenVotingSession)
    }

    pub fn close_voting_session(&mut self, caller: &str) -> Result<PhaseChange, Error> {
        self.transition(caller, Operation::CloseVotingSession)
    }

    /// Count the votes and record the winner.
    pub fn tally_votes(&mut self, caller: &str) -> Result<PhaseChange, Error> {
        self.authorize(caller, Operation::TallyVotes)?;

        let winner = tally(&self.proposals);
        let votes = self.proposals.get(winner).map_or(0, |p| p.vote_count);
        let change = self.advance(Operation::TallyVotes)?;
        self.winning_proposal_id = Some(winner);
        info!(winner, votes, "votes tallied");

        Ok(change)
    }

    // =========================================================================
    // Voter operations
    // =========================================================================

    /// Submit a proposal, returning its index.
    ///
    /// The description is checked as given, without trimming.
    pub fn add_proposal(&mut self, caller: &str, description: &str) -> Result<ProposalId, Error> {
        self.authorize(caller, Operation::AddProposal)?;
        if description.is_empty() {
            return Err(Error::EmptyProposal);
        }

        let proposal_id = self.proposals.len();
        self.proposals.push(Proposal::new(description));
        debug!(caller, proposal_id, "proposal registered");
        self.history.push(Event::ProposalRegistered { proposal_id });

        Ok(proposal_id)
    }

    /// Cast the caller's single ballot for `proposal_id`.
    pub fn cast_vote(&mut self, caller: &str, proposal_id: ProposalId) -> Result<(), Error> {
        self.authorize(caller, Operation::CastVote)?;
        let voter = self
            .voters
            .get_mut(caller)
            .ok_or_else(|| Error::NotAVoter(caller.to_string()))?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted(caller.to_string()));
        }
        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or(Error::ProposalNotFound(proposal_id))?;

        proposal.vote_count += 1;
        voter.record_vote(proposal_id);
        debug!(caller, proposal_id, "vote cast");
        self.history.push(Event::Voted {
            voter: caller.to_string(),
            proposal_id,
        });

        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn administrator(&self) -> &str {
        &self.administrator
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// Copy of the proposal at `index`.
    pub fn get_proposal(&self, index: ProposalId) -> Result<Proposal, Error> {
        self.proposals
            .get(index)
            .cloned()
            .ok_or(Error::ProposalNotFound(index))
    }

    /// Copy of the voter record for `identity`, if registered.
    pub fn get_voter(&self, identity: &str) -> Option<Voter> {
        self.voters.get(identity).cloned()
    }

    pub fn is_registered(&self, identity: &str) -> bool {
        self.voters
            .get(identity)
            .is_some_and(|voter| voter.is_registered)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Registered voters in identity order.
    pub fn voters(&self) -> impl Iterator<Item = (&str, &Voter)> {
        self.voters.iter().map(|(id, voter)| (id.as_str(), voter))
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Index of the winning proposal. Fails until votes are tallied.
    pub fn winning_proposal_id(&self) -> Result<ProposalId, Error> {
        self.winning_proposal_id.ok_or(Error::NotTallied)
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[Event] {
        &self.history
    }

    /// Take all recorded events, leaving the journal empty.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.history)
    }

    /// Detached copy of the whole election state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            administrator: self.administrator.clone(),
            phase: self.phase,
            voters: self.voters.clone(),
            proposals: self.proposals.clone(),
            winning_proposal_id: self.winning_proposal_id,
        }
    }

    // =========================================================================
    // Checks
    // =========================================================================

    fn ensure_administrator(&self, caller: &str) -> Result<(), Error> {
        if caller != self.administrator {
            return Err(Error::Unauthorized {
                caller: caller.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_phase(&self, operation: Operation) -> Result<(), Error> {
        if self.phase != operation.required_phase() {
            return Err(Error::wrong_phase(operation, self.phase));
        }
        Ok(())
    }

    fn ensure_voter(&self, caller: &str) -> Result<(), Error> {
        if !self.is_registered(caller) {
            return Err(Error::NotAVoter(caller.to_string()));
        }
        Ok(())
    }

    /// Caller role first, then phase.
    fn authorize(&self, caller: &str, operation: Operation) -> Result<(), Error> {
        if operation.requires_administrator() {
            self.ensure_administrator(caller)?;
        } else {
            self.ensure_voter(caller)?;
        }
        self.ensure_phase(operation)
    }

    /// Phase-gated single step forward.
    fn transition(&mut self, caller: &str, operation: Operation) -> Result<PhaseChange, Error> {
        self.authorize(caller, operation)?;
        self.advance(operation)
    }

    /// Move to the next phase. Callers have already checked the required phase.
    fn advance(&mut self, operation: Operation) -> Result<PhaseChange, Error> {
        let previous = self.phase;
        let current = previous
            .next()
            .ok_or_else(|| Error::wrong_phase(operation, previous))?;

        self.phase = current;
        let change = PhaseChange { previous, current };
        info!(%operation, %previous, %current, "workflow status change");
        self.history.push(Event::from(change));

        Ok(change)
    }
}
