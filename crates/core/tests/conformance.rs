//! Conformance tests for the ezballot election workflow.
//!
//! Error messages are asserted verbatim: hosts rely on them to report rejections.

use ezballot_core::{Election, Error, Event, Operation, WorkflowPhase, GENESIS_DESCRIPTION};

// =============================================================================
// Test Utilities
// =============================================================================

const OWNER: &str = "owner";
const VOTERS: [&str; 5] = ["voter1", "voter2", "voter3", "voter4", "voter5"];

/// Fresh election with the given voters registered.
fn registered(voters: &[&str]) -> Election {
    let mut election = Election::new(OWNER);
    for voter in voters {
        election.register_voter(OWNER, voter).unwrap();
    }
    election
}

/// voter1, voter2, voter4 and voter5 registered; voter3 is not. Proposals open.
fn proposals_open() -> Election {
    let mut election = registered(&["voter1", "voter2", "voter4", "voter5"]);
    election.open_proposals_registration(OWNER).unwrap();
    election
}

/// Same voters as [`proposals_open`], three proposals, voting open.
fn voting_open() -> Election {
    let mut election = proposals_open();
    election.add_proposal("voter1", "First proposal").unwrap();
    election.add_proposal("voter2", "Second proposal").unwrap();
    election.add_proposal("voter4", "Third proposal").unwrap();
    election.close_proposals_registration(OWNER).unwrap();
    election.open_voting_session(OWNER).unwrap();
    election
}

/// Run every operation against `election` and assert each one that is not allowed in
/// the current phase fails with `WrongPhase`, leaves the snapshot untouched and records
/// no event.
fn assert_only_allowed_operations_succeed(election: &Election) {
    let allowed = election.phase().allowed_operations();

    for operation in Operation::ALL {
        let mut attempt = election.clone();
        let before = attempt.snapshot();
        let events = attempt.events().len();

        let result = match operation {
            Operation::RegisterVoter => attempt.register_voter(OWNER, "newcomer").map(|_| ()),
            Operation::OpenProposalsRegistration => attempt.open_proposals_registration(OWNER).map(|_| ()),
            Operation::AddProposal => attempt.add_proposal("voter1", "Late idea").map(|_| ()),
            Operation::CloseProposalsRegistration => attempt.close_proposals_registration(OWNER).map(|_| ()),
            Operation::OpenVotingSession => attempt.open_voting_session(OWNER).map(|_| ()),
            Operation::CastVote => attempt.cast_vote("voter1", 0),
            Operation::CloseVotingSession => attempt.close_voting_session(OWNER).map(|_| ()),
            Operation::TallyVotes => attempt.tally_votes(OWNER).map(|_| ()),
        };

        if allowed.contains(&operation) {
            assert!(result.is_ok(), "{} should be allowed in {}", operation, election.phase());
        } else {
            match result {
                Err(Error::WrongPhase { operation: op, current, .. }) => {
                    assert_eq!(op, operation);
                    assert_eq!(current, election.phase());
                }
                other => panic!("{} in {}: expected WrongPhase, got {:?}", operation, election.phase(), other),
            }
            assert_eq!(attempt.snapshot(), before, "rejected {} changed state", operation);
            assert_eq!(attempt.events().len(), events, "rejected {} recorded an event", operation);
        }
    }
}

// =============================================================================
// Initialization and voter registration
// =============================================================================

#[test]
fn owner_is_administrator() {
    let election = Election::new(OWNER);
    assert_eq!(election.administrator(), OWNER);
    assert_eq!(election.phase(), WorkflowPhase::RegisteringVoters);
}

#[test]
fn add_voter_emits_event() {
    let mut election = Election::new(OWNER);
    election.register_voter(OWNER, "voter1").unwrap();
    assert_eq!(
        election.drain_events(),
        vec![Event::VoterRegistered {
            voter: "voter1".to_string()
        }]
    );
}

#[test]
fn add_voter_requires_owner() {
    let mut election = Election::new(OWNER);
    let err = election.register_voter("voter3", "voter1").unwrap_err();
    assert_eq!(err.to_string(), "Ownable: caller is not the owner");
}

#[test]
fn registering_twice_is_rejected() {
    let mut election = registered(&["voter1"]);
    let before = election.snapshot();

    let err = election.register_voter(OWNER, "voter1").unwrap_err();
    assert_eq!(err, Error::AlreadyRegistered("voter1".to_string()));
    assert_eq!(err.to_string(), "Already registered");
    assert_eq!(election.snapshot(), before);
}

#[test]
fn start_proposals_emits_status_change() {
    let mut election = Election::new(OWNER);
    election.open_proposals_registration(OWNER).unwrap();
    assert_eq!(
        election.events().last().map(|e| e.to_string()),
        Some("WorkflowStatusChange(0, 1)".to_string())
    );
}

#[test]
fn end_proposals_before_start() {
    let mut election = Election::new(OWNER);
    let err = election.close_proposals_registration(OWNER).unwrap_err();
    assert_eq!(err.to_string(), "Registering proposals havent started yet");
}

#[test]
fn add_proposal_before_start() {
    let mut election = registered(&["voter1"]);
    let err = election.add_proposal("voter1", "First Proposal").unwrap_err();
    assert_eq!(err.to_string(), "Proposals are not allowed yet");
}

// =============================================================================
// Proposals registration
// =============================================================================

#[test]
fn first_proposal_is_genesis() {
    let election = proposals_open();
    let genesis = election.get_proposal(0).unwrap();
    assert_eq!(genesis.description, GENESIS_DESCRIPTION);
    assert_eq!(genesis.vote_count, 0);
    assert_eq!(election.proposal_count(), 1);
}

#[test]
fn add_proposal_emits_event() {
    let mut election = proposals_open();
    election.drain_events();

    let id = election.add_proposal("voter1", "First Proposal").unwrap();
    assert_eq!(id, 1);
    assert_eq!(election.drain_events(), vec![Event::ProposalRegistered { proposal_id: 1 }]);
}

#[test]
fn add_proposal_requires_voter() {
    let mut election = proposals_open();
    let err = election.add_proposal("voter3", "Third Proposal").unwrap_err();
    assert_eq!(err.to_string(), "You're not a voter");
    assert_eq!(election.proposal_count(), 1);
}

#[test]
fn empty_proposal_is_rejected() {
    let mut election = proposals_open();
    let err = election.add_proposal("voter2", "").unwrap_err();
    assert_eq!(err, Error::EmptyProposal);
    assert_eq!(err.to_string(), "Vous ne pouvez pas ne rien proposer");
}

#[test]
fn get_voter_returns_record() {
    let election = proposals_open();
    assert!(election.get_voter("voter1").unwrap().is_registered);
    assert_eq!(election.get_voter("voter3"), None);
}

#[test]
fn start_voting_before_proposals_end() {
    let mut election = proposals_open();
    let err = election.open_voting_session(OWNER).unwrap_err();
    assert_eq!(err.to_string(), "Registering proposals phase is not finished");
}

// =============================================================================
// Voting session
// =============================================================================

#[test]
fn vote_requires_voter() {
    let mut election = voting_open();
    let err = election.cast_vote("voter3", 1).unwrap_err();
    assert_eq!(err.to_string(), "You're not a voter");
}

#[test]
fn vote_for_missing_proposal() {
    let mut election = voting_open();
    let err = election.cast_vote("voter1", 10).unwrap_err();
    assert_eq!(err, Error::ProposalNotFound(10));
    assert_eq!(err.to_string(), "Proposal not found");

    // The rejected ballot does not use up the vote.
    assert!(!election.get_voter("voter1").unwrap().has_voted);
    election.cast_vote("voter1", 3).unwrap();
}

#[test]
fn vote_only_once() {
    let mut election = voting_open();
    election.cast_vote("voter1", 3).unwrap();

    let err = election.cast_vote("voter1", 3).unwrap_err();
    assert_eq!(err.to_string(), "You have already voted");
    assert_eq!(election.get_proposal(3).unwrap().vote_count, 1);
}

#[test]
fn votes_are_counted() {
    let mut election = voting_open();

    election.cast_vote("voter4", 0).unwrap();
    assert_eq!(election.get_proposal(0).unwrap().vote_count, 1);

    election.cast_vote("voter5", 0).unwrap();
    assert_eq!(election.get_proposal(0).unwrap().vote_count, 2);
}

#[test]
fn end_voting_emits_status_change() {
    let mut election = voting_open();
    let change = election.close_voting_session(OWNER).unwrap();
    assert_eq!(change.previous.index(), 3);
    assert_eq!(change.current.index(), 4);
    assert_eq!(
        election.events().last().map(|e| e.to_string()),
        Some("WorkflowStatusChange(3, 4)".to_string())
    );
}

#[test]
fn tally_before_voting_ends() {
    let mut election = voting_open();
    let err = election.tally_votes(OWNER).unwrap_err();
    assert_eq!(err.to_string(), "Current status is not voting session ended");
}

// =============================================================================
// Tally
// =============================================================================

#[test]
fn end_to_end_election() {
    let mut election = registered(&VOTERS);
    election.open_proposals_registration(OWNER).unwrap();

    assert_eq!(election.add_proposal("voter1", "First proposal").unwrap(), 1);
    assert_eq!(election.add_proposal("voter2", "Second proposal").unwrap(), 2);
    assert_eq!(election.add_proposal("voter4", "Third proposal").unwrap(), 3);

    election.close_proposals_registration(OWNER).unwrap();
    election.open_voting_session(OWNER).unwrap();

    election.cast_vote("voter1", 1).unwrap();
    election.cast_vote("voter2", 1).unwrap();
    election.cast_vote("voter3", 1).unwrap();
    election.cast_vote("voter4", 0).unwrap();
    election.cast_vote("voter5", 2).unwrap();

    election.close_voting_session(OWNER).unwrap();
    assert_eq!(election.winning_proposal_id(), Err(Error::NotTallied));

    let change = election.tally_votes(OWNER).unwrap();
    assert_eq!((change.previous.index(), change.current.index()), (4, 5));
    assert_eq!(election.winning_proposal_id(), Ok(1));
    assert_eq!(election.phase(), WorkflowPhase::VotesTallied);
}

#[test]
fn tie_goes_to_lower_index() {
    let voters = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let mut election = registered(&voters);
    election.open_proposals_registration(OWNER).unwrap();
    election.add_proposal("a", "One").unwrap();
    election.add_proposal("b", "Two").unwrap();
    election.close_proposals_registration(OWNER).unwrap();
    election.open_voting_session(OWNER).unwrap();

    // Counts: [0: 2, 1: 3, 2: 3]
    for (voter, proposal) in voters.iter().zip([0, 0, 1, 1, 1, 2, 2, 2]) {
        election.cast_vote(voter, proposal).unwrap();
    }

    election.close_voting_session(OWNER).unwrap();
    election.tally_votes(OWNER).unwrap();
    assert_eq!(election.winning_proposal_id(), Ok(1));
}

// =============================================================================
// Phase gating
// =============================================================================

#[test]
fn every_phase_rejects_foreign_operations() {
    let mut election = registered(&["voter1"]);
    assert_only_allowed_operations_succeed(&election);

    election.open_proposals_registration(OWNER).unwrap();
    assert_only_allowed_operations_succeed(&election);

    election.close_proposals_registration(OWNER).unwrap();
    assert_only_allowed_operations_succeed(&election);

    election.open_voting_session(OWNER).unwrap();
    assert_only_allowed_operations_succeed(&election);

    election.close_voting_session(OWNER).unwrap();
    assert_only_allowed_operations_succeed(&election);

    election.tally_votes(OWNER).unwrap();
    assert_only_allowed_operations_succeed(&election);
}

#[test]
fn unregistered_caller_is_never_a_voter() {
    let mut election = Election::new(OWNER);
    loop {
        assert_eq!(
            election.add_proposal("stranger", "Idea").unwrap_err(),
            Error::NotAVoter("stranger".to_string())
        );
        assert_eq!(
            election.cast_vote("stranger", 0).unwrap_err(),
            Error::NotAVoter("stranger".to_string())
        );

        let advanced = match election.phase() {
            WorkflowPhase::RegisteringVoters => election.open_proposals_registration(OWNER),
            WorkflowPhase::ProposalsRegistrationStarted => election.close_proposals_registration(OWNER),
            WorkflowPhase::ProposalsRegistrationEnded => election.open_voting_session(OWNER),
            WorkflowPhase::VotingSessionStarted => election.close_voting_session(OWNER),
            WorkflowPhase::VotingSessionEnded => election.tally_votes(OWNER),
            WorkflowPhase::VotesTallied => break,
        };
        advanced.unwrap();
    }
}

#[test]
fn administrator_operations_reject_voters() {
    let mut election = registered(&["voter1"]);
    let before = election.snapshot();

    assert!(matches!(
        election.open_proposals_registration("voter1"),
        Err(Error::Unauthorized { .. })
    ));
    assert!(matches!(
        election.register_voter("voter1", "voter2"),
        Err(Error::Unauthorized { .. })
    ));
    assert_eq!(election.snapshot(), before);
}
