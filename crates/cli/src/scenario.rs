//! Scripted elections.
//!
//! A scenario is a TOML file naming an administrator and an ordered list of steps. Each step
//! is one call against the engine, optionally expected to be rejected with an exact message:
//!
//! ```toml
//! administrator = "owner"
//!
//! [[steps]]
//! caller = "owner"
//! op = "register_voter"
//! voter = "voter1"
//!
//! [[steps]]
//! caller = "voter3"
//! op = "add_proposal"
//! description = "Third proposal"
//! expect_error = "You're not a voter"
//! ```

use anyhow::{Context, Result, bail};
use ezballot_core::{Election, Event, Operation, PhaseChange, ProposalId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

const END_TO_END: &str = include_str!("../scenarios/end_to_end.toml");

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Scenario {
    /// Overrides the configured administrator.
    pub administrator: Option<String>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Step {
    pub caller: String,

    #[serde(flatten)]
    pub action: Action,

    /// Exact rejection message this step must fail with.
    pub expect_error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    RegisterVoter { voter: String },
    OpenProposalsRegistration,
    AddProposal { description: String },
    CloseProposalsRegistration,
    OpenVotingSession,
    CastVote { proposal: ProposalId },
    CloseVotingSession,
    TallyVotes,
}

impl Action {
    pub fn operation(&self) -> Operation {
        match self {
            Action::RegisterVoter { .. } => Operation::RegisterVoter,
            Action::OpenProposalsRegistration => Operation::OpenProposalsRegistration,
            Action::AddProposal { .. } => Operation::AddProposal,
            Action::CloseProposalsRegistration => Operation::CloseProposalsRegistration,
            Action::OpenVotingSession => Operation::OpenVotingSession,
            Action::CastVote { .. } => Operation::CastVote,
            Action::CloseVotingSession => Operation::CloseVotingSession,
            Action::TallyVotes => Operation::TallyVotes,
        }
    }
}

/// What a successful step produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    ProposalAdded { proposal_id: ProposalId },
    PhaseChanged { change: PhaseChange },
    Rejected { message: String },
}

/// One executed step, as reported.
#[derive(Clone, Debug, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub caller: String,
    pub operation: Operation,
    pub outcome: Outcome,
}

impl Scenario {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// The bundled five-voter election.
    pub fn end_to_end() -> Result<Self> {
        Self::from_toml(END_TO_END).context("Invalid bundled scenario")
    }
}

/// Drives an [`Election`] through a scenario, step by step.
pub struct ScenarioRunner {
    election: Election,
    show_events: bool,
    records: Vec<StepRecord>,
    events: Vec<Event>,
}

impl ScenarioRunner {
    pub fn new(administrator: &str, show_events: bool) -> Self {
        Self {
            election: Election::new(administrator),
            show_events,
            records: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Run every step, stopping at the first one whose result does not match expectations.
    pub fn run(mut self, scenario: &Scenario) -> Result<ScenarioResult> {
        info!(
            administrator = self.election.administrator(),
            steps = scenario.steps.len(),
            "Running scenario"
        );

        for (index, step) in scenario.steps.iter().enumerate() {
            let record = self
                .execute(index, step)
                .with_context(|| format!("Step {} ({} by {})", index + 1, step.action.operation(), step.caller))?;
            self.records.push(record);
            self.collect_events();
        }

        Ok(ScenarioResult {
            election: self.election,
            steps: self.records,
            events: self.events,
        })
    }

    fn execute(&mut self, index: usize, step: &Step) -> Result<StepRecord> {
        let caller = step.caller.as_str();
        let result = match &step.action {
            Action::RegisterVoter { voter } => self
                .election
                .register_voter(caller, voter)
                .map(|_| Outcome::Applied),
            Action::OpenProposalsRegistration => self
                .election
                .open_proposals_registration(caller)
                .map(|change| Outcome::PhaseChanged { change }),
            Action::AddProposal { description } => self
                .election
                .add_proposal(caller, description)
                .map(|proposal_id| Outcome::ProposalAdded { proposal_id }),
            Action::CloseProposalsRegistration => self
                .election
                .close_proposals_registration(caller)
                .map(|change| Outcome::PhaseChanged { change }),
            Action::OpenVotingSession => self
                .election
                .open_voting_session(caller)
                .map(|change| Outcome::PhaseChanged { change }),
            Action::CastVote { proposal } => self
                .election
                .cast_vote(caller, *proposal)
                .map(|_| Outcome::Applied),
            Action::CloseVotingSession => self
                .election
                .close_voting_session(caller)
                .map(|change| Outcome::PhaseChanged { change }),
            Action::TallyVotes => self
                .election
                .tally_votes(caller)
                .map(|change| Outcome::PhaseChanged { change }),
        };

        let outcome = match (result, &step.expect_error) {
            (Ok(outcome), None) => outcome,
            (Ok(_), Some(expected)) => {
                bail!("Succeeded but was expected to fail with \"{}\"", expected)
            }
            (Err(err), Some(expected)) if err.to_string() == *expected => {
                debug!(index, %err, "Step rejected as expected");
                Outcome::Rejected {
                    message: err.to_string(),
                }
            }
            (Err(err), Some(expected)) => {
                bail!("Failed with \"{}\" but expected \"{}\"", err, expected)
            }
            (Err(err), None) => return Err(err.into()),
        };

        Ok(StepRecord {
            index,
            caller: step.caller.clone(),
            operation: step.action.operation(),
            outcome,
        })
    }

    fn collect_events(&mut self) {
        for event in self.election.drain_events() {
            if self.show_events {
                info!(%event, "Election event");
            }
            self.events.push(event);
        }
    }
}

/// The election after a scenario ran, with everything that happened along the way.
pub struct ScenarioResult {
    pub election: Election,
    pub steps: Vec<StepRecord>,
    pub events: Vec<Event>,
}
