//! ezballot-core: Core types and state machine for a single ezballot election.
//!
//! An election walks through six ordered phases:
//! - voters are registered by the administrator
//! - registered voters submit proposals
//! - registered voters cast exactly one vote each
//! - the administrator tallies, lowest index winning ties
//!
//! Callers are identified by an opaque [`Identity`] resolved by the host.

mod phase;
mod operation;
mod voter;
mod proposal;
mod tally;
mod event;
mod hash;
mod error;
mod election;
mod snapshot;

pub use phase::{WorkflowPhase, PhaseChange, WORKFLOW_PHASES};
pub use operation::Operation;
pub use voter::{Identity, Voter};
pub use proposal::{Proposal, ProposalId, GENESIS_DESCRIPTION};
pub use tally::tally;
pub use event::Event;
pub use hash::Digest;
pub use error::Error;
pub use election::Election;
pub use snapshot::Snapshot;
