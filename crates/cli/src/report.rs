//! Final election report, printed as text or JSON.

use crate::config::OutputFormat;
use crate::scenario::{Outcome, ScenarioResult, StepRecord};
use anyhow::Result;
use ezballot_core::{Event, Proposal, ProposalId, WorkflowPhase};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct Report {
    pub administrator: String,
    pub phase: WorkflowPhase,
    pub voters: usize,
    pub total_votes: u64,
    pub proposals: Vec<Proposal>,
    pub winning_proposal_id: Option<ProposalId>,
    /// Description of the winning proposal, once tallied.
    pub winner: Option<String>,
    pub digest: String,
    pub steps: Vec<StepRecord>,
    pub events: Vec<Event>,
}

impl Report {
    pub fn from_result(result: ScenarioResult) -> Result<Self> {
        let snapshot = result.election.snapshot();
        let digest = snapshot.digest()?.to_hex();
        let winner = snapshot.winner().map(|(_, p)| p.description.clone());

        Ok(Self {
            administrator: snapshot.administrator.clone(),
            phase: snapshot.phase,
            voters: snapshot.voters.len(),
            total_votes: snapshot.total_votes(),
            winning_proposal_id: snapshot.winning_proposal_id,
            winner,
            proposals: snapshot.proposals,
            digest,
            steps: result.steps,
            events: result.events,
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn rejected_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, Outcome::Rejected { .. }))
            .count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Administrator: {}", self.administrator)?;
        writeln!(f, "Phase:         {} ({})", self.phase, self.phase.index())?;
        writeln!(
            f,
            "Steps:         {} ({} rejected as expected)",
            self.steps.len(),
            self.rejected_steps()
        )?;
        writeln!(f, "Voters:        {}", self.voters)?;
        writeln!(f, "Votes cast:    {}", self.total_votes)?;
        writeln!(f)?;

        writeln!(f, "Proposals:")?;
        for (id, proposal) in self.proposals.iter().enumerate() {
            let marker = if Some(id) == self.winning_proposal_id { "*" } else { " " };
            writeln!(
                f,
                "  {} [{}] {} ({} votes)",
                marker, id, proposal.description, proposal.vote_count
            )?;
        }
        writeln!(f)?;

        match (self.winning_proposal_id, &self.winner) {
            (Some(id), Some(description)) => writeln!(f, "Winner: [{}] {}", id, description)?,
            _ => writeln!(f, "Winner: not tallied")?,
        }
        write!(f, "Digest: {}", self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Scenario, ScenarioRunner};

    fn end_to_end_report() -> Report {
        let scenario = Scenario::end_to_end().unwrap();
        let result = ScenarioRunner::new("owner", false).run(&scenario).unwrap();
        Report::from_result(result).unwrap()
    }

    #[test]
    fn text_report_marks_winner() {
        let text = end_to_end_report().render(OutputFormat::Text).unwrap();
        assert!(text.contains("  * [1] First proposal (3 votes)"));
        assert!(text.contains("    [0] GENESIS (1 votes)"));
        assert!(text.contains("Winner: [1] First proposal"));
        assert!(text.contains("Votes cast:    5"));
    }

    #[test]
    fn json_report_is_structured() {
        let report = end_to_end_report();
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(json["phase"], 5);
        assert_eq!(json["winning_proposal_id"], 1);
        assert_eq!(json["winner"], "First proposal");
        assert_eq!(json["proposals"][0]["description"], "GENESIS");
        assert_eq!(json["digest"].as_str().map(str::len), Some(64));
    }

    #[test]
    fn untallied_report_has_no_winner() {
        let scenario = Scenario::from_toml(
            r#"
            [[steps]]
            caller = "owner"
            op = "open_proposals_registration"
            "#,
        )
        .unwrap();
        let result = ScenarioRunner::new("owner", false).run(&scenario).unwrap();
        let report = Report::from_result(result).unwrap();

        assert_eq!(report.winner, None);
        assert!(report.to_string().contains("Winner: not tallied"));
        assert!(!report.to_string().contains("  * ["));
    }

    #[test]
    fn digest_is_reproducible() {
        assert_eq!(end_to_end_report().digest, end_to_end_report().digest);
    }
}
