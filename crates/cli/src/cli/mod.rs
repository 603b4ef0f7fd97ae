use crate::{
    AppConfig,
    config::expand_home_in_path,
    report::Report,
    scenario::{Scenario, ScenarioRunner},
};
use ezballot_core::WORKFLOW_PHASES;

use anyhow::Result;
use clap::{Parser, Subcommand};
use confique::Config;
use std::path::PathBuf;
use tracing::info;

// Re-export PartialAppConfig for public usage
pub use crate::config::confique_partial_app_config::PartialAppConfig;


#[derive(Parser)]
#[command(name = "ezballot")]
#[command(about = "Run single-election voting scenarios")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "$HOME/.ezballot/config.toml")]
    config_path: PathBuf,

    /// Configuration object
    #[command(flatten)]
    config: PartialAppConfig,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Internal helper struct that holds the resolved configuration
pub struct ResolvedCli {
    command: Commands,
    config: AppConfig,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file and print the resulting report
    Run {
        /// Path to the scenario TOML file
        scenario: PathBuf,
    },
    /// Run the bundled five-voter election
    Demo,
    /// List the workflow phases and the operations allowed in each
    Phases,
    /// Print the resolved configuration
    Config,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let log_level = if self.verbose { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(format!(
                "ezballot={},ezballot_core={},{}",
                log_level, log_level, log_level
            ))
            .with_writer(std::io::stderr)
            .init();

        let resolved_cli = self.resolve_config()?;
        let output = resolved_cli.handle_command()?;
        println!("{}", output);
        Ok(())
    }

    /// Load the configuration and resolve the $HOME placeholder in its path
    fn resolve_config(self) -> Result<ResolvedCli> {
        let config_path = expand_home_in_path(&self.config_path)?;

        let config = AppConfig::builder()
            .preloaded(self.config)
            .env()
            .file(&config_path)
            .load()?;

        Ok(ResolvedCli {
            command: self.command,
            config,
        })
    }
}

impl ResolvedCli {
    /// Execute the command, returning what should be printed to stdout
    fn handle_command(&self) -> Result<String> {
        match &self.command {
            Commands::Run { scenario } => {
                let scenario = Scenario::from_path(scenario)?;
                self.run_scenario(&scenario)
            }
            Commands::Demo => self.run_scenario(&Scenario::end_to_end()?),
            Commands::Phases => Ok(phase_table()),
            Commands::Config => self.config.to_toml(),
        }
    }

    fn run_scenario(&self, scenario: &Scenario) -> Result<String> {
        let administrator = scenario
            .administrator
            .as_deref()
            .unwrap_or(&self.config.election.administrator);

        let result = ScenarioRunner::new(administrator, self.config.output.show_events).run(scenario)?;
        let report = Report::from_result(result)?;
        info!(
            phase = %report.phase,
            winner = ?report.winning_proposal_id,
            "Scenario complete"
        );

        report.render(self.config.output.format)
    }
}

fn phase_table() -> String {
    WORKFLOW_PHASES
        .iter()
        .map(|phase| {
            let operations: Vec<&str> = phase
                .allowed_operations()
                .into_iter()
                .map(|op| op.as_str())
                .collect();
            let operations = if operations.is_empty() {
                "-".to_string()
            } else {
                operations.join(", ")
            };
            format!("{} {:<32} {}", phase.index(), phase.as_str(), operations)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
