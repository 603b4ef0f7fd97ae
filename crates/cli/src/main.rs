use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = ezballot::cli::Cli::parse();
    cli.run()
}
