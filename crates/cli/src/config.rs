use anyhow::Result;
use clap::{Args, ValueEnum};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Utility function to expand $HOME in a PathBuf
pub fn expand_home_in_path(path: &Path) -> Result<PathBuf> {
    let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in path"))?;

    if path_str.contains("$HOME") {
        let expanded = path_str.replace("$HOME", home_dir.to_str().unwrap_or("."));
        Ok(PathBuf::from(expanded))
    } else {
        Ok(path.to_path_buf())
    }
}

#[derive(Config, Clone, Debug, Serialize, Deserialize)]
#[config(partial_attr(derive(Args, Serialize, Clone)))]
pub struct AppConfig {
    #[config(nested, partial_attr(command(flatten)))]
    pub election: ElectionConfig,

    #[config(nested, partial_attr(command(flatten)))]
    pub output: OutputConfig,
}

#[derive(Clone, Config, Debug, Deserialize, Serialize)]
#[config(partial_attr(derive(Args, Clone, Serialize,)))]
pub struct ElectionConfig {
    /// Administrator identity used when a scenario does not name one
    #[config(
        default = "owner",
        env = "EZBALLOT_ADMINISTRATOR",
        partial_attr(arg(long))
    )]
    pub administrator: String,
}

#[derive(Clone, Config, Debug, Deserialize, Serialize)]
#[config(partial_attr(derive(Args, Clone, Serialize,)))]
pub struct OutputConfig {
    /// How the final report is printed
    #[config(default = "text", partial_attr(arg(long, value_enum)))]
    pub format: OutputFormat,

    /// Whether to log every event recorded by the election
    #[config(default = true, partial_attr(arg(long)))]
    pub show_events: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl AppConfig {
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
