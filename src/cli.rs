//! Command-line argument parsing for the scenario runner

use std::path::PathBuf;

use clap::Parser;

use crate::config::RegistryConfig;

/// Replay a multi-window panel session against a simulated host
#[derive(Parser, Debug)]
#[command(name = "panelsync", version, about = "Replay a multi-window panel session")]
pub struct CliArgs {
    /// Scenario file (YAML)
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Config file to use instead of ~/.config/panelsync/config.yaml
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep other owners' panels visible when a window activates
    #[arg(long)]
    pub no_auto_hide: bool,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Resolve the registry configuration, applying command-line overrides
    pub fn registry_config(&self) -> RegistryConfig {
        let mut config = match &self.config {
            Some(path) => RegistryConfig::load_from(path),
            None => RegistryConfig::load(),
        };
        if self.no_auto_hide {
            config.auto_hide_inactive = false;
        }
        config
    }
}
