use anyhow::{Context, Result};
use clap::Parser;

use panelsync::cli::CliArgs;
use panelsync::scenario::{self, Scenario};

fn main() -> Result<()> {
    panelsync::tracing::init();

    let args = CliArgs::parse();
    let config = args.registry_config();
    tracing::debug!("Registry config: {:?}", config);

    let scenario = Scenario::load(&args.script)
        .with_context(|| format!("Failed to load scenario {}", args.script.display()))?;
    let report = scenario::run(&scenario, config).context("Scenario failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_table());
    }
    Ok(())
}
