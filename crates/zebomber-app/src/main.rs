use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use zebomber_app::runner::{self, RunOptions};
use zebomber_app::logging;
use zebomber_core::config::GameConfig;
use zebomber_core::types::secs_to_ticks;
use zebomber_sim::engine::{SimConfig, SimulationEngine};

/// Headless ZeBomber match runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override a configuration value, e.g. `--set spawners.0.units_per_wave=5`
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated match length in seconds
    #[arg(short = 't', long, default_value_t = 60.0)]
    seconds: f64,

    /// Run at wall-clock speed instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Fly straight instead of using the autopilot
    #[arg(long)]
    no_autopilot: bool,

    /// Write the final snapshot as JSON to this file
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    for entry in &args.overrides {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("override `{entry}` is not of the form KEY=VALUE");
        };
        config
            .set(key.trim(), value)
            .with_context(|| format!("applying override `{entry}`"))?;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let game = load_config(&args)?;
    info!(
        "seed {}, {} spawner(s), {:.0}s match",
        args.seed,
        game.spawners.len(),
        args.seconds
    );

    let mut engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        game,
    });
    let (summary, snapshot) = runner::run(
        &mut engine,
        RunOptions {
            ticks: secs_to_ticks(args.seconds),
            realtime: args.realtime,
            autopilot: !args.no_autopilot,
        },
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = &args.snapshot_out {
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))?;
        info!("final snapshot written to {}", path.display());
    }
    Ok(())
}
