mod terminal;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::{run_scenario, RunOptions, ScenarioConfig, Transcript, FISTS};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Replay scripted text battles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print every line the battle produces.
    Run(RunArgs),
    /// Parse and validate a scenario without running it.
    Check(CheckArgs),
}

#[derive(Args)]
struct RunArgs {
    #[arg(long, default_value = "scenarios/duel.toml")]
    scenario: PathBuf,
    /// Clear the terminal before the battle starts.
    #[arg(long)]
    clear: bool,
    /// Draw health bars without color codes.
    #[arg(long)]
    plain: bool,
    /// Write the full transcript as JSON to this path.
    #[arg(long)]
    transcript: Option<PathBuf>,
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args)]
struct CheckArgs {
    #[arg(long, default_value = "scenarios/duel.toml")]
    scenario: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Check(args) => handle_check(args),
    }
}

fn handle_run(args: RunArgs) -> Result<()> {
    let config = ScenarioConfig::from_path(&args.scenario)?;

    let run_id = args.id.unwrap_or_else(|| {
        args.scenario
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("battle")
            .to_owned()
    });
    let mut options = RunOptions::new(run_id);
    if args.plain {
        options = options.colored(false);
    }

    if args.clear {
        terminal::clear_screen()?;
    }

    let transcript = run_scenario(&config, &options)
        .with_context(|| format!("scenario {} failed", args.scenario.display()))?;
    for line in transcript.lines() {
        println!("{line}");
    }

    if let Some(path) = args.transcript.as_ref() {
        write_transcript(&transcript, path)?;
        println!("Transcript written to {}", path.display());
    }
    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<()> {
    let config = ScenarioConfig::from_path(&args.scenario)?;
    let summary = serde_json::json!({
        "scenario": args.scenario,
        "weapons": config.weapons.len(),
        "default_weapon": FISTS.name(),
        "fighters": config
            .fighters
            .iter()
            .map(|f| serde_json::json!({ "name": f.name, "role": f.role.as_str(), "health": f.health }))
            .collect::<Vec<_>>(),
        "actions": config.actions.len(),
        "rules": {
            "defeated_can_attack": config.rules.defeated_can_attack,
            "defeated_can_be_targeted": config.rules.defeated_can_be_targeted,
        },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn write_transcript(transcript: &Transcript, path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, transcript.to_json_pretty()?)
        .with_context(|| format!("failed to write transcript to {}", path.display()))?;
    Ok(())
}
