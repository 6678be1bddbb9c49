use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crawl_core::mapgen::generate_level;
use crawl_core::{EngineConfig, GameStatus, save_file};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Dungeon crawl developer tools", long_about = None)]
struct Args {
    /// Engine configuration JSON; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a generated level as ASCII
    Mapgen {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 1)]
        level: u32,
    },
    /// Verify a save slot and print a summary as JSON
    InspectSave { path: PathBuf },
}

#[derive(Serialize)]
struct SaveSummary {
    run_seed: u64,
    turn: u64,
    dungeon_level: u32,
    player_alive: bool,
    player_hp: i32,
    pending_prompt: Option<&'static str>,
    live_objects: usize,
    inventory: Vec<String>,
    messages: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.validate().context("Invalid engine configuration")?;

    match args.command {
        Command::Mapgen { seed, level } => {
            let generated = generate_level(seed, level, &config);
            println!("{}", generated.to_ascii());
            println!(
                "seed={seed} level={level} rooms={} spawns={}",
                generated.rooms.len(),
                generated.spawns.len()
            );
        }
        Command::InspectSave { path } => {
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read save file: {}", path.display()))?;
            let state = save_file::decode(&bytes)
                .with_context(|| format!("Save file failed verification: {}", path.display()))?;
            let summary = SaveSummary {
                run_seed: state.run_seed,
                turn: state.turn,
                dungeon_level: state.dungeon_level,
                player_alive: state.status == GameStatus::Playing,
                player_hp: state.player().fighter.as_ref().map_or(0, |fighter| fighter.hp),
                pending_prompt: state.pending_prompt.map(|prompt| prompt.label()),
                live_objects: state.live.len(),
                inventory: state
                    .inventory
                    .iter()
                    .filter_map(|id| state.objects.get(*id))
                    .map(|object| object.name.clone())
                    .collect(),
                messages: state.messages.len(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
