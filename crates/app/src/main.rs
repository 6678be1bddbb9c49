use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crawl_app::app_loop::{AppMode, AppState};
use crawl_app::run_state_file::RunStateFile;
use crawl_app::save_slot::{SessionStart, default_save_path, open_session, save_session};
use crawl_app::seed::{generate_runtime_seed, parse_seed_value, resolve_seed};
use crawl_app::{format_seed, ui_text};
use crawl_core::{EngineConfig, Game, Panel, PlayerAction};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MESSAGE_LINES: usize = 5;

#[derive(Parser)]
#[command(author, version, about = "Turn-based dungeon crawl", long_about = None)]
struct Args {
    /// Engine configuration JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run seed, decimal or 0x-prefixed hex; a fresh one is generated when omitted
    #[arg(long, value_parser = parse_seed_value)]
    seed: Option<u64>,
    /// Save slot path; defaults to the platform data directory
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(io::stderr).init();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.validate().context("Invalid engine configuration")?;

    let save_path = args
        .save
        .clone()
        .or_else(default_save_path)
        .context("No save slot path given and no platform data directory available")?;
    let run_state_path = RunStateFile::get_default_path();
    if let Some(path) = &run_state_path
        && let Ok(last_run) = RunStateFile::load(path)
    {
        println!("{}", last_run.summary_line());
    }

    let seed = resolve_seed(args.seed, generate_runtime_seed());
    let (mut game, start) = open_session(&save_path, seed, config);
    match &start {
        SessionStart::Resumed => println!("Resuming saved game from {}", save_path.display()),
        SessionStart::Fresh(seed) => println!("New run, seed {}", format_seed(seed.value())),
        SessionStart::Recovered { seed, error } => {
            println!("Could not load {} ({error}).", save_path.display());
            println!("New run, seed {}", format_seed(seed.value()));
        }
    }

    let mut app = AppState::new(&game);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    draw(&game, &app)?;
    loop {
        let Some(line) = lines.next() else {
            info!("input closed");
            break;
        };
        let line = line.context("Failed to read input")?;
        let action = app.tick(&mut game, &line);
        if action == Some(PlayerAction::Exit) || app.is_finished() {
            break;
        }
        draw(&game, &app)?;
    }

    finish_session(&game, &save_path, run_state_path.as_deref())
}

fn finish_session(game: &Game, save_path: &Path, run_state_path: Option<&Path>) -> Result<()> {
    save_session(game, save_path)
        .with_context(|| format!("Failed to save game to {}", save_path.display()))?;
    println!("Game saved to {}", save_path.display());

    if let Some(path) = run_state_path
        && let Err(err) = RunStateFile::from_game(game).write_atomic(path)
    {
        warn!(path = %path.display(), %err, "could not record last run state");
    }
    Ok(())
}

fn draw(game: &Game, app: &AppState) -> Result<()> {
    let frame = game.frame(None);
    let mut out = io::stdout().lock();

    for line in ui_text::map_lines(&frame) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", ui_text::status_line(&frame))?;
    for line in ui_text::message_lines(&frame, MESSAGE_LINES) {
        writeln!(out, "  {line}")?;
    }

    if let Some(panel) = frame.panel {
        writeln!(out, "-- {} --", ui_text::panel_title(panel))?;
        let panel_lines = match panel {
            Panel::Inventory => ui_text::menu_lines(&game.inventory_menu()?),
            Panel::CharacterSheet => ui_text::character_sheet_lines(&game.character_sheet()),
        };
        for line in panel_lines {
            writeln!(out, "{line}")?;
        }
    }
    if app.mode == AppMode::LevelUp {
        for line in ui_text::menu_lines(&game.level_up_menu()?) {
            writeln!(out, "{line}")?;
        }
    }
    if app.show_help {
        for line in ui_text::HELP_LINES {
            writeln!(out, "{line}")?;
        }
    }
    if let Some(feedback) = &app.feedback {
        writeln!(out, "! {feedback}")?;
    }
    write!(out, "{}> ", ui_text::status_text(app.mode))?;
    out.flush()?;
    Ok(())
}
