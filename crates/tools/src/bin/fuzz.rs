use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use crawl_core::{
    Direction, EngineConfig, Game, GameStatus, Intent, PendingPrompt, Pos, StatChoice,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    intents: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_intent(rng: &mut ChaCha8Rng, game: &Game) -> Intent {
    match game.pending_prompt() {
        Some(PendingPrompt::Target { .. }) => {
            // Aim near the player so some targets are in range.
            let player = game.state().player_pos();
            let dy = (rng.next_u64() % 11) as i32 - 5;
            let dx = (rng.next_u64() % 11) as i32 - 5;
            if rng.next_u64() % 4 == 0 {
                Intent::CancelTarget
            } else {
                Intent::ConfirmTarget(Pos { y: player.y + dy, x: player.x + dx })
            }
        }
        Some(PendingPrompt::LevelUp) => Intent::ChooseLevelUp(choose(rng, &StatChoice::ALL)),
        None => match rng.next_u64() % 12 {
            0 => Intent::PickUp,
            1 => Intent::UseItem((rng.next_u64() % 5) as usize),
            2 => Intent::DropItem((rng.next_u64() % 5) as usize),
            3 => Intent::DescendStairs,
            4 => Intent::ShowCharacterSheet,
            _ => Intent::Move(choose(rng, &Direction::ALL)), // Bias to movement
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(io::stderr).init();

    println!("Starting fuzz harness on seed {} for max {} intents...", args.seed, args.intents);
    let mut game = Game::new(args.seed, EngineConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for step in 0..args.intents {
        if game.status() == GameStatus::Dead {
            let level = game.state().dungeon_level;
            println!("Player died after {step} intents on dungeon level {level}");
            break;
        }
        let intent = random_intent(&mut rng, &game);
        if let Err(err) = game.act(intent) {
            bail!("engine rejected {intent:?} at step {step}: {err}");
        }

        // Assert invariants
        let state = game.state();
        if let Err(reason) = state.check_invariants() {
            bail!("Invariant failed after {intent:?} at step {step}: {reason}");
        }
        for id in &state.live {
            let object = &state.objects[*id];
            if object.blocks && state.map.is_blocked(object.pos) {
                bail!("Invariant failed: {} inside wall at step {step}", object.name);
            }
        }
        if !game.is_visible(state.player_pos()) {
            bail!("Invariant failed: player tile not visible at step {step}");
        }
    }

    info!(turn = game.state().turn, hash = game.snapshot_hash(), "fuzz run finished");
    println!("Fuzzing completed successfully.");
    Ok(())
}
