use anyhow::{Result, bail};
use clap::Parser;
use gemdelve_core::{Level, LevelConfig, LevelKind, Pos, SeededRandom, SpawnRule};
use gemdelve_core::{audit, place};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn between(rng: &mut ChaCha8Rng, low: usize, high: usize) -> usize {
    low + rng.next_u64() as usize % (high - low + 1)
}

fn random_case(rng: &mut ChaCha8Rng) -> (u32, LevelConfig, LevelKind) {
    let config = LevelConfig {
        width: between(rng, 3, 24),
        height: between(rng, 3, 24),
        room_size: between(rng, 3, 9),
        iterations: between(rng, 0, 40) as u32,
        tile_variant_chance: (rng.next_u32() % 101) as f64 / 100.0,
    };
    // Roughly one merchant hall per ten levels.
    let kind = if rng.next_u32() % 10 == 0 { LevelKind::Merchant } else { LevelKind::Maze };
    (rng.next_u32(), config, kind)
}

fn check_case(state: u32, config: &LevelConfig, kind: LevelKind) -> Result<Level> {
    let level = Level::generate(config, kind, &mut SeededRandom::from_state(state))?;
    let again = Level::generate(config, kind, &mut SeededRandom::from_state(state))?;
    if level.fingerprint() != again.fingerprint() {
        bail!("Invariant failed: seed {} is not deterministic", level.seed);
    }

    if let Some(defect) = audit(&level.maze, level.start).first() {
        bail!("Invariant failed: seed {} ({config:?}): {defect}", level.seed);
    }
    if (level.tiles.width(), level.tiles.height()) != config.tile_dimensions() {
        bail!("Invariant failed: seed {} tile grid has the wrong size", level.seed);
    }
    if level.tiles.cells().iter().any(|&id| id > 15) {
        bail!("Invariant failed: seed {} produced a tile id outside the sheet", level.seed);
    }

    let mut rng = SeededRandom::from_state(state);
    let mut occupied: Vec<Pos> = Vec::new();
    for rule in [SpawnRule::Range { min: 3, max: 12 }, SpawnRule::Range { min: 1, max: 5 }] {
        for pos in place(&level.maze, &occupied, rule, &mut rng) {
            if level.maze.get(pos.x, pos.y) == 0 || occupied.contains(&pos) {
                bail!("Invariant failed: seed {} placed onto {pos:?}", level.seed);
            }
            occupied.push(pos);
        }
    }
    Ok(level)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    println!("Starting level fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut rooms = 0_usize;

    for run in 0..args.runs {
        let (state, config, kind) = random_case(&mut rng);
        let level = check_case(state, &config, kind)?;
        tracing::debug!(run, seed = %level.seed, rooms = level.room_count(), "run passed");
        rooms += level.room_count();
    }

    println!("Fuzzing completed successfully ({rooms} rooms generated).");
    Ok(())
}
