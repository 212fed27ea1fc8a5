use gemdelve_core::mazegen::open_neighbors;
use gemdelve_core::{Level, LevelConfig, LevelFile, LevelKind, Pos, SeededRandom, SpawnRule};
use gemdelve_core::{audit, place};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const CLASSIC_SPAWNS: [SpawnRule; 5] = [
    SpawnRule::Range { min: 3, max: 12 },
    SpawnRule::Range { min: 1, max: 5 },
    SpawnRule::Range { min: 1, max: 5 },
    SpawnRule::Chance(0.2),
    SpawnRule::Chance(0.05),
];

fn pick(rng: &mut ChaCha8Rng, low: usize, high: usize) -> usize {
    low + rng.next_u64() as usize % (high - low + 1)
}

fn random_config(rng: &mut ChaCha8Rng) -> LevelConfig {
    LevelConfig {
        width: pick(rng, 3, 20),
        height: pick(rng, 3, 20),
        room_size: pick(rng, 3, 8),
        iterations: pick(rng, 0, 30) as u32,
        tile_variant_chance: (rng.next_u32() % 101) as f64 / 100.0,
    }
}

fn run_fuzz_level(level_seed: u32, shape_seed: u64, levels: u32) -> Result<(), String> {
    let mut shapes = ChaCha8Rng::seed_from_u64(shape_seed);
    let mut rng = SeededRandom::from_state(level_seed);

    for levels_completed in 0..levels {
        let config = random_config(&mut shapes);
        let kind = LevelKind::for_progress(levels_completed * 25);
        let level = Level::generate(&config, kind, &mut rng).map_err(|e| e.to_string())?;

        let defects = audit(&level.maze, level.start);
        if !defects.is_empty() {
            return Err(format!("seed {} produced defects {defects:?}", level.seed));
        }
        if (level.tiles.width(), level.tiles.height()) != config.tile_dimensions() {
            return Err(format!("seed {} produced mis-sized tiles", level.seed));
        }
        if level.room_count() > 1 && open_neighbors(&level.maze, level.start).is_empty() {
            return Err(format!("seed {} traps the player at the start", level.seed));
        }

        let mut occupied: Vec<Pos> = Vec::new();
        for rule in CLASSIC_SPAWNS {
            for pos in place(&level.maze, &occupied, rule, &mut rng) {
                if level.maze.get(pos.x, pos.y) == 0 {
                    return Err(format!("seed {} placed into empty cell {pos:?}", level.seed));
                }
                if occupied.contains(&pos) {
                    return Err(format!("seed {} placed twice at {pos:?}", level.seed));
                }
                occupied.push(pos);
            }
        }
        if occupied.len() > level.room_count() {
            return Err(format!("seed {} placed more items than rooms", level.seed));
        }

        let json = LevelFile::new(level.clone()).to_json().map_err(|e| e.to_string())?;
        let file = LevelFile::from_json(&json).map_err(|e| e.to_string())?;
        if !file.is_reproducible().map_err(|e| e.to_string())? {
            return Err(format!("seed {} does not regenerate identically", level.seed));
        }
    }
    Ok(())
}

#[test]
fn fuzz_level_generation_preserves_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(40));
    let seeds = (any::<u32>(), any::<u64>());

    runner
        .run(&seeds, |(level_seed, shape_seed)| {
            run_fuzz_level(level_seed, shape_seed, 6).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz should preserve level invariants");
}
