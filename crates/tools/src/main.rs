use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gemdelve_core::{BoundedGrid, Level, LevelConfig, LevelFile, LevelKind, SeededRandom};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Box-drawing glyph per tile id; each stroke points at a floor neighbor.
const GLYPHS: [char; 16] =
    ['#', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '·'];

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a seeded maze level", long_about = None)]
struct Args {
    /// Base-36 seed string; a time-derived seed is used when omitted
    #[arg(short, long)]
    seed: Option<String>,
    /// TOML file with level settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Maze width in rooms
    #[arg(long)]
    width: Option<usize>,
    /// Maze height in rooms
    #[arg(long)]
    height: Option<usize>,
    /// Room side length in tiles
    #[arg(long)]
    room_size: Option<usize>,
    #[arg(long)]
    iterations: Option<u32>,
    /// Stamp the merchant hall instead of growing a maze
    #[arg(long)]
    merchant: bool,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Also write the level as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn resolve_config(args: &Args) -> Result<LevelConfig> {
    let mut config = match &args.config {
        Some(path) => LevelConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => LevelConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(room_size) = args.room_size {
        config.room_size = room_size;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    config.validate().context("Invalid level settings")?;
    Ok(config)
}

fn render_tiles(tiles: &BoundedGrid<u8>) -> String {
    let mut out = String::with_capacity((tiles.width() + 1) * tiles.height() * 3);
    for (x, _, id) in tiles.iter() {
        out.push(GLYPHS[usize::from(id & 0x0F)]);
        if x as usize + 1 == tiles.width() {
            out.push('\n');
        }
    }
    out
}

fn render_text(level: &Level) -> String {
    let mut out = format!(
        "seed: {}\nkind: {:?}\nrooms: {}\nfingerprint: {:016x}\n",
        level.seed,
        level.kind,
        level.room_count(),
        level.fingerprint()
    );
    out.push_str(&render_tiles(&level.tiles));
    out
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = resolve_config(&args)?;
    let kind = if args.merchant { LevelKind::Merchant } else { LevelKind::Maze };
    let mut rng = SeededRandom::new(args.seed.as_deref());
    let level = Level::generate(&config, kind, &mut rng).context("Failed to generate level")?;
    tracing::info!(seed = %level.seed, fingerprint = level.fingerprint(), "level ready");

    let file = LevelFile::new(level);
    if let Some(path) = &args.output {
        file.write_atomic(path)
            .with_context(|| format!("Failed to write level file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "level written");
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&file.level)),
        OutputFormat::Json => {
            println!("{}", file.to_json().context("Failed to serialize level")?)
        }
    }

    Ok(())
}
