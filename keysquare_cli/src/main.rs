use std::path::PathBuf;

use clap::Parser;
use keysquare::Grid;
use keysquare_cli::{load_strategy, run, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Let the bot flip a coin according to the strategy file, then guess
    #[arg(short, long, default_value_t = false)]
    single_player: bool,

    /// Path to the strategy JSON file used in single-player mode
    #[arg(long, default_value = "strategy.json")]
    strategy: PathBuf,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut grid = Grid::new(&mut rng);

    if args.single_player {
        println!("Single player mode: Flipping for you.");
        let strategy = load_strategy(&args.strategy)?;
        strategy.play_solo_turn(&mut grid)?;
        let decoded_position = strategy.decode_key_position(&grid)?;
        debug!(
            decoded_position,
            key_position = grid.position_of(grid.key_id()),
            "Solo turn done"
        );
    }

    let mut session = Session::new(grid, args.single_player);
    run(&mut session, std::io::stdin().lock(), std::io::stdout().lock())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
