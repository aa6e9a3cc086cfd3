//! Chain Reaction: a turn-based orb placement game engine.
//!
//! ## Usage
//!
//! - `chain-reaction` - Show a demo
//! - `chain-reaction console` - Drive a game through text commands on stdin
//! - `chain-reaction simulate --games 100` - Play random games and report winners
//!
//! Set `RUST_LOG=debug` to trace placements and chain reactions.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use chain_reaction::autoplay::{FRAME_MS, MAX_SETTLE_FRAMES, autoplay};
use chain_reaction::config::GameConfig;
use chain_reaction::console::Console;
use chain_reaction::constants::{DEFAULT_COLS, DEFAULT_ROWS};
use chain_reaction::coord::Coord;
use chain_reaction::session::GameSession;

/// Chain Reaction game engine
#[derive(Parser)]
#[command(name = "chain-reaction")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GameArgs {
    /// Number of rows (6-10)
    #[arg(long, default_value_t = DEFAULT_ROWS, global = true)]
    rows: usize,
    /// Number of columns (6-10)
    #[arg(long, default_value_t = DEFAULT_COLS, global = true)]
    cols: usize,
    /// Player colors in turn order
    #[arg(long, value_delimiter = ',', default_value = "red,blue", global = true)]
    players: Vec<String>,
    /// Seed for the random generator
    #[arg(long, default_value_t = 0, global = true)]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Read game commands from stdin and answer on stdout
    Console,
    /// Play random games and print the winners
    Simulate {
        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: usize,
        /// Move cap per game
        #[arg(long, default_value_t = 10_000)]
        max_moves: usize,
    },
    /// Run a short scripted game
    Demo,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = GameConfig::new(cli.game.rows, cli.game.cols, &cli.game.players)?;

    match cli.command {
        Some(Commands::Console) => Console::new(config, cli.game.seed).run(),
        Some(Commands::Simulate { games, max_moves }) => {
            run_simulation(config, cli.game.seed, games, max_moves);
            Ok(())
        }
        Some(Commands::Demo) | None => {
            run_demo(config, cli.game.seed);
            Ok(())
        }
    }
}

fn run_simulation(config: GameConfig, seed: u64, games: usize, max_moves: usize) {
    let mut wins = vec![0usize; config.player_count()];
    let mut rng = fastrand::Rng::with_seed(seed);

    for game in 0..games {
        let mut session = GameSession::new(config.clone(), rng.u64(..));
        let outcome = autoplay(&mut session, max_moves, &mut rng);
        match outcome.winner {
            Some(w) => {
                wins[w.index] += 1;
                println!("game {:>3}: {} won after {} moves", game + 1, w.label, outcome.moves);
            }
            None => println!("game {:>3}: no winner after {} moves", game + 1, outcome.moves),
        }
    }

    println!();
    for (i, label) in config.players().iter().enumerate() {
        println!("{label:>8}: {} wins", wins[i]);
    }
}

fn run_demo(config: GameConfig, seed: u64) {
    println!("Chain Reaction\n");
    let mut session = GameSession::new(config, seed);

    // The first player fills the lower-left corner until it explodes.
    let script = [
        Coord::new(0, 0),
        Coord::new(2, 2),
        Coord::new(0, 0),
    ];
    for coord in script {
        let player = session.current_player();
        let label = session.config().label(player).to_string();
        match session.place(coord) {
            Ok(()) => println!("{label} plays {coord}"),
            Err(e) => println!("{label} cannot play {coord}: {e}"),
        }
        session.settle(FRAME_MS, MAX_SETTLE_FRAMES);
        println!("{}", session.board());
    }
}
