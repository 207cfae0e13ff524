use std::process::ExitCode;

use clap::Parser;
use crossterm::style::{style, Stylize};
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use tracing::{error, Level};

use taquin::{LogMonitor, Monitors, Puzzle, Solver, SolverConfig, Stats, HOLE};

#[derive(Debug, Parser)]
#[command(
    name = "taquin",
    about = "Solve a sliding-tile puzzle with breadth-first search",
    version
)]
struct Cli {
    /// Side length of the board.
    #[arg(short, long, default_value_t = 3)]
    size: u8,

    /// Row-major tiles, comma separated, 0 for the hole. Defaults to a shuffled board.
    #[arg(short, long)]
    tiles: Option<String>,

    /// Number of random moves used to shuffle the solved board when no tiles are given.
    #[arg(long, default_value_t = 20)]
    shuffle: usize,

    /// Seed for the shuffle.
    #[arg(long)]
    seed: Option<u64>,

    /// Give up past this many moves.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Give up once this many boards have been visited.
    #[arg(long)]
    max_states: Option<usize>,

    /// Log search progress (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> taquin::Result<()> {
    let puzzle = match &cli.tiles {
        Some(tiles) => Puzzle::parse(cli.size, tiles)?,
        None => match cli.seed {
            Some(seed) => {
                Puzzle::shuffled(cli.size, cli.shuffle, &mut StdRng::seed_from_u64(seed))?
            }
            None => Puzzle::shuffled(cli.size, cli.shuffle, &mut thread_rng())?,
        },
    };

    println!("Puzzle to solve ({}):\n{}\n", puzzle.to_layout(), render(&puzzle));

    let config = SolverConfig {
        max_depth: cli.max_depth,
        max_states: cli.max_states,
    };

    let mut stats = Stats::default();
    let monitors = Monitors::new().and(LogMonitor::new()).and(&mut stats);
    let moves = Solver::new(config).solve(&puzzle, monitors)?;

    println!(
        "Found a solution in {} moves ({} boards visited)",
        moves.len(),
        stats.visited
    );

    let mut current = puzzle;
    for (i, &movement) in moves.iter().enumerate() {
        current = current.apply_move(movement)?;
        println!("#{}: {}\n{}\n", i + 1, movement, render(&current));
    }

    Ok(())
}

/// The display grid with the hole dimmed and tiles already at home in green.
fn render(puzzle: &Puzzle) -> String {
    let width = puzzle.cell_width();
    let size = usize::from(puzzle.size());

    puzzle
        .tiles()
        .chunks(size)
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, &tile)| {
                    if tile == HOLE {
                        style(format!("{:>width$}", "·")).dark_grey().to_string()
                    } else if usize::from(tile) == y * size + x + 1 {
                        style(format!("{:>width$}", tile)).green().to_string()
                    } else {
                        format!("{:>width$}", tile)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
