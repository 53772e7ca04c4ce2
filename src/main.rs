use std::{
    io::{stdin, IsTerminal, Read},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tile_solver::{parse_board, replay, search, Heuristic};

// Format of a .puz file:
// one board row per line, tiles separated by whitespace,
// the blank written as 0, `.`, `_` or `x`.
//
//  1  2  3  4
//  5  6  7  8
//  .  9 10 11
// 13 14 15 12

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    /// Manhattan distance only
    Manhattan,
    /// Manhattan distance plus conflicts along rows
    RowConflicts,
    /// Manhattan distance plus conflicts along rows and columns
    LinearConflicts,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Heuristic {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::RowConflicts => Heuristic::RowConflicts,
            HeuristicArg::LinearConflicts => Heuristic::LinearConflicts,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Estimate guiding the search
    #[arg(long, value_enum, default_value_t = HeuristicArg::RowConflicts)]
    heuristic: HeuristicArg,
    /// Print the board after every move
    #[arg(short, long)]
    replay: bool,
    /// Print how many board positions the search went through
    #[arg(short, long)]
    stats: bool,
    /// Log search progress to stderr
    #[arg(short, long)]
    verbose: bool,
    /// Path to a .puz file (read from stdin when omitted)
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let Cli {
        heuristic,
        replay: show_replay,
        stats,
        verbose,
        file,
    } = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let content = if let Some(file) = file {
        std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    } else if !stdin().is_terminal() {
        let mut content = String::new();
        stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        content
    } else {
        bail!("No puzzle `file` provided and nothing piped to stdin.");
    };

    let board = parse_board(&content).context("Failed to parse board")?;
    let result = search(&board, heuristic.into());

    println!("Solution: {}", result.solution);
    if stats {
        println!(
            "Visited {} board positions (generated {} total).",
            result.visited, result.generated
        );
    }

    if let (true, Some(moves)) = (show_replay, result.solution.moves()) {
        println!("----");
        println!("{}", board);
        for (mv, step) in moves.iter().zip(replay(&board, moves)?) {
            println!("---- {}", mv.name());
            println!("{}", step);
        }
    }

    Ok(())
}
