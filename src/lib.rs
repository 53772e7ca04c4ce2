//! Optimal solver for the `n × m` sliding tile puzzle.
//!
//! Boards are packed into a single `u128` and searched with A* under an
//! admissible Manhattan distance + linear conflict estimate. Boards whose
//! inversion parity rules out a solution are rejected before any search.
//!
//! ```
//! use tile_solver::{parse_board, solve, Move, Solution};
//!
//! let board = parse_board("1 2\n. 3").unwrap();
//! assert_eq!(solve(&board), Solution::Moves(vec![Move::Left]));
//! ```

pub mod board;
pub mod codec;
pub mod heuristic;
pub mod search;
pub mod solvable;
pub mod state;

#[cfg(test)]
mod testutil;

pub use board::{parse_board, replay, Board, BLANK};
pub use codec::{Layout, PackedBoard};
pub use heuristic::Heuristic;
pub use search::{search, solve, Search, Solution};
pub use solvable::{count_inversions, is_solvable};
pub use state::{Move, Puzzle, State};
