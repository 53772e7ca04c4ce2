use std::{
    fmt::{Display, Write},
    iter,
    ops::Index,
};

use anyhow::{bail, Context, Result};
use itertools::Itertools;

use crate::{codec::Layout, solvable::is_solvable, state::Move};

/// The empty cell.
pub const BLANK: u8 = 0;

/// A validated `len_i × len_j` grid of tiles, stored row-major.
///
/// Every board holds exactly one [`BLANK`] and the tiles
/// `1..len_i * len_j`, and always fits a packed [`Layout`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    len_i: usize,
    len_j: usize,
    blank: usize,
    board: Vec<u8>,
}

impl Board {
    pub fn new(from: Vec<Vec<u8>>) -> Result<Board> {
        let len_i = from.len();
        let len_j = from.first().map_or(0, Vec::len);
        if len_i == 0 || len_j == 0 {
            bail!("board must have at least one row and one column");
        }

        if let Some((i, row)) = from.iter().enumerate().find(|(_, row)| row.len() != len_j) {
            bail!("row {} has {} tiles, expected {}", i + 1, row.len(), len_j);
        }

        Layout::new(len_i, len_j)?;

        let board: Vec<u8> = from.into_iter().flatten().collect();
        let mut seen = vec![false; board.len()];
        for &tile in &board {
            match seen.get_mut(tile as usize) {
                Some(seen) if !*seen => *seen = true,
                Some(_) => bail!("tile {} appears more than once", tile),
                None => bail!("tile {} does not fit a {}x{} board", tile, len_i, len_j),
            }
        }

        Ok(Board::from_tiles(len_i, len_j, board))
    }

    /// The canonical solved board: tiles in order, blank last.
    pub fn solved(len_i: usize, len_j: usize) -> Result<Board> {
        let layout = Layout::new(len_i, len_j)?;
        Ok(layout.decode(layout.goal()))
    }

    // callers guarantee `board` is a valid permutation
    pub(crate) fn from_tiles(len_i: usize, len_j: usize, board: Vec<u8>) -> Board {
        let blank = board.iter().position(|&t| t == BLANK).unwrap_or_default();
        Board {
            len_i,
            len_j,
            blank,
            board,
        }
    }

    pub fn height(&self) -> usize {
        self.len_i
    }

    pub fn width(&self) -> usize {
        self.len_j
    }

    /// Row-major index of the blank.
    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn tiles(&self) -> &[u8] {
        &self.board
    }

    pub fn is_solved(&self) -> bool {
        let goal = (1..self.board.len() as u8).chain(iter::once(BLANK));
        self.board.iter().copied().eq(goal)
    }

    pub fn is_solvable(&self) -> bool {
        is_solvable(&self.board, self.len_j, self.len_i, self.blank)
    }

    /// Slides the tile selected by `mv` into the blank.
    pub fn apply(&mut self, mv: Move) -> Result<()> {
        let Some(source) = mv.source(self.blank, self.len_i, self.len_j) else {
            bail!(
                "cannot move {} with the blank at row {}, column {}",
                mv.name(),
                self.blank / self.len_j + 1,
                self.blank % self.len_j + 1
            );
        };

        self.board.swap(self.blank, source);
        self.blank = source;
        Ok(())
    }
}

/// The board after each of `moves`, in order.
pub fn replay(board: &Board, moves: &[Move]) -> Result<Vec<Board>> {
    let mut current = board.clone();
    moves
        .iter()
        .enumerate()
        .map(|(step, &mv)| {
            current
                .apply(mv)
                .with_context(|| format!("move {} is illegal", step + 1))?;
            Ok(current.clone())
        })
        .collect()
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = (self.board.len() - 1).to_string().len();
        let mut first = true;
        for line in self.board.chunks(self.len_j) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            let line = line
                .iter()
                .map(|&tile| match tile {
                    BLANK => format!("{:>digits$}", "."),
                    tile => format!("{:>digits$}", tile),
                })
                .join(" ");
            f.write_str(&line)?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Board {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.board[index.0 * self.len_j + index.1]
    }
}

fn parse_token(token: &str) -> Result<u8> {
    match token {
        "." | "_" | "x" => Ok(BLANK),
        _ => token
            .parse()
            .with_context(|| format!("`{}` is not a tile", token)),
    }
}

/// Reads a `.puz` layout: one row per line, whitespace separated, with
/// `.`, `_` or `x` standing for the blank.
pub fn parse_board(b: &str) -> Result<Board> {
    let board = b
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            line.split_whitespace()
                .map(parse_token)
                .collect::<Result<Vec<u8>>>()
                .with_context(|| format!("line {}", n + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    Board::new(board)
}
