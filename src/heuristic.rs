use auto_enums::auto_enum;
use smallvec::SmallVec;

use crate::{
    board::{Board, BLANK},
    codec::{Layout, PackedBoard},
};

/// Lower bounds on the number of moves left.
///
/// All of them are admissible and consistent, and reach 0 on the solved
/// board only.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Heuristic {
    /// Sum of every tile's Manhattan distance to its goal cell.
    Manhattan,
    /// Manhattan distance plus linear conflicts along rows.
    #[default]
    RowConflicts,
    /// Manhattan distance plus linear conflicts along rows and columns.
    LinearConflicts,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Axis {
    Row,
    Column,
}

impl Heuristic {
    pub fn evaluate(self, layout: Layout, board: PackedBoard) -> u32 {
        let distance = manhattan(layout, board);
        match self {
            Heuristic::Manhattan => distance,
            Heuristic::RowConflicts => distance + conflicts(layout, board, Axis::Row),
            Heuristic::LinearConflicts => {
                distance
                    + conflicts(layout, board, Axis::Row)
                    + conflicts(layout, board, Axis::Column)
            }
        }
    }

    pub fn estimate(self, board: &Board) -> u32 {
        let layout = Layout::for_board(board);
        let (packed, _) = layout.encode(board);
        self.evaluate(layout, packed)
    }
}

// the blank is left out: it moves on every step, so counting it would
// charge each move twice
fn manhattan(layout: Layout, board: PackedBoard) -> u32 {
    (0..layout.cells())
        .map(|index| {
            let tile = layout.tile_at(board, index);
            if tile == BLANK {
                return 0;
            }

            let (i, j) = layout.position(index);
            let (goal_i, goal_j) = layout.goal_of(tile);
            (i.abs_diff(goal_i) + j.abs_diff(goal_j)) as u32
        })
        .sum()
}

#[auto_enum(Iterator)]
fn line(layout: Layout, axis: Axis, n: usize) -> impl Iterator<Item = usize> {
    match axis {
        Axis::Row => (0..layout.width()).map(move |j| n * layout.width() + j),
        Axis::Column => (0..layout.height()).map(move |i| i * layout.width() + n),
    }
}

// Tiles already in their goal line but in the wrong order have to pass
// each other, and one of them must step out of the line and back: 2 moves
// Manhattan distance does not see. The tiles that may stay form the
// longest run whose goal cells are increasing; every other one leaves.
fn conflicts(layout: Layout, board: PackedBoard, axis: Axis) -> u32 {
    let lines = match axis {
        Axis::Row => layout.height(),
        Axis::Column => layout.width(),
    };

    (0..lines)
        .map(|n| {
            let goals: SmallVec<[usize; 8]> = line(layout, axis, n)
                .map(|index| layout.tile_at(board, index))
                .filter(|&tile| tile != BLANK)
                .filter_map(|tile| {
                    let (goal_i, goal_j) = layout.goal_of(tile);
                    match axis {
                        Axis::Row => (goal_i == n).then_some(goal_j),
                        Axis::Column => (goal_j == n).then_some(goal_i),
                    }
                })
                .collect();

            2 * (goals.len() - longest_increasing(&goals)) as u32
        })
        .sum()
}

fn longest_increasing(values: &[usize]) -> usize {
    // tails[k] is the smallest last value of an increasing run of length k + 1
    let mut tails = SmallVec::<[usize; 8]>::new();
    for &value in values {
        match tails.binary_search(&value) {
            Ok(_) => {}
            Err(k) if k == tails.len() => tails.push(value),
            Err(k) => tails[k] = value,
        }
    }
    tails.len()
}
