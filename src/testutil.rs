use std::collections::HashMap;

use pathfinding::directed::dijkstra::dijkstra_all;

use crate::{Board, Move};

pub fn board(rows: &[&[u8]]) -> Board {
    Board::new(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
}

pub fn successors(b: &Board) -> Vec<(Board, u32)> {
    Move::ALL
        .iter()
        .filter_map(|&mv| {
            let mut next = b.clone();
            next.apply(mv).ok()?;
            Some((next, 1))
        })
        .collect()
}

/// Exact distance to the solved board from every board that can reach it.
pub fn distances(len_i: usize, len_j: usize) -> HashMap<Board, u32> {
    let goal = Board::solved(len_i, len_j).unwrap();
    let mut exact: HashMap<Board, u32> = dijkstra_all(&goal, successors)
        .into_iter()
        .map(|(b, (_, distance))| (b, distance))
        .collect();
    exact.insert(goal, 0);
    exact
}
