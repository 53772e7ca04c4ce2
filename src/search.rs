use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    fmt::Display,
};

use itertools::Itertools;
use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::{
    board::Board,
    codec::{Layout, PackedBoard},
    heuristic::Heuristic,
    solvable::is_solvable,
    state::{Move, Puzzle, State},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {
    /// Moves to apply, oldest first.
    Moves(Vec<Move>),
    Unsolvable,
}

impl Solution {
    pub fn moves(&self) -> Option<&[Move]> {
        match self {
            Solution::Moves(moves) => Some(moves),
            Solution::Unsolvable => None,
        }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Moves(moves) => write!(f, "{} ({})", moves.iter().join(""), moves.len()),
            Solution::Unsolvable => f.write_str("Impossible!"),
        }
    }
}

/// A solution together with how much work it took.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Search {
    /// States settled into the closed set.
    pub visited: usize,
    /// Successors pushed onto the open queue.
    pub generated: usize,
    pub solution: Solution,
}

// BinaryHeap pops the greatest entry, so the order is reversed: lowest
// priority first, then the lowest estimate (deepest state) among equals.
struct Open(State);

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .priority()
            .cmp(&self.0.priority())
            .then_with(|| other.0.heuristic().cmp(&self.0.heuristic()))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

/// Finds a shortest solution using the default heuristic.
pub fn solve(board: &Board) -> Solution {
    search(board, Heuristic::default()).solution
}

pub fn search(board: &Board, heuristic: Heuristic) -> Search {
    let puzzle = Puzzle::new(Layout::for_board(board), heuristic);
    let layout = puzzle.layout();
    let (packed, blank) = layout.encode(board);
    let initial = State::initial(&puzzle, packed, blank);

    debug!(
        "solving {}x{} board, {} bits per tile, {:?} estimate {}",
        layout.height(),
        layout.width(),
        layout.bit_width(),
        heuristic,
        initial.heuristic()
    );

    let mut visited = 0;
    let mut generated = 0;

    if !is_solvable(board.tiles(), layout.width(), layout.height(), blank) {
        debug!("inversion parity rules out a solution");
        return Search {
            visited,
            generated,
            solution: Solution::Unsolvable,
        };
    }

    let mut open = BinaryHeap::new();
    open.push(Open(initial));

    // settled states in the order they were closed; parents point in here
    let mut settled: Vec<State> = Vec::new();
    let mut closed: FxHashMap<PackedBoard, usize> = FxHashMap::default();

    while let Some(Open(current)) = open.pop() {
        // a cheaper copy of this board was settled earlier
        if closed.contains_key(&current.board()) {
            continue;
        }

        let index = settled.len();
        closed.insert(current.board(), index);
        settled.push(current);
        visited += 1;

        trace!(
            "settled #{} cost {} estimate {}",
            index,
            current.cost(),
            current.heuristic()
        );

        if current.is_goal() {
            let moves = reconstruct(&settled, index);
            debug!(
                "solved in {} moves, visited {} boards (generated {})",
                moves.len(),
                visited,
                generated
            );
            return Search {
                visited,
                generated,
                solution: Solution::Moves(moves),
            };
        }

        for next in current.neighbors(index, &puzzle) {
            if !closed.contains_key(&next.board()) {
                generated += 1;
                open.push(Open(next));
            }
        }
    }

    debug!("exhausted {} reachable boards without a solution", visited);
    Search {
        visited,
        generated,
        solution: Solution::Unsolvable,
    }
}

fn reconstruct(settled: &[State], goal: usize) -> Vec<Move> {
    let mut trail = Vec::new();
    let mut at = settled[goal];
    while let Some((parent, mv)) = at.parent() {
        trail.push(mv);
        at = settled[parent];
    }

    trail.reverse();
    trail
}

#[cfg(test)]
mod test {
    use pathfinding::directed::bfs::bfs;

    use super::*;
    use crate::{
        board::{parse_board, replay},
        testutil::{board, distances, successors},
    };

    const ALL: [Heuristic; 3] = [
        Heuristic::Manhattan,
        Heuristic::RowConflicts,
        Heuristic::LinearConflicts,
    ];

    fn assert_solves(b: &Board, heuristic: Heuristic) -> usize {
        let found = search(b, heuristic);
        let moves = found.solution.moves().expect("solvable board");
        let end = replay(b, moves).unwrap().pop().unwrap_or_else(|| b.clone());
        assert!(end.is_solved(), "{:?} does not solve\n{}", moves, b);
        moves.len()
    }

    #[test]
    fn already_solved() {
        let found = search(&board(&[&[1, 2], &[3, 0]]), Heuristic::default());
        assert_eq!(found.solution, Solution::Moves(vec![]));
        assert_eq!(found.visited, 1);
        assert_eq!(found.generated, 0);
    }

    #[test]
    fn single_slide() {
        let solution = solve(&board(&[&[1, 2], &[0, 3]]));
        assert_eq!(solution, Solution::Moves(vec![Move::Left]));
        assert_eq!(solution.to_string(), "L (1)");
    }

    #[test]
    fn parity_short_circuits() {
        let found = search(
            &board(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]]),
            Heuristic::default(),
        );
        assert_eq!(found.solution, Solution::Unsolvable);
        assert_eq!(found.visited, 0);
        assert_eq!(found.generated, 0);
        assert_eq!(found.solution.to_string(), "Impossible!");
    }

    #[test]
    fn single_row_falls_back_to_exhaustion() {
        // parity allows it, but tiles in one row can never pass each other
        let b = board(&[&[3, 1, 2, 0]]);
        assert!(b.is_solvable());
        let found = search(&b, Heuristic::default());
        assert_eq!(found.solution, Solution::Unsolvable);
        assert_eq!(found.visited, 4);

        assert_eq!(
            solve(&board(&[&[1, 0, 2]])),
            Solution::Moves(vec![Move::Left])
        );
    }

    #[test]
    fn easy_puzzle() {
        let b = parse_board(include_str!("../puzzles/easy.puz")).unwrap();
        let solution = solve(&b);
        assert_eq!(
            solution,
            Solution::Moves(vec![Move::Left, Move::Left, Move::Left, Move::Up])
        );
        assert_eq!(solution.to_string(), "LLLU (4)");
    }

    #[test]
    fn hardest_eight_puzzle() {
        let b = parse_board(include_str!("../puzzles/eight.puz")).unwrap();
        for h in ALL {
            assert_eq!(assert_solves(&b, h), 31);
        }
    }

    #[test]
    fn fifteen_puzzle() {
        let b = parse_board(include_str!("../puzzles/fifteen.puz")).unwrap();
        // every displaced tile is exactly one step from home
        assert_eq!(Heuristic::Manhattan.estimate(&b), 12);
        for h in ALL {
            assert_eq!(assert_solves(&b, h), 12);
        }
    }

    #[test]
    fn unsolvable_file() {
        let b = parse_board(include_str!("../puzzles/unsolvable.puz")).unwrap();
        assert_eq!(solve(&b), Solution::Unsolvable);
    }

    #[test]
    fn repeatable() {
        let b = board(&[&[8, 6, 7], &[2, 5, 4], &[3, 0, 1]]);
        assert_eq!(solve(&b), solve(&b));
    }

    fn check_optimal(len_i: usize, len_j: usize) {
        for (b, distance) in distances(len_i, len_j) {
            for h in ALL {
                assert_eq!(assert_solves(&b, h), distance as usize, "{:?} on\n{}", h, b);
            }
        }
    }

    #[test]
    fn optimal_on_small_boards() {
        check_optimal(2, 2);
        check_optimal(2, 3);
        check_optimal(3, 2);
    }

    #[test]
    fn optimal_on_sampled_3x3() {
        let mut exact: Vec<_> = distances(3, 3).into_iter().collect();
        exact.sort_unstable_by(|(a, x), (b, y)| (x, a.tiles()).cmp(&(y, b.tiles())));

        for (b, distance) in exact.into_iter().step_by(4001) {
            assert_eq!(assert_solves(&b, Heuristic::default()), distance as usize);
        }
    }

    #[test]
    fn matches_breadth_first_search() {
        for b in [
            board(&[&[4, 1, 3], &[7, 2, 6], &[0, 5, 8]]),
            board(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]),
            board(&[&[4, 1, 2], &[5, 0, 3]]),
        ] {
            let path = bfs(
                &b,
                |b| successors(b).into_iter().map(|(next, _)| next),
                Board::is_solved,
            )
            .unwrap();
            assert_eq!(assert_solves(&b, Heuristic::default()), path.len() - 1);
        }
    }
}
