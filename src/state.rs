use std::{
    fmt::{Display, Write},
    hash::{Hash, Hasher},
};

use smallvec::SmallVec;

use crate::{
    codec::{Layout, PackedBoard},
    heuristic::Heuristic,
};

/// Names the direction a tile slides into the blank; the blank itself
/// travels the opposite way.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Move {
    /// The tile below the blank slides up.
    Up,
    /// The tile above the blank slides down.
    Down,
    /// The tile right of the blank slides left.
    Left,
    /// The tile left of the blank slides right.
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Index of the tile that slides into `blank`, or `None` if there is
    /// no such tile on a `len_i × len_j` board.
    pub fn source(self, blank: usize, len_i: usize, len_j: usize) -> Option<usize> {
        let (i, j) = (blank / len_j, blank % len_j);
        match self {
            Move::Up => (i + 1 < len_i).then(|| blank + len_j),
            Move::Down => (i > 0).then(|| blank - len_j),
            Move::Left => (j + 1 < len_j).then(|| blank + 1),
            Move::Right => (j > 0).then(|| blank - 1),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.letter())
    }
}

/// What every state of one search shares.
#[derive(Clone, Copy, Debug)]
pub struct Puzzle {
    layout: Layout,
    heuristic: Heuristic,
}

impl Puzzle {
    pub fn new(layout: Layout, heuristic: Heuristic) -> Puzzle {
        Puzzle { layout, heuristic }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

/// One node of the search.
///
/// `parent` points into the search's arena of settled states, together
/// with the move that led here. Two states are the same state when their
/// boards match, whatever their cost or history.
#[derive(Clone, Copy, Debug)]
pub struct State {
    board: PackedBoard,
    blank: usize,
    cost: u32,
    heuristic: u32,
    parent: Option<(usize, Move)>,
}

impl State {
    pub fn initial(puzzle: &Puzzle, board: PackedBoard, blank: usize) -> State {
        State {
            board,
            blank,
            cost: 0,
            heuristic: puzzle.heuristic.evaluate(puzzle.layout, board),
            parent: None,
        }
    }

    pub fn board(&self) -> PackedBoard {
        self.board
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }

    pub fn parent(&self) -> Option<(usize, Move)> {
        self.parent
    }

    pub fn priority(&self) -> u32 {
        self.cost + self.heuristic
    }

    pub fn is_goal(&self) -> bool {
        self.heuristic == 0
    }

    /// The state after `mv`, recorded as a child of the state settled at
    /// `index`.
    pub fn step(&self, index: usize, puzzle: &Puzzle, mv: Move) -> Option<State> {
        let layout = puzzle.layout;
        let source = mv.source(self.blank, layout.height(), layout.width())?;
        let board = layout.slide(self.board, source, self.blank);

        Some(State {
            board,
            blank: source,
            cost: self.cost + 1,
            heuristic: puzzle.heuristic.evaluate(layout, board),
            parent: Some((index, mv)),
        })
    }

    pub fn up(&self, index: usize, puzzle: &Puzzle) -> Option<State> {
        self.step(index, puzzle, Move::Up)
    }

    pub fn down(&self, index: usize, puzzle: &Puzzle) -> Option<State> {
        self.step(index, puzzle, Move::Down)
    }

    pub fn left(&self, index: usize, puzzle: &Puzzle) -> Option<State> {
        self.step(index, puzzle, Move::Left)
    }

    pub fn right(&self, index: usize, puzzle: &Puzzle) -> Option<State> {
        self.step(index, puzzle, Move::Right)
    }

    pub fn neighbors(&self, index: usize, puzzle: &Puzzle) -> SmallVec<[State; 4]> {
        [
            self.up(index, puzzle),
            self.down(index, puzzle),
            self.left(index, puzzle),
            self.right(index, puzzle),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutil::board;

    fn start(rows: &[&[u8]]) -> (Puzzle, State) {
        let b = board(rows);
        let puzzle = Puzzle::new(Layout::for_board(&b), Heuristic::default());
        let (packed, blank) = puzzle.layout().encode(&b);
        (puzzle, State::initial(&puzzle, packed, blank))
    }

    #[test]
    fn moves_respect_edges() {
        // blank in the bottom right corner
        let (puzzle, solved) = start(&[&[1, 2], &[3, 0]]);
        assert!(solved.is_goal());
        assert!(solved.up(0, &puzzle).is_none());
        assert!(solved.left(0, &puzzle).is_none());
        assert!(solved.down(0, &puzzle).is_some());
        assert!(solved.right(0, &puzzle).is_some());

        // blank in the top left corner
        let (puzzle, corner) = start(&[&[0, 2], &[1, 3]]);
        assert!(corner.down(0, &puzzle).is_none());
        assert!(corner.right(0, &puzzle).is_none());
        assert_eq!(corner.neighbors(0, &puzzle).len(), 2);
    }

    #[test]
    fn step_links_to_parent() {
        let (puzzle, state) = start(&[&[1, 2], &[0, 3]]);
        assert_eq!(state.heuristic(), 1);
        assert_eq!(state.parent(), None);

        let next = state.left(7, &puzzle).unwrap();
        assert_eq!(next.blank(), 3);
        assert_eq!(next.cost(), 1);
        assert!(next.is_goal());
        assert_eq!(next.priority(), 1);
        assert_eq!(next.parent(), Some((7, Move::Left)));
        assert_eq!(next.board(), puzzle.layout().goal());
    }

    #[test]
    fn steps_undo_each_other() {
        let (puzzle, state) = start(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]);
        assert_eq!(state.neighbors(0, &puzzle).len(), 4);
        for next in state.neighbors(0, &puzzle) {
            let (_, mv) = next.parent().unwrap();
            let back = next.step(1, &puzzle, mv.opposite()).unwrap();
            assert_eq!(back, state);
            assert_eq!(back.cost(), 2);
        }
    }

    #[test]
    fn equality_is_by_board() {
        let (puzzle, state) = start(&[&[1, 2], &[0, 3]]);
        let there = state.left(0, &puzzle).unwrap();
        let and_back = there.right(1, &puzzle).unwrap();
        assert_eq!(and_back, state);
        assert_ne!(and_back.cost(), state.cost());
        assert_ne!(there, state);
    }

    #[test]
    fn move_labels() {
        let labels: String = Move::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, "UDLR");
        assert_eq!(Move::Left.name(), "Left");
    }
}
