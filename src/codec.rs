use anyhow::{bail, Result};

use crate::board::{Board, BLANK};

/// A whole board squeezed into one integer, `bit_width` bits per cell.
///
/// Equality and hashing look at the packed value only, so two boards
/// compare equal exactly when every cell matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PackedBoard(u128);

impl PackedBoard {
    pub fn bits(self) -> u128 {
        self.0
    }
}

/// Geometry shared by every packed board of one puzzle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Layout {
    len_i: usize,
    len_j: usize,
    bit_width: u32,
}

// bits needed to hold the largest tile, `cells - 1`, and never zero
fn bit_width(cells: usize) -> u32 {
    (usize::BITS - (cells - 1).leading_zeros()).max(1)
}

impl Layout {
    pub fn new(len_i: usize, len_j: usize) -> Result<Layout> {
        let Some(cells) = len_i.checked_mul(len_j).filter(|&cells| cells > 0) else {
            bail!("a {}x{} board has no cells to pack", len_i, len_j);
        };

        let bit_width = bit_width(cells);
        let needed = cells as u128 * bit_width as u128;
        if needed > u128::BITS as u128 {
            bail!(
                "a {}x{} board needs {} bits, a packed board holds {}",
                len_i,
                len_j,
                needed,
                u128::BITS
            );
        }

        Ok(Layout {
            len_i,
            len_j,
            bit_width,
        })
    }

    pub fn for_board(board: &Board) -> Layout {
        Layout {
            len_i: board.height(),
            len_j: board.width(),
            bit_width: bit_width(board.tiles().len()),
        }
    }

    pub fn height(self) -> usize {
        self.len_i
    }

    pub fn width(self) -> usize {
        self.len_j
    }

    pub fn cells(self) -> usize {
        self.len_i * self.len_j
    }

    pub fn bit_width(self) -> u32 {
        self.bit_width
    }

    /// `(row, column)` of a row-major index.
    pub fn position(self, index: usize) -> (usize, usize) {
        (index / self.len_j, index % self.len_j)
    }

    /// `(row, column)` where `tile` sits on the solved board.
    pub fn goal_of(self, tile: u8) -> (usize, usize) {
        match tile {
            BLANK => (self.len_i - 1, self.len_j - 1),
            tile => self.position(tile as usize - 1),
        }
    }

    fn mask(self) -> u128 {
        (1 << self.bit_width) - 1
    }

    fn offset(self, index: usize) -> u32 {
        self.bit_width * index as u32
    }

    pub fn tile_at(self, board: PackedBoard, index: usize) -> u8 {
        ((board.0 >> self.offset(index)) & self.mask()) as u8
    }

    /// Packs `board` row-major and reports where its blank is.
    pub fn encode(self, board: &Board) -> (PackedBoard, usize) {
        let packed = board
            .tiles()
            .iter()
            .enumerate()
            .fold(0, |packed, (index, &tile)| {
                packed | (tile as u128) << self.offset(index)
            });

        (PackedBoard(packed), board.blank())
    }

    pub fn decode(self, board: PackedBoard) -> Board {
        let tiles = (0..self.cells())
            .map(|index| self.tile_at(board, index))
            .collect();
        Board::from_tiles(self.len_i, self.len_j, tiles)
    }

    /// Moves the tile at `from` into the blank slot `to`.
    pub fn slide(self, board: PackedBoard, from: usize, to: usize) -> PackedBoard {
        let tile = self.tile_at(board, from) as u128;
        let cleared = board.0 & !(self.mask() << self.offset(from));
        PackedBoard(cleared | tile << self.offset(to))
    }

    pub fn goal(self) -> PackedBoard {
        let packed = (1..self.cells()).fold(0, |packed, tile| {
            packed | (tile as u128) << self.offset(tile - 1)
        });
        PackedBoard(packed)
    }
}
