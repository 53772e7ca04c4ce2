use itertools::Itertools;

use crate::board::BLANK;

/// Pairs of tiles, read row-major with the blank skipped, that are out
/// of numeric order.
pub fn count_inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .filter(|&&tile| tile != BLANK)
        .tuple_combinations()
        .filter(|(a, b)| b < a)
        .count()
}

/// Decides from inversion parity whether `tiles` can reach the solved
/// order.
///
/// With an odd width every move keeps the inversion parity, so it must be
/// even. With an even width a vertical move flips it, so the parity is
/// taken together with how many rows the blank sits above the bottom.
pub fn is_solvable(tiles: &[u8], width: usize, height: usize, blank: usize) -> bool {
    let inversions = count_inversions(tiles);
    if width % 2 == 1 {
        inversions % 2 == 0
    } else {
        let offset = (height - 1) - blank / width;
        (inversions + offset) % 2 == 0
    }
}
