//! Board state and FEN piece-placement encoding.

use crate::classify::Piece;
use boardscan_detect::GRID_SIZE;

/// An 8x8 grid of classified squares.
///
/// Row 0 is the top of the rectified board, which FEN calls rank 8;
/// column 0 is file a.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardGrid {
    squares: [[Option<Piece>; GRID_SIZE]; GRID_SIZE],
}

impl BoardGrid {
    pub fn empty() -> Self {
        Self {
            squares: [[None; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn set(&mut self, row: usize, col: usize, piece: Option<Piece>) {
        self.squares[row][col] = piece;
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.squares[row][col]
    }

    /// The piece-placement field of a FEN record: ranks top to bottom
    /// separated by `/`, runs of empty squares written as digits.
    pub fn to_fen_placement(&self) -> String {
        let mut out = String::new();
        for (i, rank) in self.squares.iter().enumerate() {
            if i > 0 {
                out.push('/');
            }
            let mut empty_run = 0u8;
            for square in rank {
                match square {
                    Some(piece) => {
                        if empty_run > 0 {
                            out.push(char::from(b'0' + empty_run));
                            empty_run = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push(char::from(b'0' + empty_run));
            }
        }
        out
    }
}

impl Default for BoardGrid {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Color, PieceKind};

    fn piece(color: Color, kind: PieceKind) -> Option<Piece> {
        Some(Piece::new(color, kind))
    }

    fn back_rank(grid: &mut BoardGrid, row: usize, color: Color) {
        use PieceKind::*;
        let order = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (col, &kind) in order.iter().enumerate() {
            grid.set(row, col, piece(color, kind));
        }
    }

    #[test]
    fn empty_board() {
        assert_eq!(BoardGrid::empty().to_fen_placement(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn starting_position() {
        let mut grid = BoardGrid::empty();
        back_rank(&mut grid, 0, Color::Black);
        back_rank(&mut grid, 7, Color::White);
        for col in 0..8 {
            grid.set(1, col, piece(Color::Black, PieceKind::Pawn));
            grid.set(6, col, piece(Color::White, PieceKind::Pawn));
        }
        assert_eq!(
            grid.to_fen_placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn interior_and_trailing_empty_runs() {
        let mut grid = BoardGrid::empty();
        // rank 8: r3k2r (castling-ready rooks and king)
        grid.set(0, 0, piece(Color::Black, PieceKind::Rook));
        grid.set(0, 4, piece(Color::Black, PieceKind::King));
        grid.set(0, 7, piece(Color::Black, PieceKind::Rook));
        // rank 1: a lone white pawn on a2... here row 6, file a
        grid.set(6, 0, piece(Color::White, PieceKind::Pawn));
        assert_eq!(grid.to_fen_placement(), "r3k2r/8/8/8/8/8/P7/8");
    }
}
