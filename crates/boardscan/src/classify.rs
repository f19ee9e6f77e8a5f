//! Contracts for the per-cell classifiers.
//!
//! The detection pipeline produces 64 cell images; whether a cell holds a
//! piece, and which one, is decided by models supplied by the caller. This
//! module only fixes the interface and the piece vocabulary.

use crate::notation::BoardGrid;
use boardscan_core::GrayImageView;
use boardscan_detect::BoardCell;

/// Whether a board cell holds a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    Occupied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Standard FEN letter: upper-case for white, lower-case for black.
    pub fn fen_char(&self) -> char {
        let c = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// Decides whether a cell image holds a piece.
pub trait OccupancyClassifier {
    fn predict(&self, cell: &GrayImageView<'_>) -> Occupancy;
}

/// Identifies the piece on an occupied cell image.
///
/// Only consulted for cells the occupancy classifier marked occupied.
pub trait PieceClassifier {
    fn predict(&self, cell: &GrayImageView<'_>) -> Piece;
}

/// Run both classifiers over the 64 detected cells.
pub fn classify_cells(
    cells: &[BoardCell],
    occupancy: &dyn OccupancyClassifier,
    piece: &dyn PieceClassifier,
) -> BoardGrid {
    let mut grid = BoardGrid::empty();
    for cell in cells {
        let view = cell.image.as_view();
        if occupancy.predict(&view) == Occupancy::Occupied {
            grid.set(cell.row, cell.col, Some(piece.predict(&view)));
        }
    }
    grid
}
