use boardscan_core::GrayImage;

/// Cells per side on a standard chessboard.
pub const GRID_SIZE: usize = 8;

/// One of the 64 board cells, with its grid address.
/// Row 0 is the top of the rectified board, column 0 the left.
#[derive(Clone, Debug)]
pub struct BoardCell {
    pub row: usize,
    pub col: usize,
    pub image: GrayImage,
}

/// Split a rectified square board image into 64 equal cells, row-major.
///
/// `cell = side / 8` with integer division; when the side is not divisible
/// by 8 the remainder pixels at the bottom/right edge are dropped.
pub fn split_board(board: &GrayImage) -> Vec<BoardCell> {
    let cell = board.width.min(board.height) / GRID_SIZE;
    let mut cells = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            cells.push(BoardCell {
                row,
                col,
                image: board.crop(col * cell, row * cell, cell, cell),
            });
        }
    }
    cells
}
