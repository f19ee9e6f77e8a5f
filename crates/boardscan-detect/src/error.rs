/// Errors returned by the board detector.
///
/// Every variant is terminal for a single detection run; the pipeline never
/// returns a partial board. Near-parallel line pairs are not an error: the
/// intersection solver silently skips them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoardDetectError {
    /// Edge-density gate: the frame has too much edge content to contain a
    /// clean, isolable board.
    #[error("too many edges (density {density:.4} > {limit:.4})")]
    TooManyEdges { density: f32, limit: f32 },

    /// Minimum-line-count gate: a chessboard has 9 grid lines per axis.
    #[error("too few lines ({horizontal} horizontal, {vertical} vertical, need {required} each)")]
    TooFewLines {
        horizontal: usize,
        vertical: usize,
        required: usize,
    },

    /// Corner search exhausted every candidate for one of the four corner
    /// regions without passing the grid-spacing check.
    #[error("no board found (no consistent corner near image corner {corner})")]
    CornerNotFound { corner: usize },

    /// The four found corners do not form a usable quadrilateral.
    #[error("degenerate corner geometry, cannot rectify")]
    DegenerateGeometry,
}
