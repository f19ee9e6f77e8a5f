use boardscan_imgproc::HoughParams;
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::BoardDetector`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardDetectorParams {
    /// Spread factor for the median-adaptive Canny thresholds.
    pub canny_sigma: f32,

    /// Edge-density gate: reject the frame when the edge-pixel fraction
    /// exceeds this.
    pub max_edge_density: f32,

    /// Minimum-line-count gate: required horizontal and vertical lines.
    /// A standard chessboard has 9 grid lines per axis.
    pub min_lines_per_axis: usize,

    /// Maximum linkage distance when merging near-duplicate intersection
    /// points, in pixels.
    pub cluster_max_dist: f32,

    /// Relative tolerance on the grid spacing during corner search.
    /// A candidate corner is accepted when its nearest-neighbor distance is
    /// within `[(1 - tol), (1 + tol)]` times the estimated grid spacing.
    pub corner_tolerance: f32,

    /// Side length of the rectified board image, in pixels.
    pub board_side: usize,

    /// Hough line detection parameters.
    pub hough: HoughParams,
}

impl Default for BoardDetectorParams {
    fn default() -> Self {
        Self {
            canny_sigma: 3.9,
            max_edge_density: 0.035,
            min_lines_per_axis: 9,
            cluster_max_dist: 50.0,
            corner_tolerance: 0.25,
            board_side: 1816,
            hough: HoughParams::default(),
        }
    }
}
