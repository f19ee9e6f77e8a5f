//! Chessboard localization from a photograph.
//!
//! The pipeline turns a noisy set of Hough lines into the four board
//! corners and a rectified, axis-aligned board image split into 64 cells:
//!
//! 1. Classify lines as horizontal or vertical by angle.
//! 2. Intersect every horizontal with every vertical line.
//! 3. Collapse near-duplicate intersections by single-linkage clustering.
//! 4. Pick the four board corners by grid-spacing consistency.
//! 5. Warp the board onto a canonical square and split it 8x8.
//!
//! Two sanity gates guard the expensive steps: an edge-density gate (a
//! frame buried in edges is unlikely to contain an isolable board) and a
//! minimum line count per axis (a chessboard has 9 grid lines each way).
//!
//! ## Quickstart
//!
//! ```
//! use boardscan_detect::{BoardDetector, BoardDetectorParams};
//! use boardscan_core::GrayImage;
//!
//! let img = GrayImage::new(640, 480);
//! let detector = BoardDetector::new(BoardDetectorParams::default());
//! let result = detector.detect(&img.as_view());
//! println!("detected: {}", result.is_ok());
//! ```

mod cluster;
mod corners;
mod detector;
mod error;
mod lines;
mod params;
mod rectify;
mod split;

pub use cluster::cluster_points;
pub use corners::find_corners;
pub use detector::{BoardDetection, BoardDetector};
pub use error::BoardDetectError;
pub use lines::{intersections, split_horizontal_vertical};
pub use params::BoardDetectorParams;
pub use rectify::rectify_board;
pub use split::{split_board, BoardCell, GRID_SIZE};

pub use boardscan_core::PolarLine;
pub use boardscan_imgproc::{EdgeMap, HoughParams};
