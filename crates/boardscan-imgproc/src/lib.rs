//! Edge and line detection primitives for chessboard photos.
//!
//! Two collaborators of the detection pipeline live here:
//! - [`auto_canny`]: Canny edge extraction with thresholds derived from the
//!   median intensity of the (blurred) input, producing an [`EdgeMap`];
//! - [`hough_lines`]: a standard (rho, theta) Hough transform over an edge
//!   map, producing [`PolarLine`]s sorted by vote count.

mod edges;
mod hough;

pub use edges::{auto_canny, gaussian_blur_3x3, median_intensity, sobel_gradients, EdgeMap};
pub use hough::{hough_lines, HoughParams};

pub use boardscan_core::PolarLine;
