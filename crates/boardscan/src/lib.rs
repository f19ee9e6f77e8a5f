//! High-level facade crate for the `boardscan-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - (feature-gated) end-to-end helpers running the full pipeline on an
//!   `image::GrayImage` or a raw grayscale buffer
//! - the downstream classifier contracts (cell occupancy, piece identity)
//!   and board-notation encoding
//!
//! ## Quickstart
//!
//! ```no_run
//! use boardscan::detect;
//! use boardscan::BoardDetectorParams;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("game.png")?.decode()?.to_luma8();
//! let result = detect::find_board(&img, BoardDetectorParams::default())?;
//! println!("corners: {:?}", result.corners);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `boardscan::core`: gray images, polar lines, homographies.
//! - `boardscan::imgproc`: auto-Canny and the Hough transform.
//! - `boardscan::board`: the line-to-corner detection pipeline.
//! - `boardscan::detect` (feature `image`): end-to-end helpers from
//!   `image::GrayImage`.
//! - [`classify`] / [`notation`]: classifier contracts and FEN encoding.

pub use boardscan_core as core;
pub use boardscan_detect as board;
pub use boardscan_imgproc as imgproc;

pub use boardscan_detect::{
    BoardCell, BoardDetectError, BoardDetection, BoardDetector, BoardDetectorParams,
};

pub mod classify;
pub mod notation;

#[cfg(feature = "image")]
pub mod detect;

pub use classify::{Color, Occupancy, OccupancyClassifier, Piece, PieceClassifier, PieceKind};
pub use notation::BoardGrid;
