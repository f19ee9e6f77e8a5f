//! Core types and utilities for chessboard detection.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete edge detector or image-file format.

mod homography;
mod image;
mod line;
mod logger;

pub use homography::{homography_from_4pt, warp_perspective_gray, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use line::PolarLine;
pub use logger::init_with_level;
