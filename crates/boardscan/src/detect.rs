//! End-to-end helpers from `image` buffers.

use crate::core;
use boardscan_detect::{BoardDetection, BoardDetector, BoardDetectorParams};

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Board(#[from] boardscan_detect::BoardDetectError),
}

/// Convert an `image::GrayImage` into the lightweight `boardscan-core` view
/// type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert an owned core gray buffer back to an `image::GrayImage`, e.g.
/// for saving the rectified board or a cell to disk.
pub fn to_image(img: &core::GrayImage) -> ::image::GrayImage {
    ::image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .expect("width*height matches the buffer by construction")
}

/// Run the board detection pipeline end-to-end on a grayscale photo.
pub fn find_board(
    img: &::image::GrayImage,
    params: BoardDetectorParams,
) -> Result<BoardDetection, DetectError> {
    let detector = BoardDetector::new(params);
    Ok(detector.detect(&gray_view(img))?)
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidGrayDimensions { width, height })
}

/// Convenience overload of [`find_board`] for raw grayscale buffers.
pub fn find_board_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: BoardDetectorParams,
) -> Result<BoardDetection, DetectError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    find_board(&img, params)
}
