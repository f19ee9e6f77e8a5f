use crate::BoardDetectError;
use boardscan_core::{homography_from_4pt, warp_perspective_gray, GrayImage, GrayImageView};
use nalgebra::Point2;

// Twice the signed area of the corner quadrilateral (shoelace). Near zero
// means the corners are collinear and no homography exists.
fn doubled_quad_area(c: &[Point2<f32>; 4]) -> f32 {
    let mut s = 0.0;
    for i in 0..4 {
        let a = c[i];
        let b = c[(i + 1) % 4];
        s += a.x * b.y - b.x * a.y;
    }
    s
}

/// Warp the board spanned by `corners` onto an axis-aligned `side x side`
/// square.
///
/// `corners` must be ordered {top-left, bottom-left, bottom-right,
/// top-right}; they map to `(0,0), (0,S), (S,S), (S,0)` respectively.
/// Output pixels are sampled through the inverse mapping with bilinear
/// interpolation.
pub fn rectify_board(
    src: &GrayImageView<'_>,
    corners: &[Point2<f32>; 4],
    side: usize,
) -> Result<GrayImage, BoardDetectError> {
    // degeneracy scale: the corner bounding box, not the output size
    let (mut min_x, mut max_x) = (f32::MAX, f32::MIN);
    let (mut min_y, mut max_y) = (f32::MAX, f32::MIN);
    for c in corners {
        min_x = min_x.min(c.x);
        max_x = max_x.max(c.x);
        min_y = min_y.min(c.y);
        max_y = max_y.max(c.y);
    }
    let bbox_area = (max_x - min_x) * (max_y - min_y);
    if doubled_quad_area(corners).abs() <= 1e-6 * bbox_area.max(1.0) {
        return Err(BoardDetectError::DegenerateGeometry);
    }

    let s = side as f32;

    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, s),
        Point2::new(s, s),
        Point2::new(s, 0.0),
    ];

    let h_img_from_rect =
        homography_from_4pt(&square, corners).ok_or(BoardDetectError::DegenerateGeometry)?;

    Ok(warp_perspective_gray(src, h_img_from_rect, side, side))
}
