use crate::{
    cluster_points, find_corners, intersections, rectify_board, split_board,
    split_horizontal_vertical, BoardCell, BoardDetectError, BoardDetectorParams,
};
use boardscan_core::{GrayImage, GrayImageView, PolarLine};
use boardscan_imgproc::{auto_canny, hough_lines, EdgeMap};
use log::{debug, info};
use nalgebra::Point2;

/// A successfully located board.
#[derive(Clone, Debug)]
pub struct BoardDetection {
    /// Board corners in image-pixel space, ordered {top-left, bottom-left,
    /// bottom-right, top-right}.
    pub corners: [Point2<f32>; 4],
    /// The board warped onto an axis-aligned square.
    pub rectified: GrayImage,
    /// The 64 cells of the rectified board, row-major from the top-left.
    pub cells: Vec<BoardCell>,
}

/// Gated line-to-corner detection pipeline.
pub struct BoardDetector {
    params: BoardDetectorParams,
}

impl BoardDetector {
    pub fn new(params: BoardDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &BoardDetectorParams {
        &self.params
    }

    /// Full pipeline: edge extraction, line detection, then
    /// [`Self::detect_from_lines`].
    pub fn detect(&self, image: &GrayImageView<'_>) -> Result<BoardDetection, BoardDetectError> {
        let edges = auto_canny(image, self.params.canny_sigma);
        self.detect_from_edges(image, &edges)
    }

    /// Pipeline from a precomputed edge map: density gate, Hough, then
    /// [`Self::detect_from_lines`].
    pub fn detect_from_edges(
        &self,
        image: &GrayImageView<'_>,
        edges: &EdgeMap,
    ) -> Result<BoardDetection, BoardDetectError> {
        let density = edges.density();
        debug!("edge density: {density:.4}");
        if density > self.params.max_edge_density {
            return Err(BoardDetectError::TooManyEdges {
                density,
                limit: self.params.max_edge_density,
            });
        }

        let lines = hough_lines(edges, &self.params.hough);
        info!("hough found {} lines", lines.len());
        self.detect_from_lines(image, &lines)
    }

    /// Pipeline from already-detected polar lines. Useful when lines come
    /// from another detector, and for testing the geometric stages in
    /// isolation.
    pub fn detect_from_lines(
        &self,
        image: &GrayImageView<'_>,
        lines: &[PolarLine],
    ) -> Result<BoardDetection, BoardDetectError> {
        let (horizontal, vertical) = split_horizontal_vertical(lines);
        let required = self.params.min_lines_per_axis;
        if horizontal.len() < required || vertical.len() < required {
            return Err(BoardDetectError::TooFewLines {
                horizontal: horizontal.len(),
                vertical: vertical.len(),
                required,
            });
        }

        let raw_points = intersections(&horizontal, &vertical);
        let points = cluster_points(&raw_points, self.params.cluster_max_dist);
        info!(
            "{} horizontal x {} vertical lines -> {} intersections -> {} clustered points",
            horizontal.len(),
            vertical.len(),
            raw_points.len(),
            points.len()
        );

        let corners = find_corners(
            &points,
            image.width as f32,
            image.height as f32,
            self.params.corner_tolerance,
        )?;
        info!(
            "board corners: ({:.1},{:.1}) ({:.1},{:.1}) ({:.1},{:.1}) ({:.1},{:.1})",
            corners[0].x,
            corners[0].y,
            corners[1].x,
            corners[1].y,
            corners[2].x,
            corners[2].y,
            corners[3].x,
            corners[3].y
        );

        let rectified = rectify_board(image, &corners, self.params.board_side)?;
        let cells = split_board(&rectified);

        Ok(BoardDetection {
            corners,
            rectified,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn grid_lines(count: usize, offset: f32, spacing: f32) -> Vec<PolarLine> {
        let mut lines = Vec::new();
        for i in 0..count {
            let rho = offset + i as f32 * spacing;
            lines.push(PolarLine::new(rho, 0.0)); // vertical
            lines.push(PolarLine::new(rho, FRAC_PI_2)); // horizontal
        }
        lines
    }

    #[test]
    fn too_few_lines_is_rejected() {
        let img = GrayImage::new(100, 100);
        let detector = BoardDetector::new(BoardDetectorParams::default());
        let lines = grid_lines(5, 10.0, 10.0);
        let err = detector
            .detect_from_lines(&img.as_view(), &lines)
            .unwrap_err();
        assert_eq!(
            err,
            BoardDetectError::TooFewLines {
                horizontal: 5,
                vertical: 5,
                required: 9,
            }
        );
    }

    #[test]
    fn axis_aligned_grid_detects_with_exact_corners() {
        let img = GrayImage::new(580, 580);
        let params = BoardDetectorParams {
            board_side: 160,
            ..BoardDetectorParams::default()
        };
        let detector = BoardDetector::new(params);

        let lines = grid_lines(9, 50.0, 60.0);
        let det = detector
            .detect_from_lines(&img.as_view(), &lines)
            .expect("board");

        let expect = [
            Point2::new(50.0, 50.0),
            Point2::new(50.0, 530.0),
            Point2::new(530.0, 530.0),
            Point2::new(530.0, 50.0),
        ];
        for (got, want) in det.corners.iter().zip(&expect) {
            assert!((got - want).norm() < 1e-3, "got {got:?}, want {want:?}");
        }
        assert_eq!(det.rectified.width, 160);
        assert_eq!(det.cells.len(), 64);
    }

    #[test]
    fn noisy_edge_map_hits_the_density_gate() {
        // every second pixel is an edge: density 0.5
        let img = GrayImage::new(64, 64);
        let data: Vec<u8> = (0..64 * 64).map(|i| if i % 2 == 0 { 255 } else { 0 }).collect();
        let edges = EdgeMap {
            width: 64,
            height: 64,
            data,
        };
        let detector = BoardDetector::new(BoardDetectorParams::default());
        match detector.detect_from_edges(&img.as_view(), &edges) {
            Err(BoardDetectError::TooManyEdges { density, limit }) => {
                assert!((density - 0.5).abs() < 1e-6);
                assert!(density > limit);
            }
            other => panic!("expected the edge-density gate, got {other:?}"),
        }
    }

    #[test]
    fn blank_frame_fails_at_the_line_gate() {
        let img = GrayImage::new(64, 64);
        let detector = BoardDetector::new(BoardDetectorParams::default());
        assert!(matches!(
            detector.detect(&img.as_view()),
            Err(BoardDetectError::TooFewLines { .. })
        ));
    }
}
