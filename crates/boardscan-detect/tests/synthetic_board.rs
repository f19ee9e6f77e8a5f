//! End-to-end detection on a synthetically rendered, perspective-skewed
//! chessboard with known ground-truth corners.

use boardscan_core::{homography_from_4pt, GrayImage, Homography, PolarLine};
use boardscan_detect::{BoardDetector, BoardDetectorParams, EdgeMap, HoughParams};
use nalgebra::Point2;
use std::f32::consts::PI;

const FLAT_SIDE: f32 = 480.0; // 8 cells of 60 px in the flat board frame
const IMG_W: usize = 620;
const IMG_H: usize = 620;

/// Ground-truth board corners in the photo, ordered
/// {top-left, bottom-left, bottom-right, top-right}.
fn ground_truth_corners() -> [Point2<f32>; 4] {
    [
        Point2::new(50.0, 60.0),
        Point2::new(50.0, 560.0),
        Point2::new(560.0, 560.0),
        Point2::new(560.0, 50.0),
    ]
}

/// Homography from the flat board frame to the photo.
fn board_to_image() -> Homography {
    let flat = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, FLAT_SIDE),
        Point2::new(FLAT_SIDE, FLAT_SIDE),
        Point2::new(FLAT_SIDE, 0.0),
    ];
    homography_from_4pt(&flat, &ground_truth_corners()).expect("non-degenerate ground truth")
}

/// Distinct marker intensity for each of the 64 cells.
fn cell_marker(row: usize, col: usize) -> u8 {
    (40 + (row * 8 + col) * 2) as u8
}

/// Render the skewed photo: every pixel inside the warped board carries its
/// cell's marker value, everything else stays black.
fn render_photo(h: &Homography) -> GrayImage {
    let img_to_board = h.inverse().expect("invertible");
    let mut img = GrayImage::new(IMG_W, IMG_H);
    for y in 0..IMG_H {
        for x in 0..IMG_W {
            let p = img_to_board.apply(Point2::new(x as f32, y as f32));
            if p.x >= 0.0 && p.x < FLAT_SIDE && p.y >= 0.0 && p.y < FLAT_SIDE {
                let col = (p.x / 60.0) as usize;
                let row = (p.y / 60.0) as usize;
                img.set_pixel(x, y, cell_marker(row.min(7), col.min(7)));
            }
        }
    }
    img
}

/// Polar form of the image-space line through two points.
fn polar_through(a: Point2<f32>, b: Point2<f32>) -> PolarLine {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let norm = (dx * dx + dy * dy).sqrt();
    let (mut nx, mut ny) = (-dy / norm, dx / norm);
    let mut theta = ny.atan2(nx);
    if theta < 0.0 {
        theta += PI;
        nx = -nx;
        ny = -ny;
    }
    PolarLine::new(a.x * nx + a.y * ny, theta)
}

/// The 9 + 9 grid lines of the board, mapped into the photo.
fn grid_lines(h: &Homography) -> Vec<PolarLine> {
    let mut lines = Vec::new();
    for k in 0..=8 {
        let c = k as f32 * 60.0;
        // vertical grid line x = c in the flat frame
        lines.push(polar_through(
            h.apply(Point2::new(c, 0.0)),
            h.apply(Point2::new(c, FLAT_SIDE)),
        ));
        // horizontal grid line y = c
        lines.push(polar_through(
            h.apply(Point2::new(0.0, c)),
            h.apply(Point2::new(FLAT_SIDE, c)),
        ));
    }
    lines
}

/// Rasterize the board-internal grid segments into an edge map.
fn grid_edge_map(h: &Homography) -> EdgeMap {
    let mut data = vec![0u8; IMG_W * IMG_H];
    let mut mark = |p: Point2<f32>| {
        let x = p.x.round() as isize;
        let y = p.y.round() as isize;
        if x >= 0 && y >= 0 && (x as usize) < IMG_W && (y as usize) < IMG_H {
            data[y as usize * IMG_W + x as usize] = 255;
        }
    };
    let steps = 900;
    for k in 0..=8 {
        let c = k as f32 * 60.0;
        for s in 0..=steps {
            let t = s as f32 / steps as f32 * FLAT_SIDE;
            mark(h.apply(Point2::new(c, t)));
            mark(h.apply(Point2::new(t, c)));
        }
    }
    EdgeMap {
        width: IMG_W,
        height: IMG_H,
        data,
    }
}

fn assert_corners_close(got: &[Point2<f32>; 4], tol: f32) {
    for (g, want) in got.iter().zip(&ground_truth_corners()) {
        let d = (g - want).norm();
        assert!(d <= tol, "corner {g:?} is {d:.2} px from {want:?}");
    }
}

fn assert_cells_carry_their_markers(cells: &[boardscan_detect::BoardCell]) {
    assert_eq!(cells.len(), 64);
    for cell in cells {
        let cx = cell.image.width / 2;
        let cy = cell.image.height / 2;
        let got = cell.image.pixel(cx, cy) as i32;
        let want = cell_marker(cell.row, cell.col) as i32;
        assert!(
            (got - want).abs() <= 2,
            "cell ({}, {}): got {got}, want {want}",
            cell.row,
            cell.col
        );
    }
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn detects_the_skewed_board_from_exact_lines() {
    init_logs();
    let h = board_to_image();
    let photo = render_photo(&h);
    let lines = grid_lines(&h);

    let params = BoardDetectorParams {
        board_side: 480,
        ..BoardDetectorParams::default()
    };
    let detection = BoardDetector::new(params)
        .detect_from_lines(&photo.as_view(), &lines)
        .expect("board detected");

    assert_corners_close(&detection.corners, 1.0);
    assert_eq!(detection.rectified.width, 480);
    assert_cells_carry_their_markers(&detection.cells);
}

#[test]
fn detects_the_skewed_board_from_an_edge_map() {
    init_logs();
    let h = board_to_image();
    let photo = render_photo(&h);
    let edges = grid_edge_map(&h);

    // the clean grid must pass the density gate with room to spare
    assert!(edges.density() < 0.035);

    let params = BoardDetectorParams {
        board_side: 480,
        hough: HoughParams {
            vote_threshold: 80,
            ..HoughParams::default()
        },
        ..BoardDetectorParams::default()
    };
    let detection = BoardDetector::new(params)
        .detect_from_edges(&photo.as_view(), &edges)
        .expect("board detected");

    assert_corners_close(&detection.corners, 5.0);
    assert_cells_carry_their_markers(&detection.cells);
}

#[test]
fn all_noise_never_reaches_line_detection() {
    let photo = GrayImage::new(64, 64);
    let data: Vec<u8> = (0..64 * 64)
        .map(|i| if i % 2 == 0 { 255 } else { 0 })
        .collect();
    let edges = EdgeMap {
        width: 64,
        height: 64,
        data,
    };

    let detector = BoardDetector::new(BoardDetectorParams::default());
    let err = detector
        .detect_from_edges(&photo.as_view(), &edges)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "too many edges (density 0.5000 > 0.0350)"
    );
}
