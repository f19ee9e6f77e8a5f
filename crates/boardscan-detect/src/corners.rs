use crate::BoardDetectError;
use log::debug;
use nalgebra::Point2;

fn nearest<F>(points: &[Point2<f32>], target: Point2<f32>, eligible: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        if !eligible(i) {
            continue;
        }
        let d = (p - target).norm_squared();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Select the four board corners from a clustered intersection set.
///
/// The spacing between adjacent grid crossings is estimated once at the
/// image center and assumed representative everywhere (uniform-grid
/// assumption). For each image corner, candidates are tried nearest-first;
/// a candidate is the board corner when its nearest neighbor sits at about
/// one grid spacing (`tolerance` relative). Rejected candidates are
/// spurious intersections and are never reconsidered; an accepted corner
/// stays available as a neighbor for later spacing checks but cannot be
/// assigned to a second corner slot.
///
/// Returns the corners in the order {top-left, bottom-left, bottom-right,
/// top-right}, matching image corners `(0,0), (0,H), (W,H), (W,0)`.
pub fn find_corners(
    points: &[Point2<f32>],
    width: f32,
    height: f32,
    tolerance: f32,
) -> Result<[Point2<f32>; 4], BoardDetectError> {
    let n = points.len();

    // Grid spacing estimate: the center-most point and its nearest neighbor.
    let center = Point2::new(width / 2.0, height / 2.0);
    let center_idx =
        nearest(points, center, |_| true).ok_or(BoardDetectError::CornerNotFound { corner: 0 })?;
    let adjacent_idx = nearest(points, points[center_idx], |i| i != center_idx)
        .ok_or(BoardDetectError::CornerNotFound { corner: 0 })?;
    let grid_dist = (points[adjacent_idx] - points[center_idx]).norm();
    debug!("estimated grid spacing: {grid_dist:.2} px from {n} points");

    let image_corners = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, height),
        Point2::new(width, height),
        Point2::new(width, 0.0),
    ];

    let lo = (1.0 - tolerance) * grid_dist;
    let hi = (1.0 + tolerance) * grid_dist;

    let mut discarded = vec![false; n];
    let mut assigned = vec![false; n];
    let mut corners = [Point2::new(0.0f32, 0.0); 4];

    for (slot, &target) in image_corners.iter().enumerate() {
        loop {
            let cand = nearest(points, target, |i| !discarded[i] && !assigned[i])
                .ok_or(BoardDetectError::CornerNotFound { corner: slot })?;

            // Assigned corners still count as neighbors; discarded noise
            // does not.
            let neighbor = nearest(points, points[cand], |i| i != cand && !discarded[i])
                .ok_or(BoardDetectError::CornerNotFound { corner: slot })?;
            let d = (points[neighbor] - points[cand]).norm();

            if d > lo && d < hi {
                assigned[cand] = true;
                corners[slot] = points[cand];
                debug!(
                    "corner {slot}: ({:.1}, {:.1}), neighbor spacing {d:.2}",
                    points[cand].x, points[cand].y
                );
                break;
            }
            discarded[cand] = true;
        }
    }

    Ok(corners)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 9x9 grid of intersections with the given spacing and offset.
    fn perfect_grid(offset: f32, spacing: f32) -> Vec<Point2<f32>> {
        let mut pts = Vec::new();
        for row in 0..9 {
            for col in 0..9 {
                pts.push(Point2::new(
                    offset + col as f32 * spacing,
                    offset + row as f32 * spacing,
                ));
            }
        }
        pts
    }

    #[test]
    fn perfect_grid_corners_in_canonical_order() {
        let pts = perfect_grid(50.0, 60.0);
        let corners = find_corners(&pts, 580.0, 580.0, 0.25).unwrap();

        let expect = [
            Point2::new(50.0, 50.0),
            Point2::new(50.0, 530.0),
            Point2::new(530.0, 530.0),
            Point2::new(530.0, 50.0),
        ];
        for (got, want) in corners.iter().zip(&expect) {
            assert!((got - want).norm() < 1e-4, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn spurious_cluster_near_a_corner_is_discarded() {
        let mut pts = perfect_grid(50.0, 60.0);
        // two noise points close together near the top-left image corner:
        // each has a nearest neighbor far from one grid spacing
        pts.push(Point2::new(5.0, 5.0));
        pts.push(Point2::new(25.0, 25.0));

        let corners = find_corners(&pts, 580.0, 580.0, 0.25).unwrap();
        assert!((corners[0] - Point2::new(50.0, 50.0)).norm() < 1e-4);
    }

    #[test]
    fn exhaustion_reports_the_failing_slot() {
        // Two mutually-consistent points can fill two slots, then nothing
        // remains to try for the third.
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)];
        let err = find_corners(&pts, 100.0, 100.0, 0.25).unwrap_err();
        assert_eq!(err, BoardDetectError::CornerNotFound { corner: 2 });
    }

    #[test]
    fn empty_point_set_fails() {
        let err = find_corners(&[], 100.0, 100.0, 0.25).unwrap_err();
        assert_eq!(err, BoardDetectError::CornerNotFound { corner: 0 });
    }

    #[test]
    fn each_point_fills_at_most_one_slot() {
        let pts = perfect_grid(50.0, 60.0);
        let corners = find_corners(&pts, 580.0, 580.0, 0.25).unwrap();
        for i in 0..4 {
            for j in i + 1..4 {
                assert!((corners[i] - corners[j]).norm() > 1.0);
            }
        }
    }
}
