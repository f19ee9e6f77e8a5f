use boardscan_core::PolarLine;
use nalgebra::Point2;
use std::f32::consts::{FRAC_PI_4, PI};

/// Split lines into (horizontal, vertical) groups by angle.
///
/// In polar form a vertical line has `theta` near 0 or near pi, a
/// horizontal one near pi/2. A line is vertical when `theta < pi/4` or
/// `theta > 3*pi/4`; everything else is horizontal.
pub fn split_horizontal_vertical(lines: &[PolarLine]) -> (Vec<PolarLine>, Vec<PolarLine>) {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    for &line in lines {
        if line.theta < FRAC_PI_4 || line.theta > PI - FRAC_PI_4 {
            vertical.push(line);
        } else {
            horizontal.push(line);
        }
    }
    (horizontal, vertical)
}

/// Intersection points of every (horizontal, vertical) pair.
///
/// Near-parallel pairs are skipped; duplicates from near-coincident lines
/// are expected and left for the clustering stage.
pub fn intersections(horizontal: &[PolarLine], vertical: &[PolarLine]) -> Vec<Point2<f32>> {
    let mut points = Vec::with_capacity(horizontal.len() * vertical.len());
    for h in horizontal {
        for v in vertical {
            if let Some(p) = h.intersect(v) {
                points.push(p);
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn angle_split_property() {
        let near_zero = PolarLine::new(10.0, 0.1);
        let near_pi = PolarLine::new(10.0, PI - 0.1);
        let near_half_pi = PolarLine::new(10.0, FRAC_PI_2);
        let below_boundary = PolarLine::new(10.0, FRAC_PI_4 - 1e-4);
        let at_boundary = PolarLine::new(10.0, FRAC_PI_4);

        let (h, v) = split_horizontal_vertical(&[
            near_zero,
            near_pi,
            near_half_pi,
            below_boundary,
            at_boundary,
        ]);
        assert_eq!(v, vec![near_zero, near_pi, below_boundary]);
        assert_eq!(h, vec![near_half_pi, at_boundary]);
    }

    #[test]
    fn empty_input_gives_empty_groups() {
        let (h, v) = split_horizontal_vertical(&[]);
        assert!(h.is_empty());
        assert!(v.is_empty());
    }

    #[test]
    fn analytic_intersection() {
        // y = 100 crossed with x = 50
        let h = vec![PolarLine::new(100.0, FRAC_PI_2)];
        let v = vec![PolarLine::new(50.0, 0.0)];
        let pts = intersections(&h, &v);
        assert_eq!(pts.len(), 1);
        assert!((pts[0].x - 50.0).abs() < 1e-6);
        assert!((pts[0].y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn product_set_size() {
        let h: Vec<_> = (0..3)
            .map(|i| PolarLine::new(100.0 + 60.0 * i as f32, FRAC_PI_2))
            .collect();
        let v: Vec<_> = (0..4)
            .map(|i| PolarLine::new(50.0 + 60.0 * i as f32, 0.0))
            .collect();
        assert_eq!(intersections(&h, &v).len(), 12);
    }
}
