use crate::EdgeMap;
use boardscan_core::PolarLine;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Hough transform parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HoughParams {
    /// Distance resolution of the accumulator, in pixels.
    pub rho_res: f32,
    /// Number of angle bins over `[0, pi)`.
    pub theta_bins: usize,
    /// Minimal number of votes for a valid line.
    pub vote_threshold: u32,
    /// Peak suppression half-window along rho, in bins.
    pub nms_rho_window: usize,
    /// Peak suppression half-window along theta, in bins.
    pub nms_theta_window: usize,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho_res: 1.0,
            theta_bins: 180,
            vote_threshold: 200,
            nms_rho_window: 10,
            nms_theta_window: 5,
        }
    }
}

struct Accumulator {
    data: Vec<u32>,
    rho_bins: usize,
    theta_bins: usize,
    rho_res: f32,
    max_rho: f32,
    cos_table: Vec<f32>,
    sin_table: Vec<f32>,
}

impl Accumulator {
    fn new(width: usize, height: usize, params: &HoughParams) -> Self {
        let max_rho = ((width * width + height * height) as f32).sqrt();
        let rho_bins = (2.0 * max_rho / params.rho_res).ceil() as usize + 1;
        let theta_bins = params.theta_bins;

        let mut cos_table = Vec::with_capacity(theta_bins);
        let mut sin_table = Vec::with_capacity(theta_bins);
        for t in 0..theta_bins {
            let theta = t as f32 * PI / theta_bins as f32;
            cos_table.push(theta.cos());
            sin_table.push(theta.sin());
        }

        Self {
            data: vec![0u32; rho_bins * theta_bins],
            rho_bins,
            theta_bins,
            rho_res: params.rho_res,
            max_rho,
            cos_table,
            sin_table,
        }
    }

    #[inline]
    fn rho_to_index(&self, rho: f32) -> usize {
        let idx = ((rho + self.max_rho) / self.rho_res).round() as isize;
        idx.clamp(0, self.rho_bins as isize - 1) as usize
    }

    #[inline]
    fn index_to_rho(&self, index: usize) -> f32 {
        index as f32 * self.rho_res - self.max_rho
    }

    fn vote(&mut self, x: f32, y: f32) {
        for t in 0..self.theta_bins {
            let rho = x * self.cos_table[t] + y * self.sin_table[t];
            let r = self.rho_to_index(rho);
            self.data[t * self.rho_bins + r] += 1;
        }
    }

    #[inline]
    fn votes(&self, rho_idx: usize, theta_idx: usize) -> u32 {
        self.data[theta_idx * self.rho_bins + rho_idx]
    }
}

// rho/theta distance between two accumulator cells, with theta wraparound:
// (rho, theta + pi) describes the same line as (-rho, theta).
fn cells_close(
    acc: &Accumulator,
    a: (usize, usize),
    b: (usize, usize),
    rho_win: usize,
    theta_win: usize,
) -> bool {
    let (ra, ta) = a;
    let (rb, tb) = b;

    let dt_direct = ta.abs_diff(tb);
    if dt_direct <= theta_win && ra.abs_diff(rb) <= rho_win {
        return true;
    }

    let dt_wrapped = acc.theta_bins - dt_direct;
    if dt_wrapped <= theta_win {
        let rb_flipped = acc.rho_to_index(-acc.index_to_rho(rb));
        if ra.abs_diff(rb_flipped) <= rho_win {
            return true;
        }
    }
    false
}

/// Detect lines in an edge map via the standard Hough transform.
///
/// Returns peaks with at least `vote_threshold` votes, strongest first,
/// after local-maximum suppression in the accumulator.
pub fn hough_lines(edges: &EdgeMap, params: &HoughParams) -> Vec<PolarLine> {
    let mut acc = Accumulator::new(edges.width, edges.height, params);

    for y in 0..edges.height {
        for x in 0..edges.width {
            if edges.is_edge(x, y) {
                acc.vote(x as f32, y as f32);
            }
        }
    }

    // Candidate peaks, strongest first.
    let mut candidates: Vec<(u32, usize, usize)> = Vec::new();
    for t in 0..acc.theta_bins {
        for r in 0..acc.rho_bins {
            let v = acc.votes(r, t);
            if v >= params.vote_threshold {
                candidates.push((v, r, t));
            }
        }
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut kept: Vec<(usize, usize)> = Vec::new();
    let mut lines = Vec::new();
    for (_votes, r, t) in candidates {
        if kept.iter().any(|&cell| {
            cells_close(
                &acc,
                cell,
                (r, t),
                params.nms_rho_window,
                params.nms_theta_window,
            )
        }) {
            continue;
        }
        kept.push((r, t));
        lines.push(PolarLine::new(
            acc.index_to_rho(r),
            t as f32 * PI / acc.theta_bins as f32,
        ));
    }

    debug!(
        "hough: {} edge pixels -> {} candidate cells -> {} lines",
        edges.count(),
        kept.len(),
        lines.len()
    );
    lines
}
