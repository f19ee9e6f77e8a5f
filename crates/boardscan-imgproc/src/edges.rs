use boardscan_core::{GrayImage, GrayImageView};
use log::debug;

/// Binary edge map produced by [`auto_canny`]. Edge pixels are 255.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl EdgeMap {
    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] != 0
    }

    /// Number of edge pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Fraction of pixels that are edges, in `[0, 1]`.
    pub fn density(&self) -> f32 {
        self.count() as f32 / (self.width * self.height) as f32
    }
}

#[inline]
fn clamped(src: &GrayImageView<'_>, x: i32, y: i32) -> f32 {
    let xi = x.clamp(0, src.width as i32 - 1) as usize;
    let yi = y.clamp(0, src.height as i32 - 1) as usize;
    src.data[yi * src.width + xi] as f32
}

/// 3x3 Gaussian smoothing (kernel 1-2-1 / 16), replicated border.
pub fn gaussian_blur_3x3(src: &GrayImageView<'_>) -> GrayImage {
    let mut out = GrayImage::new(src.width, src.height);
    for y in 0..src.height as i32 {
        for x in 0..src.width as i32 {
            let mut acc = 0.0f32;
            for (dy, wy) in [(-1, 1.0f32), (0, 2.0), (1, 1.0)] {
                for (dx, wx) in [(-1, 1.0f32), (0, 2.0), (1, 1.0)] {
                    acc += wx * wy * clamped(src, x + dx, y + dy);
                }
            }
            out.set_pixel(x as usize, y as usize, (acc / 16.0).round() as u8);
        }
    }
    out
}

/// Median pixel intensity, via a 256-bin histogram.
pub fn median_intensity(src: &GrayImageView<'_>) -> u8 {
    let mut hist = [0usize; 256];
    for &v in src.data {
        hist[v as usize] += 1;
    }
    let half = src.data.len() / 2;
    let mut seen = 0usize;
    for (v, &n) in hist.iter().enumerate() {
        seen += n;
        if seen > half {
            return v as u8;
        }
    }
    255
}

/// Sobel gradient magnitude and direction (radians) per pixel.
pub fn sobel_gradients(src: &GrayImageView<'_>) -> (Vec<f32>, Vec<f32>) {
    let w = src.width;
    let h = src.height;
    let mut magnitude = vec![0.0f32; w * h];
    let mut direction = vec![0.0f32; w * h];

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let p = |dx: i32, dy: i32| clamped(src, x as i32 + dx, y as i32 + dy);

            let gx = -p(-1, -1) + p(1, -1) - 2.0 * p(-1, 0) + 2.0 * p(1, 0) - p(-1, 1) + p(1, 1);
            let gy = -p(-1, -1) - 2.0 * p(0, -1) - p(1, -1) + p(-1, 1) + 2.0 * p(0, 1) + p(1, 1);

            let idx = y * w + x;
            magnitude[idx] = (gx * gx + gy * gy).sqrt();
            direction[idx] = gy.atan2(gx);
        }
    }

    (magnitude, direction)
}

// Thin edges to the local gradient maximum along the gradient direction,
// quantized to 4 sectors.
fn non_max_suppression(w: usize, h: usize, mag: &[f32], dir: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0f32; w * h];
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let m = mag[idx];
            if m <= 0.0 {
                continue;
            }

            let mut angle = dir[idx].to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            let (a, b) = if !(22.5..157.5).contains(&angle) {
                (mag[idx - 1], mag[idx + 1])
            } else if angle < 67.5 {
                (mag[idx - w + 1], mag[idx + w - 1])
            } else if angle < 112.5 {
                (mag[idx - w], mag[idx + w])
            } else {
                (mag[idx - w - 1], mag[idx + w + 1])
            };

            if m >= a && m >= b {
                out[idx] = m;
            }
        }
    }
    out
}

// Double threshold plus hysteresis: strong pixels seed, weak pixels join
// when 8-connected to an accepted pixel.
fn hysteresis(w: usize, h: usize, nms: &[f32], low: f32, high: f32) -> Vec<u8> {
    let mut out = vec![0u8; w * h];
    let mut stack = Vec::new();

    for (idx, &m) in nms.iter().enumerate() {
        // `high` can legally be 0 (dark frames); suppressed pixels stay out
        if m > 0.0 && m >= high {
            out[idx] = 255;
            stack.push(idx);
        }
    }

    while let Some(idx) = stack.pop() {
        let x = (idx % w) as i32;
        let y = (idx / w) as i32;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if out[nidx] == 0 && nms[nidx] > low {
                    out[nidx] = 255;
                    stack.push(nidx);
                }
            }
        }
    }

    out
}

/// Canny edge detection with automatic thresholds.
///
/// Thresholds derive from the median intensity `v` of the blurred input:
/// `lower = (1 - sigma) * v` and `upper = (1 + sigma) * v`, both clamped to
/// `[0, 255]`.
pub fn auto_canny(src: &GrayImageView<'_>, sigma: f32) -> EdgeMap {
    let blurred = gaussian_blur_3x3(src);
    let view = blurred.as_view();

    let v = median_intensity(&view) as f32;
    let lower = ((1.0 - sigma) * v).clamp(0.0, 255.0);
    let upper = ((1.0 + sigma) * v).clamp(0.0, 255.0).max(lower);
    debug!("auto-canny: median={v}, thresholds=[{lower}, {upper}]");

    let (mag, dir) = sobel_gradients(&view);
    let nms = non_max_suppression(src.width, src.height, &mag, &dir);
    let data = hysteresis(src.width, src.height, &nms, lower, upper);

    EdgeMap {
        width: src.width,
        height: src.height,
        data,
    }
}
