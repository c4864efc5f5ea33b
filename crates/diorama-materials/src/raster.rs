//! Stroke and fill primitives on [`PixelBuffer`].
//!
//! Coverage is binary: a pixel is painted when its centre lies inside the
//! shape. Each shape composites every covered pixel exactly once, so a
//! translucent polyline does not darken at its joints.

use crate::pixel::{Paint, PixelBuffer};

/// Half-open pixel range `[start, end)` covering `[lo, hi]`, clipped to `[0, limit)`.
fn pixel_span(lo: f32, hi: f32, limit: u32) -> Option<(u32, u32)> {
    let start = lo.floor().max(0.0);
    let end = (hi.ceil() + 1.0).min(limit as f32);
    if start >= end {
        return None;
    }
    Some((start as u32, end as u32))
}

/// Distance from `p` to the segment `a`-`b`.
fn distance_to_segment(p: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    let (abx, aby) = (b[0] - a[0], b[1] - a[1]);
    let (apx, apy) = (p[0] - a[0], p[1] - a[1]);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (apx - abx * t, apy - aby * t);
    (dx * dx + dy * dy).sqrt()
}

impl PixelBuffer {
    /// Overwrite every pixel with `paint`.
    pub fn fill(&mut self, paint: Paint) {
        let rgb = paint.rgb.map(f32::from);
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.put(x, y, rgb, paint.alpha);
            }
        }
    }

    /// Composite an axis-aligned `w * h` block whose top-left pixel is `(x, y)`.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, paint: Paint) {
        let x_end = x.saturating_add(w).min(self.width());
        let y_end = y.saturating_add(h).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.blend(px, py, paint);
            }
        }
    }

    /// Stroke the outline of a circle: every pixel whose centre is within
    /// `width / 2` of the circumference.
    pub fn stroke_circle(&mut self, center: [f32; 2], radius: f32, width: f32, paint: Paint) {
        let half = width * 0.5;
        let reach = radius + half;
        let Some((x0, x1)) = pixel_span(center[0] - reach, center[0] + reach, self.width()) else {
            return;
        };
        let Some((y0, y1)) = pixel_span(center[1] - reach, center[1] + reach, self.height()) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center[0];
                let dy = y as f32 + 0.5 - center[1];
                let d = (dx * dx + dy * dy).sqrt();
                if (d - radius).abs() <= half {
                    self.blend(x, y, paint);
                }
            }
        }
    }

    /// Stroke a single line segment with round caps.
    pub fn stroke_segment(&mut self, from: [f32; 2], to: [f32; 2], width: f32, paint: Paint) {
        self.stroke_polyline(&[from, to], width, paint);
    }

    /// Stroke connected segments through `points` with round joins and caps.
    ///
    /// Fewer than two points draws nothing.
    pub fn stroke_polyline(&mut self, points: &[[f32; 2]], width: f32, paint: Paint) {
        if points.len() < 2 {
            return;
        }
        let half = width * 0.5;

        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p[0]);
            min_y = min_y.min(p[1]);
            max_x = max_x.max(p[0]);
            max_y = max_y.max(p[1]);
        }
        let Some((x0, x1)) = pixel_span(min_x - half, max_x + half, self.width()) else {
            return;
        };
        let Some((y0, y1)) = pixel_span(min_y - half, max_y + half, self.height()) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let p = [x as f32 + 0.5, y as f32 + 0.5];
                let covered = points
                    .windows(2)
                    .any(|seg| distance_to_segment(p, seg[0], seg[1]) <= half);
                if covered {
                    self.blend(x, y, paint);
                }
            }
        }
    }
}
