use rayon::prelude::*;
use tracing::warn;

use crate::buffer::RenderBuffer;
use crate::grid::PixelGrid;

const LUT_SIZE: usize = 256;

/// Color used for points that never escaped.
const INTERIOR: [u8; 4] = [0, 0, 0, 255];

/// The fixed gradient used to display escape fractions.
///
/// Fractions below 1.0 walk the gradient from its first stop to its last,
/// so a larger fraction always lands further along it. A fraction of exactly
/// 1.0 (no escape) is black. Non-finite values are treated as interior.
#[derive(Clone)]
pub struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Palette {
    /// Map a single escape fraction to an RGBA color.
    pub fn color(&self, fraction: f64) -> [u8; 4] {
        if !fraction.is_finite() || fraction >= 1.0 {
            return INTERIOR;
        }
        // Most escape fractions sit close to zero; the square root spreads
        // them across the gradient without breaking monotonicity.
        let t = fraction.max(0.0).sqrt() * (self.colors.len() - 1) as f64;
        self.sample(t)
    }

    /// Color every cell of `grid` into `out`, which must have the same size.
    ///
    /// A buffer of any other size is left untouched.
    pub fn colorize_into(&self, grid: &PixelGrid, out: &mut RenderBuffer) {
        if (grid.width(), grid.height()) != (out.width, out.height) {
            warn!(
                grid_width = grid.width(),
                grid_height = grid.height(),
                buffer_width = out.width,
                buffer_height = out.height,
                "Render buffer size does not match the grid"
            );
            return;
        }
        let stride = grid.width() as usize * 4;
        out.pixels
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                    pixel.copy_from_slice(&self.color(grid.get(x as u32, y as u32)));
                }
            });
    }

    /// Color `grid` into a freshly allocated buffer.
    pub fn colorize(&self, grid: &PixelGrid) -> RenderBuffer {
        let mut out = RenderBuffer::new(grid.width(), grid.height());
        self.colorize_into(grid, &mut out);
        out
    }

    fn sample(&self, t: f64) -> [u8; 4] {
        let last = self.colors.len() - 1;
        let lo = (t.floor() as usize).min(last);
        let hi = (lo + 1).min(last);
        let frac = (t - lo as f64).clamp(0.0, 1.0);
        lerp_color(self.colors[lo], self.colors[hi], frac)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: gradient_lut(&[
                (0.0, [0, 7, 100]),
                (0.16, [32, 107, 203]),
                (0.42, [237, 255, 255]),
                (0.6425, [255, 170, 0]),
                (1.0, [120, 20, 0]),
            ]),
        }
    }
}

fn lerp_color(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    let inv = 1.0 - t;
    [
        (a[0] as f64 * inv + b[0] as f64 * t) as u8,
        (a[1] as f64 * inv + b[1] as f64 * t) as u8,
        (a[2] as f64 * inv + b[2] as f64 * t) as u8,
        255,
    ]
}

/// Build a gradient LUT by interpolating between color stops.
fn gradient_lut(stops: &[(f64, [u8; 3])]) -> Vec<[u8; 4]> {
    (0..LUT_SIZE)
        .map(|i| {
            let t = i as f64 / (LUT_SIZE - 1) as f64;
            let mut lo = 0;
            for (j, &(pos, _)) in stops.iter().enumerate() {
                if pos <= t {
                    lo = j;
                }
            }
            let hi = (lo + 1).min(stops.len() - 1);
            let (lo_t, lo_c) = stops[lo];
            let (hi_t, hi_c) = stops[hi];
            let frac = if (hi_t - lo_t).abs() < 1e-10 {
                0.0
            } else {
                ((t - lo_t) / (hi_t - lo_t)).clamp(0.0, 1.0)
            };
            let inv = 1.0 - frac;
            [
                (lo_c[0] as f64 * inv + hi_c[0] as f64 * frac) as u8,
                (lo_c[1] as f64 * inv + hi_c[1] as f64 * frac) as u8,
                (lo_c[2] as f64 * inv + hi_c[2] as f64 * frac) as u8,
                255,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_is_black() {
        let p = Palette::default();
        assert_eq!(p.color(1.0), INTERIOR);
        assert_eq!(p.color(f64::NAN), INTERIOR);
    }

    #[test]
    fn endpoints_follow_the_gradient() {
        let p = Palette::default();
        assert_eq!(p.color(0.0), [0, 7, 100, 255]);
        assert_ne!(p.color(0.999_999), INTERIOR);
    }

    #[test]
    fn distinct_fractions_give_distinct_colors() {
        let p = Palette::default();
        assert_ne!(p.color(0.01), p.color(0.5));
        assert_ne!(p.color(0.5), p.color(1.0));
    }

    #[test]
    fn colorize_transposes_to_row_major() {
        let mut grid = PixelGrid::new(3, 2).unwrap();
        for (x, column) in grid.columns_mut() {
            column.fill(if x == 2 { 1.0 } else { 0.0 });
        }
        let buf = Palette::default().colorize(&grid);
        assert_eq!(buf.pixels.len(), 3 * 2 * 4);
        assert_eq!(buf.pixel(2, 0), INTERIOR);
        assert_eq!(buf.pixel(2, 1), INTERIOR);
        assert_eq!(buf.pixel(0, 1), [0, 7, 100, 255]);
    }

    #[test]
    fn mismatched_buffer_is_left_alone() {
        let mut grid = PixelGrid::new(4, 3).unwrap();
        for (_, column) in grid.columns_mut() {
            column.fill(0.5);
        }
        for (w, h) in [(3, 4), (4, 2), (5, 3)] {
            let mut out = RenderBuffer::new(w, h);
            let before = out.pixels.clone();
            Palette::default().colorize_into(&grid, &mut out);
            assert_eq!(out.pixels, before);
        }
    }
}
