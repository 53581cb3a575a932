use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// The visible rectangle of the complex plane.
///
/// The rectangle is centred on `center` and extends `span_re` along the real
/// axis and `span_im` along the imaginary axis. Pixel `(0, 0)` maps to the
/// corner with the smallest real and imaginary parts; both axes grow with
/// the pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Centre of the viewport in the complex plane.
    pub center: Complex,

    /// Width of the viewport in complex-plane units.
    pub span_re: f64,

    /// Height of the viewport in complex-plane units.
    pub span_im: f64,
}

impl Viewport {
    pub const DEFAULT_CENTER: Complex = Complex { re: -0.75, im: 0.0 };
    pub const DEFAULT_SPAN_RE: f64 = 3.5;
    pub const DEFAULT_SPAN_IM: f64 = 2.0;

    /// Create a viewport, rejecting non-finite centres and non-positive spans.
    pub fn new(center: Complex, span_re: f64, span_im: f64) -> crate::Result<Self> {
        let viewport = Self {
            center,
            span_re,
            span_im,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Check the viewport invariants.
    ///
    /// Needed for values that bypass [`Viewport::new`], e.g. deserialized
    /// configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.center.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("center must be finite, got {}", self.center),
            });
        }
        if !is_valid_span(self.span_re) || !is_valid_span(self.span_im) {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "spans must be positive and finite, got {}×{}",
                    self.span_re, self.span_im
                ),
            });
        }
        Ok(())
    }

    /// Map a pixel of a `width`×`height` grid to a point on the complex plane.
    ///
    /// Affine per axis: `re = x/width · span_re + center.re − span_re/2`,
    /// and likewise for the imaginary part with `y` and `height`.
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32, width: u32, height: u32) -> Complex {
        let x_per = px as f64 / width as f64;
        let y_per = py as f64 / height as f64;
        Complex::new(
            x_per * self.span_re + self.center.re - self.span_re / 2.0,
            y_per * self.span_im + self.center.im - self.span_im / 2.0,
        )
    }

    /// The corner mapped by pixel `(0, 0)`.
    pub fn min_corner(&self) -> Complex {
        self.center - Complex::new(self.span_re / 2.0, self.span_im / 2.0)
    }

    /// The corner approached by pixel `(width, height)`.
    pub fn max_corner(&self) -> Complex {
        self.center + Complex::new(self.span_re / 2.0, self.span_im / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Self::DEFAULT_CENTER,
            span_re: Self::DEFAULT_SPAN_RE,
            span_im: Self::DEFAULT_SPAN_IM,
        }
    }
}

#[inline]
pub(crate) fn is_valid_span(span: f64) -> bool {
    span > 0.0 && span.is_finite()
}
