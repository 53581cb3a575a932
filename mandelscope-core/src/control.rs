//! Translating user input into viewport and budget changes.
//!
//! Every rule here is applied once per event, in arrival order. Pan steps are
//! scaled by the current span (constant apparent speed at any zoom) and by the
//! frame's elapsed time (constant speed at any frame rate).

use tracing::warn;

use crate::complex::Complex;
use crate::escape::IterationBudget;
use crate::viewport::{is_valid_span, Viewport};

/// Span multiplier for one zoom-in step. Zooming out divides by the same value.
pub const ZOOM_FACTOR: f64 = 0.8;

/// Fraction of the span travelled per second of panning.
pub const PAN_RATE: f64 = 0.15;

/// An abstracted input event, produced by whatever owns the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Quit,
    ZoomIn,
    ZoomOut,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    IncreaseDepth,
    DecreaseDepth,
}

/// Whether the frame loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies input events to the viewport and iteration budget.
///
/// Borrows the state it mutates for the duration of one frame's input drain,
/// so the evaluation phase that follows always sees a settled viewport.
pub struct ViewportController<'a> {
    viewport: &'a mut Viewport,
    budget: &'a mut IterationBudget,
    delta_time: f64,
}

impl<'a> ViewportController<'a> {
    pub fn new(viewport: &'a mut Viewport, budget: &'a mut IterationBudget, delta_time: f64) -> Self {
        Self {
            viewport,
            budget,
            delta_time,
        }
    }

    /// Apply a single event.
    pub fn apply(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::ZoomIn => self.zoom(|span| span * ZOOM_FACTOR),
            InputEvent::ZoomOut => self.zoom(|span| span / ZOOM_FACTOR),
            InputEvent::PanUp => self.pan(0.0, -1.0),
            InputEvent::PanDown => self.pan(0.0, 1.0),
            InputEvent::PanLeft => self.pan(-1.0, 0.0),
            InputEvent::PanRight => self.pan(1.0, 0.0),
            InputEvent::IncreaseDepth => self.budget.increase(),
            InputEvent::DecreaseDepth => self.budget.decrease(),
        }
        Flow::Continue
    }

    /// Apply every event in order. Returns [`Flow::Quit`] if any of them was
    /// a quit; events after the quit are still applied.
    pub fn apply_all<I>(&mut self, events: I) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut flow = Flow::Continue;
        for event in events {
            if self.apply(event) == Flow::Quit {
                flow = Flow::Quit;
            }
        }
        flow
    }

    fn zoom(&mut self, step: impl Fn(f64) -> f64) {
        let span_re = step(self.viewport.span_re);
        let span_im = step(self.viewport.span_im);
        if !is_valid_span(span_re) || !is_valid_span(span_im) {
            warn!(span_re, span_im, "Zoom step rejected: span out of range");
            return;
        }
        self.viewport.span_re = span_re;
        self.viewport.span_im = span_im;
    }

    fn pan(&mut self, dir_re: f64, dir_im: f64) {
        let step = PAN_RATE * self.delta_time;
        let offset = Complex::new(
            dir_re * step * self.viewport.span_re,
            dir_im * step * self.viewport.span_im,
        );
        let center = self.viewport.center + offset;
        if !center.is_finite() {
            warn!(%center, "Pan step rejected: center not finite");
            return;
        }
        self.viewport.center = center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> (Viewport, IterationBudget) {
        (Viewport::default(), IterationBudget::default())
    }

    fn rel_eq(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn zoom_in_then_out_is_identity() {
        let (mut vp, mut budget) = state();
        let before = vp;
        let mut ctl = ViewportController::new(&mut vp, &mut budget, 0.016);
        ctl.apply(InputEvent::ZoomIn);
        ctl.apply(InputEvent::ZoomOut);
        assert!(rel_eq(vp.span_re, before.span_re));
        assert!(rel_eq(vp.span_im, before.span_im));
        assert_eq!(vp.center, before.center);
    }

    #[test]
    fn zoom_in_scales_both_spans() {
        let (mut vp, mut budget) = state();
        ViewportController::new(&mut vp, &mut budget, 0.0).apply(InputEvent::ZoomIn);
        assert!(rel_eq(vp.span_re, 3.5 * 0.8));
        assert!(rel_eq(vp.span_im, 2.0 * 0.8));
    }

    #[test]
    fn repeated_pans_accumulate() {
        let (mut vp, mut budget) = state();
        let (d, s, n) = (0.02, vp.span_re, 5);
        let start = vp.center.re;
        let applied = ViewportController::new(&mut vp, &mut budget, d)
            .apply_all(std::iter::repeat(InputEvent::PanRight).take(n));
        assert_eq!(applied, Flow::Continue);
        let expected = n as f64 * PAN_RATE * d * s;
        assert!((vp.center.re - start - expected).abs() < 1e-12);
        assert_eq!(vp.center.im, 0.0);
    }

    #[test]
    fn pan_directions() {
        let (mut vp, mut budget) = state();
        let mut ctl = ViewportController::new(&mut vp, &mut budget, 1.0);
        ctl.apply(InputEvent::PanUp);
        ctl.apply(InputEvent::PanLeft);
        // Up lowers the imaginary centre (pixel rows grow with imag), left lowers real.
        assert!((vp.center.im - (-PAN_RATE * 2.0)).abs() < 1e-12);
        assert!((vp.center.re - (-0.75 - PAN_RATE * 3.5)).abs() < 1e-12);

        let mut ctl = ViewportController::new(&mut vp, &mut budget, 1.0);
        ctl.apply(InputEvent::PanDown);
        ctl.apply(InputEvent::PanRight);
        assert!(vp.center.im.abs() < 1e-12);
        assert!((vp.center.re - (-0.75)).abs() < 1e-12);
    }

    #[test]
    fn pan_scales_with_span() {
        let (mut vp, mut budget) = state();
        let mut ctl = ViewportController::new(&mut vp, &mut budget, 0.5);
        ctl.apply(InputEvent::ZoomIn);
        ctl.apply(InputEvent::PanRight);
        let expected = -0.75 + PAN_RATE * 0.5 * 3.5 * ZOOM_FACTOR;
        assert!((vp.center.re - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_delta_time_does_not_pan() {
        let (mut vp, mut budget) = state();
        ViewportController::new(&mut vp, &mut budget, 0.0).apply(InputEvent::PanLeft);
        assert_eq!(vp.center, Viewport::default().center);
    }

    #[test]
    fn depth_events_are_not_batched() {
        let (mut vp, mut budget) = state();
        ViewportController::new(&mut vp, &mut budget, 0.0)
            .apply_all([InputEvent::IncreaseDepth, InputEvent::IncreaseDepth]);
        // 100 → 111 → 123
        assert_eq!(budget.get(), 123);
    }

    #[test]
    fn single_increase_from_default() {
        let (mut vp, mut budget) = state();
        ViewportController::new(&mut vp, &mut budget, 0.0).apply(InputEvent::IncreaseDepth);
        assert_eq!(budget.get(), 111);
    }

    #[test]
    fn quit_is_reported_but_later_events_still_apply() {
        let (mut vp, mut budget) = state();
        let flow = ViewportController::new(&mut vp, &mut budget, 0.0)
            .apply_all([InputEvent::Quit, InputEvent::DecreaseDepth]);
        assert_eq!(flow, Flow::Quit);
        assert_eq!(budget.get(), 91);
    }

    #[test]
    fn zoom_never_collapses_span() {
        let (mut vp, mut budget) = state();
        let mut ctl = ViewportController::new(&mut vp, &mut budget, 0.0);
        for _ in 0..5000 {
            ctl.apply(InputEvent::ZoomIn);
        }
        assert!(vp.span_re > 0.0 && vp.span_im > 0.0);
        assert!(vp.validate().is_ok());
    }

    #[test]
    fn zoom_out_stays_finite() {
        let (mut vp, mut budget) = state();
        let mut ctl = ViewportController::new(&mut vp, &mut budget, 0.0);
        for _ in 0..5000 {
            ctl.apply(InputEvent::ZoomOut);
        }
        assert!(vp.span_re.is_finite() && vp.span_im.is_finite());
    }
}
