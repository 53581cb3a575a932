use eframe::egui;

use mandelscope_core::Viewport;

use crate::app::{MandelscopeApp, HUD_CORNER_RADIUS, HUD_MARGIN};

impl MandelscopeApp {
    pub(crate) fn show_hud(&self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }

        let state = self.orchestrator.state();
        egui::Area::new(egui::Id::new("hud_view"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, HUD_MARGIN])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(165))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));

                        let vp = state.viewport;
                        ui.label(format!(
                            "Center: {:.10} {:+.10}i",
                            vp.center.re, vp.center.im
                        ));
                        ui.label(format!("Span: {:.3e} × {:.3e}", vp.span_re, vp.span_im));
                        ui.label(bounds_label(&vp));
                        ui.label(format!("Iterations: {}", state.budget.get()));
                        if let Some(report) = self.last_report {
                            ui.label(format!(
                                "Frame {}: {:.1} ms",
                                report.frame,
                                report.elapsed.as_secs_f64() * 1000.0
                            ));
                        }
                        ui.weak("WASD pan · wheel zoom · ↑/↓ depth · H hide");
                    });
            });
    }
}

/// The region of the plane on screen, from the top-left pixel's corner to
/// the opposite one.
fn bounds_label(vp: &Viewport) -> String {
    let (min, max) = (vp.min_corner(), vp.max_corner());
    format!(
        "Bounds: [{:.6}, {:.6}] × [{:.6}, {:.6}]",
        min.re, max.re, min.im, max.im
    )
}
