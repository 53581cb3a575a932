use std::collections::VecDeque;

use eframe::egui;
use tracing::info;

use mandelscope_core::InputEvent;
use mandelscope_render::{
    FrameOrchestrator, FrameOutcome, FrameReport, LoopState, MonotonicClock,
};

use crate::input::map_event;
use crate::presenter::TexturePresenter;

pub(crate) const HUD_MARGIN: f32 = 8.0;
pub(crate) const HUD_CORNER_RADIUS: f32 = 6.0;

pub(crate) struct MandelscopeApp {
    pub(crate) orchestrator: FrameOrchestrator,
    clock: MonotonicClock,
    pending: VecDeque<InputEvent>,
    presenter: TexturePresenter,
    pub(crate) last_report: Option<FrameReport>,
    pub(crate) show_hud: bool,
}

impl MandelscopeApp {
    fn new(ctx: &egui::Context, orchestrator: FrameOrchestrator) -> Self {
        let grid = orchestrator.state().grid();
        let presenter = TexturePresenter::new(ctx, grid.width(), grid.height());
        Self {
            orchestrator,
            clock: MonotonicClock::new(),
            pending: VecDeque::new(),
            presenter,
            last_report: None,
            show_hud: true,
        }
    }

    /// Queue this frame's window events, in arrival order.
    fn collect_input(&mut self, ctx: &egui::Context) {
        ctx.input(|input| {
            for event in &input.events {
                if let Some(mapped) = map_event(event) {
                    self.pending.push_back(mapped);
                }
            }
            if input.viewport().close_requested() {
                self.pending.push_back(InputEvent::Quit);
            }
            if input.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }
        });
    }
}

impl eframe::App for MandelscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_input(ctx);

        match self
            .orchestrator
            .step(&mut self.pending, &self.clock, &mut self.presenter)
        {
            FrameOutcome::Presented(report) => self.last_report = Some(report),
            FrameOutcome::Skipped | FrameOutcome::Terminated => {}
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                if let Some(texture) = self.presenter.texture() {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter()
                        .image(texture.id(), rect, uv, egui::Color32::WHITE);
                }
            });

        self.show_hud(ctx);

        match self.orchestrator.loop_state() {
            LoopState::Running => ctx.request_repaint(),
            LoopState::Terminated => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(frames = self.orchestrator.frames(), "Shutting down");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Mandelscope");

    let config = crate::config::load();
    let orchestrator =
        FrameOrchestrator::new(&config).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let grid = orchestrator.state().grid();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Mandelscope")
            .with_inner_size([grid.width() as f32, grid.height() as f32]),
        ..Default::default()
    };

    eframe::run_native(
        "Mandelscope",
        options,
        Box::new(move |cc| Ok(Box::new(MandelscopeApp::new(&cc.egui_ctx, orchestrator)))),
    )
}
