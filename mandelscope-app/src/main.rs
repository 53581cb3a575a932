mod app;
mod config;
mod hud;
mod input;
mod presenter;

fn main() -> eframe::Result {
    app::run()
}
