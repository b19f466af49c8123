mod analysis;
mod app;
mod color;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use app::HouseDashApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let initial_path = std::env::args().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "House Dash – Real-Estate Sales",
        options,
        Box::new(move |_cc| Ok(Box::new(HouseDashApp::new(initial_path)))),
    )
}
