use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HouseDashApp {
    pub state: AppState,
}

impl HouseDashApp {
    /// Start the app, optionally preloading a dataset path given on the
    /// command line.
    pub fn new(initial_path: Option<std::path::PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = initial_path {
            state.load_dataset(&path);
        }
        Self { state }
    }
}

impl eframe::App for HouseDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}
