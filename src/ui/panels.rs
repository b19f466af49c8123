use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let neighborhoods: Vec<String> = dataset.neighborhoods.iter().cloned().collect();
    let (price_lo, price_hi) = state.price_limits;
    let (year_lo, year_hi) = state.year_limits;

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Price range ----
            ui.strong("Price range");
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.price_selection.0, price_lo..=price_hi)
                        .text("min"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.price_selection.1, price_lo..=price_hi)
                        .text("max"),
                )
                .changed();
            if state.price_selection.0 > state.price_selection.1 {
                state.price_selection.1 = state.price_selection.0;
            }
            ui.separator();

            // ---- Construction year range ----
            ui.strong("Construction year");
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.year_selection.0, year_lo..=year_hi)
                        .text("from"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.year_selection.1, year_lo..=year_hi)
                        .text("to"),
                )
                .changed();
            if state.year_selection.0 > state.year_selection.1 {
                state.year_selection.1 = state.year_selection.0;
            }
            ui.separator();

            // ---- Neighborhood selection ----
            let n_selected = state.selected_neighborhoods.len();
            let n_total = neighborhoods.len();
            let header = if state.all_neighborhoods {
                format!("Neighborhoods  (all of {n_total})")
            } else {
                format!("Neighborhoods  ({n_selected}/{n_total})")
            };

            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("neighborhoods")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    changed |= ui
                        .checkbox(&mut state.all_neighborhoods, "All neighborhoods")
                        .changed();

                    ui.add_enabled_ui(!state.all_neighborhoods, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all_neighborhoods();
                            }
                            if ui.small_button("None").clicked() {
                                state.select_no_neighborhoods();
                            }
                        });

                        for name in &neighborhoods {
                            let mut checked = state.selected_neighborhoods.contains(name);
                            if ui.checkbox(&mut checked, name).changed() {
                                state.toggle_neighborhood(name);
                            }
                        }
                    });
                });

            ui.separator();
            if ui.button("🔄 Refresh").clicked() {
                changed = true;
            }
        });

    // Re-run the pipeline once per changed interaction.
    if changed {
        state.refresh();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let matching = state
                .views
                .as_ref()
                .map(|v| v.filtered.len())
                .unwrap_or(0);
            ui.label(format!("🏡 {} sales loaded, {matching} matching", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_dataset(&path);
    }
}
