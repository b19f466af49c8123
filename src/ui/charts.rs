use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::analysis::aggregate::{CorrelationMatrix, Histogram};
use crate::analysis::geo::GeoView;
use crate::color::diverging;
use crate::pipeline::DashboardViews;
use crate::state::AppState;

/// Rows shown in the dataset preview table.
const PREVIEW_ROWS: usize = 5;

/// Predicted prices shown under the regression section.
const PREDICTION_PREVIEW: usize = 10;

// ---------------------------------------------------------------------------
// Central panel – all charts
// ---------------------------------------------------------------------------

/// Render the dashboard column: preview, histogram, bar chart, heatmap,
/// map, predictions. Each section degrades on its own when its data is
/// missing or empty.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a sales CSV to explore it  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            preview_section(ui, views);
            ui.separator();
            histogram_section(ui, views.price_histogram.as_ref());
            ui.separator();
            sales_per_year_section(ui, &views.sales_per_year);
            ui.separator();
            correlation_section(ui, &views.correlations);
            ui.separator();
            geo_section(ui, state, &views.geo);
            ui.separator();
            prediction_section(ui, views);
        });
}

// ---------------------------------------------------------------------------
// Dataset preview
// ---------------------------------------------------------------------------

fn preview_section(ui: &mut Ui, views: &DashboardViews) {
    ui.heading("Matching sales");
    ui.label(format!("{} properties match the current filters", views.filtered.len()));

    if views.filtered.is_empty() {
        ui.label(RichText::new("No sales match – widen the filters.").italics());
        return;
    }

    let columns = &views.filtered.columns;
    let rows = &views.filtered.rows[..views.filtered.len().min(PREVIEW_ROWS)];

    ScrollArea::horizontal()
        .id_salt("preview_table")
        .show(ui, |ui: &mut Ui| {
            egui_extras::TableBuilder::new(ui)
                .striped(true)
                .columns(egui_extras::Column::auto().at_least(60.0), columns.len())
                .header(20.0, |mut header| {
                    for col in columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|mut body| {
                    for record in rows {
                        body.row(18.0, |mut table_row| {
                            for col in columns {
                                table_row.col(|ui| {
                                    ui.label(record.get(col).to_string());
                                });
                            }
                        });
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Price distribution
// ---------------------------------------------------------------------------

fn histogram_section(ui: &mut Ui, histogram: Option<&Histogram>) {
    ui.heading("Price distribution");

    let Some(hist) = histogram else {
        ui.label(RichText::new("No prices to plot for the current filters.").italics());
        return;
    };

    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|bin| {
            Bar::new((bin.lo + bin.hi) / 2.0, bin.count as f64).width(bin.hi - bin.lo)
        })
        .collect();

    Plot::new("price_histogram")
        .height(220.0)
        .x_axis_label("Sale price")
        .y_axis_label("Sales")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Sales per construction year
// ---------------------------------------------------------------------------

fn sales_per_year_section(ui: &mut Ui, counts: &[(i64, usize)]) {
    ui.heading("Sales per construction year");

    if counts.is_empty() {
        ui.label(RichText::new("No construction years in the current view.").italics());
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .map(|&(year, count)| Bar::new(year as f64, count as f64).width(0.8))
        .collect();

    Plot::new("sales_per_year")
        .height(220.0)
        .x_axis_label("Construction year")
        .y_axis_label("Sales")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_GREEN));
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn correlation_section(ui: &mut Ui, matrix: &CorrelationMatrix) {
    ui.heading("Feature correlations");

    if matrix.is_empty() {
        ui.label(RichText::new("No numeric columns to correlate.").italics());
        return;
    }

    let n = matrix.labels.len();
    let cell = 46.0_f32;
    let label_width = 110.0_f32;
    let header_height = 18.0_f32;

    ScrollArea::horizontal()
        .id_salt("correlation_heatmap")
        .show(ui, |ui: &mut Ui| {
            let size = egui::vec2(
                label_width + n as f32 * cell,
                header_height + n as f32 * cell,
            );
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            let painter = ui.painter_at(rect);
            let font = egui::FontId::proportional(10.0);
            let text_color = ui.visuals().text_color();

            for (j, label) in matrix.labels.iter().enumerate() {
                painter.text(
                    egui::pos2(
                        rect.left() + label_width + (j as f32 + 0.5) * cell,
                        rect.top() + header_height / 2.0,
                    ),
                    egui::Align2::CENTER_CENTER,
                    truncate(label, 9),
                    font.clone(),
                    text_color,
                );
            }

            for (i, label) in matrix.labels.iter().enumerate() {
                let y = rect.top() + header_height + (i as f32 + 0.5) * cell;
                painter.text(
                    egui::pos2(rect.left() + label_width - 6.0, y),
                    egui::Align2::RIGHT_CENTER,
                    truncate(label, 16),
                    font.clone(),
                    text_color,
                );

                for j in 0..n {
                    let value = matrix.values[i][j];
                    let cell_rect = egui::Rect::from_min_size(
                        egui::pos2(
                            rect.left() + label_width + j as f32 * cell,
                            rect.top() + header_height + i as f32 * cell,
                        ),
                        egui::vec2(cell, cell),
                    )
                    .shrink(1.0);

                    painter.rect_filled(cell_rect, 2, diverging(value));
                    let text = if value.is_nan() {
                        "–".to_string()
                    } else {
                        format!("{value:.2}")
                    };
                    painter.text(
                        cell_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        text,
                        font.clone(),
                        Color32::BLACK,
                    );
                }
            }
        });
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let head: String = label.chars().take(max - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Sales map
// ---------------------------------------------------------------------------

fn geo_section(ui: &mut Ui, state: &AppState, geo: &GeoView) {
    ui.heading("Sales map");

    let GeoView::Map { center, markers } = geo else {
        ui.label(
            RichText::new("⚠ Latitude/Longitude columns are absent from the dataset.")
                .color(Color32::YELLOW),
        );
        return;
    };

    // Nearest-marker lookup for the hover label.
    let marker_labels: Vec<(f64, f64, String)> = markers
        .iter()
        .map(|m| (m.lon, m.lat, m.label.clone()))
        .collect();

    ui.label(format!(
        "{} located sales, centered on ({:.4}, {:.4})",
        markers.len(),
        center.0,
        center.1
    ));

    Plot::new("sales_map")
        .height(320.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .label_formatter(move |_name, point| {
            marker_labels
                .iter()
                .map(|(x, y, label)| {
                    let d = (x - point.x).powi(2) + (y - point.y).powi(2);
                    (d, label)
                })
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            // One Points series per neighborhood so the legend stays short.
            let mut by_neighborhood: std::collections::BTreeMap<String, Vec<[f64; 2]>> =
                std::collections::BTreeMap::new();
            for m in markers {
                let key = m
                    .neighborhood
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string());
                by_neighborhood.entry(key).or_default().push([m.lon, m.lat]);
            }

            for (name, coords) in by_neighborhood {
                let color = state
                    .neighborhood_colors
                    .as_ref()
                    .map(|c| c.color_for(Some(name.as_str())))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let points: PlotPoints = coords.into();
                plot_ui.points(Points::new(points).name(name).color(color).radius(3.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Price predictions
// ---------------------------------------------------------------------------

fn prediction_section(ui: &mut Ui, views: &DashboardViews) {
    ui.heading("Price predictions");
    ui.label("Linear regression of price on living area and construction year.");

    match &views.predictions {
        Ok(report) => {
            ui.label(format!(
                "Trained on {} sales, predicting {} held-out sales. First {}:",
                report.train_rows,
                report.test_rows,
                report.preview(PREDICTION_PREVIEW).len()
            ));
            for (i, value) in report.preview(PREDICTION_PREVIEW).iter().enumerate() {
                ui.monospace(format!("{:>2}. {value:>12.2}", i + 1));
            }
        }
        Err(e) => {
            ui.label(RichText::new(format!("⚠ {e}")).color(Color32::YELLOW));
        }
    }
}
