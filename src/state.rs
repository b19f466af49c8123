use std::collections::BTreeSet;
use std::path::Path;

use crate::color::NeighborhoodColors;
use crate::data::clean::clean;
use crate::data::filter::{FilterSpec, NeighborhoodFilter};
use crate::data::loader::load_csv;
use crate::data::model::{Dataset, PRICE, YEAR_BUILT};
use crate::pipeline::{self, DashboardViews};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The base dataset is loaded and cleaned once; every control change
/// rebuilds a `FilterSpec` from the fields below and re-runs the whole
/// pipeline. Nothing else survives an interaction.
pub struct AppState {
    /// Cleaned dataset (None until the user loads a file).
    pub dataset: Option<Dataset>,

    /// Price slider bounds chosen by the user (inclusive).
    pub price_selection: (f64, f64),
    /// Price bounds of the cleaned dataset (slider limits).
    pub price_limits: (f64, f64),

    /// Construction-year bounds chosen by the user (inclusive).
    pub year_selection: (i64, i64),
    /// Year bounds of the cleaned dataset (slider limits).
    pub year_limits: (i64, i64),

    /// Checked neighborhoods; ignored while `all_neighborhoods` is on.
    pub selected_neighborhoods: BTreeSet<String>,
    /// "All" switch: when set, the neighborhood predicate is off.
    pub all_neighborhoods: bool,

    /// Marker colours for the sales map.
    pub neighborhood_colors: Option<NeighborhoodColors>,

    /// Views computed by the last render cycle.
    pub views: Option<DashboardViews>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            price_selection: (0.0, 0.0),
            price_limits: (0.0, 0.0),
            year_selection: (0, 0),
            year_limits: (0, 0),
            selected_neighborhoods: BTreeSet::new(),
            all_neighborhoods: true,
            neighborhood_colors: None,
            views: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load, clean, and ingest a dataset, resetting all controls to cover it.
    pub fn load_dataset(&mut self, path: &Path) {
        let loaded = load_csv(path).and_then(clean);
        match loaded {
            Ok(dataset) => {
                log::info!(
                    "loaded {} sales across {} neighborhoods from {}",
                    dataset.len(),
                    dataset.neighborhoods.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest an already cleaned dataset and run the first render cycle.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.price_limits = dataset.column_range(PRICE).unwrap_or((0.0, 0.0));
        self.price_selection = self.price_limits;

        self.year_limits = dataset
            .column_range(YEAR_BUILT)
            .map(|(lo, hi)| (lo as i64, hi as i64))
            .unwrap_or((0, 0));
        self.year_selection = self.year_limits;

        self.selected_neighborhoods = dataset.neighborhoods.clone();
        self.all_neighborhoods = true;
        self.neighborhood_colors = Some(NeighborhoodColors::new(&dataset.neighborhoods));

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// The FilterSpec the current controls describe.
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            price: self.price_selection,
            years: self.year_selection,
            neighborhoods: if self.all_neighborhoods {
                NeighborhoodFilter::All
            } else {
                NeighborhoodFilter::Only(self.selected_neighborhoods.clone())
            },
        }
    }

    /// Re-run the pipeline against the current controls.
    pub fn refresh(&mut self) {
        if let Some(ds) = &self.dataset {
            self.views = Some(pipeline::run(ds, &self.filter_spec()));
        }
    }

    /// Toggle one neighborhood checkbox.
    pub fn toggle_neighborhood(&mut self, name: &str) {
        if !self.selected_neighborhoods.remove(name) {
            self.selected_neighborhoods.insert(name.to_string());
        }
        self.refresh();
    }

    /// Check every neighborhood.
    pub fn select_all_neighborhoods(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected_neighborhoods = ds.neighborhoods.clone();
        }
        self.refresh();
    }

    /// Uncheck every neighborhood.
    pub fn select_no_neighborhoods(&mut self) {
        self.selected_neighborhoods.clear();
        self.refresh();
    }
}
