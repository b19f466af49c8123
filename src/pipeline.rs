use crate::analysis::aggregate::{
    correlation_matrix, price_histogram, sales_per_year, CorrelationMatrix, Histogram,
};
use crate::analysis::geo::{geo_view, GeoView};
use crate::analysis::regression::{train_and_predict, PredictionReport, SPLIT_SEED};
use crate::data::filter::{self, FilterSpec};
use crate::data::model::Dataset;
use crate::error::DashError;

// ---------------------------------------------------------------------------
// One render cycle
// ---------------------------------------------------------------------------

/// Bins in the price distribution histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Everything one interaction produces. Each field degrades on its own:
/// an empty filter result gives `None`/empty views, and a failed fit only
/// blanks the prediction panel.
#[derive(Debug)]
pub struct DashboardViews {
    pub filtered: Dataset,
    pub price_histogram: Option<Histogram>,
    pub sales_per_year: Vec<(i64, usize)>,
    pub correlations: CorrelationMatrix,
    pub geo: GeoView,
    pub predictions: Result<PredictionReport, DashError>,
}

/// Run the whole pipeline against the cleaned base dataset and the
/// current filter constraints. Pure and synchronous; called once per
/// interaction, with no state carried between calls.
pub fn run(dataset: &Dataset, spec: &FilterSpec) -> DashboardViews {
    let filtered = filter::apply(dataset, spec);
    log::debug!(
        "render cycle: {} of {} sales match the current filters",
        filtered.len(),
        dataset.len()
    );

    let price_histogram = price_histogram(&filtered, HISTOGRAM_BINS);
    let sales_per_year = sales_per_year(&filtered);
    let correlations = correlation_matrix(&filtered);
    let geo = geo_view(&filtered);
    let predictions = train_and_predict(&filtered, SPLIT_SEED);

    DashboardViews {
        filtered,
        price_histogram,
        sales_per_year,
        correlations,
        geo,
        predictions,
    }
}
