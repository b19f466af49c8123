use crate::data::model::{Dataset, PRICE};
use crate::error::DashError;

// ---------------------------------------------------------------------------
// One-shot dataset cleaning
// ---------------------------------------------------------------------------

/// Fraction of rows a column must have populated to survive cleaning.
const KEEP_THRESHOLD: f64 = 0.7;

/// Quantile of the price distribution above which rows are dropped.
const PRICE_QUANTILE: f64 = 0.99;

/// Clean a freshly loaded dataset.
///
/// Column pruning runs first, against the original row count: any column
/// with fewer than `0.7 × rows` populated cells is dropped. Then every row
/// whose price is missing or at/above the 99th percentile of the pruned
/// dataset's prices is removed. Deterministic.
pub fn clean(dataset: Dataset) -> Result<Dataset, DashError> {
    let row_count = dataset.len();
    let threshold = (KEEP_THRESHOLD * row_count as f64) as usize;

    let kept_columns: Vec<String> = dataset
        .columns
        .iter()
        .filter(|col| {
            let populated = dataset
                .rows
                .iter()
                .filter(|r| !r.get(col).is_missing())
                .count();
            populated >= threshold
        })
        .cloned()
        .collect();

    if !kept_columns.iter().any(|c| c == PRICE) {
        return Err(DashError::MissingColumn(PRICE.to_string()));
    }

    let mut rows = dataset.rows;
    for row in &mut rows {
        row.values.retain(|col, _| kept_columns.iter().any(|c| c == col));
    }

    let prices: Vec<f64> = rows.iter().filter_map(|r| r.price()).collect();
    let cutoff = quantile(&prices, PRICE_QUANTILE);

    let rows: Vec<_> = rows
        .into_iter()
        .filter(|r| match (r.price(), cutoff) {
            (Some(p), Some(q)) => p < q,
            _ => false,
        })
        .collect();

    Ok(Dataset::new(kept_columns, rows))
}

/// Linearly interpolated quantile (matches the usual dataframe default).
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64))
}
