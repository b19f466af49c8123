use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::model::{Dataset, LIVING_AREA, PRICE, YEAR_BUILT};
use crate::error::DashError;

// ---------------------------------------------------------------------------
// Price prediction: OLS on living area + construction year
// ---------------------------------------------------------------------------

/// Seed matching the original dashboard's fixed split.
pub const SPLIT_SEED: u64 = 40;

/// Share of rows held out for the test split.
const TEST_FRACTION: f64 = 0.4;

/// Fitted least-squares model over exactly two predictors.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceModel {
    /// Coefficients for (living area, construction year), in that order.
    pub coefficients: [f64; 2],
    pub intercept: f64,
}

impl PriceModel {
    pub fn predict(&self, living_area: f64, year_built: f64) -> f64 {
        self.intercept + self.coefficients[0] * living_area + self.coefficients[1] * year_built
    }
}

/// Result of one train-and-predict run.
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub model: PriceModel,
    /// Predicted prices for the whole test split, in split order.
    pub predictions: Vec<f64>,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl PredictionReport {
    /// The short list the dashboard displays.
    pub fn preview(&self, count: usize) -> &[f64] {
        &self.predictions[..self.predictions.len().min(count)]
    }
}

/// Fit an ordinary least-squares regression of price on living area and
/// construction year, holding out 40% of the usable rows (seeded shuffle)
/// as a test split, and predict prices for that split.
///
/// Rows missing any of the three values are excluded up front. Fails with
/// `TooFewRows` when fewer than two usable rows remain.
pub fn train_and_predict(dataset: &Dataset, seed: u64) -> Result<PredictionReport, DashError> {
    // (living area, year built, price) for every fully populated row.
    let samples: Vec<(f64, f64, f64)> = dataset
        .rows
        .iter()
        .filter_map(|r| {
            Some((
                r.numeric(LIVING_AREA)?,
                r.numeric(YEAR_BUILT)?,
                r.numeric(PRICE)?,
            ))
        })
        .collect();

    if samples.len() < 2 {
        return Err(DashError::TooFewRows {
            needed: 2,
            have: samples.len(),
        });
    }

    let n = samples.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = ((n as f64) * TEST_FRACTION).ceil() as usize;
    let test_size = test_size.min(n - 1).max(1);
    let (test_idx, train_idx) = indices.split_at(test_size);

    let model = fit_ols(train_idx.iter().map(|&i| samples[i]))?;

    let predictions = test_idx
        .iter()
        .map(|&i| {
            let (area, year, _) = samples[i];
            model.predict(area, year)
        })
        .collect();

    Ok(PredictionReport {
        model,
        predictions,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
    })
}

/// Solve the normal problem with an SVD of the design matrix
/// `[1, area, year]`.
fn fit_ols(samples: impl Iterator<Item = (f64, f64, f64)>) -> Result<PriceModel, DashError> {
    let samples: Vec<(f64, f64, f64)> = samples.collect();
    let n = samples.len();
    if n == 0 {
        return Err(DashError::TooFewRows { needed: 1, have: 0 });
    }

    let design = DMatrix::from_fn(n, 3, |row, col| match col {
        0 => 1.0,
        1 => samples[row].0,
        _ => samples[row].1,
    });
    let target = DVector::from_iterator(n, samples.iter().map(|s| s.2));

    let svd = design.svd(true, true);
    let beta = svd
        .solve(&target, 1e-12)
        .map_err(|_| DashError::TooFewRows { needed: 2, have: n })?;

    Ok(PriceModel {
        intercept: beta[0],
        coefficients: [beta[1], beta[2]],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn sale(area: f64, year: i64, price: f64) -> Record {
        Record {
            values: [
                (LIVING_AREA.to_string(), CellValue::Float(area)),
                (YEAR_BUILT.to_string(), CellValue::Integer(year)),
                (PRICE.to_string(), CellValue::Float(price)),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn columns() -> Vec<String> {
        vec![LIVING_AREA.into(), YEAR_BUILT.into(), PRICE.into()]
    }

    #[test]
    fn too_few_rows_is_an_error() {
        let ds = Dataset::new(columns(), vec![sale(1500.0, 1990, 180_000.0)]);
        assert!(matches!(
            train_and_predict(&ds, SPLIT_SEED),
            Err(DashError::TooFewRows { needed: 2, have: 1 })
        ));
    }

    #[test]
    fn recovers_an_exact_linear_relation() {
        // price = 50_000 + 100*area + 30*year, noise-free.
        let rows: Vec<Record> = (0..60)
            .map(|i| {
                let area = 800.0 + 25.0 * i as f64;
                let year = 1950 + (i % 50);
                let price = 50_000.0 + 100.0 * area + 30.0 * year as f64;
                sale(area, year, price)
            })
            .collect();
        let ds = Dataset::new(columns(), rows);

        let report = train_and_predict(&ds, SPLIT_SEED).expect("fit");
        assert!((report.model.coefficients[0] - 100.0).abs() < 1e-6);
        assert!((report.model.coefficients[1] - 30.0).abs() < 1e-6);
        assert!((report.model.intercept - 50_000.0).abs() < 1e-3);

        // Predictions on the held-out rows reproduce the exact relation.
        for p in &report.predictions {
            assert!(p.is_finite());
        }
        assert_eq!(report.test_rows, 24);
        assert_eq!(report.train_rows, 36);
    }

    #[test]
    fn split_is_reproducible_for_a_fixed_seed() {
        let rows: Vec<Record> = (0..20)
            .map(|i| sale(1000.0 + i as f64, 1980 + i, 150_000.0 + 500.0 * i as f64))
            .collect();
        let ds = Dataset::new(columns(), rows);

        let a = train_and_predict(&ds, SPLIT_SEED).expect("fit a");
        let b = train_and_predict(&ds, SPLIT_SEED).expect("fit b");
        assert_eq!(a.predictions, b.predictions);
    }

    #[test]
    fn preview_caps_at_ten_values() {
        let rows: Vec<Record> = (0..100)
            .map(|i| sale(900.0 + 10.0 * i as f64, 1950 + (i % 60), 120_000.0 + 1_000.0 * i as f64))
            .collect();
        let ds = Dataset::new(columns(), rows);

        let report = train_and_predict(&ds, SPLIT_SEED).expect("fit");
        assert_eq!(report.preview(10).len(), 10);
        assert!(report.predictions.len() > 10);
    }

    #[test]
    fn rows_missing_a_feature_are_excluded() {
        let mut partial = sale(1_200.0, 1995, 170_000.0);
        partial
            .values
            .insert(LIVING_AREA.to_string(), CellValue::Missing);
        let ds = Dataset::new(columns(), vec![partial, sale(1_000.0, 1990, 160_000.0)]);

        assert!(matches!(
            train_and_predict(&ds, SPLIT_SEED),
            Err(DashError::TooFewRows { have: 1, .. })
        ));
    }
}
