use std::collections::BTreeMap;

use crate::data::model::{Dataset, PRICE};

// ---------------------------------------------------------------------------
// Sales per construction year
// ---------------------------------------------------------------------------

/// Count sales grouped by construction year, ascending. Rows without a
/// usable year are skipped.
pub fn sales_per_year(dataset: &Dataset) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for row in &dataset.rows {
        if let Some(year) = row.year() {
            *counts.entry(year).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Price histogram
// ---------------------------------------------------------------------------

/// One equal-width histogram bin over `[lo, hi)` (the last bin is closed).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// Bin the filtered prices into `bin_count` equal-width bins. Returns
/// `None` when the view holds no prices, so an empty filter result
/// degrades to a placeholder instead of a chart.
pub fn price_histogram(dataset: &Dataset, bin_count: usize) -> Option<Histogram> {
    let prices = dataset.numeric_column(PRICE);
    if prices.is_empty() || bin_count == 0 {
        return None;
    }

    let (min, max) = dataset.column_range(PRICE)?;
    let width = if max > min {
        (max - min) / bin_count as f64
    } else {
        1.0
    };

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for p in prices {
        let idx = (((p - min) / width) as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    Some(Histogram { bins })
}

// ---------------------------------------------------------------------------
// Pearson correlation matrix
// ---------------------------------------------------------------------------

/// Symmetric correlation matrix over the dataset's numeric columns.
/// `values[i][j]` is NaN where either column has no variance over the
/// rows both columns populate.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Pairwise Pearson correlation over all numeric columns, using for each
/// pair only the rows where both cells are present.
pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
    let labels = dataset.numeric_columns();
    let columns: Vec<Vec<Option<f64>>> = labels
        .iter()
        .map(|col| dataset.rows.iter().map(|r| r.numeric(col)).collect())
        .collect();

    let n = labels.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { labels, values }
}

fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.is_empty() {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    let den = (den_x * den_y).sqrt();
    if den == 0.0 {
        f64::NAN
    } else {
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record, YEAR_BUILT};

    fn row(pairs: &[(&str, CellValue)]) -> Record {
        Record {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn with_years(years: &[i64]) -> Dataset {
        Dataset::new(
            vec![YEAR_BUILT.into()],
            years
                .iter()
                .map(|&y| row(&[(YEAR_BUILT, CellValue::Integer(y))]))
                .collect(),
        )
    }

    #[test]
    fn sales_per_year_is_ascending_with_full_coverage() {
        let ds = with_years(&[2003, 1995, 2003, 1961, 1995, 2003]);
        let counts = sales_per_year(&ds);

        assert_eq!(counts, vec![(1961, 1), (1995, 2), (2003, 3)]);
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, ds.len());
        assert!(counts.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn histogram_covers_every_price_once() {
        let prices = [100.0, 150.0, 200.0, 250.0, 300.0];
        let ds = Dataset::new(
            vec![PRICE.into()],
            prices
                .iter()
                .map(|&p| row(&[(PRICE, CellValue::Float(p))]))
                .collect(),
        );

        let hist = price_histogram(&ds, 4).expect("histogram");
        assert_eq!(hist.bins.len(), 4);
        let total: usize = hist.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, prices.len());
        // The maximum lands in the last (closed) bin.
        assert!(hist.bins.last().expect("bins").count >= 1);
    }

    #[test]
    fn histogram_of_an_empty_view_is_none() {
        let ds = Dataset::new(vec![PRICE.into()], Vec::new());
        assert!(price_histogram(&ds, 30).is_none());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            (0..10)
                .map(|i| {
                    row(&[
                        ("a", CellValue::Float(i as f64)),
                        ("b", CellValue::Float(20.0 - 2.0 * i as f64)),
                    ])
                })
                .collect(),
        );

        let m = correlation_matrix(&ds);
        assert_eq!(m.labels, vec!["a".to_string(), "b".to_string()]);
        for i in 0..2 {
            assert!((m.values[i][i] - 1.0).abs() < 1e-12);
        }
        assert!((m.values[0][1] - m.values[1][0]).abs() < 1e-12);
        // Perfect negative linear relation.
        assert!((m.values[0][1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_correlates_as_nan() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            (0..5)
                .map(|i| {
                    row(&[
                        ("a", CellValue::Float(i as f64)),
                        ("b", CellValue::Float(7.0)),
                    ])
                })
                .collect(),
        );

        let m = correlation_matrix(&ds);
        assert!(m.values[0][1].is_nan());
        assert!(m.values[1][1].is_nan());
        assert!((m.values[0][0] - 1.0).abs() < 1e-12);
    }
}
