use std::collections::BTreeSet;

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// FilterSpec – the user-selected constraints for one render cycle
// ---------------------------------------------------------------------------

/// Neighborhood selection. `All` short-circuits the predicate; an empty
/// `Only` set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighborhoodFilter {
    All,
    Only(BTreeSet<String>),
}

impl NeighborhoodFilter {
    pub fn matches(&self, neighborhood: Option<&str>) -> bool {
        match self {
            NeighborhoodFilter::All => true,
            NeighborhoodFilter::Only(selected) => {
                neighborhood.is_some_and(|n| selected.contains(n))
            }
        }
    }
}

/// The current filter constraints, rebuilt from UI state on every
/// interaction. All bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub price: (f64, f64),
    pub years: (i64, i64),
    pub neighborhoods: NeighborhoodFilter,
}

impl FilterSpec {
    /// A spec matching every row of the given dataset.
    pub fn covering(dataset: &Dataset) -> Self {
        let price = dataset
            .column_range(crate::data::model::PRICE)
            .unwrap_or((0.0, 0.0));
        let years = dataset
            .column_range(crate::data::model::YEAR_BUILT)
            .map(|(lo, hi)| (lo as i64, hi as i64))
            .unwrap_or((0, 0));
        FilterSpec {
            price,
            years,
            neighborhoods: NeighborhoodFilter::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Apply the three predicates conjunctively and return the matching subset.
///
/// Rows with a missing price or construction year fail the corresponding
/// range predicate. Pure function of its inputs; an empty result is fine.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let rows: Vec<_> = dataset
        .rows
        .iter()
        .filter(|row| {
            let price_ok = row
                .price()
                .is_some_and(|p| p >= spec.price.0 && p <= spec.price.1);
            let year_ok = row
                .year()
                .is_some_and(|y| y >= spec.years.0 && y <= spec.years.1);
            price_ok && year_ok && spec.neighborhoods.matches(row.neighborhood())
        })
        .cloned()
        .collect();

    Dataset::new(dataset.columns.clone(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record, NEIGHBORHOOD, PRICE, YEAR_BUILT};

    fn sale(price: f64, year: i64, neighborhood: &str) -> Record {
        Record {
            values: [
                (PRICE.to_string(), CellValue::Float(price)),
                (YEAR_BUILT.to_string(), CellValue::Integer(year)),
                (
                    NEIGHBORHOOD.to_string(),
                    CellValue::Text(neighborhood.to_string()),
                ),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec![PRICE.into(), YEAR_BUILT.into(), NEIGHBORHOOD.into()],
            vec![
                sale(100_000.0, 1995, "OldTown"),
                sale(150_000.0, 2000, "Sawyer"),
                sale(99_999_999.0, 1987, "NoRidge"),
            ],
        )
    }

    #[test]
    fn covering_spec_returns_everything() {
        let ds = dataset();
        let filtered = apply(&ds, &FilterSpec::covering(&ds));
        assert_eq!(filtered.len(), ds.len());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let spec = FilterSpec {
            price: (100_000.0, 200_000.0),
            years: (1990, 2005),
            neighborhoods: NeighborhoodFilter::All,
        };
        let once = apply(&ds, &spec);
        let twice = apply(&once, &spec);
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.rows, twice.rows);
    }

    #[test]
    fn year_range_alone_selects_the_matching_sale() {
        let ds = dataset();
        let spec = FilterSpec {
            price: (0.0, f64::MAX),
            years: (2000, 2000),
            neighborhoods: NeighborhoodFilter::All,
        };
        let filtered = apply(&ds, &spec);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows[0].neighborhood(), Some("Sawyer"));
    }

    #[test]
    fn neighborhood_selection_conjoins_with_ranges() {
        let ds = dataset();
        let spec = FilterSpec {
            price: (0.0, f64::MAX),
            years: (1980, 2010),
            neighborhoods: NeighborhoodFilter::Only(
                ["OldTown".to_string()].into_iter().collect(),
            ),
        };
        let filtered = apply(&ds, &spec);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows[0].price(), Some(100_000.0));
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let ds = dataset();
        let spec = FilterSpec {
            price: (0.0, f64::MAX),
            years: (1900, 2100),
            neighborhoods: NeighborhoodFilter::Only(BTreeSet::new()),
        };
        assert!(apply(&ds, &spec).is_empty());
    }

    #[test]
    fn rows_missing_a_year_fail_the_year_predicate() {
        let mut record = sale(120_000.0, 2001, "Sawyer");
        record
            .values
            .insert(YEAR_BUILT.to_string(), CellValue::Missing);
        let ds = Dataset::new(
            vec![PRICE.into(), YEAR_BUILT.into(), NEIGHBORHOOD.into()],
            vec![record],
        );
        let filtered = apply(&ds, &FilterSpec::covering(&ds));
        assert!(filtered.is_empty());
    }
}
