use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the sales table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what a CSV column can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Missing,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as an `f64` for aggregation and regression.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Interpret the cell as an integer (construction years).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// Schema – explicit column typing, validated at load time
// ---------------------------------------------------------------------------

/// Expected type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Float,
    Integer,
    Text,
}

impl ColumnType {
    pub fn describe(self) -> &'static str {
        match self {
            ColumnType::Float => "a number",
            ColumnType::Integer => "an integer",
            ColumnType::Text => "text",
        }
    }
}

/// Column names the pipeline depends on.
pub const PRICE: &str = "SalePrice";
pub const LIVING_AREA: &str = "Gr Liv Area";
pub const YEAR_BUILT: &str = "Year Built";
pub const NEIGHBORHOOD: &str = "Neighborhood";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

/// Columns every input file must carry, with their declared types.
pub const REQUIRED_COLUMNS: [(&str, ColumnType); 4] = [
    (PRICE, ColumnType::Float),
    (LIVING_AREA, ColumnType::Float),
    (YEAR_BUILT, ColumnType::Integer),
    (NEIGHBORHOOD, ColumnType::Text),
];

// ---------------------------------------------------------------------------
// Record – one sale (one row of the source table)
// ---------------------------------------------------------------------------

/// A single recorded sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Column name → value.
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&CellValue::Missing)
    }

    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.get(column).as_f64()
    }

    pub fn year(&self) -> Option<i64> {
        self.get(YEAR_BUILT).as_i64()
    }

    pub fn price(&self) -> Option<f64> {
        self.numeric(PRICE)
    }

    pub fn neighborhood(&self) -> Option<&str> {
        match self.get(NEIGHBORHOOD) {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete table
// ---------------------------------------------------------------------------

/// The full sales table with precomputed column indices.
///
/// Mutated only by the cleaner (column/row removal); every later step
/// derives filtered copies and leaves the base dataset alone.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column names in header order.
    pub columns: Vec<String>,
    /// All sales (rows).
    pub rows: Vec<Record>,
    /// Sorted unique neighborhood names.
    pub neighborhoods: BTreeSet<String>,
}

impl Dataset {
    /// Build a dataset and its indices from rows.
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
        let neighborhoods = rows
            .iter()
            .filter_map(|r| r.neighborhood().map(str::to_string))
            .collect();
        Dataset {
            columns,
            rows,
            neighborhoods,
        }
    }

    /// Number of sales.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// All values of a column interpreted as numbers, missing cells skipped.
    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.numeric(column))
            .collect()
    }

    /// Columns whose non-missing cells are all numeric (and at least one is).
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|col| {
                let mut seen_number = false;
                for row in &self.rows {
                    match row.get(col) {
                        CellValue::Missing => {}
                        v if v.as_f64().is_some() => seen_number = true,
                        _ => return false,
                    }
                }
                seen_number
            })
            .cloned()
            .collect()
    }

    /// Min/max of a numeric column, `None` when no value is present.
    pub fn column_range(&self, column: &str) -> Option<(f64, f64)> {
        let values = self.numeric_column(column);
        if values.is_empty() {
            return None;
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        Record {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn numeric_columns_rejects_mixed_text() {
        let ds = Dataset::new(
            vec!["SalePrice".into(), "Neighborhood".into()],
            vec![
                record(&[
                    ("SalePrice", CellValue::Integer(100_000)),
                    ("Neighborhood", CellValue::Text("OldTown".into())),
                ]),
                record(&[
                    ("SalePrice", CellValue::Float(155_500.0)),
                    ("Neighborhood", CellValue::Text("Sawyer".into())),
                ]),
            ],
        );
        assert_eq!(ds.numeric_columns(), vec!["SalePrice".to_string()]);
    }

    #[test]
    fn numeric_columns_tolerates_missing_cells() {
        let ds = Dataset::new(
            vec!["Lot Area".into()],
            vec![
                record(&[("Lot Area", CellValue::Missing)]),
                record(&[("Lot Area", CellValue::Integer(8450))]),
            ],
        );
        assert_eq!(ds.numeric_columns(), vec!["Lot Area".to_string()]);
    }

    #[test]
    fn column_range_spans_min_and_max() {
        let ds = Dataset::new(
            vec!["SalePrice".into()],
            vec![
                record(&[("SalePrice", CellValue::Integer(120_000))]),
                record(&[("SalePrice", CellValue::Integer(90_000))]),
                record(&[("SalePrice", CellValue::Integer(200_000))]),
            ],
        );
        assert_eq!(ds.column_range("SalePrice"), Some((90_000.0, 200_000.0)));
        assert_eq!(ds.column_range("Garage Area"), None);
    }

    #[test]
    fn neighborhood_index_is_sorted_and_deduplicated() {
        let ds = Dataset::new(
            vec!["Neighborhood".into()],
            vec![
                record(&[("Neighborhood", CellValue::Text("Sawyer".into()))]),
                record(&[("Neighborhood", CellValue::Text("OldTown".into()))]),
                record(&[("Neighborhood", CellValue::Text("Sawyer".into()))]),
            ],
        );
        let names: Vec<_> = ds.neighborhoods.iter().cloned().collect();
        assert_eq!(names, vec!["OldTown".to_string(), "Sawyer".to_string()]);
    }
}
