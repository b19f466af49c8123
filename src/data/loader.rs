use std::collections::BTreeMap;
use std::path::Path;

use crate::data::model::{CellValue, ColumnType, Dataset, Record, REQUIRED_COLUMNS};
use crate::error::DashError;

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load the sales table from a comma-delimited UTF-8 file with a header row.
///
/// The required schema columns must be present and their cells must parse to
/// the declared type (empty cells count as missing). All other columns are
/// typed per cell: integer, then float, then text.
pub fn load_csv(path: &Path) -> Result<Dataset, DashError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    for (name, _) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == name) {
            return Err(DashError::MissingColumn(name.to_string()));
        }
    }

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let mut values = BTreeMap::new();

        for (col_idx, raw) in record.iter().enumerate() {
            let column = &headers[col_idx];
            let value = match declared_type(column) {
                Some(ty) => parse_typed(raw, ty).ok_or_else(|| DashError::BadCell {
                    column: column.clone(),
                    row: row_no,
                    value: raw.to_string(),
                    expected: ty.describe(),
                })?,
                None => parse_cell(raw),
            };
            values.insert(column.clone(), value);
        }

        rows.push(Record { values });
    }

    Ok(Dataset::new(headers, rows))
}

fn declared_type(column: &str) -> Option<ColumnType> {
    REQUIRED_COLUMNS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, ty)| *ty)
}

/// Parse a cell against a declared schema type. Empty cells are missing.
fn parse_typed(raw: &str, ty: ColumnType) -> Option<CellValue> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(CellValue::Missing);
    }
    match ty {
        ColumnType::Integer => raw.parse::<i64>().ok().map(CellValue::Integer),
        ColumnType::Float => {
            if let Ok(i) = raw.parse::<i64>() {
                Some(CellValue::Integer(i))
            } else {
                raw.parse::<f64>().ok().map(CellValue::Float)
            }
        }
        ColumnType::Text => Some(CellValue::Text(raw.to_string())),
    }
}

/// Best-effort typing for columns outside the declared schema.
fn parse_cell(raw: &str) -> CellValue {
    let raw = raw.trim();
    if raw.is_empty() {
        return CellValue::Missing;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    const HEADER: &str = "SalePrice,Gr Liv Area,Year Built,Neighborhood,Lot Area\n";

    #[test]
    fn loads_rows_with_per_cell_typing() {
        let file = write_csv(&format!(
            "{HEADER}215000,1656,1960,NAmes,31770\n105000,896,1961,NAmes,\n"
        ));
        let ds = load_csv(file.path()).expect("load");

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].price(), Some(215000.0));
        assert_eq!(ds.rows[0].year(), Some(1960));
        assert_eq!(ds.rows[0].neighborhood(), Some("NAmes"));
        assert!(ds.rows[1].get("Lot Area").is_missing());
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let file = write_csv("SalePrice,Gr Liv Area,Year Built\n215000,1656,1960\n");
        match load_csv(file.path()) {
            Err(DashError::MissingColumn(col)) => assert_eq!(col, "Neighborhood"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn mistyped_cell_is_a_schema_error() {
        let file = write_csv(&format!("{HEADER}215000,1656,unknown,NAmes,31770\n"));
        match load_csv(file.path()) {
            Err(DashError::BadCell { column, row, .. }) => {
                assert_eq!(column, "Year Built");
                assert_eq!(row, 0);
            }
            other => panic!("expected BadCell, got {other:?}"),
        }
    }

    #[test]
    fn ragged_row_is_a_load_error() {
        let file = write_csv(&format!("{HEADER}215000,1656,1960,NAmes\n"));
        assert!(matches!(load_csv(file.path()), Err(DashError::Load(_))));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = load_csv(Path::new("/nonexistent/sales.csv"));
        assert!(matches!(result, Err(DashError::Load(_))));
    }
}
