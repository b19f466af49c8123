use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between loading a file and rendering.
///
/// Load and schema failures abort the whole load; `TooFewRows` only takes
/// down the prediction panel.
#[derive(Debug, Error)]
pub enum DashError {
    /// File missing, unreadable, or malformed (inconsistent field counts).
    #[error("failed to read dataset: {0}")]
    Load(#[from] csv::Error),

    /// A schema column the pipeline depends on is absent.
    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    /// A cell does not parse to the type the schema declares.
    #[error("column '{column}', row {row}: '{value}' is not {expected}")]
    BadCell {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    /// Too few usable rows to fit the regression.
    #[error("need at least {needed} rows to fit the price model, have {have}")]
    TooFewRows { needed: usize, have: usize },
}
