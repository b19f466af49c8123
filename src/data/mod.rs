/// Data layer: core types, loading, cleaning, and filtering.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///     ┌──────────┐
///     │  loader   │  parse + validate schema → Dataset
///     └──────────┘
///          │
///          ▼
///     ┌──────────┐
///     │  clean    │  drop sparse columns, drop outlier prices
///     └──────────┘
///          │
///          ▼
///     ┌──────────┐
///     │  filter   │  apply FilterSpec → filtered Dataset copy
///     └──────────┘
/// ```
pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
