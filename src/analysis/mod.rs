/// Derived views: aggregations, map data, and the price predictor.
///
/// Everything here is read-only over a (possibly filtered) `Dataset` and
/// recomputed on every render cycle; nothing is cached.
pub mod aggregate;
pub mod geo;
pub mod regression;
