use crate::data::model::{Dataset, LATITUDE, LONGITUDE};

// ---------------------------------------------------------------------------
// Geographic view of the sales
// ---------------------------------------------------------------------------

/// One map marker: a sale with both coordinates present.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMarker {
    pub lat: f64,
    pub lon: f64,
    /// Shown next to the marker ("Price: 189000").
    pub label: String,
    /// Used for marker coloring.
    pub neighborhood: Option<String>,
}

/// Map data, or a notice that the dataset carries no coordinates.
/// The rest of the dashboard renders either way.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoView {
    Unavailable,
    Map {
        /// Mean of the non-missing coordinates.
        center: (f64, f64),
        markers: Vec<GeoMarker>,
    },
}

/// Build the map view. `Unavailable` when either coordinate column is
/// absent, or when no row carries a complete coordinate pair.
pub fn geo_view(dataset: &Dataset) -> GeoView {
    if !dataset.has_column(LATITUDE) || !dataset.has_column(LONGITUDE) {
        return GeoView::Unavailable;
    }

    let lats = dataset.numeric_column(LATITUDE);
    let lons = dataset.numeric_column(LONGITUDE);
    if lats.is_empty() || lons.is_empty() {
        return GeoView::Unavailable;
    }

    let center = (
        lats.iter().sum::<f64>() / lats.len() as f64,
        lons.iter().sum::<f64>() / lons.len() as f64,
    );

    let markers = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let lat = row.numeric(LATITUDE)?;
            let lon = row.numeric(LONGITUDE)?;
            let label = match row.price() {
                Some(p) => format!("Price: {p:.0}"),
                None => "Price: n/a".to_string(),
            };
            Some(GeoMarker {
                lat,
                lon,
                label,
                neighborhood: row.neighborhood().map(str::to_string),
            })
        })
        .collect();

    GeoView::Map { center, markers }
}
