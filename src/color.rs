use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette (neighborhood colors)
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Maps neighborhood names to distinct colours for the sales map.
#[derive(Debug, Clone)]
pub struct NeighborhoodColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl NeighborhoodColors {
    pub fn new(neighborhoods: &BTreeSet<String>) -> Self {
        let palette = generate_palette(neighborhoods.len());
        let mapping = neighborhoods
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();
        NeighborhoodColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, neighborhood: Option<&str>) -> Color32 {
        neighborhood
            .and_then(|n| self.mapping.get(n).copied())
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging colormap (correlation heatmap cells)
// ---------------------------------------------------------------------------

/// Map a correlation in [-1, 1] to a blue-white-red diverging colour.
/// NaN (undefined correlation) renders as neutral gray.
pub fn diverging(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::DARK_GRAY;
    }
    let t = (value.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;

    let blue = Srgb::new(0.23_f32, 0.30, 0.75).into_linear();
    let white = Srgb::new(0.95_f32, 0.95, 0.95).into_linear();
    let red = Srgb::new(0.71_f32, 0.02, 0.15).into_linear();

    let mixed = if t < 0.5 {
        blue.mix(white, t * 2.0)
    } else {
        white.mix(red, (t - 0.5) * 2.0)
    };
    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
